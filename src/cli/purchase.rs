//! Purchase CLI commands
//!
//! Logging, listing, editing, trashing and purging purchases, plus CSV
//! import/export.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_purchase_details, format_purchase_short, format_purchase_table, format_range,
};
use crate::error::{AllowanceError, AllowanceResult};
use crate::models::DateRange;
use crate::services::{
    parse_amount, CreatePurchaseInput, PeriodService, PurchaseFilter, PurchaseService,
};
use crate::storage::Storage;

/// Purchase subcommands
#[derive(Subcommand, Debug)]
pub enum PurchaseCommands {
    /// Log a purchase
    #[command(alias = "spend")]
    Add {
        /// Amount spent (e.g. "12.50")
        amount: String,
        /// What it was for
        description: Option<String>,
        /// Purchase date (YYYY-MM-DD, "today", "yesterday"), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List purchases, newest first
    #[command(alias = "ls")]
    List {
        /// Only the budget week containing this date
        #[arg(short, long, conflicts_with_all = ["from", "to", "range"])]
        week: Option<String>,
        /// Date range as YYYY-MM-DD..YYYY-MM-DD
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        range: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Number of purchases to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include purchases in the trash
        #[arg(short, long)]
        all: bool,
    },

    /// Show a purchase
    Show {
        /// Purchase ID (full or short, e.g. "pur-1a2b3c4d")
        id: String,
    },

    /// Change a purchase
    Edit {
        /// Purchase ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Move a purchase to the trash
    #[command(alias = "rm")]
    Delete {
        /// Purchase ID
        id: String,
    },

    /// Bring a purchase back from the trash
    Restore {
        /// Purchase ID
        id: String,
    },

    /// Permanently remove a purchase from the trash
    Purge {
        /// Purchase ID
        id: String,
    },

    /// List trashed purchases of a week
    Trash {
        /// Any date in the week, defaults to today
        #[arg(short, long)]
        week: Option<String>,
    },

    /// Import purchases from a CSV file with a date,amount,description header
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Export purchases to CSV
    Export {
        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include purchases in the trash
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a purchase command
pub fn handle_purchase_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: PurchaseCommands,
) -> AllowanceResult<()> {
    let service = PurchaseService::new(storage);
    let periods = PeriodService::new(settings);
    let currency = settings.currency_code.as_str();

    match cmd {
        PurchaseCommands::Add {
            amount,
            description,
            date,
        } => {
            let date = match date {
                Some(d) => periods.parse_date(&d, today)?,
                None => today,
            };

            let purchase = service.create(CreatePurchaseInput {
                amount: parse_amount(&amount)?,
                date,
                description,
            })?;

            println!("Logged purchase: {}", format_purchase_short(&purchase, currency));

            let threshold = settings.big_purchase_threshold();
            if purchase.amount >= threshold {
                println!(
                    "  That counts as a big purchase (at least {:.2} this week).",
                    threshold
                );
            }
        }

        PurchaseCommands::List {
            week,
            range,
            from,
            to,
            limit,
            all,
        } => {
            let mut filter = PurchaseFilter::new().limit(limit);
            if all {
                filter = filter.include_deleted();
            }

            if let Some(week) = week {
                let range = periods.week_containing(periods.parse_date(&week, today)?);
                println!("Purchases for {}", format_range(&range));
                filter = filter.range(range);
            } else if let Some(range) = range {
                let range = DateRange::parse(&range)
                    .map_err(|e| AllowanceError::Validation(e.to_string()))?;
                filter = filter.range(range);
            } else if let Some(from) = from {
                let start = periods.parse_date(&from, today)?;
                let end = match to {
                    Some(to) => periods.parse_date(&to, today)?,
                    None => today,
                };
                filter = filter.range(DateRange::new(start, end));
            }

            let purchases = service.list(filter)?;
            print!(
                "{}",
                format_purchase_table(&purchases, currency, settings.big_purchase_threshold())
            );
        }

        PurchaseCommands::Show { id } => {
            let purchase = service.find(&id)?;
            print!("{}", format_purchase_details(&purchase, currency));
        }

        PurchaseCommands::Edit {
            id,
            amount,
            date,
            description,
        } => {
            if amount.is_none() && date.is_none() && description.is_none() {
                println!("No changes specified. Use --amount, --date or --description.");
                return Ok(());
            }

            let found = service.find(&id)?;
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let date = date
                .as_deref()
                .map(|d| periods.parse_date(d, today))
                .transpose()?;

            let updated = service.update(found.id, amount, date, description.as_deref())?;
            println!("Updated purchase: {}", format_purchase_short(&updated, currency));
        }

        PurchaseCommands::Delete { id } => {
            let found = service.find(&id)?;
            let deleted = service.soft_delete(found.id)?;
            println!("Moved to trash: {}", format_purchase_short(&deleted, currency));
            println!("Run 'allowance purchase restore {}' to undo.", deleted.id);
        }

        PurchaseCommands::Restore { id } => {
            let found = service.find(&id)?;
            let restored = service.restore(found.id)?;
            println!("Restored purchase: {}", format_purchase_short(&restored, currency));
        }

        PurchaseCommands::Purge { id } => {
            let found = service.find(&id)?;
            let purged = service.purge(found.id)?;
            println!("Permanently removed: {}", format_purchase_short(&purged, currency));
        }

        PurchaseCommands::Trash { week } => {
            let base = match week {
                Some(w) => periods.parse_date(&w, today)?,
                None => today,
            };
            let range = periods.week_containing(base);
            let trashed = service.trash(&range)?;

            println!("Trash for {}", format_range(&range));
            print!(
                "{}",
                format_purchase_table(&trashed, currency, settings.big_purchase_threshold())
            );
        }

        PurchaseCommands::Import { file } => {
            let handle = File::open(&file).map_err(|e| {
                AllowanceError::Io(format!("Failed to open {}: {}", file.display(), e))
            })?;
            let summary = service.import_csv(BufReader::new(handle))?;

            println!(
                "Imported {} purchases from {}",
                summary.imported,
                file.display()
            );
            if !summary.skipped.is_empty() {
                println!("Skipped {} rows:", summary.skipped.len());
                for (line, reason) in &summary.skipped {
                    println!("  line {}: {}", line, reason);
                }
            }
        }

        PurchaseCommands::Export { output, all } => match output {
            Some(path) => {
                let handle = File::create(&path).map_err(|e| {
                    AllowanceError::Io(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let count = service.export_csv(BufWriter::new(handle), all)?;
                println!("Exported {} purchases to {}", count, path.display());
            }
            None => {
                service.export_csv(io::stdout().lock(), all)?;
            }
        },
    }

    Ok(())
}
