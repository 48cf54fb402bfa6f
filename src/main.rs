use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use allowance::cli::{
    handle_config_command, handle_details_command, handle_init_command, handle_purchase_command,
    handle_summary_command, ConfigCommands, InitArgs, PurchaseCommands,
};
use allowance::config::{paths::AllowancePaths, settings::Settings};
use allowance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "allowance",
    version,
    about = "Rolling daily allowance for your monthly and weekly budgets",
    long_about = "allowance-cli spreads a monthly and a weekly budget evenly over \
                  their days and shows how much you can still spend today, \
                  based on the purchases you log."
)]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "ALLOWANCE_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up budgets and create the data files
    Init(InitArgs),

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Purchase management commands
    #[command(subcommand, alias = "p")]
    Purchase(PurchaseCommands),

    /// Show the weekly and monthly dashboard
    #[command(alias = "status")]
    Summary {
        /// Show the week containing this date instead of the current one
        #[arg(short, long)]
        week: Option<String>,
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a week's purchases day by day
    Details {
        /// Any date in the week, defaults to today
        #[arg(short, long)]
        start: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "allowance=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date '{}', expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let today = resolve_today(cli.today.as_deref())?;
    let paths = AllowancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("allowance-cli - rolling daily allowance");
            println!();
            println!("Run 'allowance init' to set up your budgets.");
            println!("Run 'allowance --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init(args) => handle_init_command(&paths, &settings, args)?,
        Commands::Config { action } => handle_config_command(&paths, &settings, action)?,
        command => {
            if !paths.is_initialized() {
                bail!("allowance-cli is not set up yet. Run 'allowance init' first.");
            }

            let mut storage = Storage::new(paths.clone())?;
            storage.load_all()?;

            match command {
                Commands::Purchase(cmd) => handle_purchase_command(&storage, &settings, today, cmd)?,
                Commands::Summary { week, json } => {
                    handle_summary_command(&storage, &settings, today, week, json)?
                }
                Commands::Details { start, output } => {
                    handle_details_command(&storage, &settings, today, start, output)?
                }
                Commands::Init(_) | Commands::Config { .. } => {}
            }
        }
    }

    Ok(())
}
