use anyhow::{bail, Context, Result};
use cardcycle_core::{
    parse_reference_date, reference_date_in, CreditAccount, CycleDateCalculator, DueRule,
    UpcomingClosureRanker, MAX_DUE_OFFSET_DAYS,
};
use cardcycle_ingest::{load_accounts_file, normalize, LoadReport};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

mod api;
mod config;
mod logging;
mod report;
mod state;

use config::Config;
use report::CardView;

#[derive(Parser, Debug)]
#[command(
    name = "cardcycle",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARDCYCLE_BUILD_SHA"), ")"),
    about = "Credit card closing, due and best-purchase dates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Milestones for a single closing/due day pair
    Cycle {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        closing_day: u32,

        #[arg(
            long,
            required_unless_present = "due_offset",
            value_parser = clap::value_parser!(u32).range(1..=31)
        )]
        due_day: Option<u32>,

        /// Days between closing and due date, instead of --due-day placement
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DUE_OFFSET_DAYS))
        )]
        due_offset: Option<u32>,

        #[command(flatten)]
        when: WhenArgs,
    },

    /// List every card with its cycle dates and limit usage
    Cards {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        when: WhenArgs,

        #[arg(long)]
        json: bool,
    },

    /// Show the active card that closes soonest
    Upcoming {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        when: WhenArgs,

        /// Override the urgency threshold in days
        #[arg(long)]
        urgency_days: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.cardcycle/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Card list exported as .json or .csv (default: ~/.cardcycle/cards.json)
    #[arg(long, conflicts_with = "api")]
    file: Option<PathBuf>,

    /// Fetch cards from the dashboard API configured in config.toml
    #[arg(long)]
    api: bool,
}

#[derive(Args, Debug)]
struct WhenArgs {
    /// Reference date YYYY-MM-DD (default: today in the configured timezone)
    #[arg(long = "on")]
    on: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Cycle {
            closing_day,
            due_day,
            due_offset,
            when,
        } => {
            let cfg = config::load_config()?;
            let reference = reference_date(&when, &cfg)?;
            let rule = match (due_offset, due_day) {
                (Some(days), _) => DueRule::DaysAfterClosing(days),
                (None, Some(day)) => DueRule::DayOfMonth(day),
                (None, None) => bail!("pass --due-day or --due-offset"),
            };
            let m = CycleDateCalculator::compute_with_rule(reference, closing_day, rule);
            let cycle = CycleDateCalculator::current_cycle(reference, closing_day);
            println!("Reference date: {reference}\n");
            print!("{}", report::render_milestones(&m, &cycle));
        }

        Command::Cards { source, when, json } => {
            let cfg = config::load_config()?;
            let reference = reference_date(&when, &cfg)?;
            let accounts = load_accounts(&source, &cfg).await?;
            let views: Vec<CardView<'_>> = accounts
                .iter()
                .map(|a| CardView::new(a, reference))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                print!("{}", report::render_cards(&views));
            }
        }

        Command::Upcoming {
            source,
            when,
            urgency_days,
            json,
        } => {
            let cfg = config::load_config()?;
            let reference = reference_date(&when, &cfg)?;
            let accounts = load_accounts(&source, &cfg).await?;

            let mut policy = cfg.urgency_policy();
            if let Some(days) = urgency_days {
                policy.threshold_days = days;
            }

            let result = UpcomingClosureRanker::rank_with_policy(&accounts, reference, policy);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_upcoming(result.as_ref()));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn reference_date(when: &WhenArgs, cfg: &Config) -> Result<NaiveDate> {
    match &when.on {
        Some(s) => parse_reference_date(s),
        None => reference_date_in(Utc::now(), &cfg.display.timezone),
    }
}

async fn load_accounts(source: &SourceArgs, cfg: &Config) -> Result<Vec<CreditAccount>> {
    let report = if source.api {
        normalize(api::fetch_account_records(cfg).await?)
    } else {
        let path = match &source.file {
            Some(p) => p.clone(),
            None => state::default_cards_path()?,
        };
        if !path.exists() {
            bail!("card list not found: {} (pass --file <path> or --api)", path.display());
        }
        let report = load_accounts_file(&path).with_context(|| format!("loading {}", path.display()))?;
        info!(path = %path.display(), cards = report.accounts.len(), "loaded card list");
        report
    };

    Ok(report_rejects(report))
}

fn report_rejects(report: LoadReport) -> Vec<CreditAccount> {
    for r in &report.rejected {
        eprintln!("skipping card {}: {}", r.id, r.error);
    }
    report.accounts
}
