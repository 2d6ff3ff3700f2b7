use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing::{warn, Level};

mod calc;
mod error;
mod grades;
mod import;
mod models;
mod motivation;
mod present;
mod report;
mod session;
mod telemetry;
mod tier;
mod validate;

use grades::GradeScale;
use models::{SubjectEntry, TermSlot};
use motivation::{MotivationClient, MotivationConfig};
use session::Session;
use validate::RawSubject;

#[derive(Parser)]
#[command(name = "gpa-calculator")]
#[command(about = "SGPA and CGPA calculator with motivational feedback", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(flatten)]
    motivation: MotivationArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MotivationArgs {
    /// Endpoint that turns a score into a motivational message
    #[arg(
        long,
        env = "GPA_MOTIVATION_URL",
        default_value = motivation::DEFAULT_ENDPOINT,
        global = true
    )]
    motivation_url: String,
    #[arg(
        long,
        env = "GPA_MOTIVATION_TIMEOUT_SECS",
        default_value_t = motivation::DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    motivation_timeout_secs: u64,
    /// Skip the motivational message entirely
    #[arg(long, global = true)]
    no_motivation: bool,
}

impl MotivationArgs {
    fn config(&self) -> MotivationConfig {
        let config = MotivationConfig::new(&self.motivation_url)
            .with_timeout(Duration::from_secs(self.motivation_timeout_secs));
        if self.no_motivation {
            config.disabled()
        } else {
            config
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the grade scale
    Grades,
    /// Compute the SGPA for one term
    #[command(group(
        ArgGroup::new("input")
            .args(["subjects", "csv"])
            .required(true)
            .multiple(false)
    ))]
    Sgpa {
        /// A subject as [NAME=]GRADE:CREDITS, repeatable
        #[arg(long = "subject", value_name = "[NAME=]GRADE:CREDITS")]
        subjects: Vec<String>,
        /// CSV file with grade,credits (and optional subject) columns
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Fold a new term into a cumulative GPA
    Cgpa {
        #[arg(long, allow_negative_numbers = true)]
        past_score: String,
        #[arg(long, allow_negative_numbers = true)]
        past_credits: String,
        #[arg(long, allow_negative_numbers = true)]
        current_score: String,
        #[arg(long, allow_negative_numbers = true)]
        current_credits: String,
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown report for a term
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Check that the motivation endpoint answers
    CheckMotivation,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    telemetry::init_tracing(cli.log_json, level);

    let scale = GradeScale::standard()?;
    let config = cli.motivation.config();

    match cli.command {
        Commands::Grades => {
            println!("Grade scale ({} grades):", scale.len());
            for grade in scale.iter() {
                println!("- {} ({} points)", grade.label, grade.points);
            }
        }
        Commands::Sgpa {
            subjects,
            csv,
            json,
        } => {
            let rows = match csv {
                Some(path) => import::read_subjects(&path)?,
                None => subjects.iter().map(|arg| RawSubject::from_arg(arg)).collect(),
            };
            let result = calc::sgpa_from_raw(&scale, &rows)?;

            let session = open_session(config);
            let pending = session.submit(result);
            present::present(&session, pending, json, &mut std::io::stdout()).await?;
        }
        Commands::Cgpa {
            past_score,
            past_credits,
            current_score,
            current_credits,
            json,
        } => {
            let past = validate::parse_term(TermSlot::Past, &past_score, &past_credits)?;
            let current =
                validate::parse_term(TermSlot::Current, &current_score, &current_credits)?;
            let result = calc::cgpa(&past, &current)?;

            let session = open_session(config);
            let pending = session.submit(result);
            present::present(&session, pending, json, &mut std::io::stdout()).await?;
        }
        Commands::Report { csv, out } => {
            let rows = import::read_subjects(&csv)?;
            let entries: Vec<SubjectEntry> = validate::parse_subjects(&scale, &rows)?;
            let result = calc::sgpa(&scale, &entries)?;

            let session = open_session(config);
            let pending = session.submit(result);
            present::settle(pending).await;

            let card = session
                .current()
                .context("no result was recorded for this report")?;
            let report = report::build_report(&entries, &card);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::CheckMotivation => {
            let client = MotivationClient::new(config)?;
            let message = client
                .probe()
                .await
                .with_context(|| format!("{} did not answer", client.config().endpoint))?;
            println!("Motivation endpoint OK: {message}");
        }
    }

    Ok(())
}

fn open_session(config: MotivationConfig) -> Session {
    if !config.enabled {
        return Session::offline();
    }
    match MotivationClient::new(config) {
        Ok(client) => Session::new(Arc::new(client)),
        Err(err) => {
            warn!(error = %err, "motivation client unavailable");
            Session::offline()
        }
    }
}
