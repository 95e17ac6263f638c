mod fixture;
mod seed;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use veriprop_core::app::App;
use veriprop_core::config::Settings;
use veriprop_core::domain::UserId;
use veriprop_core::observability::{LogFormat, init_tracing};
use veriprop_core::ports::{Clock, FixedClock, SystemClock, UlidGenerator};
use veriprop_core::query::RawQuery;

use crate::fixture::Fixture;
use crate::seed::SeedPlan;

/// Query and report on a marketplace data fixture.
#[derive(Parser, Debug)]
#[command(name = "veriprop", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML settings file (overridden by VERIPROP__* variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// pretty | json
    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of a collection
    List {
        resource: Resource,

        #[arg(long)]
        data: PathBuf,

        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,

        /// Status value, comma separated list, or "all"
        #[arg(short, long)]
        status: Option<String>,

        /// Zero-based; invalid values are clamped
        #[arg(long, allow_hyphen_values = true)]
        page: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        page_size: Option<String>,

        /// Extra filter, e.g. verifier_id=01HZ...
        #[arg(short, long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
    },
    /// Print lifecycle stats for one verifier's tasks
    Stats {
        #[arg(long)]
        verifier: UserId,

        #[arg(long)]
        data: PathBuf,

        /// Evaluate as of this RFC 3339 instant instead of the wall clock
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Generate a demo fixture
    Seed {
        #[arg(long, default_value_t = 25)]
        tasks: usize,

        #[arg(long, default_value_t = 3)]
        verifier_count: usize,

        #[arg(long, default_value_t = 2)]
        client_count: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resource {
    Users,
    Verifications,
    Tasks,
    Disputes,
    Payments,
    Messages,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty filter key in `{s}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("serializing output")?);
    Ok(())
}

fn load_app(data: &Path, settings: Settings, clock: Arc<dyn Clock>) -> Result<App> {
    Fixture::load(data)?.into_app(settings, clock)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

    match cli.command {
        Command::List {
            resource,
            data,
            query,
            status,
            page,
            page_size,
            filters,
        } => {
            let app = load_app(&data, settings, Arc::new(SystemClock))?;

            let mut raw = RawQuery::from_pairs(filters);
            raw.query = query.or(raw.query);
            raw.status = status.or(raw.status);
            raw.page = page.or(raw.page);
            raw.page_size = page_size.or(raw.page_size);

            match resource {
                Resource::Users => print_json(&app.list_users(&raw).await?),
                Resource::Verifications => print_json(&app.list_verifications(&raw).await?),
                Resource::Tasks => print_json(&app.list_tasks(&raw).await?),
                Resource::Disputes => print_json(&app.list_disputes(&raw).await?),
                Resource::Payments => print_json(&app.list_payments(&raw).await?),
                Resource::Messages => print_json(&app.list_messages(&raw).await?),
            }
        }
        Command::Stats { verifier, data, now } => {
            let clock: Arc<dyn Clock> = match now {
                Some(now) => Arc::new(FixedClock::new(now)),
                None => Arc::new(SystemClock),
            };
            let app = load_app(&data, settings, clock)?;
            let stats = app
                .task_stats(verifier)
                .await
                .with_context(|| format!("computing stats for {verifier}"))?;
            print_json(&stats)
        }
        Command::Seed {
            tasks,
            verifier_count,
            client_count,
            seed: rng_seed,
            output,
        } => {
            let clock = SystemClock;
            let now = clock.now();
            let ids = UlidGenerator::new(clock);
            let mut rng = match rng_seed {
                Some(value) => StdRng::seed_from_u64(value),
                None => StdRng::from_entropy(),
            };
            let plan = SeedPlan {
                tasks,
                verifiers: verifier_count,
                clients: client_count,
            };

            let json = seed::generate(&plan, &ids, &mut rng, now).to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), "fixture written");
                    Ok(())
                }
                None => {
                    println!("{json}");
                    Ok(())
                }
            }
        }
    }
}
