//! application entry point

use crate::tab::model::config::TabConfig;
use crate::tab::storage::file::{FileSink, DEFAULT_BILLS_DIR};
use crate::tab::terminal::Console;
use crate::tab::util::amount::round_cents;
use anyhow::Context;
use clap::Parser;
use derive_more::Display;
use log::{debug, info};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod tab;

const DEFAULT_LOG_FILTER: &str = "warn";
const DEV_DOTENV_PATH: &str = ".env.dev";

#[derive(Parser, Debug)]
#[command(name = "tab")]
#[command(
    about = "keep a running tab: add items, set a tip and save the breakdown",
    version,
    long_about = None
)]
struct Cli {
    #[arg(
        long,
        help = "Directory saved bills are written to. Falls back to BILLS_DIR, then ./bills",
        value_name = "DIR"
    )]
    bills_dir: Option<PathBuf>,
    #[arg(long, help = "Name of the bill, skips the naming prompt", value_name = "NAME")]
    name: Option<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();

    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    let dotenv_loaded = match env {
        Env::Prod | Env::Stg => false,
        Env::Dev => dotenvy::from_path(Path::new(DEV_DOTENV_PATH)).is_ok(),
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(DEFAULT_LOG_FILTER));
    debug!("env={} dotenv_loaded={}", env, dotenv_loaded);

    // c. run app
    let bills_dir = args
        .bills_dir
        .or_else(|| env::var_os("BILLS_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BILLS_DIR));
    let config = TabConfig::new(bills_dir, args.name);

    info!("tab is starting in env={}, config={:?}", env, config);

    let mut sink = FileSink::new(&config.bills_dir);
    debug!("bills will be written under {}", sink.dir().display());
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let saved = tab::run(&config, &mut console, &mut sink).context("bill was not saved")?;
    debug!("bill={} opened_at={}", saved.bill.name(), saved.bill.opened_at());
    println!(
        "bill for {} saved to {}, {} item(s), total {:.2}",
        saved.bill.name(),
        saved.location,
        saved.bill.items().len(),
        round_cents(saved.bill.total())
    );
    Ok(())
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    #[display("dev")]
    Dev,
    #[display("stg")]
    Stg,
    #[display("prod")]
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
