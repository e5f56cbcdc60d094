use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use country_stats::config::{self, Config};
use country_stats::session::{self, Session};
use country_stats::storage::Store;
use country_stats::Client;
use std::io::{self, Cursor};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "country-stats",
    version,
    about = "Look up countries, compare populations & log the results"
)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Endpoint the country name is appended to [env: COUNTRIES_API_URL].
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Request timeout in seconds, at least 1 (default 10) [env: API_TIMEOUT].
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
    /// File that successful lookups are appended to (default countries.txt) [env: COUNTRIES_FILE].
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for countries on stdin (the default).
    Interactive,
    /// Look up the given countries without prompting; the first is compared with the rest.
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Country names. Falls back to DEFAULT_COUNTRIES when omitted.
    names: Vec<String>,
}

fn main() -> Result<()> {
    // A missing .env is fine; everything has a default.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    let cfg = build_config(&cli.opts)?;
    match cli.cmd.unwrap_or(Command::Interactive) {
        Command::Interactive => cmd_interactive(&cfg),
        Command::Lookup(args) => cmd_lookup(&cfg, args),
    }
}

/// Environment (parsed only by `Config::from_env`) first, then explicit flags on top.
fn build_config(opts: &GlobalOpts) -> Result<Config> {
    let mut cfg = Config::from_env().context("load configuration")?;
    if let Some(url) = opts.base_url.as_deref() {
        cfg.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = opts.timeout {
        cfg.timeout = Duration::from_secs(secs);
    }
    if let Some(path) = opts.output.clone() {
        cfg.output_path = path;
    }
    Ok(cfg)
}

fn cmd_interactive(cfg: &Config) -> Result<()> {
    let client = Client::new(cfg)?;
    let store = Store::new(&cfg.output_path);
    let stdin = io::stdin();
    let mut session = Session::new(client, store, stdin.lock(), io::stdout());
    session.run().context("terminal i/o")?;
    Ok(())
}

fn cmd_lookup(cfg: &Config, args: LookupArgs) -> Result<()> {
    let names = if args.names.is_empty() {
        cfg.default_countries.clone()
    } else {
        args.names
    };
    if names.is_empty() {
        bail!("no country names given and {} is not set", config::ENV_DEFAULT_COUNTRIES);
    }

    let client = Client::new(cfg)?;
    let store = Store::new(&cfg.output_path);
    let input = Cursor::new(session::scripted_input(&names));
    let mut session = Session::new(client, store, input, io::stdout()).with_prompts(false);
    session.run().context("write report")?;
    eprintln!("Lookups logged to {}", cfg.output_path.display());
    Ok(())
}
