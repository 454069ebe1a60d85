use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use userstore::config::Config;
use userstore::file::format::Format;
use userstore::logging;
use userstore::session::{demo_steps, run_session, SessionOptions, TermConsole};

/// userstore - a scripted walk through a JSON or XML user list
#[derive(Parser)]
#[command(name = "userstore")]
#[command(version)]
#[command(about = "Show, update, insert and delete user records in a JSON or XML file", long_about = None)]
struct Cli {
    /// Storage format (default: from config, json)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Config file to use instead of ~/.config/userstore/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Copy the template over the working file even if it loads
    #[arg(long)]
    reset: bool,

    /// Do not wait for a keypress between steps
    #[arg(long)]
    no_pause: bool,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(format) = cli.format {
        config.format = format;
    }

    let mut options = SessionOptions::from_config(&config);
    options.reset = cli.reset;
    if cli.no_pause {
        options.pause = false;
    }

    let mut console = if options.pause {
        TermConsole::new()
    } else {
        TermConsole::non_interactive()
    };

    run_session(&config, options, &demo_steps(), &mut console)?;
    Ok(())
}
