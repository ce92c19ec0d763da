mod emit;
mod logging;
mod pipeline;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use recap_store::RecapConfig;

#[derive(Parser)]
#[command(
    name = "recap",
    version,
    about = "Summarize new activity in a Claude Code session transcript"
)]
struct Cli {
    /// Session transcript (JSONL)
    transcript: Option<PathBuf>,
    /// Number of trailing records to examine (default: 100)
    #[arg(long)]
    window: Option<usize>,
    /// Directory holding per-session dedup state (default: temp dir)
    #[arg(long)]
    state_dir: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            fail(first.trim_start_matches("error: "))
        }
    };
    logging::init();

    if let Err(e) = run(cli) {
        fail(&format!("{e:#}"));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(log_path) = cli.transcript else {
        anyhow::bail!("No transcript path provided");
    };
    let config = RecapConfig::load();
    let options = pipeline::PassOptions {
        window: cli
            .window
            .filter(|w| *w > 0)
            .unwrap_or_else(|| config.window()),
        state_dir: cli.state_dir.unwrap_or_else(|| config.state_dir()),
        log_path,
    };

    let summary = pipeline::run_pass(&options)?;
    emit::emit(&summary, &mut std::io::stdout().lock())?;
    Ok(())
}

/// The single diagnostic line written to stderr on failure.
fn error_line(msg: &str) -> String {
    format!("ERROR: {msg}")
}

fn fail(msg: &str) -> ! {
    eprintln!("{}", error_line(msg));
    std::process::exit(1);
}
