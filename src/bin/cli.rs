use anyhow::Result;
use clap::Parser;
use sheetlink::cli;
use sheetlink::config::SessionConfig;

fn main() -> Result<()> {
    cli::init_tracing();
    let args = cli::Cli::parse();
    let config = SessionConfig::from_args(args.config)?;
    let payload = cli::run(config, args.command)?;
    cli::output::emit_value(&payload, args.compact)?;
    Ok(())
}
