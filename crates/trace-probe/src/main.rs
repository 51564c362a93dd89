use anyhow::Result;
use clap::Parser;
use trace_probe::{run, Cli};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    print!("{}", run(&cli)?);
    Ok(())
}
