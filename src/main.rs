use clap::Parser;
use smeter::cli::Cli;
use smeter::observability;

fn main() -> anyhow::Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    cli.run()
}
