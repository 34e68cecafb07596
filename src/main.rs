use anyhow::Result;
use clap::Parser;
use fiado::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    fiado::init_tracing(cli.verbose);
    cli.run()
}
