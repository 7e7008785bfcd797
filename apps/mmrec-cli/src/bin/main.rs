use clap::Parser;

use mmrec_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    mmrec_cli::init_logging();
    let cli = Cli::parse();
    println!("{}", mmrec_cli::run(cli)?);
    Ok(())
}
