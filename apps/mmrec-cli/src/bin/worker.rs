use std::env;
use std::io;

use mmrec_rank::Worker;
use tracing::info;

/// Reads one JSON request per line on stdin and answers each on stdout.
/// Optional first argument: directory holding the config files.
fn main() -> anyhow::Result<()> {
    mmrec_cli::init_logging();
    let config_dir = env::args().nth(1);
    let worker = Worker::new(mmrec_cli::load_engine(config_dir.as_deref())?);
    info!(config_dir = config_dir.as_deref().unwrap_or("."), "worker ready");

    let handled = mmrec_cli::serve(&worker, io::stdin().lock(), io::stdout().lock())?;
    info!(handled, "input closed");
    Ok(())
}
