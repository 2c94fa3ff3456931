//! Referee one game of chess over stdin/stdout.

use std::io;

use anyhow::Result;
use tracing::info;

use arbiter_referee::Referee;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("arbiter starting");

    let stdin = io::stdin();
    let mut referee = Referee::new(io::stdout());
    referee.run(stdin.lock())?;
    Ok(())
}
