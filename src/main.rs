use anyhow::Result;
use tracing::info;

use redfin_uci::UciEngine;

fn main() -> Result<()> {
    // Logs go to stderr: stdout carries the UCI protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    info!("redfin starting");
    UciEngine::new().run()?;
    Ok(())
}
