use std::io::BufRead;
use std::thread;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Forwards input lines to the session worker until EOF or until the
/// worker goes away.
///
/// Runs on its own OS thread: a blocking stdin read cannot be cancelled, and
/// a detached thread never holds up runtime shutdown.
pub fn spawn_line_reader<R>(
    reader: R,
    tx: mpsc::Sender<String>,
) -> anyhow::Result<thread::JoinHandle<anyhow::Result<()>>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || read_lines(reader, tx))
        .context("failed to spawn line reader thread")
}

fn read_lines<R: BufRead>(reader: R, tx: mpsc::Sender<String>) -> anyhow::Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        debug!(%line, "input line");
        if tx.blocking_send(line).is_err() {
            info!("session channel closed, stopping line reader");
            return Ok(());
        }
    }

    info!("end of input");
    Ok(())
}
