pub mod input;
pub mod types;

use std::future::Future;
use std::time::Instant;

use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::curves::{Plot, SampleGrid};
use crate::error::{DomainError, SessionError};
use crate::metrics;
use crate::optimizer::Solver;
use crate::policy::InputPolicy;
use crate::scenario::{MarketScenario, Parameter};

pub use input::spawn_line_reader;
pub use types::{parse_command, Frame, ParameterChange};

/// Current scenario plus everything needed to turn a change into a frame.
/// A rejected change never touches the current scenario.
pub struct Session {
    scenario: MarketScenario,
    solver: Box<dyn Solver>,
    grid: SampleGrid,
    policy: InputPolicy,
    seq: u64,
}

impl Session {
    pub fn new(
        scenario: MarketScenario,
        solver: Box<dyn Solver>,
        grid: SampleGrid,
        policy: InputPolicy,
    ) -> Result<Self, SessionError> {
        policy.check(&scenario)?;
        Ok(Self {
            scenario,
            solver,
            grid,
            policy,
            seq: 0,
        })
    }

    pub fn scenario(&self) -> &MarketScenario {
        &self.scenario
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Frame for the current scenario, numbered like the last accepted change.
    pub fn initial_frame(&self) -> Result<Frame, DomainError> {
        let plot = Plot::compute(self.solver.as_ref(), &self.scenario, &self.grid)?;
        Ok(Frame {
            seq: self.seq,
            plot,
        })
    }

    /// Under a unit-sum policy, moving one exponent moves the other to
    /// `1 - value` so the pair stays normalized.
    pub fn apply(&mut self, change: ParameterChange) -> Result<Frame, SessionError> {
        let mut candidate = self.scenario.with(change.parameter, change.value)?;
        if self.policy.require_unit_sum {
            let complement = match change.parameter {
                Parameter::Alpha => Some(Parameter::Beta),
                Parameter::Beta => Some(Parameter::Alpha),
                _ => None,
            };
            if let Some(other) = complement {
                candidate = candidate.with(other, 1.0 - change.value)?;
            }
        }
        self.policy.check(&candidate)?;
        let plot = Plot::compute(self.solver.as_ref(), &candidate, &self.grid)?;

        self.scenario = candidate;
        self.seq += 1;
        Ok(Frame {
            seq: self.seq,
            plot,
        })
    }

    /// Parses and applies one input line. `Ok(None)` for blank/comment lines.
    pub fn apply_line(&mut self, line: &str) -> Result<Option<Frame>, SessionError> {
        match parse_command(line)? {
            Some(change) => self.apply(change).map(Some),
            None => Ok(None),
        }
    }
}

/// Emits the initial frame, then one frame per accepted input line.
/// Rejected lines are logged and counted; the session keeps going.
pub async fn run_session_worker(
    mut rx: mpsc::Receiver<String>,
    mut session: Session,
    frame_tx: mpsc::Sender<Frame>,
) -> anyhow::Result<()> {
    let solver = session.solver_name();
    info!(solver, scenario = ?session.scenario(), "session worker started");

    let initial = session.initial_frame()?;
    if frame_tx.send(initial).await.is_err() {
        warn!("frame channel closed before initial frame");
        return Ok(());
    }

    while let Some(line) = rx.recv().await {
        let started = Instant::now();

        match session.apply_line(&line) {
            Ok(Some(frame)) => {
                metrics::record_solve(solver);
                metrics::record_solve_latency_us(solver, started.elapsed().as_micros());
                metrics::record_utility(solver, frame.plot.optimum.u);

                debug!(
                    seq = frame.seq,
                    x1 = frame.plot.optimum.x1,
                    x2 = frame.plot.optimum.x2,
                    u = frame.plot.optimum.u,
                    "optimum recomputed"
                );

                if frame_tx.send(frame).await.is_err() {
                    warn!("frame channel closed, stopping session worker");
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(err) => {
                metrics::record_rejection(err.kind());
                warn!(kind = err.kind(), error = %err, %line, "change rejected");
            }
        }
    }

    info!("input channel closed, session worker shutting down");
    Ok(())
}

/// Writes each frame as one JSON line.
pub async fn run_frame_writer<W>(mut frame_rx: mpsc::Receiver<Frame>, mut out: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = frame_rx.recv().await {
        let mut line = serde_json::to_vec(&frame)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        out.flush().await?;
    }

    Ok(())
}

/// Drives the worker and writer until input ends, either of them fails, or
/// `shutdown` resolves. Returns the first failure.
pub async fn run<W, S>(
    session: Session,
    line_rx: mpsc::Receiver<String>,
    out: W,
    channel_buffer: usize,
    shutdown: S,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    let (frame_tx, frame_rx) = mpsc::channel(channel_buffer);
    let worker = run_session_worker(line_rx, session, frame_tx);
    let writer = run_frame_writer(frame_rx, out);
    tokio::pin!(worker, writer, shutdown);

    tokio::select! {
        res = &mut worker => {
            res.context("session worker failed")?;
            // The frame channel closed with the worker; drain what is queued.
            writer.await.context("frame writer failed")
        }
        res = &mut writer => {
            res.context("frame writer failed")?;
            worker.await.context("session worker failed")
        }
        _ = &mut shutdown => {
            info!("shutdown requested, stopping session");
            Ok(())
        }
    }
}
