//! Runs nesting jobs off the caller's task and streams their progress back over a channel.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::entities::{NestingResult, Piece};
use crate::nesting::NestingEngine;
use crate::report::{LogEvent, LogSink};
use crate::util::NestingConfig;

/// Input of one nesting job
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestingRequest {
    /// Fabric width in plotter units
    pub fabric_width: f64,
    pub segments: Vec<Piece>,
}

/// Message sent from a nesting worker to its caller.
///
/// A job emits any number of `Log` messages, followed by exactly one `Result` or `Error`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum WorkerMessage {
    Log(LogEvent),
    Result(NestingResult),
    Error(String),
}

/// Runs the job of `request` on the current task, sending its log events to `sink`.
pub async fn run_nesting_request(
    request: &NestingRequest,
    config: NestingConfig,
    sink: Arc<dyn LogSink>,
) -> Result<NestingResult> {
    let engine = NestingEngine::new(request.fabric_width, &request.segments, config, sink)?;
    Ok(engine.perform_nesting().await)
}

/// Spawns the job of `request` on a new tokio task.
///
/// The returned receiver yields the job's [`WorkerMessage`]s and is closed once the job has finished.
pub fn spawn_nesting_worker(
    request: NestingRequest,
    config: NestingConfig,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<WorkerMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        let log_tx = tx.clone();
        let sink: Arc<dyn LogSink> = Arc::new(move |event: LogEvent| {
            //the receiver may have been dropped, the job still runs to completion
            let _ = log_tx.send(WorkerMessage::Log(event));
        });

        info!(
            "[WORKER] nesting {} segments on a fabric width of {:.1}",
            request.segments.len(),
            request.fabric_width
        );
        let message = match run_nesting_request(&request, config, sink).await {
            Ok(result) => {
                debug!("[WORKER] job finished, {} pieces placed", result.pieces.len());
                WorkerMessage::Result(result)
            }
            Err(e) => {
                error!("[WORKER] job failed: {e:#}");
                WorkerMessage::Error(format!("{e:#}"))
            }
        };
        if tx.send(message).is_err() {
            debug!("[WORKER] receiver dropped before the job finished");
        }
    });

    (handle, rx)
}
