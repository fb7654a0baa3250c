//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.
//! Exports run concurrently; each one carries its own snapshot of the preview.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::export::{Exporter, PreviewSerializer};
use crate::preview::VisualTree;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Write the given preview to the export file
    Export { tree: Option<VisualTree> },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// The export file was written
    Exported { path: PathBuf },
    /// The export failed; the post is untouched
    ExportFailed { error: String },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles
pub fn spawn_worker<S>(exporter: Exporter<S>) -> AsyncHandle
where
    S: PreviewSerializer + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);
    let exporter = Arc::new(exporter);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::Export { tree } => {
                    let exporter = Arc::clone(&exporter);
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        handle_export(&result_tx, exporter, tree).await;
                    });
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_export<S>(
    result_tx: &mpsc::Sender<AsyncResult>,
    exporter: Arc<Exporter<S>>,
    tree: Option<VisualTree>,
) where
    S: PreviewSerializer + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || exporter.export(tree.as_ref())).await;

    let result = match outcome {
        Ok(Ok(path)) => AsyncResult::Exported { path },
        Ok(Err(e)) => {
            tracing::error!("Export failed: {e}");
            AsyncResult::ExportFailed {
                error: e.to_string(),
            }
        }
        Err(e) => {
            tracing::error!("Export task panicked: {e}");
            AsyncResult::ExportFailed {
                error: e.to_string(),
            }
        }
    };

    let _ = result_tx.send(result).await;
}
