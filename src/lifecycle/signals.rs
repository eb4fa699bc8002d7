//! OS signal handling.

use tokio::task::JoinHandle;

use crate::lifecycle::CancelSignal;

/// Cancel `signal` when the process receives Ctrl+C.
///
/// The watcher task exits quietly if the signal fires for any other reason.
pub fn cancel_on_ctrl_c(signal: &CancelSignal) -> JoinHandle<()> {
    let signal = signal.clone();
    tokio::spawn(async move {
        tokio::select! {
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => {
                    tracing::info!("Ctrl+C received, cancelling");
                    signal.cancel();
                }
                Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
            },
            _ = signal.cancelled() => {}
        }
    })
}
