// Passkeep — Clipboard Gateway
//
// Controlled, time-limited export of a secret to the OS clipboard. The
// gateway owns at most one pending clear task: starting a new export
// aborts the previous timer, so the last export alone decides when the
// clipboard is wiped.

use std::io::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

/// Seconds a copied secret stays on the clipboard before being cleared.
pub const CLEAR_DELAY_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Transient external sink for secret values. The system clipboard in
/// production, an in-memory buffer in tests.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, value: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via arboard. A fresh handle per call: arboard contexts
/// are not Send and exports are rare.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, value: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(value.to_string())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

pub struct ClipboardGateway {
    sink: Arc<dyn ClipboardSink>,
    clear_after: Duration,
    countdown: bool,
    pending_clear: Mutex<Option<JoinHandle<()>>>,
}

impl ClipboardGateway {
    /// Gateway with the standard 10-second clear and a visible countdown.
    pub fn new(sink: Arc<dyn ClipboardSink>) -> Self {
        Self {
            sink,
            clear_after: Duration::from_secs(CLEAR_DELAY_SECS),
            countdown: true,
            pending_clear: Mutex::new(None),
        }
    }

    /// Gateway without countdown output, with a custom delay. Used by tests.
    pub fn silent(sink: Arc<dyn ClipboardSink>, clear_after: Duration) -> Self {
        Self {
            sink,
            clear_after,
            countdown: false,
            pending_clear: Mutex::new(None),
        }
    }

    /// Write `value` to the sink immediately and schedule the clear.
    /// Any previously pending clear task is aborted first.
    pub fn export_secret(&self, value: &str) -> Result<(), ClipboardError> {
        self.sink.set_text(value)?;

        let mut pending = self.pending_clear.lock().unwrap();
        if let Some(prev) = pending.take() {
            prev.abort();
        }

        let sink = Arc::clone(&self.sink);
        let secs = self.clear_after.as_secs().max(1);
        let countdown = self.countdown;
        *pending = Some(tokio::spawn(async move {
            for remaining in (1..=secs).rev() {
                if countdown {
                    print!("\rClearing in: {} ", remaining);
                    let _ = std::io::stdout().flush();
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            if sink.set_text("").is_ok() && countdown {
                println!("\nClipboard cleared for security.");
            }
        }));

        Ok(())
    }

    /// Block until the pending clear (if any) has fired. The CLI calls this
    /// so the short-lived process does not exit before the timer completes.
    pub async fn wait_for_pending(&self) {
        let handle = self.pending_clear.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct MemorySink {
        text: Mutex<String>,
    }

    impl MemorySink {
        fn new() -> Self {
            Self {
                text: Mutex::new(String::new()),
            }
        }

        fn text(&self) -> String {
            self.text.lock().unwrap().clone()
        }
    }

    impl ClipboardSink for MemorySink {
        fn set_text(&self, value: &str) -> Result<(), ClipboardError> {
            *self.text.lock().unwrap() = value.to_string();
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_writes_immediately() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink.clone(), Duration::from_secs(10));

        gateway.export_secret("hunter2").unwrap();
        assert_eq!(sink.text(), "hunter2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clipboard_cleared_after_delay() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink.clone(), Duration::from_secs(10));

        gateway.export_secret("hunter2").unwrap();
        tokio::time::sleep(Duration::from_secs(11)).await;

        assert_eq!(sink.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_secret_still_present_before_delay_elapses() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink.clone(), Duration::from_secs(10));

        gateway.export_secret("hunter2").unwrap();
        tokio::time::sleep(Duration::from_secs(8)).await;

        assert_eq!(sink.text(), "hunter2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_export_cancels_prior_clear_timer() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink.clone(), Duration::from_secs(10));

        gateway.export_secret("first").unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        gateway.export_secret("second").unwrap();

        // t = 11s: the first timer would have fired at t = 10s, but it was
        // aborted; the second export must still be present.
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(sink.text(), "second");

        // t = 16s: the second timer fires at t = 15s.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sink.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_pending_blocks_until_clear() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink.clone(), Duration::from_secs(10));

        gateway.export_secret("hunter2").unwrap();
        gateway.wait_for_pending().await;

        assert_eq!(sink.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_with_nothing_pending_returns() {
        let sink = Arc::new(MemorySink::new());
        let gateway = ClipboardGateway::silent(sink, Duration::from_secs(10));
        gateway.wait_for_pending().await;
    }
}
