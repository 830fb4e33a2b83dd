use crate::model::AppEvent;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Duration;

/// Cancellable periodic tick source with ~1-second resolution, injected into
/// the session controller so the core never touches the UI runtime directly.
///
/// `start` replaces any previous schedule; ticks it produces are tagged with
/// `epoch` so deliveries that were in flight when the schedule changed can be
/// recognized and dropped by the receiver. `cancel` is synchronous and
/// idempotent.
pub trait TickScheduler: Send {
    fn start(&mut self, epoch: u64);
    fn cancel(&mut self);
}

/// Production scheduler: a tokio interval task feeding `AppEvent::CookTick`
/// into the UI event channel, one tick per second.
pub struct TokioTicker {
    // The session lives on the UI thread; spawning goes through the runtime
    // handle captured when the app started.
    rt: tokio::runtime::Handle,
    event_tx: UnboundedSender<AppEvent>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(rt: tokio::runtime::Handle, event_tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            rt,
            event_tx,
            handle: None,
        }
    }
}

impl TickScheduler for TokioTicker {
    fn start(&mut self, epoch: u64) {
        self.cancel();
        let tx = self.event_tx.clone();
        self.handle = Some(self.rt.spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick fires immediately; skip it so the first
            // delivered tick lands a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppEvent::CookTick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
