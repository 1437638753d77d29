//! Self-clearing error banner.
//!
//! A shown message is cleared by a delayed task after the display window.
//! Showing or clearing a message aborts the pending task, and a generation
//! counter stops a task that already woke up from clearing a newer message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Default time a message stays visible.
pub const DEFAULT_NOTICE_WINDOW: Duration = Duration::from_secs(5);

/// Error message that clears itself after a fixed window.
#[derive(Debug)]
pub struct TransientNotice {
    state: Arc<Mutex<NoticeState>>,
    window: Duration,
}

#[derive(Debug, Default)]
struct NoticeState {
    message: Option<String>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl NoticeState {
    fn supersede(&mut self) -> u64 {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

fn lock(state: &Mutex<NoticeState>) -> MutexGuard<'_, NoticeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TransientNotice {
    /// Creates an empty notice with the given display window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(NoticeState::default())),
            window,
        }
    }

    /// Returns the display window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Returns the visible message, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        lock(&self.state).message.clone()
    }

    /// Returns whether a clear is scheduled.
    #[must_use]
    pub fn is_timer_pending(&self) -> bool {
        lock(&self.state)
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Shows `message`, replacing any visible one, and schedules it to clear
    /// after the window.
    ///
    /// Outside a tokio runtime the message is shown but stays until
    /// [`TransientNotice::clear`] or the next [`TransientNotice::show`].
    pub fn show(&self, message: impl Into<String>) {
        let mut state = lock(&self.state);
        let generation = state.supersede();
        state.message = Some(message.into());
        state.timer = match Handle::try_current() {
            Ok(handle) => Some(handle.spawn(clear_after(
                Arc::downgrade(&self.state),
                generation,
                self.window,
            ))),
            Err(_) => {
                tracing::debug!("no tokio runtime; notice will not auto-clear");
                None
            }
        };
    }

    /// Clears the visible message and cancels the pending clear.
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.supersede();
        state.message = None;
    }
}

impl Default for TransientNotice {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_WINDOW)
    }
}

impl Drop for TransientNotice {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.state).timer.take() {
            timer.abort();
        }
    }
}

async fn clear_after(state: Weak<Mutex<NoticeState>>, generation: u64, window: Duration) {
    tokio::time::sleep(window).await;
    let Some(shared) = state.upgrade() else {
        return;
    };
    let mut guard = lock(&shared);
    if guard.generation == generation {
        guard.message = None;
        guard.timer = None;
    }
}
