//! ToastTimers - toast の自動消去タイマー
//!
//! # 学習ポイント
//! - `tokio::spawn` + `AbortHandle` によるキャンセル可能なスケジュール
//! - 手動で消した toast のタイマーは abort する（二重削除をしない）

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::domain::ToastId;

#[derive(Debug, Default)]
pub(crate) struct ToastTimers {
    pending: Mutex<HashMap<ToastId, AbortHandle>>,
}

impl ToastTimers {
    /// Runs `on_expire` after `ttl` unless cancelled first.
    ///
    /// Outside a tokio runtime nothing is scheduled and `false` is returned.
    pub(crate) fn schedule<F>(&self, id: ToastId, ttl: Duration, on_expire: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(toast = %id, "no runtime, toast will not auto-dismiss");
            return false;
        };
        let timer = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            on_expire();
        });
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.insert(id, timer.abort_handle()) {
            previous.abort();
        }
        true
    }

    /// Aborts the timer. Returns whether one was pending.
    pub(crate) fn cancel(&self, id: ToastId) -> bool {
        let timer = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        match timer {
            Some(timer) => {
                timer.abort();
                true
            }
            None => false,
        }
    }

    /// Drops the bookkeeping for a timer that already fired.
    pub(crate) fn forget(&self, id: ToastId) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    #[cfg(test)]
    pub(crate) fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for ToastTimers {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, timer) in pending.drain() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_ttl() {
        let timers = ToastTimers::default();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        assert!(timers.schedule(ToastId(1), Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let timers = ToastTimers::default();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        timers.schedule(ToastId(1), Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timers.cancel(ToastId(1)));
        assert!(!timers.cancel(ToastId(1)));
        assert_eq!(timers.pending_count(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn schedule_outside_runtime_is_a_no_op() {
        let timers = ToastTimers::default();
        assert!(!timers.schedule(ToastId(1), Duration::from_secs(3), || {}));
        assert_eq!(timers.pending_count(), 0);
    }
}
