//! Process-wide termination flag.
//!
//! Set once, never unset. The flag is an atomic for cheap polling, paired
//! with a watch channel so any task blocked in a `select!` can be woken.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::watch;

#[derive(Debug)]
struct Inner {
    flag: AtomicBool,
    signal: watch::Sender<bool>,
}

/// Cloneable handle to the shared termination flag.
#[derive(Clone, Debug)]
pub struct Termination {
    inner: Arc<Inner>,
}

impl Termination {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                flag: AtomicBool::new(false),
                signal,
            }),
        }
    }

    /// Raise the flag and wake every waiter. Idempotent.
    pub fn set(&self) {
        if !self.inner.flag.swap(true, Ordering::SeqCst) {
            self.inner.signal.send_replace(true);
            log::debug!("Termination requested");
        }
    }

    pub fn is_set(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    /// Resolve once the flag is raised.
    ///
    /// Cancel safe, so it can sit in any `select!` arm.
    pub async fn wait(&self) {
        let mut rx = self.inner.signal.subscribe();
        // The sender lives in `inner`, which `self` keeps alive.
        let _ = rx.wait_for(|set| *set).await;
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new()
    }
}
