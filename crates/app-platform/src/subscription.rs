//! Listener subscription handles

use parking_lot::Mutex;

type RemoveFn = Box<dyn FnOnce() + Send>;

/// Handle returned when registering a listener
///
/// The listener stays registered until [`Subscription::remove`] is called or
/// the handle is dropped, whichever comes first. Removal runs at most once.
///
/// # Example
///
/// ```rust
/// use app_platform::Subscription;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let removed = Arc::new(AtomicUsize::new(0));
/// let counter = removed.clone();
/// let sub = Subscription::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// sub.remove();
/// sub.remove();
/// drop(sub);
/// assert_eq!(removed.load(Ordering::SeqCst), 1);
/// ```
pub struct Subscription {
    remove: Mutex<Option<RemoveFn>>,
}

impl Subscription {
    /// Create a subscription that runs `remove` when released
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Mutex::new(Some(Box::new(remove))),
        }
    }

    /// A subscription with nothing to release
    pub fn empty() -> Self {
        Self {
            remove: Mutex::new(None),
        }
    }

    /// Unregister the listener. Calling this more than once is a no-op.
    pub fn remove(&self) {
        let remove = self.remove.lock().take();
        if let Some(remove) = remove {
            remove();
        }
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.remove.lock().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
