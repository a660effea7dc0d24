//! Process-wide cancellation observers
//!
//! The Escape key can arrive through a global keyboard hook or through the overlay
//! window itself, depending on which window holds focus right after the overlay
//! appears. Both paths notify the same hub; observers are removed through their
//! [`CancelRegistration`], which is safe to unregister any number of times.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;

type Observer = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

/// Registry of cancellation observers
#[derive(Clone, Default)]
pub struct CancelHub {
    inner: Arc<Mutex<HubInner>>,
}

static GLOBAL: Lazy<CancelHub> = Lazy::new(CancelHub::default);

impl CancelHub {
    /// Hub fed by the global keyboard hook
    pub fn global() -> &'static CancelHub {
        &GLOBAL
    }

    pub fn register<F>(&self, observer: F) -> CancelRegistration
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));

        CancelRegistration {
            hub: self.clone(),
            id,
            active: true,
        }
    }

    /// Invoke every observer; returns whether anyone was listening
    pub fn notify(&self) -> bool {
        // Observers may unregister themselves, so call them without the lock held
        let observers: Vec<Observer> = self
            .inner
            .lock()
            .observers
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in &observers {
            observer();
        }
        !observers.is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.lock().observers.len()
    }

    fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(observer_id, _)| *observer_id != id);
        inner.observers.len() != before
    }
}

/// Handle to one registered observer; unregisters on drop
pub struct CancelRegistration {
    hub: CancelHub,
    id: u64,
    active: bool,
}

impl CancelRegistration {
    /// Remove the observer; returns false if it was already removed
    pub fn unregister(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.hub.remove(self.id)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn notify_reaches_registered_observers() {
        let hub = CancelHub::default();
        let (count, observer) = counter();
        let _registration = hub.register(observer);

        assert!(hub.notify());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregister_is_idempotent() {
        let hub = CancelHub::default();
        let (count, observer) = counter();
        let mut registration = hub.register(observer);

        assert!(registration.unregister());
        assert!(!registration.unregister());
        assert!(!registration.is_active());
        assert_eq!(hub.observer_count(), 0);

        assert!(!hub.notify());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_unregisters() {
        let hub = CancelHub::default();
        let (_, observer) = counter();
        {
            let _registration = hub.register(observer);
            assert_eq!(hub.observer_count(), 1);
        }
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn unregistering_one_keeps_the_others() {
        let hub = CancelHub::default();
        let (first_count, first) = counter();
        let (second_count, second) = counter();
        let mut first_registration = hub.register(first);
        let _second_registration = hub.register(second);

        first_registration.unregister();
        hub.notify();

        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observer_may_trigger_its_own_removal() {
        let hub = CancelHub::default();
        let slot: Arc<Mutex<Option<CancelRegistration>>> = Arc::new(Mutex::new(None));
        let inner_slot = slot.clone();
        let registration = hub.register(move || {
            if let Some(mut registration) = inner_slot.lock().take() {
                registration.unregister();
            }
        });
        *slot.lock() = Some(registration);

        assert!(hub.notify());
        assert_eq!(hub.observer_count(), 0);
        assert!(!hub.notify());
    }
}
