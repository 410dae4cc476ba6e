use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation, polled between Lloyd iterations and between
/// candidate cluster counts.
pub trait Interrupt: Sync {
    fn interrupted(&self) -> bool;
}

/// An interrupt that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl Interrupt for Never {
    #[inline(always)]
    fn interrupted(&self) -> bool {
        false
    }
}

impl Interrupt for AtomicBool {
    fn interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Interrupt + ?Sized + Send> Interrupt for Arc<T> {
    fn interrupted(&self) -> bool {
        self.as_ref().interrupted()
    }
}

impl<T: Interrupt + ?Sized> Interrupt for &T {
    fn interrupted(&self) -> bool {
        (**self).interrupted()
    }
}
