//! State shared between the main loop and interrupt handlers
//!
//! Every access runs inside a critical section, so a handler never sees a
//! half-finished read-modify-write from the code it preempted.

use core::cell::RefCell;

use critical_section::Mutex;

/// Interrupt-safe cell, empty until initialised
///
/// Fits in a `static`: `const fn new`, and `Sync` whenever `T: Send`.
pub struct Shared<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Shared<T> {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store a value, returning the one it replaced
    pub fn init(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(value)))
    }

    /// Run `f` on the value inside a critical section
    ///
    /// Returns `None` when the cell is empty or already borrowed by an
    /// enclosing `with`.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).try_borrow_mut().ok()?;
            slot.as_mut().map(f)
        })
    }

    pub fn is_initialized(&self) -> bool {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow()
                .map(|slot| slot.is_some())
                .unwrap_or(true)
        })
    }

    /// Remove and return the value
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).try_borrow_mut().ok()?.take())
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::new()
    }
}
