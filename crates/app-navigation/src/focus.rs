//! Text-input focus dismissal
//!
//! Every navigation mutation first asks the platform to drop text-input
//! focus. Tearing down the soft keyboard while the next screen mounts can
//! deadlock some platforms, so the dismissal must come first.

/// Hook for dismissing the active text-input focus
#[cfg_attr(test, mockall::automock)]
pub trait InputFocus: Send + Sync {
    /// Drop focus from whatever input currently holds it
    fn dismiss(&self);
}

/// Focus hook that does nothing (headless use, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFocus;

impl InputFocus for NoFocus {
    fn dismiss(&self) {}
}

impl<F> InputFocus for F
where
    F: Fn() + Send + Sync,
{
    fn dismiss(&self) {
        self()
    }
}
