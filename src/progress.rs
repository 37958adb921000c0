//! Progress-reporting seam for long detection runs
//!
//! The detector invokes the reporter once per processed sample with the
//! completed fraction of the series. Reporting is purely observational and
//! never affects the computed output; the null reporter compiles away.

/// Receives completion fractions while a detection run is in flight
pub trait ProgressReporter {
    /// Called once per processed sample with the fraction completed (0..=1)
    fn report(&mut self, fraction: f64);

    /// Check if this reporter actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Reporter that does nothing (the default - no overhead)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    #[inline(always)]
    fn report(&mut self, _fraction: f64) {}

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

/// Adapter turning a closure into a [`ProgressReporter`]
///
/// ```
/// use steady_detect::ProgressFn;
///
/// let mut last = 0.0;
/// let reporter = ProgressFn(|fraction: f64| last = fraction);
/// # let _ = reporter;
/// ```
pub struct ProgressFn<C>(pub C);

impl<C: FnMut(f64)> ProgressReporter for ProgressFn<C> {
    #[inline]
    fn report(&mut self, fraction: f64) {
        (self.0)(fraction)
    }
}
