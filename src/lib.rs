//! Streaming steady-state / transient-state detection for process time series
//!
//! This crate classifies each point of a scalar series as belonging to a
//! steady or transient regime with a single-pass, constant-memory filter:
//! a circular window read at four golden-ratio corner positions, one
//! recursive EWMA per corner, a filtered variance estimate, and a
//! hysteresis-gated three-valued indicator driven by the spread-over-noise
//! t-statistic of the corners.
//!
//! It targets process-engineering and economic series where an automated,
//! repeatable SS/TS flag replaces manual inspection. It is not a general
//! change-point detector.
//!
//! # Usage
//!
//! ```rust
//! use steady_detect::{DetectorParameters, Regime, SteadyStateDetector};
//!
//! // Ten zeros, then a sustained jump to ten.
//! let mut samples = vec![0.0_f64; 10];
//! samples.extend(std::iter::repeat(10.0).take(50));
//!
//! let mut detector = SteadyStateDetector::new(DetectorParameters::default());
//! let result = detector.detect(&samples).unwrap();
//!
//! assert_eq!(result.len(), samples.len());
//! // The window has not filled yet at index 4.
//! assert_eq!(result.records()[3].regime, Regime::Unknown);
//! // The jump drives the corner filters apart and flags a transient.
//! assert!(result.regimes().contains(&Regime::Transient));
//! ```
//!
//! For sample-at-a-time input, [`OnlineSteadyStateDetector`] runs the same
//! recurrence incrementally and agrees record-for-record with a batch run.

pub mod detector;
pub mod error;
pub mod online;
pub mod progress;
pub mod types;
pub mod window;

pub use detector::SteadyStateDetector;
pub use error::{Error, Result};
pub use online::OnlineSteadyStateDetector;
pub use progress::{NullProgress, ProgressFn, ProgressReporter};
pub use types::{DetectionRecord, DetectionResult, DetectorParameters, Regime};
pub use window::CornerWindow;
