//! Common types for steady-state detection

use std::fmt;

use num_traits::{Float, FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};

/// Operating regime assigned to one sample of the series
///
/// The legacy encoding of this indicator is a float column taking the values
/// 0.5 / 1.0 / 0.0; [`Regime::as_f64`] reproduces those codes for consumers
/// that still expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Not enough history to decide (initial window fill)
    Unknown,
    /// Process variable is in a steady-state regime
    Steady,
    /// Process variable is in a transient regime
    Transient,
}

impl Regime {
    /// Legacy numeric encoding: Unknown = 0.5, Steady = 1.0, Transient = 0.0
    pub fn as_f64(self) -> f64 {
        match self {
            Regime::Unknown => 0.5,
            Regime::Steady => 1.0,
            Regime::Transient => 0.0,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Regime::Unknown)
    }

    pub fn is_steady(self) -> bool {
        matches!(self, Regime::Steady)
    }

    pub fn is_transient(self) -> bool {
        matches!(self, Regime::Transient)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Unknown => write!(f, "Unknown"),
            Regime::Steady => write!(f, "Steady"),
            Regime::Transient => write!(f, "Transient"),
        }
    }
}

/// Parameters for the four-corner EWMA steady-state filter
#[derive(Clone, Copy, PartialEq)]
pub struct DetectorParameters<F> {
    /// Upper critical threshold; a t-statistic above it flags `Transient`
    pub t_crit_upper: F,
    /// Lower critical threshold; a t-statistic at or below it flags `Steady`
    pub t_crit_lower: F,
    /// Circular window capacity `n` (at least 4)
    pub window_len: usize,
    /// Shared smoothing weight for the four corner filters (0 < w <= 1)
    pub filter_weight: F,
    /// Write-ahead fill width; values below 1 are coerced to 1
    pub step: usize,
}

impl<F> fmt::Debug for DetectorParameters<F>
where
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorParameters")
            .field("t_crit_upper", &self.t_crit_upper)
            .field("t_crit_lower", &self.t_crit_lower)
            .field("window_len", &self.window_len)
            .field("filter_weight", &self.filter_weight)
            .field("step", &self.step)
            .finish()
    }
}

impl<F: Float + FromPrimitive> Default for DetectorParameters<F> {
    fn default() -> Self {
        Self {
            t_crit_upper: F::from_f64(3.2).unwrap(),
            t_crit_lower: F::from_f64(1.0).unwrap(),
            window_len: 10,
            filter_weight: F::from_f64(0.1).unwrap(),
            step: 1,
        }
    }
}

impl<F: Float + FromPrimitive> DetectorParameters<F> {
    /// Validate the configuration once, before any sample is processed
    pub fn validate(&self) -> Result<()> {
        if self.window_len < 4 {
            return Err(Error::InvalidParameter(format!(
                "window_len must be at least 4 to keep the corner cursors apart, got {}",
                self.window_len
            )));
        }
        if self.filter_weight <= F::zero() || self.filter_weight > F::one() {
            return Err(Error::InvalidParameter(format!(
                "filter_weight must be in (0, 1], got {}",
                self.filter_weight.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if self.t_crit_lower >= self.t_crit_upper {
            return Err(Error::InvalidParameter(format!(
                "t_crit_lower ({}) must be below t_crit_upper ({})",
                self.t_crit_lower.to_f64().unwrap_or(f64::NAN),
                self.t_crit_upper.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Write-ahead width with the sub-1 coercion applied
    pub fn effective_step(&self) -> usize {
        self.step.max(1)
    }
}

/// Per-index output of the detector
///
/// `cursors` and `filtered` mirror the internal corner state at the moment
/// the index was processed; they are diagnostic only.
#[derive(Clone, Copy, PartialEq)]
pub struct DetectionRecord<F> {
    /// Raw input sample
    pub value: F,
    /// Spread-over-noise t-statistic, clamped to at most 5
    pub t_stat: F,
    /// Regime assigned to this index
    pub regime: Regime,
    /// 1-based corner cursor positions when this index was processed
    pub cursors: [usize; 4],
    /// The four corner EWMA values after this index's update
    pub filtered: [F; 4],
}

impl<F> fmt::Debug for DetectionRecord<F>
where
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionRecord")
            .field("value", &self.value)
            .field("t_stat", &self.t_stat)
            .field("regime", &self.regime)
            .field("cursors", &self.cursors)
            .field("filtered", &self.filtered)
            .finish()
    }
}

impl<F: Float> DetectionRecord<F> {
    /// Record holding only the raw value, everything else at its defaults
    ///
    /// The first index of a run is the unprocessed seed and keeps this shape.
    pub fn seed(value: F) -> Self {
        Self {
            value,
            t_stat: F::zero(),
            regime: Regime::Unknown,
            cursors: [0; 4],
            filtered: [F::zero(); 4],
        }
    }
}

/// Ordered detection output, one record per input index
#[derive(Clone, PartialEq)]
pub struct DetectionResult<F> {
    records: Vec<DetectionRecord<F>>,
}

impl<F> fmt::Debug for DetectionResult<F>
where
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionResult")
            .field("records", &self.records)
            .finish()
    }
}

impl<F: Float> DetectionResult<F> {
    pub(crate) fn new(records: Vec<DetectionRecord<F>>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in input order
    pub fn records(&self) -> &[DetectionRecord<F>] {
        &self.records
    }

    /// Consume the result, yielding the record vector
    pub fn into_records(self) -> Vec<DetectionRecord<F>> {
        self.records
    }

    /// The regime column
    pub fn regimes(&self) -> Vec<Regime> {
        self.records.iter().map(|r| r.regime).collect()
    }

    /// The t-statistic column
    pub fn t_stats(&self) -> Vec<F> {
        self.records.iter().map(|r| r.t_stat).collect()
    }

    /// Fraction of indices classified as steady
    pub fn steady_fraction(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let steady = self.records.iter().filter(|r| r.regime.is_steady()).count();
        steady as f64 / self.records.len() as f64
    }

    /// Regime changes as `(1-based index, from, to)` tuples
    pub fn transitions(&self) -> Vec<(usize, Regime, Regime)> {
        self.records
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].regime != pair[1].regime)
            .map(|(i, pair)| (i + 2, pair[0].regime, pair[1].regime))
            .collect()
    }
}
