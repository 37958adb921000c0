//! Four-corner EWMA steady-state detector
//!
//! The filter keeps a circular window of the most recent `n` samples and
//! reads it at four golden-ratio corner positions, each feeding its own
//! recursive EWMA. A steady process drives the four filtered values
//! together; a transient spreads them apart faster than the filtered noise
//! estimate grows, which shows up as a spike in the spread-over-noise
//! t-statistic. A hysteresis dead band between the two critical thresholds
//! keeps the indicator from chattering.
//!
//! The t-statistic here is a heuristic ratio, not a classical Student's t.

use num_traits::{Float, FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};
use crate::progress::{NullProgress, ProgressReporter};
use crate::types::{DetectionRecord, DetectionResult, DetectorParameters, Regime};
use crate::window::CornerWindow;

/// One-pass recurrence state shared by the batch and online detectors
///
/// Carries the corner window, the four EWMA accumulators, the filtered
/// variance estimate and the previous raw sample. `step` runs the
/// per-sample update and hands back the record for that index.
pub(crate) struct FilterPass<F> {
    params: DetectorParameters<F>,
    window: CornerWindow<F>,
    filtered: [F; 4],
    data_var: F,
    prev: F,
    regime: Regime,
    index: usize,
    var_gain: F,
    var_decay: F,
    var_floor: F,
    t_cap: F,
}

impl<F: Float + FromPrimitive> FilterPass<F> {
    /// Start a pass seeded with the first sample of the series
    ///
    /// The seed itself is not processed; the first call to `step` handles
    /// the second index of the series.
    pub(crate) fn new(params: DetectorParameters<F>, seed: F) -> Self {
        Self {
            window: CornerWindow::new(params.window_len),
            filtered: [F::zero(); 4],
            data_var: F::zero(),
            prev: seed,
            regime: Regime::Unknown,
            index: 1,
            var_gain: F::from_f64(0.025).unwrap(),
            var_decay: F::from_f64(0.95).unwrap(),
            var_floor: F::from_f64(0.01).unwrap(),
            t_cap: F::from_f64(5.0).unwrap(),
            params,
        }
    }

    pub(crate) fn regime(&self) -> Regime {
        self.regime
    }

    pub(crate) fn samples_seen(&self) -> usize {
        self.index
    }

    /// Process the next sample of the series
    pub(crate) fn step(&mut self, value: F) -> DetectionRecord<F> {
        self.index += 1;
        self.window.write(value);

        // Filtered squared-difference variance estimate; the 0.05 filter
        // constant is fixed by design, half of it on the squared delta.
        let delta = value - self.prev;
        self.data_var = self.var_gain * delta * delta + self.var_decay * self.data_var;
        self.prev = value;

        let weight = self.params.filter_weight;
        let retain = F::one() - weight;
        let corners = self.window.corner_values();
        for (filt, &corner) in self.filtered.iter_mut().zip(corners.iter()) {
            *filt = weight * corner + retain * *filt;
        }

        // Diagnostics carry the pre-advance positions.
        let cursors = self.window.cursors();
        self.window.advance();

        let mut max_filt = self.filtered[0];
        let mut min_filt = self.filtered[0];
        for &filt in &self.filtered[1..] {
            if filt > max_filt {
                max_filt = filt;
            }
            if filt < min_filt {
                min_filt = filt;
            }
        }

        if self.data_var < self.var_floor {
            self.data_var = self.var_floor;
        }
        let mut t_stat = (max_filt - min_filt) / self.data_var.sqrt();
        if t_stat > self.t_cap {
            t_stat = self.t_cap;
        }

        // The decision only activates once the window has filled. Inside
        // the dead band the previous indicator holds.
        if self.index >= self.params.window_len {
            if t_stat <= self.params.t_crit_lower {
                self.regime = Regime::Steady;
            } else if t_stat > self.params.t_crit_upper {
                self.regime = Regime::Transient;
            }
        }

        DetectionRecord {
            value,
            t_stat,
            regime: self.regime,
            cursors,
            filtered: self.filtered,
        }
    }
}

/// Batch steady-state / transient detector
///
/// Runs the four-corner EWMA filter over a full series and returns one
/// [`DetectionRecord`] per input index. The optional progress reporter is
/// invoked once per processed sample with the completed fraction.
///
/// # Type Parameters
///
/// - `F`: the floating-point sample type
/// - `R`: the progress reporter, [`NullProgress`] by default
pub struct SteadyStateDetector<F, R = NullProgress> {
    params: DetectorParameters<F>,
    reporter: R,
}

impl<F> std::fmt::Debug for SteadyStateDetector<F>
where
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteadyStateDetector")
            .field("params", &self.params)
            .finish()
    }
}

impl<F: Float + FromPrimitive> SteadyStateDetector<F, NullProgress> {
    /// Create a detector with no progress reporting
    pub fn new(params: DetectorParameters<F>) -> Self {
        Self {
            params,
            reporter: NullProgress,
        }
    }
}

impl<F: Float + FromPrimitive> Default for SteadyStateDetector<F, NullProgress> {
    fn default() -> Self {
        Self::new(DetectorParameters::default())
    }
}

impl<F: Float + FromPrimitive, R: ProgressReporter> SteadyStateDetector<F, R> {
    /// Create a detector with an injected progress reporter
    pub fn with_reporter(params: DetectorParameters<F>, reporter: R) -> Self {
        Self { params, reporter }
    }

    pub fn params(&self) -> &DetectorParameters<F> {
        &self.params
    }

    /// Classify every index of `samples` as steady, transient or unknown
    ///
    /// The configuration is validated once up front; the per-sample loop
    /// itself only fails on a non-finite input value, reported with its
    /// 1-based index. The output has the same length as the input; the
    /// first index is the unprocessed seed and keeps its default record.
    pub fn detect(&mut self, samples: &[F]) -> Result<DetectionResult<F>> {
        self.params.validate()?;
        if samples.is_empty() {
            return Err(Error::empty_input());
        }
        if !samples[0].is_finite() {
            return Err(Error::NonFiniteSample {
                index: 1,
                value: samples[0].to_f64().unwrap_or(f64::NAN),
            });
        }

        let npts = samples.len();
        let step = self.params.effective_step();
        let mut records: Vec<DetectionRecord<F>> =
            samples.iter().map(|&v| DetectionRecord::seed(v)).collect();

        let mut pass = FilterPass::new(self.params, samples[0]);
        for (i, &value) in samples.iter().enumerate().skip(1) {
            if !value.is_finite() {
                return Err(Error::NonFiniteSample {
                    index: i + 1,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }

            let record = pass.step(value);
            records[i] = record;

            // Write-ahead fill: the t-statistic and indicator are copied
            // into the next step-1 slots, bounded by the series length.
            // Later iterations overwrite those slots with their own values.
            let fill_end = (i + step).min(npts);
            for slot in records[i + 1..fill_end].iter_mut() {
                slot.t_stat = record.t_stat;
                slot.regime = record.regime;
            }

            self.reporter.report((i + 1) as f64 / npts as f64);
        }

        Ok(DetectionResult::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressFn;
    use approx::assert_relative_eq;

    fn step_series() -> Vec<f64> {
        let mut samples = vec![0.0; 10];
        samples.extend(std::iter::repeat(10.0).take(50));
        samples
    }

    #[test]
    fn output_matches_input_length() {
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        let result = detector.detect(&step_series()).unwrap();
        assert_eq!(result.len(), 60);
    }

    #[test]
    fn seed_record_keeps_defaults() {
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        let result = detector.detect(&step_series()).unwrap();
        let seed = &result.records()[0];
        assert_eq!(seed.value, 0.0);
        assert_eq!(seed.t_stat, 0.0);
        assert_eq!(seed.regime, Regime::Unknown);
        assert_eq!(seed.cursors, [0; 4]);
    }

    #[test]
    fn warmup_indices_stay_unknown() {
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        let result = detector.detect(&step_series()).unwrap();
        for record in &result.records()[..9] {
            assert_eq!(record.regime, Regime::Unknown);
        }
        assert_ne!(result.records()[9].regime, Regime::Unknown);
    }

    #[test]
    fn first_processed_index_reports_initial_cursors() {
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        let result = detector.detect(&step_series()).unwrap();
        // n = 10: write cursor 1, corners at floor(0.618*10), floor(0.382*10), 10.
        assert_eq!(result.records()[1].cursors, [1, 6, 3, 10]);
        assert_eq!(result.records()[2].cursors, [2, 7, 4, 1]);
    }

    #[test]
    fn variance_floor_bounds_constant_input() {
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        let result = detector.detect(&vec![0.0_f64; 40]).unwrap();
        // All-zero input: filters never move, t stays 0, steady from i = n.
        for (i, record) in result.records().iter().enumerate().skip(1) {
            assert_eq!(record.t_stat, 0.0);
            if i + 1 >= 10 {
                assert_eq!(record.regime, Regime::Steady);
            }
        }
    }

    #[test]
    fn detection_is_deterministic() {
        let samples = step_series();
        let mut a = SteadyStateDetector::new(DetectorParameters::default());
        let mut b = SteadyStateDetector::new(DetectorParameters::default());
        assert_eq!(a.detect(&samples).unwrap(), b.detect(&samples).unwrap());
    }

    #[test]
    fn write_ahead_is_overwritten_by_later_steps() {
        // Every index is revisited by its own iteration, so the step-wide
        // forward fill leaves no trace in the final table.
        let samples = step_series();
        let mut narrow = SteadyStateDetector::new(DetectorParameters::default());
        let mut wide = SteadyStateDetector::new(DetectorParameters {
            step: 4,
            ..Default::default()
        });
        assert_eq!(
            narrow.detect(&samples).unwrap(),
            wide.detect(&samples).unwrap()
        );
    }

    #[test]
    fn progress_fractions_are_monotone_and_complete() {
        let mut fractions = Vec::new();
        let samples = step_series();
        {
            let mut detector = SteadyStateDetector::with_reporter(
                DetectorParameters::default(),
                ProgressFn(|fraction: f64| fractions.push(fraction)),
            );
            detector.detect(&samples).unwrap();
        }
        assert_eq!(fractions.len(), samples.len() - 1);
        assert!(fractions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_relative_eq!(*fractions.last().unwrap(), 1.0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut detector = SteadyStateDetector::<f64>::new(DetectorParameters::default());
        assert!(matches!(
            detector.detect(&[]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn non_finite_sample_names_its_index() {
        let mut samples = step_series();
        samples[14] = f64::NAN;
        let mut detector = SteadyStateDetector::new(DetectorParameters::default());
        match detector.detect(&samples) {
            Err(Error::NonFiniteSample { index, .. }) => assert_eq!(index, 15),
            other => panic!("expected NonFiniteSample, got {other:?}"),
        }
    }

    #[test]
    fn invalid_configuration_fails_before_processing() {
        let mut called = false;
        {
            let mut detector = SteadyStateDetector::with_reporter(
                DetectorParameters {
                    window_len: 2,
                    ..Default::default()
                },
                ProgressFn(|_: f64| called = true),
            );
            assert!(detector.detect(&step_series()).is_err());
        }
        assert!(!called);
    }

    #[test]
    fn works_with_f32_samples() {
        let samples: Vec<f32> = step_series().iter().map(|&v| v as f32).collect();
        let mut detector = SteadyStateDetector::new(DetectorParameters::<f32>::default());
        let result = detector.detect(&samples).unwrap();
        assert_eq!(result.len(), samples.len());
    }
}
