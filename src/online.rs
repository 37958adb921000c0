//! Incremental per-sample detection
//!
//! Wraps the same recurrence as the batch detector for callers that receive
//! samples one at a time. Each `push` returns the freshly computed record
//! for that index; the output agrees record-for-record with a batch run at
//! `step = 1`. The batch write-ahead fill needs the full series length and
//! is deliberately not part of this API.

use num_traits::{Float, FromPrimitive, ToPrimitive};

use crate::detector::FilterPass;
use crate::error::{Error, Result};
use crate::types::{DetectionRecord, DetectorParameters, Regime};

/// Online steady-state detector with per-sample state
pub struct OnlineSteadyStateDetector<F> {
    params: DetectorParameters<F>,
    pass: Option<FilterPass<F>>,
}

impl<F> std::fmt::Debug for OnlineSteadyStateDetector<F>
where
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnlineSteadyStateDetector")
            .field("params", &self.params)
            .field("started", &self.pass.is_some())
            .finish()
    }
}

impl<F: Float + FromPrimitive> OnlineSteadyStateDetector<F> {
    /// Create an online detector, validating the configuration up front
    pub fn new(params: DetectorParameters<F>) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, pass: None })
    }

    pub fn params(&self) -> &DetectorParameters<F> {
        &self.params
    }

    /// Feed the next sample and get back its detection record
    ///
    /// The very first sample is the unprocessed seed; its record keeps the
    /// default values, matching the first row of a batch run.
    pub fn push(&mut self, value: F) -> Result<DetectionRecord<F>> {
        if !value.is_finite() {
            // A rejected sample does not consume an index.
            return Err(Error::NonFiniteSample {
                index: self.samples_seen() + 1,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }

        match &mut self.pass {
            None => {
                self.pass = Some(FilterPass::new(self.params, value));
                Ok(DetectionRecord::seed(value))
            }
            Some(pass) => Ok(pass.step(value)),
        }
    }

    /// The regime after the most recent sample
    pub fn current_regime(&self) -> Regime {
        self.pass
            .as_ref()
            .map(|pass| pass.regime())
            .unwrap_or(Regime::Unknown)
    }

    /// Number of samples fed so far, including the seed
    pub fn samples_seen(&self) -> usize {
        self.pass.as_ref().map(|pass| pass.samples_seen()).unwrap_or(0)
    }

    /// Discard all carried state and start a fresh run
    pub fn reset(&mut self) {
        self.pass = None;
    }
}
