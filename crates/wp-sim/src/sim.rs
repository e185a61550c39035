//! Series evaluation: per-sample solve followed by the energy fold.

use crate::device::{DeviceParameters, GeneratorModel};
use crate::energy::{AveragingWindow, EnergyAccumulator, EnergySummary, WaveResource};
use crate::error::{SimError, SimResult};
use crate::integrator::IntegrationRule;
use crate::sample::{Sample, SolvedSample, solve_sample};
use rayon::prelude::*;
use wp_core::numeric::Tolerances;

/// Options for series evaluation.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Power-to-energy quadrature (default: trapezoidal)
    pub integration: IntegrationRule,
    /// Start-up transient excluded from window averages (s)
    pub transient_s: f64,
    /// Absolute end of the averaging window (s); `None` runs to the last sample
    pub window_end: Option<f64>,
    pub generator: GeneratorModel,
    /// Tolerance for the reconstructed-flow residual check
    pub residual_tol: Tolerances,
    /// Incident wave resource; enables capture-width ratio
    pub wave: Option<WaveResource>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            integration: IntegrationRule::default(),
            transient_s: 0.0,
            window_end: None,
            generator: GeneratorModel::default(),
            residual_tol: Tolerances {
                abs: 1e-12,
                rel: 1e-8,
            },
            wave: None,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.transient_s.is_finite() || self.transient_s < 0.0 {
            return Err(SimError::InvalidArg {
                what: "transient length must be non-negative",
            });
        }
        if self.window_end.is_some_and(|t| !t.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "window end must be finite",
            });
        }
        if !(self.residual_tol.abs >= 0.0 && self.residual_tol.rel >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "residual tolerances must be non-negative",
            });
        }
        self.generator.validate()?;
        if let Some(wave) = &self.wave {
            wave.validate()?;
        }
        Ok(())
    }
}

/// Evaluated series.
#[derive(Clone, Debug)]
pub struct SeriesResult {
    /// Solved samples in input order
    pub solved: Vec<SolvedSample>,
    pub summary: EnergySummary,
}

impl SeriesResult {
    /// Samples flagged infeasible or with a residual mismatch.
    pub fn flagged(&self) -> impl Iterator<Item = (usize, &SolvedSample)> {
        self.solved.iter().enumerate().filter(|(_, s)| s.is_flagged())
    }
}

/// Evaluate an ordered `(time, force, velocity)` series against a device.
///
/// Samples are solved in parallel; energies are folded in time order.
///
/// # Errors
/// - `InvalidArg` for an empty series, invalid options, or non-increasing times
/// - `Sample` when a single sample cannot be solved (carries index and time)
pub fn run_series(
    samples: &[Sample],
    device: &DeviceParameters,
    opts: &AnalysisOptions,
) -> SimResult<SeriesResult> {
    device.validate()?;
    opts.validate()?;
    let Some(first) = samples.first() else {
        return Err(SimError::InvalidArg {
            what: "series must contain at least one sample",
        });
    };

    let solved = samples
        .par_iter()
        .enumerate()
        .map(|(index, sample)| {
            solve_sample(sample, device, &opts.generator, opts.residual_tol).map_err(|e| {
                SimError::Sample {
                    index,
                    time: sample.time,
                    source: Box::new(e),
                }
            })
        })
        .collect::<SimResult<Vec<_>>>()?;

    let window = AveragingWindow {
        start: first.time + opts.transient_s,
        end: opts.window_end,
    };
    let summary = solved
        .iter()
        .try_fold(
            EnergyAccumulator::new(opts.integration, window),
            |acc, s| acc.push(s),
        )?
        .finish(opts.wave.as_ref());

    for (index, s) in solved.iter().enumerate().filter(|(_, s)| s.is_flagged()) {
        tracing::debug!(
            index,
            time = s.time,
            frac_disp = s.frac_disp,
            q_cmd = s.q_cmd,
            q_act = s.q_act_calc,
            infeasible = s.infeasible,
            residual_mismatch = s.residual_mismatch,
            "flagged sample"
        );
    }
    if summary.infeasible_count > 0 || summary.residual_mismatch_count > 0 {
        tracing::warn!(
            samples = summary.sample_count,
            infeasible = summary.infeasible_count,
            residual_mismatch = summary.residual_mismatch_count,
            "series contains flagged samples"
        );
    }
    if summary.window_duration == 0.0 && summary.sample_count > 1 {
        tracing::warn!(
            start = window.start,
            end = ?window.end,
            "averaging window contains no sample interval"
        );
    }

    Ok(SeriesResult { solved, summary })
}
