//! Energy bookkeeping over an ordered solved series.
//!
//! All running sums live in [`EnergyAccumulator`], which is folded over the
//! samples in time order and finished into an [`EnergySummary`].

use crate::error::{SimError, SimResult};
use crate::integrator::IntegrationRule;
use crate::sample::{PowerSplit, SolvedSample};
use wp_core::units::{Energy, Power, j, w};

/// Time window used for average power and mean efficiency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AveragingWindow {
    /// Window start (s). Intervals starting earlier are excluded.
    pub start: f64,
    /// Window end (s). `None` runs to the last sample.
    pub end: Option<f64>,
}

impl AveragingWindow {
    pub fn contains_interval(&self, t0: f64, t1: f64) -> bool {
        t0 >= self.start && self.end.is_none_or(|end| t1 <= end)
    }
}

/// Incident wave resource for capture-width ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveResource {
    /// Incident wave power per metre of crest (W/m)
    pub power_per_width: f64,
    /// Device reference width (m)
    pub reference_width: f64,
}

impl WaveResource {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.power_per_width.is_finite() && self.power_per_width > 0.0) {
            return Err(SimError::InvalidArg {
                what: "wave power per width must be positive",
            });
        }
        if !(self.reference_width.is_finite() && self.reference_width > 0.0) {
            return Err(SimError::InvalidArg {
                what: "device reference width must be positive",
            });
        }
        Ok(())
    }

    /// Incident power across the device width (W).
    pub fn incident_power(&self) -> f64 {
        self.power_per_width * self.reference_width
    }
}

#[derive(Clone, Copy, Debug)]
struct Previous {
    time: f64,
    p_in: f64,
    p_out: f64,
    p_leak: f64,
    p_mech: f64,
    p_electrical_loss: f64,
    split: PowerSplit,
    efficiency: Option<f64>,
}

impl Previous {
    fn of(s: &SolvedSample) -> Self {
        Self {
            time: s.time,
            p_in: s.p_in,
            p_out: s.p_out,
            p_leak: s.p_leak,
            p_mech: s.p_mech,
            p_electrical_loss: s.p_electrical_loss,
            split: PowerSplit::new(s.p_in, s.p_out),
            efficiency: s.efficiency(),
        }
    }
}

/// Running integrals over a solved series.
#[derive(Clone, Debug)]
pub struct EnergyAccumulator {
    rule: IntegrationRule,
    window: AveragingWindow,
    prev: Option<Previous>,

    samples: usize,
    infeasible: usize,
    residual_mismatch: usize,
    first_time: f64,

    work_in: f64,
    work_out: f64,
    leakage: f64,
    mechanical_loss: f64,
    electrical_loss: f64,
    split: PowerSplit,

    window_in: f64,
    window_out: f64,
    window_duration: f64,
    efficiency_area: f64,
    efficiency_duration: f64,
}

impl EnergyAccumulator {
    pub fn new(rule: IntegrationRule, window: AveragingWindow) -> Self {
        Self {
            rule,
            window,
            prev: None,
            samples: 0,
            infeasible: 0,
            residual_mismatch: 0,
            first_time: f64::NAN,
            work_in: 0.0,
            work_out: 0.0,
            leakage: 0.0,
            mechanical_loss: 0.0,
            electrical_loss: 0.0,
            split: PowerSplit::default(),
            window_in: 0.0,
            window_out: 0.0,
            window_duration: 0.0,
            efficiency_area: 0.0,
            efficiency_duration: 0.0,
        }
    }

    /// Fold one sample into the running sums.
    ///
    /// # Errors
    /// `InvalidArg` if the sample time does not strictly increase.
    pub fn push(mut self, s: &SolvedSample) -> SimResult<Self> {
        if !s.time.is_finite() {
            return Err(SimError::NonPhysical {
                what: "sample time must be finite",
            });
        }
        let cur = Previous::of(s);

        match self.prev {
            None => self.first_time = s.time,
            Some(prev) => {
                let dt = cur.time - prev.time;
                if dt <= 0.0 {
                    return Err(SimError::InvalidArg {
                        what: "sample times must be strictly increasing",
                    });
                }
                self.integrate(&prev, &cur, dt);
            }
        }

        self.samples += 1;
        self.infeasible += usize::from(s.infeasible);
        self.residual_mismatch += usize::from(s.residual_mismatch);
        self.prev = Some(cur);
        Ok(self)
    }

    fn integrate(&mut self, prev: &Previous, cur: &Previous, dt: f64) {
        let rule = self.rule;
        let area = |a: f64, b: f64| rule.interval(dt, a, b);

        let e_in = area(prev.p_in, cur.p_in);
        let e_out = area(prev.p_out, cur.p_out);
        self.work_in += e_in;
        self.work_out += e_out;
        self.leakage += area(prev.p_leak, cur.p_leak);
        self.mechanical_loss += area(prev.p_mech, cur.p_mech);
        self.electrical_loss += area(prev.p_electrical_loss, cur.p_electrical_loss);

        self.split.hydraulic_in += area(prev.split.hydraulic_in, cur.split.hydraulic_in);
        self.split.hydraulic_out += area(prev.split.hydraulic_out, cur.split.hydraulic_out);
        self.split.mechanical_in += area(prev.split.mechanical_in, cur.split.mechanical_in);
        self.split.mechanical_out += area(prev.split.mechanical_out, cur.split.mechanical_out);

        if self.window.contains_interval(prev.time, cur.time) {
            self.window_in += e_in;
            self.window_out += e_out;
            self.window_duration += dt;

            if let (Some(a), Some(b)) = (prev.efficiency, cur.efficiency) {
                self.efficiency_area += area(a, b);
                self.efficiency_duration += dt;
            }
        }
    }

    /// Close the fold and derive scalar metrics.
    pub fn finish(self, wave: Option<&WaveResource>) -> EnergySummary {
        let ratio = |num: f64, den: f64| if den != 0.0 { Some(num / den) } else { None };
        let last_time = self.prev.map_or(f64::NAN, |p| p.time);

        let avg_power_in = ratio(self.window_in, self.window_duration);
        let avg_power_out = ratio(self.window_out, self.window_duration);
        let incident = wave.map(WaveResource::incident_power);

        // Absorbed and generated power are negative in the series sign convention
        let cwr = |avg: Option<f64>| match (avg, incident) {
            (Some(p), Some(i)) => ratio(-p, i),
            _ => None,
        };

        EnergySummary {
            sample_count: self.samples,
            infeasible_count: self.infeasible,
            residual_mismatch_count: self.residual_mismatch,
            start_time: self.first_time,
            end_time: last_time,
            work_in: self.work_in,
            work_out: self.work_out,
            net_efficiency: ratio(self.work_out, self.work_in),
            leakage_energy: self.leakage,
            mechanical_loss_energy: self.mechanical_loss,
            electrical_loss_energy: self.electrical_loss,
            split_energy: self.split,
            split_efficiency: self.split.efficiency(),
            mean_instantaneous_efficiency: ratio(self.efficiency_area, self.efficiency_duration),
            window: self.window,
            window_duration: self.window_duration,
            avg_power_in,
            avg_power_out,
            capture_width_ratio: cwr(avg_power_out),
            hydraulic_capture_width_ratio: cwr(avg_power_in),
        }
    }
}

/// Scalar metrics of one evaluated series.
///
/// Energies in J, powers in W, same sign convention as
/// [`SolvedSample`]: negative work means energy delivered by the PTO.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergySummary {
    pub sample_count: usize,
    pub infeasible_count: usize,
    pub residual_mismatch_count: usize,
    pub start_time: f64,
    pub end_time: f64,

    /// Integral of `p_in`
    pub work_in: f64,
    /// Integral of `p_out`
    pub work_out: f64,
    /// `work_out / work_in`
    pub net_efficiency: Option<f64>,
    pub leakage_energy: f64,
    pub mechanical_loss_energy: f64,
    pub electrical_loss_energy: f64,

    /// Integrals of the sign-split powers
    pub split_energy: PowerSplit,
    /// Output over input energy from the sign-split integrals
    pub split_efficiency: Option<f64>,
    /// Time average of the instantaneous split-sign efficiency over the window
    pub mean_instantaneous_efficiency: Option<f64>,

    pub window: AveragingWindow,
    pub window_duration: f64,
    pub avg_power_in: Option<f64>,
    pub avg_power_out: Option<f64>,
    /// Average generated electrical power over incident wave power
    pub capture_width_ratio: Option<f64>,
    /// Average absorbed hydraulic power over incident wave power
    pub hydraulic_capture_width_ratio: Option<f64>,
}

impl EnergySummary {
    pub fn work_in_energy(&self) -> Energy {
        j(self.work_in)
    }

    pub fn work_out_energy(&self) -> Energy {
        j(self.work_out)
    }

    /// Average electrical power generated over the window (positive when generating).
    pub fn generated_power(&self) -> Option<Power> {
        self.avg_power_out.map(|p| w(-p))
    }
}
