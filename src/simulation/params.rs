//! Numerical parameters for the simulation
//!
//! `Parameters` holds runtime settings in simulation units:
//! - fixed step size and end time,
//! - the gravitational constant used by the integrator (1 after rescaling),
//! - how the velocity-Verlet half kick treats body 0

use serde::Deserialize;

/// Whether body 0 (the anchor, usually the star) takes part in the first
/// half kick of a velocity-Verlet step.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorHalfKick {
    /// Body 0's half-step velocity is zero, so its new velocity is only the
    /// second half kick `0.5 * dt * a(t + dt)`.
    #[default]
    #[serde(rename = "skip")]
    Skip,

    /// Body 0 is kicked like every other body.
    #[serde(rename = "include")]
    Include,
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // step size
    pub g: f64, // gravitational constant in simulation units
    pub anchor: AnchorHalfKick, // body 0 half kick policy
}

impl Parameters {
    pub fn new(h0: f64, t_end: f64) -> Self {
        Self {
            t_end,
            h0,
            g: 1.0,
            anchor: AnchorHalfKick::default(),
        }
    }

    pub fn with_anchor(mut self, anchor: AnchorHalfKick) -> Self {
        self.anchor = anchor;
        self
    }
}
