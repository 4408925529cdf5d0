//! Node models for the simulation engine
//!
//! Three kinds of node share the per-tick `step` contract: leaky
//! integrate-and-fire, a programmed input spike train, and a Bernoulli
//! spiker. Each kind is a flat data record plus a pure update function;
//! there is no inheritance hierarchy.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::*;
use crate::ids::NodeId;

/// Parameters for leaky integrate-and-fire nodes
#[derive(Debug, Clone, PartialEq)]
pub struct LifParams {
    /// Membrane decay multiplier applied each tick
    pub m: f64,
    /// Initial membrane potential
    pub v_init: f64,
    /// Potential the membrane resets to after a spike
    pub v_reset: f64,
    /// Lower bound on the membrane potential
    pub v_min: f64,
    /// Firing threshold
    pub thr: f64,
    /// Constant bias current added every tick
    pub i_e: f64,
    /// Standard deviation of the Gaussian noise term (0 disables noise)
    pub noise: f64,
}

impl Default for LifParams {
    fn default() -> Self {
        Self {
            m: 1.0,
            v_init: 0.0,
            v_reset: 0.0,
            v_min: 0.0,
            thr: 1.0,
            i_e: 0.0,
            noise: 0.0,
        }
    }
}

impl LifParams {
    /// Create new LIF parameters with validation
    pub fn new(
        m: f64,
        v_init: f64,
        v_reset: f64,
        v_min: f64,
        thr: f64,
        i_e: f64,
        noise: f64,
    ) -> Result<Self> {
        let params = Self {
            m,
            v_init,
            v_reset,
            v_min,
            thr,
            i_e,
            noise,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if self.noise < 0.0 || !self.noise.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "noise",
                self.noise.to_string(),
                ">= 0.0",
            ));
        }
        if self.v_reset < self.v_min {
            return Err(RuntimeError::invalid_parameter(
                "v_reset",
                format!("{} (with v_min={})", self.v_reset, self.v_min),
                ">= v_min",
            ));
        }
        if self.v_init < self.v_min {
            return Err(RuntimeError::invalid_parameter(
                "v_init",
                format!("{} (with v_min={})", self.v_init, self.v_min),
                ">= v_min",
            ));
        }
        Ok(())
    }
}

/// Kind-specific state of a node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Leaky integrate-and-fire unit
    Lif {
        /// Node parameters
        params: LifParams,
        /// Current membrane potential
        v: f64,
    },
    /// Programmed spike train playback
    InputTrain {
        /// Spike values replayed one per tick
        train: Vec<bool>,
        /// Wrap to the start on exhaustion instead of going silent
        loop_train: bool,
        /// Current playback index
        index: usize,
    },
    /// Bernoulli spiker drawing against the run's RNG stream
    RandomSpiker {
        /// Spike probability per tick
        p: f64,
    },
}

/// A single simulation node
///
/// Common fields live here; kind-specific state lives in [`NodeKind`].
/// The spike flag is recomputed fresh on every tick.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    label: String,
    amplitude: f64,
    kind: NodeKind,
    spike: bool,
    pending: f64,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: String, amplitude: f64, kind: NodeKind) -> Self {
        Self {
            id,
            label,
            amplitude,
            kind,
            spike: false,
            pending: 0.0,
        }
    }

    /// Get the node's arena handle
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the spike amplitude this node emits
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Whether the node spiked on the most recent tick
    pub fn spiked(&self) -> bool {
        self.spike
    }

    /// Kind-specific state
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Continuous state sampled by the multimeter: the membrane potential
    /// for LIF nodes, the emitted value for the other kinds.
    pub fn observed_state(&self) -> f64 {
        match &self.kind {
            NodeKind::Lif { v, .. } => *v,
            _ => {
                if self.spike {
                    self.amplitude
                } else {
                    0.0
                }
            }
        }
    }

    /// Add to the pending-input accumulator (delivery phase)
    pub(crate) fn add_input(&mut self, amount: f64) {
        self.pending += amount;
    }

    /// Consume and clear the pending-input accumulator (update phase)
    pub(crate) fn take_pending(&mut self) -> f64 {
        std::mem::take(&mut self.pending)
    }

    /// Advance the node by one tick given its accumulated input.
    ///
    /// Returns the freshly computed spike flag. The flag is also stored on
    /// the node so synapses and detectors can observe it after the update
    /// phase.
    pub fn step(&mut self, input: f64, rng: &mut StdRng) -> bool {
        let fired = match &mut self.kind {
            NodeKind::Lif { params, v } => {
                // A spiking tick leaves v at v_reset, so the post-spike
                // reset is already in place when integration resumes.
                let noise = if params.noise > 0.0 {
                    Normal::new(0.0, params.noise)
                        .map(|dist| dist.sample(rng))
                        .unwrap_or(0.0)
                } else {
                    0.0
                };
                *v = (params.m * *v + params.i_e + noise + input).max(params.v_min);
                if *v >= params.thr {
                    *v = params.v_reset;
                    true
                } else {
                    false
                }
            }
            NodeKind::InputTrain {
                train,
                loop_train,
                index,
            } => {
                let fired = train.get(*index).copied().unwrap_or(false);
                if *index < train.len() {
                    *index += 1;
                }
                if *loop_train && *index >= train.len() {
                    *index = 0;
                }
                fired
            }
            NodeKind::RandomSpiker { p } => rng.gen::<f64>() < *p,
        };
        self.spike = fired;
        fired
    }
}
