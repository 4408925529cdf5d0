//! Spike and voltage recording
//!
//! Detectors hold an ordered list of target handles fixed before a run
//! starts, and a matrix of shape targets x ticks allocated at run start
//! and filled column-by-column in tick order. The raster stores spike
//! bits; the multimeter stores each target's continuous state.

use ndarray::Array2;

use crate::ids::NodeId;
use crate::network::Network;

/// Binary spike recorder
#[derive(Debug, Clone)]
pub struct Raster {
    targets: Vec<NodeId>,
    labels: Vec<String>,
    data: Array2<u8>,
}

impl Default for Raster {
    fn default() -> Self {
        Self::new()
    }
}

impl Raster {
    /// Create an empty raster
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            labels: Vec::new(),
            data: Array2::zeros((0, 0)),
        }
    }

    pub(crate) fn add_target(&mut self, id: NodeId, label: String) {
        self.targets.push(id);
        self.labels.push(label);
    }

    pub(crate) fn initialize(&mut self, steps: usize) {
        self.data = Array2::zeros((self.targets.len(), steps));
    }

    pub(crate) fn sample(&mut self, tick: usize, network: &Network) {
        for (row, id) in self.targets.iter().enumerate() {
            if let Ok(node) = network.node(*id) {
                self.data[[row, tick]] = u8::from(node.spiked());
            }
        }
    }

    /// The recorded spike-bit matrix (targets x ticks)
    pub fn matrix(&self) -> &Array2<u8> {
        &self.data
    }

    /// Target labels in registration order, aligned with matrix rows
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Target handles in registration order
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }
}

/// Continuous-state recorder
#[derive(Debug, Clone)]
pub struct Multimeter {
    targets: Vec<NodeId>,
    labels: Vec<String>,
    data: Array2<f64>,
}

impl Default for Multimeter {
    fn default() -> Self {
        Self::new()
    }
}

impl Multimeter {
    /// Create an empty multimeter
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            labels: Vec::new(),
            data: Array2::zeros((0, 0)),
        }
    }

    pub(crate) fn add_target(&mut self, id: NodeId, label: String) {
        self.targets.push(id);
        self.labels.push(label);
    }

    pub(crate) fn initialize(&mut self, steps: usize) {
        self.data = Array2::zeros((self.targets.len(), steps));
    }

    pub(crate) fn sample(&mut self, tick: usize, network: &Network) {
        for (row, id) in self.targets.iter().enumerate() {
            if let Ok(node) = network.node(*id) {
                self.data[[row, tick]] = node.observed_state();
            }
        }
    }

    /// The recorded state matrix (targets x ticks)
    pub fn matrix(&self) -> &Array2<f64> {
        &self.data
    }

    /// Target labels in registration order, aligned with matrix rows
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Target handles in registration order
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }
}
