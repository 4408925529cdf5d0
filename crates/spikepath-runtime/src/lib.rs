//! Discrete-time spiking neural network engine
//!
//! This crate provides the simulation substrate for spike-timing
//! computation: node models (LIF, programmed input trains, Bernoulli
//! spikers), weighted integer-delayed synapses, an owning network arena,
//! a deterministic two-phase simulator, and raster/multimeter detectors.
//!
//! Time is a sequence of discrete ticks. Every tick runs a delivery phase
//! (synapses hand due amounts to their post-nodes) followed by an update
//! phase (nodes integrate and spike, synapses schedule future
//! deliveries), which makes the outcome independent of iteration order.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod detector;
pub mod error;
pub mod ids;
pub mod interchange;
pub mod network;
pub mod neuron;
pub mod simulation;
pub mod synapse;

// Re-export essential types
pub use detector::{Multimeter, Raster};
pub use error::{Result, RuntimeError};
pub use ids::{NodeId, SynapseId};
pub use interchange::network_to_text;
pub use network::Network;
pub use neuron::{LifParams, Node, NodeKind};
pub use simulation::Simulator;
pub use synapse::Synapse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_integration() {
        let mut net = Network::new();
        let src = net
            .create_input_train("src", vec![true], false, 1.0)
            .unwrap();
        let dst = net.create_lif("dst", LifParams::default(), 1.0).unwrap();
        net.connect(src, dst, 1.0, 1).unwrap();

        let mut sim = Simulator::new(&mut net, 0);
        sim.record_spikes(dst).unwrap();
        sim.run(3).unwrap();
        assert_eq!(sim.raster().matrix()[[0, 1]], 1);
    }
}
