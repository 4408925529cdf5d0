//! Fixed-horizon simulation driver
//!
//! The simulator borrows a network and advances it tick by tick. Each tick
//! runs two ordered phases so the net effect is independent of the order
//! nodes and synapses are visited in:
//!
//! 1. delivery: every synapse hands its due amounts to its post-node's
//!    pending-input accumulator;
//! 2. update: every node consumes its accumulator and recomputes its
//!    state and spike flag, then every synapse observes its pre-node's
//!    fresh spike to schedule the future delivery.
//!
//! Detectors sample strictly after phase 2. A delay of one tick therefore
//! means "available for the immediately following delivery phase", never
//! "same tick".

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::detector::{Multimeter, Raster};
use crate::error::*;
use crate::ids::NodeId;
use crate::network::Network;

/// Drives a network through a fixed number of discrete ticks
#[derive(Debug)]
pub struct Simulator<'net> {
    network: &'net mut Network,
    raster: Raster,
    multimeter: Multimeter,
    rng: StdRng,
    completed: bool,
}

impl<'net> Simulator<'net> {
    /// Create a simulator over a network with a seeded RNG stream.
    ///
    /// Identical topology, initial state, and seed reproduce identical
    /// raster and multimeter matrices.
    pub fn new(network: &'net mut Network, seed: u64) -> Self {
        Self {
            network,
            raster: Raster::new(),
            multimeter: Multimeter::new(),
            rng: StdRng::seed_from_u64(seed),
            completed: false,
        }
    }

    /// Register a node with the spike raster. Target order is fixed by
    /// registration order and must be completed before [`run`](Self::run).
    pub fn record_spikes(&mut self, id: NodeId) -> Result<()> {
        if self.completed {
            return Err(RuntimeError::invalid_config(
                "cannot add raster targets after the run",
            ));
        }
        let label = self.network.node(id)?.label().to_string();
        self.raster.add_target(id, label);
        Ok(())
    }

    /// Register a node with the multimeter. Target order is fixed by
    /// registration order and must be completed before [`run`](Self::run).
    pub fn record_state(&mut self, id: NodeId) -> Result<()> {
        if self.completed {
            return Err(RuntimeError::invalid_config(
                "cannot add multimeter targets after the run",
            ));
        }
        let label = self.network.node(id)?.label().to_string();
        self.multimeter.add_target(id, label);
        Ok(())
    }

    /// Run exactly `steps` ticks to completion.
    ///
    /// The horizon is fixed up front; the engine never stops early. One
    /// batch per simulator: a second call is rejected.
    pub fn run(&mut self, steps: u64) -> Result<()> {
        if self.completed {
            return Err(RuntimeError::invalid_config(
                "simulator already ran its batch",
            ));
        }
        self.completed = true;

        log::info!(
            "running {} ticks over {} nodes / {} synapses",
            steps,
            self.network.node_count(),
            self.network.synapse_count()
        );

        self.raster.initialize(steps as usize);
        self.multimeter.initialize(steps as usize);

        for tick in 0..steps {
            self.network.deliver_phase(tick);
            self.network.update_phase(tick, &mut self.rng);
            self.raster.sample(tick as usize, self.network);
            self.multimeter.sample(tick as usize, self.network);
        }

        log::debug!("run complete after {} ticks", steps);
        Ok(())
    }

    /// The spike raster
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The multimeter
    pub fn multimeter(&self) -> &Multimeter {
        &self.multimeter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::LifParams;

    fn chain(delay: u64) -> (Network, NodeId, NodeId) {
        let mut net = Network::new();
        let src = net
            .create_input_train("src", vec![true], false, 1.0)
            .unwrap();
        let dst = net.create_lif("dst", LifParams::default(), 1.0).unwrap();
        net.connect(src, dst, 1.0, delay).unwrap();
        (net, src, dst)
    }

    #[test]
    fn test_raster_shape() {
        let (mut net, src, dst) = chain(1);
        let mut sim = Simulator::new(&mut net, 0);
        sim.record_spikes(src).unwrap();
        sim.record_spikes(dst).unwrap();
        sim.run(7).unwrap();
        assert_eq!(sim.raster().matrix().dim(), (2, 7));
        assert_eq!(sim.multimeter().matrix().dim(), (0, 7));
    }

    #[test]
    fn test_delay_one_means_next_tick() {
        let (mut net, src, dst) = chain(1);
        let mut sim = Simulator::new(&mut net, 0);
        sim.record_spikes(src).unwrap();
        sim.record_spikes(dst).unwrap();
        sim.run(4).unwrap();
        let m = sim.raster().matrix();
        assert_eq!(m.row(0).to_vec(), vec![1, 0, 0, 0]);
        assert_eq!(m.row(1).to_vec(), vec![0, 1, 0, 0]);
    }

    #[test]
    fn test_multi_tick_delay() {
        let (mut net, _, dst) = chain(3);
        let mut sim = Simulator::new(&mut net, 0);
        sim.record_spikes(dst).unwrap();
        sim.run(6).unwrap();
        assert_eq!(sim.raster().matrix().row(0).to_vec(), vec![0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_multimeter_records_reset_value_on_spike_tick() {
        let mut net = Network::new();
        let lif = net
            .create_lif(
                "lif",
                LifParams {
                    i_e: 0.5,
                    ..LifParams::default()
                },
                1.0,
            )
            .unwrap();
        let mut sim = Simulator::new(&mut net, 0);
        sim.record_state(lif).unwrap();
        sim.run(4).unwrap();
        // v climbs to 0.5, hits 1.0 and resets, climbs again.
        assert_eq!(sim.multimeter().matrix().row(0).to_vec(), vec![0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        fn run_once() -> Vec<u8> {
            let mut net = Network::new();
            let r = net.create_random_spiker("r", 0.4, 1.0).unwrap();
            let l = net.create_lif("l", LifParams::default(), 1.0).unwrap();
            net.connect(r, l, 0.6, 2).unwrap();
            let mut sim = Simulator::new(&mut net, 1234);
            sim.record_spikes(r).unwrap();
            sim.record_spikes(l).unwrap();
            sim.run(50).unwrap();
            sim.raster().matrix().iter().copied().collect()
        }
        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn test_second_run_rejected() {
        let (mut net, _, _) = chain(1);
        let mut sim = Simulator::new(&mut net, 0);
        sim.run(2).unwrap();
        assert!(sim.run(2).is_err());
    }

    #[test]
    fn test_target_registration_after_run_rejected() {
        let (mut net, src, _) = chain(1);
        let mut sim = Simulator::new(&mut net, 0);
        sim.run(2).unwrap();
        assert!(sim.record_spikes(src).is_err());
    }
}
