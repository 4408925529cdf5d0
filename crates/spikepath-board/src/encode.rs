//! Lowering a board onto the simulation engine
//!
//! One node per board position: position 0 is a one-shot input train, the
//! rest are unit-threshold LIF cells. Every move-graph edge contributes a
//! cell-to-cell synapse plus an edge-readout LIF fed from the same
//! source, all with weight 1 and delay 1, so a readout spikes on exactly
//! the tick its move arrives at the destination cell.
//!
//! Cell labels are `B{index}`; readout labels are
//! `{P|L|S}{target_cell}-D{dice_value}`. Every raster target also carries
//! structured metadata captured here at configuration time, and the
//! decoder consumes that metadata rather than re-parsing the labels.

use ndarray::Array2;

use spikepath_runtime::{network_to_text, LifParams, Network, NodeId, Simulator};

use crate::board::{Board, EdgeKind};
use crate::error::*;

/// Structured role of one raster row, attached at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMeta {
    /// A board-position node
    Cell {
        /// The position index
        index: u32,
    },
    /// An edge-readout node
    Edge {
        /// How the move reaches its destination
        kind: EdgeKind,
        /// The destination position
        target: u32,
        /// The die value of the move
        dice: u32,
    },
}

/// A finished recording of a board run: the raster matrix, its labels,
/// and the per-row metadata, all aligned by row
#[derive(Debug, Clone)]
pub struct SpikeTrace {
    /// Spike bits, one row per target, one column per tick
    pub matrix: Array2<u8>,
    /// Display labels per row
    pub labels: Vec<String>,
    /// Structured role per row
    pub meta: Vec<TargetMeta>,
}

/// A board lowered onto a spiking network, ready to simulate
#[derive(Debug)]
pub struct BoardNetwork {
    network: Network,
    targets: Vec<NodeId>,
    meta: Vec<TargetMeta>,
}

impl BoardNetwork {
    /// Lower `board` onto a fresh network.
    pub fn build(board: &Board) -> Result<Self> {
        let mut network = Network::new();
        let mut targets = Vec::new();
        let mut meta = Vec::new();

        let cell_params = LifParams::default(); // thr 1, m 1, v_reset 0

        let mut cell_ids = Vec::with_capacity(board.cells() as usize + 1);
        for index in 0..=board.cells() {
            let label = format!("B{}", index);
            let id = if index == 0 {
                network.create_input_train(label, vec![true], false, 1.0)?
            } else {
                network.create_lif(label, cell_params.clone(), 1.0)?
            };
            cell_ids.push(id);
            targets.push(id);
            meta.push(TargetMeta::Cell { index });
        }

        let connections = board.connections();
        for con in &connections {
            let from = cell_ids[con.from as usize];
            let to = cell_ids[con.to as usize];
            network.connect(from, to, 1.0, 1)?;

            let label = format!("{}{}-D{}", con.kind.prefix(), con.to, con.dice);
            let readout = network.create_lif(label, cell_params.clone(), 1.0)?;
            network.connect(from, readout, 1.0, 1)?;
            targets.push(readout);
            meta.push(TargetMeta::Edge {
                kind: con.kind,
                target: con.to,
                dice: con.dice,
            });
        }

        log::info!(
            "lowered board ({} positions, {} moves) onto {} nodes / {} synapses",
            board.cells() + 1,
            connections.len(),
            network.node_count(),
            network.synapse_count()
        );

        Ok(Self {
            network,
            targets,
            meta,
        })
    }

    /// Run the network for `steps` ticks and return the recorded trace.
    pub fn simulate(&mut self, steps: u64, seed: u64) -> Result<SpikeTrace> {
        let mut sim = Simulator::new(&mut self.network, seed);
        for id in &self.targets {
            sim.record_spikes(*id)?;
        }
        sim.run(steps)?;
        Ok(SpikeTrace {
            matrix: sim.raster().matrix().clone(),
            labels: sim.raster().labels().to_vec(),
            meta: self.meta.clone(),
        })
    }

    /// The underlying network
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Render the network as interchange text.
    pub fn to_text(&self) -> String {
        network_to_text(&self.network)
    }
}
