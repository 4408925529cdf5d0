//! Network arena owning all nodes and synapses
//!
//! The network is the sole owner of node and synapse lifetime; everything
//! else refers to members through [`NodeId`]/[`SynapseId`] handles.
//! Insertion order is significant: it is the default iteration order, the
//! display order, and the order stochastic draws are consumed in during a
//! run. The synapse list doubles as the topology edge list.

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::error::*;
use crate::ids::{NodeId, SynapseId};
use crate::neuron::{LifParams, Node, NodeKind};
use crate::synapse::Synapse;

/// Owning collection of nodes and synapses
#[derive(Debug, Default)]
pub struct Network {
    nodes: Vec<Node>,
    synapses: Vec<Synapse>,
    labels: HashMap<String, NodeId>,
}

impl Network {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaky integrate-and-fire node
    pub fn create_lif(
        &mut self,
        label: impl Into<String>,
        params: LifParams,
        amplitude: f64,
    ) -> Result<NodeId> {
        params.validate()?;
        let v = params.v_init;
        self.insert_node(label.into(), amplitude, NodeKind::Lif { params, v })
    }

    /// Create a programmed input spike train node
    pub fn create_input_train(
        &mut self,
        label: impl Into<String>,
        train: Vec<bool>,
        loop_train: bool,
        amplitude: f64,
    ) -> Result<NodeId> {
        self.insert_node(
            label.into(),
            amplitude,
            NodeKind::InputTrain {
                train,
                loop_train,
                index: 0,
            },
        )
    }

    /// Create a Bernoulli spiker node
    pub fn create_random_spiker(
        &mut self,
        label: impl Into<String>,
        p: f64,
        amplitude: f64,
    ) -> Result<NodeId> {
        if !(0.0..=1.0).contains(&p) {
            return Err(RuntimeError::invalid_parameter(
                "p",
                p.to_string(),
                "within [0, 1]",
            ));
        }
        self.insert_node(label.into(), amplitude, NodeKind::RandomSpiker { p })
    }

    fn insert_node(&mut self, label: String, amplitude: f64, kind: NodeKind) -> Result<NodeId> {
        if label.is_empty() {
            return Err(RuntimeError::invalid_parameter(
                "label",
                label,
                "non-empty",
            ));
        }
        if self.labels.contains_key(&label) {
            return Err(RuntimeError::DuplicateLabel { label });
        }
        let id = NodeId::new(self.nodes.len() as u32);
        self.labels.insert(label.clone(), id);
        self.nodes.push(Node::new(id, label, amplitude, kind));
        Ok(id)
    }

    /// Connect two nodes with a weighted, delayed synapse.
    ///
    /// The delay must be at least one tick: a spike can never take effect
    /// in the tick it was emitted.
    pub fn connect(
        &mut self,
        pre: NodeId,
        post: NodeId,
        weight: f64,
        delay: u64,
    ) -> Result<SynapseId> {
        if delay < 1 {
            return Err(RuntimeError::invalid_parameter(
                "delay",
                delay.to_string(),
                ">= 1",
            ));
        }
        let pre_label = self.node(pre)?.label().to_string();
        let post_label = self.node(post)?.label().to_string();
        let id = SynapseId::new(self.synapses.len() as u32);
        let label = format!("{}->{}", pre_label, post_label);
        self.synapses
            .push(Synapse::new(id, label, pre, post, weight, delay));
        log::debug!("connected {} (w={}, d={})", self.synapses[id.index()].label(), weight, delay);
        Ok(id)
    }

    /// Look up a node by handle
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .ok_or(RuntimeError::NodeNotFound { node_id: id.raw() })
    }

    /// Look up a synapse by handle
    pub fn synapse(&self, id: SynapseId) -> Result<&Synapse> {
        self.synapses
            .get(id.index())
            .ok_or_else(|| RuntimeError::invalid_config(format!("synapse {} not found", id)))
    }

    /// Look up a node handle by label
    pub fn lookup(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of synapses
    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Iterate nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate synapses in insertion order
    pub fn synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.iter()
    }

    /// Topology view: (pre, post) handle pairs in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.synapses.iter().map(|s| (s.pre(), s.post()))
    }

    /// Delivery phase: move every due synaptic amount into its post-node's
    /// pending-input accumulator.
    pub(crate) fn deliver_phase(&mut self, tick: u64) {
        let Self {
            nodes, synapses, ..
        } = self;
        for syn in synapses.iter_mut() {
            let amount = syn.collect_due(tick);
            if amount != 0.0 {
                if let Some(node) = nodes.get_mut(syn.post().index()) {
                    node.add_input(amount);
                }
            }
        }
    }

    /// Update phase: every node consumes its accumulator and steps; every
    /// synapse then observes its pre-node's just-computed spike flag.
    pub(crate) fn update_phase(&mut self, tick: u64, rng: &mut StdRng) {
        for node in self.nodes.iter_mut() {
            let input = node.take_pending();
            node.step(input, rng);
        }
        let Self {
            nodes, synapses, ..
        } = self;
        for syn in synapses.iter_mut() {
            if let Some(pre) = nodes.get(syn.pre().index()) {
                if pre.spiked() {
                    syn.observe_pre_spike(tick, pre.amplitude());
                }
            }
        }
    }
}
