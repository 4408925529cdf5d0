//! Weighted, delayed synaptic connections
//!
//! A synapse owns a FIFO queue of pending deliveries. A spike observed at
//! tick `t` reaches the post-node's input accumulator exactly at tick
//! `t + delay`, regardless of the order nodes and synapses are visited in.

use std::collections::VecDeque;

use crate::ids::{NodeId, SynapseId};

/// A pending delivery scheduled on a synapse
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transfer {
    /// Amount added to the post-node's accumulator on delivery
    amount: f64,
    /// Tick the amount becomes due
    due: u64,
}

/// Directed, weighted, integer-delayed connection between two nodes
#[derive(Debug, Clone)]
pub struct Synapse {
    id: SynapseId,
    label: String,
    pre: NodeId,
    post: NodeId,
    weight: f64,
    delay: u64,
    queue: VecDeque<Transfer>,
}

impl Synapse {
    pub(crate) fn new(
        id: SynapseId,
        label: String,
        pre: NodeId,
        post: NodeId,
        weight: f64,
        delay: u64,
    ) -> Self {
        Self {
            id,
            label,
            pre,
            post,
            weight,
            delay,
            queue: VecDeque::new(),
        }
    }

    /// Get the synapse's arena handle
    pub fn id(&self) -> SynapseId {
        self.id
    }

    /// Get the synapse's label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pre-synaptic node handle
    pub fn pre(&self) -> NodeId {
        self.pre
    }

    /// Post-synaptic node handle
    pub fn post(&self) -> NodeId {
        self.post
    }

    /// Synaptic weight
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Transmission delay in ticks
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Schedule delivery of a pre-node spike observed at `tick`.
    ///
    /// `amplitude` is the pre-node's emission amplitude; the queued amount
    /// is `amplitude * weight`, due at `tick + delay`.
    pub fn observe_pre_spike(&mut self, tick: u64, amplitude: f64) {
        self.queue.push_back(Transfer {
            amount: amplitude * self.weight,
            due: tick + self.delay,
        });
    }

    /// Dequeue and sum every entry due exactly at `tick`.
    ///
    /// Delivery ticks are monotone in queue order because the delay is
    /// constant per synapse, so only the head needs inspecting. Coincident
    /// entries from back-to-back pre-spikes with differing enqueue ticks
    /// cannot occur for the same reason, but the sum handles them anyway.
    pub fn collect_due(&mut self, tick: u64) -> f64 {
        let mut total = 0.0;
        while self.queue.front().map_or(false, |t| t.due == tick) {
            if let Some(t) = self.queue.pop_front() {
                total += t.amount;
            }
        }
        total
    }

    /// Number of deliveries still in flight
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}
