//! Line-based textual network export
//!
//! One node definition per line, a blank separator, then one synapse
//! definition per line, all in insertion order. The text is an external
//! interchange/debugging surface only; nothing in the engine reads it
//! back.

use std::fmt::Write;

use crate::network::Network;
use crate::neuron::{Node, NodeKind};
use crate::synapse::Synapse;

/// Render a network as interchange text.
pub fn network_to_text(network: &Network) -> String {
    let mut out = String::new();
    for node in network.nodes() {
        let _ = writeln!(out, "{}", node_line(node));
    }
    out.push('\n');
    for syn in network.synapses() {
        let _ = writeln!(out, "{}", synapse_line(network, syn));
    }
    out
}

fn node_line(node: &Node) -> String {
    match node.kind() {
        NodeKind::Lif { params, .. } => format!(
            "lif {} m={} v_init={} v_reset={} v_min={} thr={} i_e={} noise={} amplitude={}",
            node.label(),
            params.m,
            params.v_init,
            params.v_reset,
            params.v_min,
            params.thr,
            params.i_e,
            params.noise,
            node.amplitude(),
        ),
        NodeKind::InputTrain {
            train, loop_train, ..
        } => {
            let bits: String = train.iter().map(|&b| if b { '1' } else { '0' }).collect();
            format!(
                "input_train {} train={} loop={} amplitude={}",
                node.label(),
                bits,
                loop_train,
                node.amplitude(),
            )
        }
        NodeKind::RandomSpiker { p } => format!(
            "random_spiker {} p={} amplitude={}",
            node.label(),
            p,
            node.amplitude(),
        ),
    }
}

fn synapse_line(network: &Network, syn: &Synapse) -> String {
    let pre = network
        .node(syn.pre())
        .map(|n| n.label().to_string())
        .unwrap_or_else(|_| syn.pre().to_string());
    let post = network
        .node(syn.post())
        .map(|n| n.label().to_string())
        .unwrap_or_else(|_| syn.post().to_string());
    format!("synapse {} {} w={} d={}", pre, post, syn.weight(), syn.delay())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::LifParams;

    #[test]
    fn test_layout_nodes_blank_synapses() {
        let mut net = Network::new();
        let a = net
            .create_input_train("in", vec![true, false], true, 1.0)
            .unwrap();
        let b = net.create_lif("out", LifParams::default(), 1.0).unwrap();
        net.connect(a, b, 0.5, 2).unwrap();

        let text = network_to_text(&net);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("input_train in train=10 loop=true"));
        assert!(lines[1].starts_with("lif out "));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "synapse in out w=0.5 d=2");
    }
}
