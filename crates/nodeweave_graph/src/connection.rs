// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (link) definitions for the graph.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed link from an output port to an input port.
///
/// The source node is conventionally laid out to the left of the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub from_node: NodeId,
    /// Source port ID
    pub from_port: PortId,
    /// Target node ID
    pub to_node: NodeId,
    /// Target port ID
    pub to_port: PortId,
}

impl Connection {
    /// Create a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }

    /// Source and target nodes, in link direction
    pub fn nodes(&self) -> (NodeId, NodeId) {
        (self.from_node, self.to_node)
    }

    /// Source output and target input
    pub fn ports(&self) -> (PortId, PortId) {
        (self.from_port, self.to_port)
    }

    /// Whether this link feeds the given input port
    pub fn feeds(&self, port_id: PortId) -> bool {
        self.to_port == port_id
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Check if this connection involves a specific port
    pub fn involves_port(&self, port_id: PortId) -> bool {
        self.from_port == port_id || self.to_port == port_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_endpoints() {
        let (source, target) = (NodeId::new(), NodeId::new());
        let (output, input) = (PortId::new(), PortId::new());
        let connection = Connection::new(source, output, target, input);

        assert_eq!(connection.nodes(), (source, target));
        assert_eq!(connection.ports(), (output, input));
        assert!(connection.feeds(input));
        assert!(!connection.feeds(output));
        assert!(connection.involves_port(output));
        assert!(connection.involves_node(target));
        assert!(!connection.involves_node(NodeId::new()));
    }
}
