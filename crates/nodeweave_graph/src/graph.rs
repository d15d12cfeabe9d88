// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.
//!
//! Every connection is validated when it enters the graph, whether through
//! [`Graph::connect`] or by deserializing a document, so layout code can rely
//! on each link's ports being real members of its nodes.

use crate::connection::{Connection, ConnectionId};
use crate::file::{self, FileError};
use crate::layout::{ConvergenceReport, LayoutConfig, LayoutSolver};
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Connections in insertion order
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph.
    ///
    /// A node whose ID is already present replaces the old one in place, and
    /// the old node's connections are removed with it.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        node.reindex_ports();
        let id = node.id();
        if self.nodes.insert(id, node).is_some() {
            let before = self.connections.len();
            self.connections.retain(|_, c| !c.involves_node(id));
            tracing::debug!(
                "Replaced node {:?}, dropped {} connections",
                id,
                before - self.connections.len()
            );
        }
        id
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all nodes mutably
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Link an output port of one node to an input port of another
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, GraphError> {
        self.insert_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Link ports looked up by name
    pub fn connect_named(
        &mut self,
        from_node: NodeId,
        output: &str,
        to_node: NodeId,
        input: &str,
    ) -> Result<ConnectionId, GraphError> {
        let source = self.nodes.get(&from_node).ok_or(GraphError::NodeNotFound(from_node))?;
        let from_port = source
            .output_named(output)
            .ok_or_else(|| GraphError::PortNameNotFound(output.to_string()))?
            .id;
        let target = self.nodes.get(&to_node).ok_or(GraphError::NodeNotFound(to_node))?;
        let to_port = target
            .input_named(input)
            .ok_or_else(|| GraphError::PortNameNotFound(input.to_string()))?
            .id;

        self.connect(from_node, from_port, to_node, to_port)
    }

    fn insert_connection(&mut self, connection: Connection) -> Result<ConnectionId, GraphError> {
        let source_node = self
            .nodes
            .get(&connection.from_node)
            .ok_or(GraphError::NodeNotFound(connection.from_node))?;
        let target_node = self
            .nodes
            .get(&connection.to_node)
            .ok_or(GraphError::NodeNotFound(connection.to_node))?;

        let source_port = source_node
            .port(&connection.from_port)
            .ok_or(GraphError::PortNotFound(connection.from_port))?;
        if source_port.direction != PortDirection::Output {
            return Err(GraphError::WrongDirection(connection.from_port));
        }
        let target_port = target_node
            .port(&connection.to_port)
            .ok_or(GraphError::PortNotFound(connection.to_port))?;
        if target_port.direction != PortDirection::Input {
            return Err(GraphError::WrongDirection(connection.to_port));
        }

        if connection.from_node == connection.to_node {
            return Err(GraphError::SelfLoop);
        }

        if !target_port.multi_connect
            && self.connections.values().any(|c| c.feeds(connection.to_port))
        {
            return Err(GraphError::PortAlreadyConnected(connection.to_port));
        }

        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.shift_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Re-check every connection against the graph's nodes
    pub fn validate(&self) -> Result<(), GraphError> {
        Graph::try_from(GraphDocument::from(self.clone())).map(|_| ())
    }

    /// Arrange the nodes with the given settings
    pub fn arrange(&mut self, config: &LayoutConfig) -> ConvergenceReport {
        LayoutSolver::new(config.clone()).arrange(self)
    }

    /// Load a graph document (RON, or JSON for `.json` files)
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let graph: Graph = file::read_document(path)?;
        tracing::debug!(
            "Loaded graph '{}' ({} nodes, {} connections) from {:?}",
            graph.name,
            graph.node_count(),
            graph.connection_count(),
            path
        );
        Ok(graph)
    }

    /// Save the graph document (RON, or JSON for `.json` files)
    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        file::write_document(self, path)
    }

    /// Parse a graph from RON
    pub fn from_ron_str(content: &str) -> Result<Self, FileError> {
        file::from_ron_str(content)
    }

    /// Render the graph as pretty RON
    pub fn to_ron_string(&self) -> Result<String, FileError> {
        file::to_ron_string(self)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Serialized form of a [`Graph`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Graph name
    pub name: String,
    /// Nodes in insertion order
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Connections in insertion order
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        Self {
            name: graph.name,
            nodes: graph.nodes.into_values().collect(),
            connections: graph.connections.into_values().collect(),
        }
    }
}

impl TryFrom<GraphDocument> for Graph {
    type Error = GraphError;

    fn try_from(document: GraphDocument) -> Result<Self, Self::Error> {
        let mut graph = Graph::new(document.name);
        for node in document.nodes {
            if graph.nodes.contains_key(&node.id()) {
                return Err(GraphError::DuplicateNode(node.id()));
            }
            graph.add_node(node);
        }
        for connection in document.connections {
            graph.insert_connection(connection)?;
        }
        Ok(graph)
    }
}

/// Error when building or validating a graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port is not a member of the node it is linked through
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// No port with this name on the node
    #[error("No port named '{0}'")]
    PortNameNotFound(String),

    /// Link starts at an input or ends at an output
    #[error("Port has the wrong direction for this link: {0:?}")]
    WrongDirection(PortId),

    /// Port is already connected
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// Two nodes share an ID
    #[error("Duplicate node: {0:?}")]
    DuplicateNode(NodeId),

    /// Node type missing from the registry
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture_node() -> Node {
        Node::named("Image Texture")
            .with_input("Vector")
            .with_output("Color")
            .with_output("Alpha")
    }

    fn principled_node() -> Node {
        Node::named("Principled BSDF")
            .with_input("Base Color")
            .with_input("Metallic")
            .with_output("BSDF")
    }

    #[test]
    fn test_connect_by_name() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());

        let id = graph.connect_named(texture, "Color", principled, "Metallic").unwrap();
        let connection = graph.connection(id).unwrap();
        assert_eq!(connection.from_node, texture);
        assert_eq!(connection.to_node, principled);
        assert_eq!(graph.connections_for_node(principled).count(), 1);

        assert!(graph.disconnect(id).is_some());
        assert_eq!(graph.connection_count(), 0);
        // The input is free again
        graph.connect_named(texture, "Alpha", principled, "Metallic").unwrap();
    }

    #[test]
    fn test_readding_node_drops_its_links() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());
        graph.connect_named(texture, "Color", principled, "Base Color").unwrap();

        let replacement = graph.node(texture).unwrap().clone().with_position(10.0, 0.0);
        assert_eq!(graph.add_node(replacement), texture);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.node_ids().next(), Some(texture));
        assert_eq!(graph.node(texture).unwrap().position, [10.0, 0.0]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_connect_rejects_foreign_port() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());
        let stranger = PortId::new();

        let input = graph.node(principled).unwrap().inputs()[0].id;
        assert_eq!(
            graph.connect(texture, stranger, principled, input),
            Err(GraphError::PortNotFound(stranger))
        );
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_connect_rejects_wrong_direction() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());

        let texture_input = graph.node(texture).unwrap().inputs()[0].id;
        let principled_input = graph.node(principled).unwrap().inputs()[0].id;
        assert_eq!(
            graph.connect(texture, texture_input, principled, principled_input),
            Err(GraphError::WrongDirection(texture_input))
        );
    }

    #[test]
    fn test_connect_rejects_self_loop_and_double_input() {
        let mut graph = Graph::new("Material");
        let a = graph.add_node(texture_node());
        let b = graph.add_node(texture_node());

        assert_eq!(graph.connect_named(a, "Color", a, "Vector"), Err(GraphError::SelfLoop));
        graph.connect_named(a, "Color", b, "Vector").unwrap();
        assert!(matches!(
            graph.connect_named(a, "Alpha", b, "Vector"),
            Err(GraphError::PortAlreadyConnected(_))
        ));
        assert_eq!(
            graph.connect_named(a, "Normal", b, "Vector"),
            Err(GraphError::PortNameNotFound("Normal".to_string()))
        );
    }

    #[test]
    fn test_remove_node_drops_links() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());
        graph.connect_named(texture, "Color", principled, "Base Color").unwrap();

        assert!(graph.remove_node(texture).is_some());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_ron_round_trip_keeps_order_and_indices() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node().with_position(-300.0, 20.0));
        let principled = graph.add_node(principled_node());
        graph.connect_named(texture, "Alpha", principled, "Metallic").unwrap();

        let ron_str = graph.to_ron_string().unwrap();
        let loaded = Graph::from_ron_str(&ron_str).unwrap();

        assert_eq!(loaded.name, "Material");
        assert_eq!(loaded.node_ids().collect::<Vec<_>>(), vec![texture, principled]);
        assert_eq!(loaded.node(texture).unwrap().position, [-300.0, 20.0]);
        let alpha = loaded.node(texture).unwrap().output_named("Alpha").unwrap();
        assert_eq!(alpha.index(), 1);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_document_with_dangling_port_is_rejected() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());
        let principled = graph.add_node(principled_node());
        graph.connect_named(texture, "Color", principled, "Base Color").unwrap();

        let mut document = GraphDocument::from(graph);
        document.connections[0].to_port = PortId::new();
        assert!(matches!(Graph::try_from(document), Err(GraphError::PortNotFound(_))));
    }

    #[test]
    fn test_document_with_repeated_node_is_rejected() {
        let mut graph = Graph::new("Material");
        let texture = graph.add_node(texture_node());

        let mut document = GraphDocument::from(graph);
        document.nodes.push(document.nodes[0].clone());
        assert_eq!(Graph::try_from(document).err(), Some(GraphError::DuplicateNode(texture)));
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");

        let mut graph = Graph::new("World");
        let a = graph.add_node(texture_node());
        let b = graph.add_node(texture_node());
        graph.connect_named(a, "Color", b, "Vector").unwrap();
        graph.save(&path).unwrap();

        let loaded = Graph::load(&path).unwrap();
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.connection_count(), 1);
    }
}
