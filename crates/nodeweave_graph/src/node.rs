// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph.

use crate::port::{Port, PortDirection, PortId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width given to nodes that do not specify one
pub const DEFAULT_NODE_WIDTH: f64 = 140.0;

/// Stored height of a node whose real height was never measured
pub const DEFAULT_NODE_HEIGHT: f64 = 100.0;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Inputs (coordinates, constants, images)
    Input,
    /// Final outputs
    Output,
    /// Shading models
    Shader,
    /// Texture lookups
    Texture,
    /// Vector operations
    Vector,
    /// Color operations
    Color,
    /// Layout helpers
    Layout,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Default width of instances
    pub width: f64,
    /// Default input ports
    pub inputs: Vec<Port>,
    /// Default output ports
    pub outputs: Vec<Port>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    /// Node type ID
    pub node_type: String,
    /// Display name
    pub name: String,
    /// Location of the top-left corner. The y axis points up.
    pub position: [f64; 2],
    /// Horizontal extent
    pub width: f64,
    /// Stored height; [`DEFAULT_NODE_HEIGHT`] until measured
    pub height: f64,
    /// Rendered size, zero while unknown
    #[serde(default)]
    pub dimensions: [f64; 2],
    #[serde(default)]
    inputs: Vec<Port>,
    #[serde(default)]
    outputs: Vec<Port>,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType) -> Self {
        let mut node = Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: node_type.name.clone(),
            position: [0.0, 0.0],
            width: node_type.width,
            height: DEFAULT_NODE_HEIGHT,
            dimensions: [0.0, 0.0],
            inputs: node_type.inputs.iter().map(Port::instantiate).collect(),
            outputs: node_type.outputs.iter().map(Port::instantiate).collect(),
        };
        node.reindex_ports();
        node
    }

    /// Create an untyped node with no ports
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            node_type: String::new(),
            name: name.into(),
            position: [0.0, 0.0],
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            dimensions: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Unique instance ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Set the position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the stored height
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the rendered size
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.dimensions = [width, height];
        self
    }

    /// Append an input port
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        let mut port = Port::input(name);
        port.index = self.inputs.len();
        self.inputs.push(port);
        self
    }

    /// Append an output port
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        let mut port = Port::output(name);
        port.index = self.outputs.len();
        self.outputs.push(port);
        self
    }

    /// Input ports, in stacking order
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// Output ports, in stacking order
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Get an input port by index
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Get an output port by index
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Get an input port by name
    pub fn input_named(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Get an output port by name
    pub fn output_named(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs
            .iter()
            .find(|p| p.id == *port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == *port_id))
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Height used when separating overlapping nodes.
    ///
    /// Prefers the rendered height, then a stored height that differs from
    /// `sentinel`, and finally `fallback`.
    pub fn layout_height(&self, sentinel: f64, fallback: f64, epsilon: f64) -> f64 {
        if self.dimensions[1] > epsilon {
            self.dimensions[1]
        } else if (self.height - sentinel).abs() > epsilon {
            self.height
        } else {
            fallback
        }
    }

    /// Restore port indices and directions after the lists were replaced
    pub(crate) fn reindex_ports(&mut self) {
        for (index, port) in self.inputs.iter_mut().enumerate() {
            port.index = index;
            port.direction = PortDirection::Input;
        }
        for (index, port) in self.outputs.iter_mut().enumerate() {
            port.index = index;
            port.direction = PortDirection::Output;
        }
    }
}

/// Registry of available node types
pub struct NodeRegistry {
    /// Registered node types by ID
    types: indexmap::IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: indexmap::IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mix_type() -> NodeType {
        NodeType {
            id: "mix".to_string(),
            name: "Mix".to_string(),
            category: NodeCategory::Color,
            description: "Blend two colors".to_string(),
            width: 160.0,
            inputs: vec![Port::input("Fac"), Port::input("Color1"), Port::input("Color2")],
            outputs: vec![Port::output("Color")],
        }
    }

    #[test]
    fn test_builder_assigns_port_indices() {
        let node = Node::named("Mix")
            .with_input("Fac")
            .with_input("Color1")
            .with_output("Color");

        assert_eq!(node.input(0).map(Port::index), Some(0));
        assert_eq!(node.input_named("Color1").map(Port::index), Some(1));
        assert_eq!(node.output_named("Color").map(Port::index), Some(0));
        assert!(node.input_named("Color2").is_none());
    }

    #[test]
    fn test_new_from_type_uses_type_defaults() {
        let node_type = mix_type();
        let node = Node::new(&node_type);

        assert_eq!(node.width, 160.0);
        assert_eq!(node.height, DEFAULT_NODE_HEIGHT);
        assert_eq!(node.inputs().len(), 3);
        assert_eq!(node.input_named("Color2").map(Port::index), Some(2));
        // Instances never share port IDs with their type
        assert_ne!(node.inputs()[0].id, node_type.inputs[0].id);
    }

    #[test]
    fn test_layout_height_fallback_chain() {
        let node = Node::named("A");
        assert_eq!(node.layout_height(100.0, 200.0, 1e-5), 200.0);

        let node = Node::named("A").with_height(150.0);
        assert_eq!(node.layout_height(100.0, 200.0, 1e-5), 150.0);

        let node = Node::named("A").with_height(150.0).with_dimensions(140.0, 320.0);
        assert_eq!(node.layout_height(100.0, 200.0, 1e-5), 320.0);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = NodeRegistry::new();
        registry.register(mix_type());

        assert!(registry.get("mix").is_some());
        assert!(registry.create_node("missing").is_none());
        assert_eq!(registry.types_in_category(NodeCategory::Color).count(), 1);
        assert_eq!(registry.types_in_category(NodeCategory::Shader).count(), 0);
    }
}
