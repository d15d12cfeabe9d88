// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port (socket) definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Whether multiple connections are allowed
    pub multi_connect: bool,
    /// Position of this port in its node's list for its direction.
    ///
    /// Assigned by the owning [`Node`](crate::Node); never read from documents.
    #[serde(skip)]
    pub(crate) index: usize,
}

impl Port {
    /// Create a new port
    pub fn new(id: PortId, name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            id,
            name: name.into(),
            direction,
            multi_connect: direction == PortDirection::Output,
            index: 0,
        }
    }

    /// Create a new input port
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(PortId::new(), name, PortDirection::Input)
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>) -> Self {
        Self::new(PortId::new(), name, PortDirection::Output)
    }

    /// Allow several links on this port
    pub fn multi(mut self) -> Self {
        self.multi_connect = true;
        self
    }

    /// Stacking index of this port within its node
    pub fn index(&self) -> usize {
        self.index
    }

    /// Copy of this port with a fresh ID, used when instantiating node types
    pub(crate) fn instantiate(&self) -> Self {
        Self {
            id: PortId::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_allow_multiple_links() {
        assert!(Port::output("Color").multi_connect);
        assert!(!Port::input("Color").multi_connect);
        assert!(Port::input("Shader").multi().multi_connect);
    }

    #[test]
    fn test_instantiate_assigns_fresh_id() {
        let port = Port::input("Vector");
        let copy = port.instantiate();
        assert_ne!(port.id, copy.id);
        assert_eq!(copy.name, "Vector");
        assert_eq!(copy.direction, PortDirection::Input);
    }
}
