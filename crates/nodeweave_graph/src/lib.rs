// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph model and auto-layout for shader node trees.
//!
//! This crate provides:
//! - A graph model with ordered input/output sockets
//! - Link validation when the graph is built or loaded
//! - A constraint-relaxation solver that arranges node positions
//! - Builders for common material and world node trees
//!
//! ## Layout
//!
//! [`LayoutSolver`] runs two Gauss-Seidel stages over horizontal spacing,
//! socket alignment and overlap constraints until the correction magnitude
//! settles. Only node positions are changed.

pub mod connection;
pub mod file;
pub mod graph;
pub mod graphs;
pub mod layout;
pub mod node;
pub mod port;

pub use connection::{Connection, ConnectionId};
pub use file::{DocumentFormat, FileError};
pub use graph::{Graph, GraphDocument, GraphError};
pub use layout::{arrange_nodes, ConvergenceReport, LayoutConfig, LayoutSolver, Stage};
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType};
pub use port::{Port, PortDirection, PortId};
