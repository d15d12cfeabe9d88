// SPDX-License-Identifier: MIT OR Apache-2.0
//! Automatic node arrangement.
//!
//! Nodes are positioned by local pairwise corrections iterated to a steady
//! state rather than by a global layout pass:
//! - linked nodes are kept a target distance apart horizontally
//! - linked sockets are brought to the same height
//! - overlapping nodes are pushed apart along the cheaper axis

mod config;
mod constraint;
mod solver;

pub use config::{ConfigError, LayoutConfig, StageRates, LAYOUT_CONFIG_VERSION};
pub use solver::{arrange_nodes, ConvergenceReport, LayoutSolver, Stage};
