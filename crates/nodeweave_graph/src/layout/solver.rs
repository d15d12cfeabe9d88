// SPDX-License-Identifier: MIT OR Apache-2.0
//! Two-stage Gauss-Seidel relaxation driver.
//!
//! The expand stage runs with a doubled target spacing and no overlap
//! separation, pushing linked nodes generously apart. The compact stage
//! restores the nominal spacing and separates overlapping nodes. Each stage
//! ends once the squared delta sum stops changing between iterations, which
//! tolerates constraints that keep fighting each other at a steady level.

use super::config::LayoutConfig;
use super::constraint::{self, Body, LinkConstraint};
use crate::connection::Connection;
use crate::graph::Graph;
use crate::node::NodeId;
use std::collections::HashMap;
use std::fmt;

/// Relaxation stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Doubled spacing, no overlap separation
    Expand,
    /// Nominal spacing with overlap separation
    Compact,
}

/// Outcome of one [`LayoutSolver::arrange`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceReport {
    /// Iterations run across both stages
    pub iterations: usize,
    /// Iterations spent in the expand stage
    pub expand_iterations: usize,
    /// Stage the solver finished in
    pub stage: Stage,
    /// False when the iteration cap was reached first
    pub converged: bool,
    /// Squared delta sum of the last iteration
    pub final_squared_deltas_sum: f64,
    /// Change of the squared delta sum over the last iteration
    pub final_delta_change: f64,
}

impl ConvergenceReport {
    fn empty() -> Self {
        Self {
            iterations: 0,
            expand_iterations: 0,
            stage: Stage::Compact,
            converged: true,
            final_squared_deltas_sum: 0.0,
            final_delta_change: 0.0,
        }
    }
}

impl fmt::Display for ConvergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.converged { "converged" } else { "stopped at iteration cap" };
        write!(
            f,
            "{} after {} iterations ({} expanding), squared delta sum {:.3e}",
            status, self.iterations, self.expand_iterations, self.final_squared_deltas_sum
        )
    }
}

/// Constraint-relaxation node arranger
#[derive(Debug, Clone, Default)]
pub struct LayoutSolver {
    config: LayoutConfig,
    verbose: bool,
}

impl LayoutSolver {
    /// Create a solver with the given settings
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    /// Log node names and per-iteration progress at info level
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Settings in use
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Move the graph's nodes to satisfy spacing, alignment and overlap constraints.
    ///
    /// Only node positions change. Hitting the iteration cap is reported, not
    /// treated as an error.
    pub fn arrange(&self, graph: &mut Graph) -> ConvergenceReport {
        if graph.node_count() == 0 {
            return ConvergenceReport::empty();
        }

        if self.verbose {
            tracing::info!("Target nodes:");
            for node in graph.nodes() {
                tracing::info!("- {}", node.name);
            }
        }

        let (mut bodies, links) = self.snapshot(graph);
        let report = self.relax(&mut bodies, &links);

        for (node, body) in graph.nodes_mut().zip(&bodies) {
            node.position = body.position;
        }

        tracing::debug!("Arranged '{}': {}", graph.name, report);
        report
    }

    fn snapshot(&self, graph: &Graph) -> (Vec<Body>, Vec<LinkConstraint>) {
        let config = &self.config;
        let index: HashMap<NodeId, usize> = graph
            .node_ids()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let bodies = graph
            .nodes()
            .map(|node| Body {
                position: node.position,
                width: node.width,
                height: node.layout_height(config.default_height, config.fallback_height, config.epsilon),
            })
            .collect();

        // Connections are validated on insertion, so a miss here is a bug
        let mut links = Vec::with_capacity(graph.connection_count());
        for connection in graph.connections() {
            match resolve_link(graph, &index, connection) {
                Some(link) => links.push(link),
                None => tracing::warn!("Skipping link {:?}: endpoint not in graph", connection.id),
            }
        }

        (bodies, links)
    }

    fn relax(&self, bodies: &mut [Body], links: &[LinkConstraint]) -> ConvergenceReport {
        let config = &self.config;
        let mut stage = Stage::Expand;
        let mut target = config.target_spacing * config.expand_factor;
        let mut expand_iterations = config.max_iterations;
        let mut previous = f64::MAX;
        let mut squared_deltas_sum = 0.0;

        for iteration in 0..config.max_iterations {
            squared_deltas_sum = self.sweep(bodies, links, stage, target);
            let change = previous - squared_deltas_sum;

            if self.verbose {
                tracing::info!("Iteration #{}: {}", iteration, change);
            } else {
                tracing::trace!("Iteration #{}: {}", iteration, change);
            }

            if change.abs() < config.epsilon {
                match stage {
                    Stage::Expand => {
                        tracing::trace!("Expand stage settled after {} iterations", iteration + 1);
                        expand_iterations = iteration + 1;
                        stage = Stage::Compact;
                        target = config.target_spacing;
                    }
                    Stage::Compact => {
                        return ConvergenceReport {
                            iterations: iteration + 1,
                            expand_iterations,
                            stage,
                            converged: true,
                            final_squared_deltas_sum: squared_deltas_sum,
                            final_delta_change: change.abs(),
                        };
                    }
                }
            }

            previous = squared_deltas_sum;
        }

        tracing::warn!(
            "Node layout did not converge after {} iterations",
            config.max_iterations
        );

        ConvergenceReport {
            iterations: config.max_iterations,
            expand_iterations,
            stage,
            converged: false,
            final_squared_deltas_sum: squared_deltas_sum,
            final_delta_change: (previous - squared_deltas_sum).abs(),
        }
    }

    /// One Gauss-Seidel sweep over every active constraint
    fn sweep(&self, bodies: &mut [Body], links: &[LinkConstraint], stage: Stage, target: f64) -> f64 {
        let config = &self.config;
        let rates = config.rates(stage);
        let mut squared_deltas_sum = 0.0;

        if config.fix_horizontal {
            for link in links {
                squared_deltas_sum += constraint::solve_spacing(
                    bodies,
                    link,
                    target,
                    config.skip_threshold_factor,
                    rates.horizontal,
                );
            }
        }

        if config.fix_vertical {
            for link in links {
                squared_deltas_sum +=
                    constraint::solve_alignment(bodies, link, config.socket_offset, rates.vertical);
            }
        }

        if config.fix_overlaps && stage == Stage::Compact {
            let margin = config.overlap_margin_ratio * target;
            for a in 0..bodies.len() {
                for b in (a + 1)..bodies.len() {
                    squared_deltas_sum += constraint::separate(bodies, a, b, margin, rates.overlap);
                }
            }
        }

        squared_deltas_sum
    }
}

fn resolve_link(
    graph: &Graph,
    index: &HashMap<NodeId, usize>,
    connection: &Connection,
) -> Option<LinkConstraint> {
    let (from_node, to_node) = connection.nodes();
    let (from_port, to_port) = connection.ports();
    Some(LinkConstraint {
        from: *index.get(&from_node)?,
        to: *index.get(&to_node)?,
        from_socket: graph.node(from_node)?.port(&from_port)?.index(),
        to_socket: graph.node(to_node)?.port(&to_port)?.index(),
    })
}

/// Arrange a graph with the default settings
pub fn arrange_nodes(graph: &mut Graph) -> ConvergenceReport {
    LayoutSolver::default().arrange(graph)
}
