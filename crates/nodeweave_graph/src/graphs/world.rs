// SPDX-License-Identifier: MIT OR Apache-2.0
//! World (environment lighting) node trees.

use super::shader::{self, add_typed_node};
use crate::graph::{Graph, GraphError};
use crate::node::{NodeId, NodeRegistry};

/// Background shader feeding the world output, as every world starts
fn add_background_output(graph: &mut Graph, registry: &NodeRegistry) -> Result<NodeId, GraphError> {
    let background = add_typed_node(graph, registry, shader::BACKGROUND)?;
    let output = add_typed_node(graph, registry, shader::WORLD_OUTPUT)?;
    graph.connect_named(background, "Background", output, "Surface")?;
    Ok(background)
}

/// Constant color background
pub fn build_rgb_background_graph() -> Result<Graph, GraphError> {
    let registry = shader::create_shader_registry();
    let mut graph = Graph::new("RGB Background");

    let background = add_background_output(&mut graph, &registry)?;
    let rgb = add_typed_node(&mut graph, &registry, shader::RGB)?;
    graph.connect_named(rgb, "Color", background, "Color")?;

    Ok(graph)
}

/// Rotatable environment image background
pub fn build_environment_background_graph(image: &str) -> Result<Graph, GraphError> {
    let registry = shader::create_shader_registry();
    let mut graph = Graph::new("Environment Background");

    let background = add_background_output(&mut graph, &registry)?;
    let environment = add_typed_node(&mut graph, &registry, shader::ENVIRONMENT_TEXTURE)?;
    if let Some(node) = graph.node_mut(environment) {
        node.name = format!("Environment Texture ({image})");
    }
    let mapping = add_typed_node(&mut graph, &registry, shader::MAPPING)?;
    let coord = add_typed_node(&mut graph, &registry, shader::TEXTURE_COORDINATE)?;

    graph.connect_named(coord, "Generated", mapping, "Vector")?;
    graph.connect_named(mapping, "Vector", environment, "Vector")?;
    graph.connect_named(environment, "Color", background, "Color")?;

    Ok(graph)
}
