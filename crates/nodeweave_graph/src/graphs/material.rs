// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material node trees.
//!
//! Nodes are created at the origin, the way a host application drops new
//! nodes, and are expected to be arranged afterwards.

use super::shader::{self, add_typed_node};
use crate::graph::{Graph, GraphError};
use crate::node::{NodeId, NodeRegistry};

/// Images feeding a textured PBR material; `None` leaves the map out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PbrTextureSet {
    /// Base color image
    pub color: Option<String>,
    /// Metallic image
    pub metallic: Option<String>,
    /// Roughness image
    pub roughness: Option<String>,
    /// Tangent-space normal image
    pub normal: Option<String>,
    /// Displacement image
    pub displacement: Option<String>,
    /// Ambient occlusion image; only used together with a color image
    pub ambient_occlusion: Option<String>,
}

impl PbrTextureSet {
    /// Every map present, named after its role
    pub fn complete() -> Self {
        Self {
            color: Some("color.png".to_string()),
            metallic: Some("metallic.png".to_string()),
            roughness: Some("roughness.png".to_string()),
            normal: Some("normal.png".to_string()),
            displacement: Some("displacement.png".to_string()),
            ambient_occlusion: Some("ambient_occlusion.png".to_string()),
        }
    }
}

/// Principled BSDF feeding the material output
pub fn build_pbr_graph() -> Result<Graph, GraphError> {
    let registry = shader::create_shader_registry();
    let mut graph = Graph::new("PBR");
    add_principled_output(&mut graph, &registry)?;
    Ok(graph)
}

fn add_principled_output(
    graph: &mut Graph,
    registry: &NodeRegistry,
) -> Result<(NodeId, NodeId), GraphError> {
    let output = add_typed_node(graph, registry, shader::MATERIAL_OUTPUT)?;
    let principled = add_typed_node(graph, registry, shader::PRINCIPLED_BSDF)?;
    graph.connect_named(principled, "BSDF", output, "Surface")?;
    Ok((output, principled))
}

/// Image texture named after its image, looked up through `mapping`
fn add_image_texture(
    graph: &mut Graph,
    registry: &NodeRegistry,
    mapping: NodeId,
    image: &str,
) -> Result<NodeId, GraphError> {
    let texture = add_typed_node(graph, registry, shader::IMAGE_TEXTURE)?;
    if let Some(node) = graph.node_mut(texture) {
        node.name = format!("Image Texture ({image})");
    }
    graph.connect_named(mapping, "Vector", texture, "Vector")?;
    Ok(texture)
}

/// Principled BSDF driven by image textures sharing one UV mapping
pub fn build_pbr_textured_graph(textures: &PbrTextureSet) -> Result<Graph, GraphError> {
    let registry = shader::create_shader_registry();
    let mut graph = Graph::new("PBR Textured");

    let (output, principled) = add_principled_output(&mut graph, &registry)?;

    let coord = add_typed_node(&mut graph, &registry, shader::TEXTURE_COORDINATE)?;
    let mapping = add_typed_node(&mut graph, &registry, shader::MAPPING)?;
    graph.connect_named(coord, "UV", mapping, "Vector")?;

    if let Some(image) = &textures.color {
        let color = add_image_texture(&mut graph, &registry, mapping, image)?;
        if let Some(ao_image) = &textures.ambient_occlusion {
            let occlusion = add_image_texture(&mut graph, &registry, mapping, ao_image)?;
            let mix = add_typed_node(&mut graph, &registry, shader::MIX_RGB)?;
            graph.connect_named(color, "Color", mix, "Color1")?;
            graph.connect_named(occlusion, "Color", mix, "Color2")?;
            graph.connect_named(mix, "Color", principled, "Base Color")?;
        } else {
            graph.connect_named(color, "Color", principled, "Base Color")?;
        }
    }

    if let Some(image) = &textures.metallic {
        let texture = add_image_texture(&mut graph, &registry, mapping, image)?;
        graph.connect_named(texture, "Color", principled, "Metallic")?;
    }

    if let Some(image) = &textures.roughness {
        let texture = add_image_texture(&mut graph, &registry, mapping, image)?;
        graph.connect_named(texture, "Color", principled, "Roughness")?;
    }

    if let Some(image) = &textures.normal {
        let texture = add_image_texture(&mut graph, &registry, mapping, image)?;
        let normal_map = add_typed_node(&mut graph, &registry, shader::NORMAL_MAP)?;
        graph.connect_named(texture, "Color", normal_map, "Color")?;
        graph.connect_named(normal_map, "Normal", principled, "Normal")?;
    }

    if let Some(image) = &textures.displacement {
        let texture = add_image_texture(&mut graph, &registry, mapping, image)?;
        graph.connect_named(texture, "Color", output, "Displacement")?;
    }

    Ok(graph)
}

/// Camera-space normal lookup into a matcap image, emitted unlit
pub fn build_matcap_graph(image: &str) -> Result<Graph, GraphError> {
    let registry = shader::create_shader_registry();
    let mut graph = Graph::new("MatCap");

    let coord = add_typed_node(&mut graph, &registry, shader::TEXTURE_COORDINATE)?;
    let transform = add_typed_node(&mut graph, &registry, shader::VECTOR_TRANSFORM)?;
    let mapping = add_typed_node(&mut graph, &registry, shader::MAPPING)?;
    let texture = add_image_texture(&mut graph, &registry, mapping, image)?;
    let emission = add_typed_node(&mut graph, &registry, shader::EMISSION)?;
    let output = add_typed_node(&mut graph, &registry, shader::MATERIAL_OUTPUT)?;

    graph.connect_named(coord, "Normal", transform, "Vector")?;
    graph.connect_named(transform, "Vector", mapping, "Vector")?;
    graph.connect_named(texture, "Color", emission, "Color")?;
    graph.connect_named(emission, "Emission", output, "Surface")?;

    Ok(graph)
}
