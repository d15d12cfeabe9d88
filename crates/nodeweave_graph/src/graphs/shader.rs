// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node types shared by material and world trees.
//!
//! Only what layout needs is described: ordered socket lists and default
//! widths. Socket order matches the host application, so linked sockets
//! stack the way they are drawn there.

use crate::graph::{Graph, GraphError};
use crate::node::{NodeCategory, NodeId, NodeRegistry, NodeType};
use crate::port::Port;

/// Material output
pub const MATERIAL_OUTPUT: &str = "ShaderNodeOutputMaterial";
/// World output
pub const WORLD_OUTPUT: &str = "ShaderNodeOutputWorld";
/// Principled BSDF
pub const PRINCIPLED_BSDF: &str = "ShaderNodeBsdfPrincipled";
/// Emission shader
pub const EMISSION: &str = "ShaderNodeEmission";
/// World background shader
pub const BACKGROUND: &str = "ShaderNodeBackground";
/// Image texture
pub const IMAGE_TEXTURE: &str = "ShaderNodeTexImage";
/// Environment texture
pub const ENVIRONMENT_TEXTURE: &str = "ShaderNodeTexEnvironment";
/// Texture coordinates
pub const TEXTURE_COORDINATE: &str = "ShaderNodeTexCoord";
/// Mapping
pub const MAPPING: &str = "ShaderNodeMapping";
/// Vector transform
pub const VECTOR_TRANSFORM: &str = "ShaderNodeVectorTransform";
/// Normal map
pub const NORMAL_MAP: &str = "ShaderNodeNormalMap";
/// Mix RGB
pub const MIX_RGB: &str = "ShaderNodeMixRGB";
/// Constant color
pub const RGB: &str = "ShaderNodeRGB";

fn shader_type(
    id: &str,
    name: &str,
    category: NodeCategory,
    description: &str,
    width: f64,
    inputs: &[&str],
    outputs: &[&str],
) -> NodeType {
    NodeType {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        width,
        inputs: inputs.iter().map(|name| Port::input(*name)).collect(),
        outputs: outputs.iter().map(|name| Port::output(*name)).collect(),
    }
}

/// Create the shader node registry
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Outputs
    // ========================================================================

    registry.register(shader_type(
        MATERIAL_OUTPUT,
        "Material Output",
        NodeCategory::Output,
        "Final surface, volume and displacement of a material",
        140.0,
        &["Surface", "Volume", "Displacement"],
        &[],
    ));

    registry.register(shader_type(
        WORLD_OUTPUT,
        "World Output",
        NodeCategory::Output,
        "Final surface and volume of the world",
        140.0,
        &["Surface", "Volume"],
        &[],
    ));

    // ========================================================================
    // Shaders
    // ========================================================================

    registry.register(shader_type(
        PRINCIPLED_BSDF,
        "Principled BSDF",
        NodeCategory::Shader,
        "Physically based layered surface",
        240.0,
        &[
            "Base Color",
            "Subsurface",
            "Subsurface Radius",
            "Subsurface Color",
            "Metallic",
            "Specular",
            "Specular Tint",
            "Roughness",
            "Anisotropic",
            "Anisotropic Rotation",
            "Sheen",
            "Sheen Tint",
            "Clearcoat",
            "Clearcoat Roughness",
            "IOR",
            "Transmission",
            "Transmission Roughness",
            "Normal",
            "Clearcoat Normal",
            "Tangent",
        ],
        &["BSDF"],
    ));

    registry.register(shader_type(
        EMISSION,
        "Emission",
        NodeCategory::Shader,
        "Light-emitting surface",
        140.0,
        &["Color", "Strength"],
        &["Emission"],
    ));

    registry.register(shader_type(
        BACKGROUND,
        "Background",
        NodeCategory::Shader,
        "World background light",
        140.0,
        &["Color", "Strength"],
        &["Background"],
    ));

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register(shader_type(
        IMAGE_TEXTURE,
        "Image Texture",
        NodeCategory::Texture,
        "Image lookup",
        240.0,
        &["Vector"],
        &["Color", "Alpha"],
    ));

    registry.register(shader_type(
        ENVIRONMENT_TEXTURE,
        "Environment Texture",
        NodeCategory::Texture,
        "Equirectangular environment lookup",
        240.0,
        &["Vector"],
        &["Color"],
    ));

    // ========================================================================
    // Inputs and vectors
    // ========================================================================

    registry.register(shader_type(
        TEXTURE_COORDINATE,
        "Texture Coordinate",
        NodeCategory::Input,
        "Coordinate systems for texture lookups",
        140.0,
        &[],
        &["Generated", "Normal", "UV", "Object", "Camera", "Window", "Reflection"],
    ));

    registry.register(shader_type(
        RGB,
        "RGB",
        NodeCategory::Input,
        "Constant color",
        140.0,
        &[],
        &["Color"],
    ));

    registry.register(shader_type(
        MAPPING,
        "Mapping",
        NodeCategory::Vector,
        "Translate, rotate and scale vectors",
        320.0,
        &["Vector"],
        &["Vector"],
    ));

    registry.register(shader_type(
        VECTOR_TRANSFORM,
        "Vector Transform",
        NodeCategory::Vector,
        "Convert vectors between spaces",
        140.0,
        &["Vector"],
        &["Vector"],
    ));

    registry.register(shader_type(
        NORMAL_MAP,
        "Normal Map",
        NodeCategory::Vector,
        "Tangent-space normal from a color",
        150.0,
        &["Strength", "Color"],
        &["Normal"],
    ));

    registry.register(shader_type(
        MIX_RGB,
        "Mix",
        NodeCategory::Color,
        "Blend two colors",
        140.0,
        &["Fac", "Color1", "Color2"],
        &["Color"],
    ));

    registry
}

/// Instantiate a registered type and add it to the graph
pub(crate) fn add_typed_node(
    graph: &mut Graph,
    registry: &NodeRegistry,
    type_id: &str,
) -> Result<NodeId, GraphError> {
    let node = registry
        .create_node(type_id)
        .ok_or_else(|| GraphError::UnknownNodeType(type_id.to_string()))?;
    Ok(graph.add_node(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        let registry = create_shader_registry();
        assert_eq!(registry.types().count(), 13);
        assert_eq!(registry.types_in_category(NodeCategory::Output).count(), 2);

        let principled = registry.create_node(PRINCIPLED_BSDF).unwrap();
        assert_eq!(principled.width, 240.0);
        assert_eq!(principled.input_named("Normal").unwrap().index(), 17);
        assert_eq!(principled.output_named("BSDF").unwrap().index(), 0);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let registry = NodeRegistry::new();
        let mut graph = Graph::new("Material");
        assert_eq!(
            add_typed_node(&mut graph, &registry, MAPPING),
            Err(GraphError::UnknownNodeType(MAPPING.to_string()))
        );
        assert_eq!(graph.node_count(), 0);
    }
}
