// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ready-made node trees built on the core graph model.

pub mod material;
pub mod shader;
pub mod world;

use crate::graph::{Graph, GraphError};

pub use material::{build_matcap_graph, build_pbr_graph, build_pbr_textured_graph, PbrTextureSet};
pub use shader::create_shader_registry;
pub use world::{build_environment_background_graph, build_rgb_background_graph};

/// Named node tree that can be built without any input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Principled BSDF into a material output
    Pbr,
    /// Principled BSDF with every texture map
    PbrTextured,
    /// Matcap lookup emitted unlit
    Matcap,
    /// Constant color world
    RgbBackground,
    /// Environment image world
    EnvironmentBackground,
}

impl Preset {
    /// All presets
    pub fn all() -> &'static [Preset] {
        &[
            Preset::Pbr,
            Preset::PbrTextured,
            Preset::Matcap,
            Preset::RgbBackground,
            Preset::EnvironmentBackground,
        ]
    }

    /// Short kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Pbr => "pbr",
            Preset::PbrTextured => "pbr-textured",
            Preset::Matcap => "matcap",
            Preset::RgbBackground => "rgb-background",
            Preset::EnvironmentBackground => "environment-background",
        }
    }

    /// Build the node tree, unarranged
    pub fn build(&self) -> Result<Graph, GraphError> {
        match self {
            Preset::Pbr => build_pbr_graph(),
            Preset::PbrTextured => build_pbr_textured_graph(&PbrTextureSet::complete()),
            Preset::Matcap => build_matcap_graph("matcap.png"),
            Preset::RgbBackground => build_rgb_background_graph(),
            Preset::EnvironmentBackground => build_environment_background_graph("environment.hdr"),
        }
    }
}
