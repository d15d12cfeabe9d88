// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line definitions.

use clap::{Parser, Subcommand, ValueEnum};
use nodeweave_graph::graphs::Preset;
use std::path::PathBuf;

/// Arrange shader node graphs
#[derive(Debug, Parser)]
#[command(name = "nodeweave", version, about)]
pub struct Cli {
    /// Trace node names and per-iteration progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Arrange a graph document (RON, or JSON for .json files)
    Arrange {
        /// Graph document to arrange
        input: PathBuf,
        /// Where to write the result; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Layout settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build a ready-made node tree
    Preset {
        /// Tree to build
        #[arg(value_enum)]
        name: PresetArg,
        /// Where to write the graph; defaults to stdout as RON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Layout settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Keep every node at the origin
        #[arg(long)]
        no_arrange: bool,
    },

    /// Write the default layout settings
    Config {
        /// Where to write the settings; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Preset names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
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

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Pbr => Preset::Pbr,
            PresetArg::PbrTextured => Preset::PbrTextured,
            PresetArg::Matcap => Preset::Matcap,
            PresetArg::RgbBackground => Preset::RgbBackground,
            PresetArg::EnvironmentBackground => Preset::EnvironmentBackground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arrange() {
        let cli = Cli::try_parse_from(["nodeweave", "arrange", "tree.ron", "-o", "out.json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Arrange { input, output, config } => {
                assert_eq!(input, PathBuf::from("tree.ron"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_preset_names() {
        let cli = Cli::try_parse_from(["nodeweave", "preset", "pbr-textured", "--no-arrange"]).unwrap();
        match cli.command {
            Command::Preset { name, no_arrange, .. } => {
                assert_eq!(Preset::from(name), Preset::PbrTextured);
                assert!(no_arrange);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["nodeweave", "preset", "checkerboard"]).is_err());
    }

    #[test]
    fn test_preset_names_match_library() {
        for preset in PresetArg::value_variants() {
            let name = preset.to_possible_value().unwrap();
            assert_eq!(name.get_name(), Preset::from(*preset).name());
        }
    }
}
