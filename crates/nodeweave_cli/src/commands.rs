// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command implementations.

use crate::cli::{Cli, Command};
use anyhow::Context;
use nodeweave_graph::graphs::Preset;
use nodeweave_graph::{Graph, LayoutConfig, LayoutSolver};
use std::path::Path;

/// Run the parsed command
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Arrange {
            input,
            output,
            config,
        } => {
            let solver = solver(config.as_deref(), cli.verbose)?;
            let output = output.as_deref().unwrap_or(input.as_path());
            arrange_file(&solver, input, output)
        }
        Command::Preset {
            name,
            output,
            config,
            no_arrange,
        } => {
            let solver = solver(config.as_deref(), cli.verbose)?;
            let graph = build_preset((*name).into(), (!no_arrange).then_some(&solver))?;
            match output {
                Some(path) => graph
                    .save(path)
                    .with_context(|| format!("Failed to write {}", path.display())),
                None => {
                    println!("{}", graph.to_ron_string()?);
                    Ok(())
                }
            }
        }
        Command::Config { output } => {
            let config = LayoutConfig::default();
            match output {
                Some(path) => config
                    .save(path)
                    .with_context(|| format!("Failed to write {}", path.display())),
                None => {
                    println!("{}", config.to_ron_string()?);
                    Ok(())
                }
            }
        }
    }
}

fn solver(config: Option<&Path>, verbose: bool) -> anyhow::Result<LayoutSolver> {
    let config = match config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("Failed to load layout settings from {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    Ok(LayoutSolver::new(config).verbose(verbose))
}

/// Arrange the graph stored at `input` and write it to `output`
fn arrange_file(solver: &LayoutSolver, input: &Path, output: &Path) -> anyhow::Result<()> {
    let mut graph = Graph::load(input)
        .with_context(|| format!("Failed to load graph from {}", input.display()))?;

    let report = solver.arrange(&mut graph);
    println!("{}: {}", graph.name, report);

    graph
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote arranged graph to {:?}", output);
    Ok(())
}

/// Build a preset, arranging it when a solver is given
fn build_preset(preset: Preset, solver: Option<&LayoutSolver>) -> anyhow::Result<Graph> {
    let mut graph = preset
        .build()
        .with_context(|| format!("Failed to build preset '{}'", preset.name()))?;

    if let Some(solver) = solver {
        let report = solver.arrange(&mut graph);
        tracing::info!("{}: {}", graph.name, report);
    }
    Ok(graph)
}
