//! CLI command implementations.

use crate::{ExportFormat, QueryOp};
use colored::Colorize;
use depplan_graph::{
    DependencyGraph, DotRenderer, JsonRenderer, PlanInput, Renderer, TreePlan,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Error, Debug)]
enum CommandError {
    #[error("{0:?} needs a second item to check against")]
    MissingCandidate(QueryOp),
}

fn load(path: &Path) -> Result<DependencyGraph<String>> {
    let input = PlanInput::from_path(path)?;
    debug!(
        edges = input.edges.len(),
        nodes = input.nodes.len(),
        "plan file loaded"
    );
    Ok(input.into_graph())
}

/// Print one plan record per dependency tree.
pub fn plan(path: &Path, show_levels: bool, json_output: bool) -> Result<()> {
    let graph = load(path)?;
    let trees = graph.tree_plans()?;

    if json_output {
        let output = if show_levels {
            serde_json::to_value(&trees)?
        } else {
            let records: Vec<_> = trees.iter().map(|tree| &tree.record).collect();
            serde_json::to_value(records)?
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Dependency Plan".cyan().bold());
    println!(
        "  {} trees, {} items",
        trees.len().to_string().cyan(),
        graph.node_count().to_string().cyan()
    );
    println!();

    for (i, tree) in trees.iter().enumerate() {
        print_tree(i + 1, tree, show_levels);
    }

    Ok(())
}

fn print_tree(number: usize, tree: &TreePlan<String>, show_levels: bool) {
    println!(
        "{} {} {}",
        format!("Tree {}:", number).bold(),
        tree.record.node.green(),
        format!(
            "(order {}, {} direct children)",
            tree.record.order, tree.record.child
        )
        .dimmed()
    );

    if show_levels {
        for (depth, level) in tree.levels.iter().enumerate() {
            println!("  {} {}", format!("L{}", depth).yellow(), level.join(", "));
        }
    }
}

/// Run one structural query.
pub fn query(
    path: &Path,
    op: QueryOp,
    node: &str,
    candidate: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let graph = load(path)?;
    let node = node.to_string();

    let output = match op {
        QueryOp::Successors => sorted(graph.successors(&node)?),
        QueryOp::Predecessors => sorted(graph.predecessors(&node)?),
        QueryOp::SuccessorsOfSuccessors => sorted(graph.successors_of_successors(&node)?),
        QueryOp::PredecessorsOfPredecessors => {
            sorted(graph.predecessors_of_predecessors(&node)?)
        }
        QueryOp::HasSuccessor => {
            let candidate = require_candidate(op, candidate)?;
            serde_json::json!(graph.has_successor(&node, &candidate))
        }
        QueryOp::HasPredecessor => {
            let candidate = require_candidate(op, candidate)?;
            serde_json::json!(graph.has_predecessor(&node, &candidate))
        }
        QueryOp::Degree => serde_json::json!(graph.degree(&node)?),
        QueryOp::InDegree => serde_json::json!(graph.in_degree(&node)?),
        QueryOp::OutDegree => serde_json::json!(graph.out_degree(&node)?),
        QueryOp::Neighbors => serde_json::json!(graph.neighbors(&node)?),
        QueryOp::Connected => serde_json::json!(graph.connected_nodes(&node)?),
        QueryOp::Root => serde_json::json!(graph.find_root_node(&node)?),
        QueryOp::Leaf => serde_json::json!(graph.find_leaf_node(&node)?),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match output {
        serde_json::Value::Array(items) if items.is_empty() => {
            println!("{}", "(none)".dimmed());
        }
        serde_json::Value::Array(items) => {
            for item in items {
                println!("  {}", item.as_str().unwrap_or_default());
            }
        }
        serde_json::Value::String(s) => println!("{}", s.green()),
        serde_json::Value::Bool(true) => println!("{}", "yes".green()),
        serde_json::Value::Bool(false) => println!("{}", "no".red()),
        other => println!("{}", other),
    }

    Ok(())
}

fn sorted(items: HashSet<String>) -> serde_json::Value {
    let mut items: Vec<String> = items.into_iter().collect();
    items.sort();
    serde_json::json!(items)
}

fn require_candidate(op: QueryOp, candidate: Option<&str>) -> Result<String> {
    candidate
        .map(str::to_string)
        .ok_or_else(|| CommandError::MissingCandidate(op).into())
}

/// Show graph statistics.
pub fn status(path: &Path) -> Result<()> {
    let graph = load(path)?;
    let stats = graph.stats();

    println!("{}", "Depplan Status".cyan().bold());
    println!();
    println!("  {} {}", "Items:".dimmed(), stats.node_count);
    println!("  {} {}", "Dependencies:".dimmed(), stats.edge_count);
    println!("  {} {}", "Trees:".dimmed(), stats.tree_count);
    println!("  {} {}", "Roots:".dimmed(), stats.root_count);
    println!("  {} {}", "Leaves:".dimmed(), stats.leaf_count);

    Ok(())
}

/// Render the graph as DOT or JSON.
pub fn export(path: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let graph = load(path)?;
    let snapshot = graph.snapshot();

    let rendered = match format {
        ExportFormat::Dot => DotRenderer::default().render(&snapshot)?,
        ExportFormat::Json => JsonRenderer.render(&snapshot)?,
    };

    match output {
        Some(out_path) => {
            fs::write(out_path, rendered)?;
            println!("{} Exported to {}", "✓".green(), out_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
