//! Builds a demo world, traces one box through it and reports the result.

pub mod scene;

use std::fmt::Write;

use anyhow::{bail, Context, Result};
use brush_trace::{BspTree, BuildConfig, FirstPlane, LeastStraddling, TraceBox, TraceResult};
use clap::{Parser, ValueEnum};
use log::info;
use nalgebra::Point3;
use serde::Serialize;

use scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "trace-probe")]
#[command(about = "Sweep a box through a BSP tree of brushes")]
pub struct Cli {
    /// World to build
    #[arg(long, value_enum, default_value_t = Scene::Arena)]
    pub scene: Scene,
    /// Start of the segment, as x,y,z
    #[arg(long, value_parser = parse_point, default_value = "0,10,-150", allow_hyphen_values = true)]
    pub start: Point3<f32>,
    /// End of the segment, as x,y,z
    #[arg(long, value_parser = parse_point, default_value = "0,10,150", allow_hyphen_values = true)]
    pub end: Point3<f32>,
    /// Lower box corner relative to its centre
    #[arg(long, value_parser = parse_point, default_value = "0,0,0", allow_hyphen_values = true)]
    pub mins: Point3<f32>,
    /// Upper box corner relative to its centre
    #[arg(long, value_parser = parse_point, default_value = "0,0,0", allow_hyphen_values = true)]
    pub maxs: Point3<f32>,
    /// Split plane heuristic
    #[arg(long, value_enum, default_value_t = Selector::Least)]
    pub selector: Selector,
    /// Depth at which nodes become leaves
    #[arg(long, default_value_t = BuildConfig::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
    /// Print the tree before tracing
    #[arg(long)]
    pub dump_tree: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Selector {
    /// First face plane that separates the brushes
    First,
    /// Face plane cutting the fewest brushes
    Least,
}

/// What a probe run reports.
#[derive(Debug, Serialize)]
pub struct Report {
    pub brushes: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub result: TraceResult,
}

/// Parses `x,y,z`.
pub fn parse_point(text: &str) -> Result<Point3<f32>> {
    let coords = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("invalid coordinate {part:?} in {text:?}"))
        })
        .collect::<Result<Vec<f32>>>()?;

    match coords.as_slice() {
        &[x, y, z] => Ok(Point3::new(x, y, z)),
        _ => bail!("expected three comma separated values, got {text:?}"),
    }
}

/// Builds the tree for the requested scene.
pub fn build_tree(cli: &Cli) -> BspTree {
    let brushes = cli.scene.brushes();
    let config = BuildConfig::default().with_max_depth(cli.max_depth);
    info!("building {:?} scene with {} brushes", cli.scene, brushes.len());

    match cli.selector {
        Selector::First => BspTree::build(brushes, &FirstPlane, &config),
        Selector::Least => BspTree::build(brushes, &LeastStraddling::default(), &config),
    }
}

/// Runs the probe and returns what it would print.
pub fn run(cli: &Cli) -> Result<String> {
    let tree = build_tree(cli);
    let trace_box = TraceBox::new(cli.mins, cli.maxs).context("invalid trace box")?;
    let result = tree.trace(cli.start, cli.end, &trace_box);

    let report = Report {
        brushes: tree.brushes().len(),
        nodes: tree.node_count(),
        leaves: tree.leaf_count(),
        depth: tree.depth(),
        result,
    };

    let mut out = String::new();
    if cli.dump_tree {
        out.push_str(&tree.describe());
    }

    if cli.json {
        out.push_str(&serde_json::to_string_pretty(&report)?);
        return Ok(out);
    }

    writeln!(
        out,
        "tree: {} brushes, {} nodes, {} leaves, depth {}",
        report.brushes, report.nodes, report.leaves, report.depth
    )?;
    if result.hit() {
        let normal = result.plane.normal();
        writeln!(
            out,
            "hit brush {} at fraction {} ({}, {}, {}), normal ({}, {}, {})",
            result.brush.map_or_else(|| "?".to_string(), |id| id.to_string()),
            result.time_fraction,
            result.end_pos.x,
            result.end_pos.y,
            result.end_pos.z,
            normal.x,
            normal.y,
            normal.z
        )?;
    } else {
        writeln!(
            out,
            "clear to ({}, {}, {})",
            result.end_pos.x, result.end_pos.y, result.end_pos.z
        )?;
    }
    if !result.starts_out {
        writeln!(out, "started inside solid{}", if result.all_solid { ", all solid" } else { "" })?;
    }
    Ok(out)
}
