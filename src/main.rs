use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::thread_rng;

use lodgraph::graph::{
    DEFAULT_GRID_SIZE, GraphSnapshot, SampleSettings, cluster_nodes, load_graph, sample_edges,
    sample_nodes, validate_edges, validate_nodes,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph JSON file ({"nodes": [...], "edges": [...]})
    input: PathBuf,

    #[arg(long, default_value_t = 1000)]
    node_limit: usize,

    #[arg(long, default_value_t = 10_000)]
    edge_limit: usize,

    #[arg(long, default_value_t = 20)]
    important_percent: u32,

    /// Run a grid clustering pass instead of sampling
    #[arg(long)]
    cluster: bool,

    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: f64,

    /// Write the resulting snapshot here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = load_graph(&args.input)?;
    log::info!(
        "loaded {} nodes and {} edges from {}",
        raw.node_count(),
        raw.edge_count(),
        args.input.display()
    );

    let (nodes, dropped) = validate_nodes(raw.nodes);
    if dropped > 0 {
        log::warn!("dropped {dropped} nodes with invalid coordinates");
    }

    let snapshot = if args.cluster {
        GraphSnapshot::new(cluster_nodes(&nodes, args.grid_size), Vec::new())
    } else {
        let settings = SampleSettings {
            node_limit: args.node_limit,
            edge_limit: args.edge_limit,
            important_nodes_percent: args.important_percent,
        }
        .clamped();

        let known_ids = nodes.iter().map(|node| node.id.clone()).collect();
        let edges = validate_edges(raw.edges, &known_ids);

        let sampled = sample_nodes(nodes, &settings, &mut thread_rng());
        let edges = sample_edges(&edges, &sampled, settings.edge_limit);
        GraphSnapshot::new(sampled, edges)
    };

    log::info!(
        "writing {} nodes and {} edges",
        snapshot.node_count(),
        snapshot.edge_count()
    );

    let rendered = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
