use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use talkmap::analyzers::{build_flow_graph, build_flow_graph_from_records, classifier_from_config};
use talkmap::config::loader::{load_merged, CONFIG_FILENAME};
use talkmap::config::models::OutputFormat;
use talkmap::config::Env;
use talkmap::parsers::{extract_sequences, load_inputs};
use talkmap::types::FlowGraph;

use super::local_config_dirs;

/// Command-line overrides for `talkmap graph`
pub struct GraphOptions<'a> {
    pub format: Option<OutputFormat>,
    pub top: Option<usize>,
    pub config: Option<&'a Path>,
    pub serial: bool,
}

pub fn run(env: &dyn Env, inputs: &[PathBuf], options: GraphOptions<'_>) -> Result<()> {
    let local_dirs = local_config_dirs(inputs);
    if options.config.is_none() && local_dirs.len() > 1 {
        warn!(
            "inputs span {} directories; applying {} from {} only",
            local_dirs.len(),
            CONFIG_FILENAME,
            local_dirs[0].display()
        );
    }
    let config = load_merged(env, local_dirs.first().copied(), options.config)?;
    let classifier = classifier_from_config(&config.classifier)?;

    let format = options.format.unwrap_or(config.output.format);
    let top = options.top.unwrap_or(config.output.top);

    let (files, loaded) = load_inputs(inputs)?;
    info!(
        "loaded {} conversations from {} files",
        loaded.records.len(),
        files.len()
    );
    if loaded.skipped > 0 {
        warn!("{} malformed records contributed empty sequences", loaded.skipped);
    }

    let graph = if config.input.parallel && !options.serial {
        build_flow_graph_from_records(&loaded.records, classifier.as_ref())
    } else {
        build_flow_graph(extract_sequences(&loaded.records, classifier.as_ref()))
    };

    if graph.is_empty() {
        info!("no transitions found, graph is empty");
    } else {
        info!(
            "graph: {} nodes, {} edges, {} transitions",
            graph.node_count,
            graph.edges.len(),
            graph.total_transitions
        );
    }

    println!("{}", render(&graph, format, top, &files)?);
    Ok(())
}

/// Render the graph in the requested output format.
pub fn render(graph: &FlowGraph, format: OutputFormat, top: usize, files: &[PathBuf]) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "source": files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                "analyzedAt": chrono::Utc::now().to_rfc3339(),
                "graph": graph,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Plotly => Ok(serde_json::to_string_pretty(&graph.to_plotly())?),
        OutputFormat::Text => Ok(render_text(graph, top)),
    }
}

fn render_text(graph: &FlowGraph, top: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Conversations: {}\n", graph.conversation_count));
    out.push_str(&format!("Nodes: {}\n", graph.node_count));
    out.push_str(&format!("Transitions: {}\n", graph.total_transitions));

    if graph.is_empty() {
        out.push_str("\nNo transitions found.");
        return out;
    }

    out.push_str(&format!("\nTop {} transitions:\n", top));
    for row in graph.transitions().iter().take(top) {
        out.push_str(&format!(
            "  {} -> {}  ({}, {:.1}%)\n",
            row.from,
            row.to,
            row.count,
            row.probability * 100.0
        ));
    }
    out.trim_end().to_string()
}
