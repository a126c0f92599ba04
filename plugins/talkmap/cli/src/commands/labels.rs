use std::path::Path;

use anyhow::Result;
use tracing::info;

use talkmap::analyzers::classifier_from_config;
use talkmap::config::loader::load_merged;
use talkmap::config::Env;
use talkmap::parsers::{extract_labels, load_inputs};

use super::local_config_dir;

/// Print one label per line, conversations separated by a blank line.
pub fn run(env: &dyn Env, input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_merged(env, local_config_dir(input), config_path)?;
    let classifier = classifier_from_config(&config.classifier)?;

    let (_files, loaded) = load_inputs(&[input.to_path_buf()])?;
    info!("extracting labels from {} conversations", loaded.records.len());

    let blocks: Vec<String> = loaded
        .records
        .iter()
        .map(|record| {
            extract_labels(record, classifier.as_ref())
                .map(|label| label.display_name())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    println!("{}", blocks.join("\n\n"));
    Ok(())
}
