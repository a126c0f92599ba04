pub mod config;
pub mod graph;
pub mod labels;

use std::path::{Path, PathBuf};

/// Directory whose `.talkmap.yaml` applies to an input path.
pub fn local_config_dir(input: &Path) -> Option<&Path> {
    if input.is_dir() {
        Some(input)
    } else {
        input.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Distinct config directories of `inputs`, in argument order.
pub fn local_config_dirs(inputs: &[PathBuf]) -> Vec<&Path> {
    let mut dirs: Vec<&Path> = Vec::new();
    for dir in inputs.iter().filter_map(|p| local_config_dir(p)) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}
