use std::path::Path;

use anyhow::Result;

use talkmap::config::loader::{init_global, load_merged};
use talkmap::config::Env;

pub fn run(env: &dyn Env, init: bool, dir: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    if init {
        let (path, written) = init_global(env)?;
        if written {
            eprintln!("Wrote default config: {}", path.display());
        } else {
            eprintln!("Config already exists: {}", path.display());
        }
        return Ok(());
    }

    let config = load_merged(env, dir, config_path)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
