use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use super::models::TalkmapConfig;
use super::{home_dir, Env};

pub const CONFIG_FILENAME: &str = ".talkmap.yaml";

/// 글로벌(`~/.talkmap.yaml`) + 로컬 YAML을 머지하여 최종 설정 반환
///
/// 로컬 레이어는 `explicit`이 주어지면 그 파일, 아니면 `local_dir`의
/// `.talkmap.yaml`. 로컬에 명시된 키가 우선한다.
/// 암묵적 파일은 읽기 실패 시 경고 후 무시, 명시적 파일은 반드시 로드되어야 한다.
pub fn load_merged(
    env: &dyn Env,
    local_dir: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<TalkmapConfig> {
    let global = home_dir(env).and_then(|home| load_implicit(&home.join(CONFIG_FILENAME)));

    let local = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            load_raw_yaml(path)?
        }
        None => local_dir.and_then(|dir| load_implicit(&dir.join(CONFIG_FILENAME))),
    };

    let merged = match (global, local) {
        (Some(g), Some(l)) => deep_merge(g, l),
        (Some(g), None) => g,
        (None, Some(l)) => l,
        (None, None) => return Ok(TalkmapConfig::default()),
    };

    serde_json::from_value(merged).context("Invalid talkmap configuration")
}

fn load_implicit(path: &Path) -> Option<Value> {
    match load_raw_yaml(path) {
        Ok(value) => value,
        Err(e) => {
            warn!("ignoring config {}: {:#}", path.display(), e);
            None
        }
    }
}

/// YAML 파일 → serde_json::Value (struct가 아닌 raw value)
/// 파일이 없거나 비어 있으면 `Ok(None)`. 미지정 필드는 Value에 존재하지 않아 머지 시 base를 보존
fn load_raw_yaml(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(value))
}

/// JSON Value 딥머지: over에 명시적으로 존재하는 값만 base를 덮어씀 (null은 무시)
fn deep_merge(base: Value, over: Value) -> Value {
    match (base, over) {
        (Value::Object(mut b), Value::Object(o)) => {
            for (key, over_val) in o {
                let base_val = b.remove(&key).unwrap_or(Value::Null);
                b.insert(key, deep_merge(base_val, over_val));
            }
            Value::Object(b)
        }
        (base, Value::Null) => base,
        (_, over) => over,
    }
}

/// 글로벌 설정 파일 경로
pub fn global_config_path(env: &dyn Env) -> PathBuf {
    home_dir(env)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILENAME)
}

/// 글로벌 설정 파일 초기화. 이미 있으면 건드리지 않는다.
/// (경로, 새로 썼는지 여부) 반환
pub fn init_global(env: &dyn Env) -> Result<(PathBuf, bool)> {
    let path = global_config_path(env);
    if path.exists() {
        return Ok((path, false));
    }
    let yaml = serde_yaml::to_string(&TalkmapConfig::default())?;
    std::fs::write(&path, yaml)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok((path, true))
}
