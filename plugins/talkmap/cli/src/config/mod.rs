pub mod loader;
pub mod models;

use std::path::PathBuf;

/// 환경 변수 접근을 추상화하는 트레이트 (테스트 격리를 위해 사용)
pub trait Env: Send + Sync {
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

/// 실제 환경 변수를 사용하는 구현체
pub struct RealEnv;

impl Env for RealEnv {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// `$HOME` 경로 반환 (미설정 시 None)
pub fn home_dir(env: &dyn Env) -> Option<PathBuf> {
    env.var("HOME").ok().map(PathBuf::from)
}
