use serde::{Deserialize, Serialize};

use crate::analyzers::classifier::{BRANCH_PREFIX, INTENT_PREFIX};

/// `.talkmap.yaml` 전체 스키마
/// 글로벌(~/) + 디렉토리별 파일을 딥머지한 결과가 여기로 역직렬화된다
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TalkmapConfig {
    pub classifier: ClassifierConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierScheme {
    /// 이벤트 이름 접두사 (리터럴)
    #[default]
    Prefix,
    /// 이벤트 이름에 대한 정규식
    Pattern,
}

/// 이벤트 분류 규칙
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub scheme: ClassifierScheme,
    pub intent_prefix: String,
    pub branch_prefix: String,
    pub intent_pattern: String,
    pub branch_pattern: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            scheme: ClassifierScheme::Prefix,
            intent_prefix: INTENT_PREFIX.into(),
            branch_prefix: BRANCH_PREFIX.into(),
            intent_pattern: format!("^{}", INTENT_PREFIX),
            branch_pattern: format!("^{}", BRANCH_PREFIX),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// rayon으로 병렬 추출/집계
    pub parallel: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Plotly,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "plotly" => Ok(OutputFormat::Plotly),
            _ => Err(format!(
                "invalid format '{}': expected json, text, or plotly",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// text 리포트에 표시할 전이 행 수
    pub top: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            top: 10,
        }
    }
}
