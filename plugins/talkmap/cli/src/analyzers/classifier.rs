use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

use crate::config::models::{ClassifierConfig, ClassifierScheme};
use crate::types::EventClass;

pub const INTENT_PREFIX: &str = "IntRec";
pub const BRANCH_PREFIX: &str = "BranchName";

static INTENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^IntRec").unwrap());
static BRANCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^BranchName").unwrap());

/// Maps an event's name/value to state classes.
///
/// Every rule is checked independently and yields one verdict, intent rule
/// first. An event whose name satisfies both rules produces two labels.
pub trait EventClassifier: Send + Sync {
    fn classify(&self, name: &str, value: &str) -> Vec<EventClass>;
}

/// Default policy: literal name prefixes.
#[derive(Debug, Clone)]
pub struct PrefixClassifier {
    intent_prefix: String,
    branch_prefix: String,
}

impl PrefixClassifier {
    pub fn new(intent_prefix: impl Into<String>, branch_prefix: impl Into<String>) -> Self {
        Self {
            intent_prefix: intent_prefix.into(),
            branch_prefix: branch_prefix.into(),
        }
    }
}

impl Default for PrefixClassifier {
    fn default() -> Self {
        Self::new(INTENT_PREFIX, BRANCH_PREFIX)
    }
}

impl EventClassifier for PrefixClassifier {
    fn classify(&self, name: &str, value: &str) -> Vec<EventClass> {
        let intent = if name.starts_with(&self.intent_prefix) {
            EventClass::Intent(value.to_string())
        } else {
            EventClass::Ignored
        };
        let branch = if name.starts_with(&self.branch_prefix) {
            EventClass::Branch(value.to_string())
        } else {
            EventClass::Ignored
        };
        vec![intent, branch]
    }
}

/// Alternative policy: regular expressions matched against the event name.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    intent: Regex,
    branch: Regex,
}

impl PatternClassifier {
    pub fn new(intent_pattern: &str, branch_pattern: &str) -> Result<Self> {
        let intent = Regex::new(intent_pattern)
            .with_context(|| format!("invalid intent pattern: {}", intent_pattern))?;
        let branch = Regex::new(branch_pattern)
            .with_context(|| format!("invalid branch pattern: {}", branch_pattern))?;
        Ok(Self { intent, branch })
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self {
            intent: INTENT_PATTERN.clone(),
            branch: BRANCH_PATTERN.clone(),
        }
    }
}

impl EventClassifier for PatternClassifier {
    fn classify(&self, name: &str, value: &str) -> Vec<EventClass> {
        let intent = if self.intent.is_match(name) {
            EventClass::Intent(value.to_string())
        } else {
            EventClass::Ignored
        };
        let branch = if self.branch.is_match(name) {
            EventClass::Branch(value.to_string())
        } else {
            EventClass::Ignored
        };
        vec![intent, branch]
    }
}

/// Build the classifier selected by configuration.
pub fn classifier_from_config(config: &ClassifierConfig) -> Result<Box<dyn EventClassifier>> {
    match config.scheme {
        ClassifierScheme::Prefix => Ok(Box::new(PrefixClassifier::new(
            config.intent_prefix.clone(),
            config.branch_prefix.clone(),
        ))),
        ClassifierScheme::Pattern => Ok(Box::new(PatternClassifier::new(
            &config.intent_pattern,
            &config.branch_pattern,
        )?)),
    }
}
