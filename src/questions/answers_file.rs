use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::types::Responses;
use crate::scoring::Category;

/// Pre-filled answers for non-interactive scoring.
///
/// YAML or JSON. Question ids are map keys and should be quoted:
/// ```yaml
/// name: Ayu Lestari
/// answers:
///   "1": E
///   "2": N
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnswersFile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

impl AnswersFile {
    pub fn responses(&self) -> Responses {
        self.answers
            .iter()
            .map(|(q, c)| (q.trim().to_string(), Category::new(c)))
            .collect()
    }
}

/// Read an answers file; `.json` goes through serde_json, anything else is
/// parsed as YAML.
pub fn load_answers_file(path: &Path) -> Result<AnswersFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse answers: invalid JSON in {}", path.display()))
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse answers: invalid YAML in {}", path.display()))
    }
}
