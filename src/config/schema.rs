use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;
use crate::scoring::ScoringConfig;

/// Top-level config file.
///
/// Example YAML:
/// ```yaml
/// data:
///   questions: questions.csv
///   answers: answers.csv
///   types: types.csv
/// scoring:
///   preset: mbti
/// shuffle:
///   enabled: true
/// report:
///   directory: ~/Documents
///   format: markdown
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub shuffle: ShuffleConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Locations of the question bank and type table. Relative paths are
/// resolved against the directory holding the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_questions")]
    pub questions: PathBuf,

    #[serde(default = "default_answers")]
    pub answers: PathBuf,

    #[serde(default = "default_types")]
    pub types: PathBuf,
}

fn default_questions() -> PathBuf {
    PathBuf::from("questions.csv")
}

fn default_answers() -> PathBuf {
    PathBuf::from("answers.csv")
}

fn default_types() -> PathBuf {
    PathBuf::from("types.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            answers: default_answers(),
            types: default_types(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShuffleConfig {
    /// Randomise question and option order (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Fixed seed for reproducible ordering; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Where reports are written (default: current directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default)]
    pub format: ReportFormat,
}

/// Expand a leading `~/` and anchor relative paths at `base`.
fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl Config {
    /// Make every configured path absolute relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.data.questions = resolve_path(&self.data.questions, base);
        self.data.answers = resolve_path(&self.data.answers, base);
        self.data.types = resolve_path(&self.data.types, base);
        if let Some(ref dir) = self.report.directory {
            self.report.directory = Some(resolve_path(dir, base));
        }
    }
}
