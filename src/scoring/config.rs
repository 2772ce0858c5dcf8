use serde::{Deserialize, Serialize};

pub const PRESET_MBTI: &str = "mbti";
pub const PRESET_TEMPERAMENT: &str = "temperament";

/// Scoring configuration.
///
/// Either names a built-in preset or spells out the axes. Axis order is the
/// order letters appear in the resulting type code.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   axes:
///     - { name: energy, categories: [E, I], tie_default: I }
///     - { name: perception, categories: [S, N], tie_default: N }
///     - { name: judgement, categories: [T, F], tie_default: F }
///     - { name: lifestyle, categories: [J, P], tie_default: P }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Built-in axis set: "mbti" or "temperament"
    #[serde(default)]
    pub preset: Option<String>,

    /// Explicit axes, in canonical order
    #[serde(default)]
    pub axes: Option<Vec<AxisConfig>>,
}

/// One axis as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    pub name: String,

    /// Opposing categories, two for a classic pair
    pub categories: Vec<String>,

    /// Category that wins when the top counts are equal
    pub tie_default: String,

    /// One-line explanation shown in the questionnaire intro
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AxisConfig {
    fn new(name: &str, categories: &[&str], tie_default: &str) -> Self {
        Self {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            tie_default: tie_default.to_string(),
            summary: None,
        }
    }

    fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }
}

/// Four MBTI pairs. The second letter of each pair takes ties.
pub fn mbti_axes() -> Vec<AxisConfig> {
    vec![
        AxisConfig::new("energy", &["E", "I"], "I")
            .with_summary("Extraversion vs Introversion: outer world or inner self?"),
        AxisConfig::new("perception", &["S", "N"], "N")
            .with_summary("Sensing vs Intuition: concrete facts or patterns and possibilities?"),
        AxisConfig::new("judgement", &["T", "F"], "F")
            .with_summary("Thinking vs Feeling: logic or values when deciding?"),
        AxisConfig::new("lifestyle", &["J", "P"], "P")
            .with_summary("Judging vs Perceiving: structured or flexible?"),
    ]
}

/// Single four-way temperament axis.
pub fn temperament_axes() -> Vec<AxisConfig> {
    vec![AxisConfig::new(
        "temperament",
        &["SANGUINE", "CHOLERIC", "MELANCHOLIC", "PHLEGMATIC"],
        "PHLEGMATIC",
    )]
}

pub fn preset_axes(name: &str) -> Option<Vec<AxisConfig>> {
    match name.trim().to_ascii_lowercase().as_str() {
        PRESET_MBTI => Some(mbti_axes()),
        PRESET_TEMPERAMENT => Some(temperament_axes()),
        _ => None,
    }
}

impl ScoringConfig {
    /// Axes this config describes. `None` when the preset name is unknown.
    ///
    /// Explicit axes take precedence over a preset; validation rejects
    /// configs that set both.
    pub fn effective_axes(&self) -> Option<Vec<AxisConfig>> {
        if let Some(ref axes) = self.axes {
            return Some(axes.clone());
        }
        match self.preset {
            Some(ref name) => preset_axes(name),
            None => Some(mbti_axes()),
        }
    }
}
