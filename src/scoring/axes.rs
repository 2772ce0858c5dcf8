use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{mbti_axes, AxisConfig, ScoringConfig};
use super::validation::validate_scoring;

/// A single trait label such as "E" or "SANGUINE".
///
/// Labels are trimmed and upper-cased on construction, so equality is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub fn new(label: &str) -> Self {
        Category(label.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::new(&s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::new(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opposing categories plus the one that takes ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub name: String,
    pub categories: Vec<Category>,
    pub tie_default: Category,
    pub summary: Option<String>,
}

impl Axis {
    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }
}

/// Ordered axes. The order is the letter order of every type code.
///
/// Only constructed through [`AxisSystem::from_config`], which guarantees the
/// axes partition the category set and every tie default is on its axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSystem {
    axes: Vec<Axis>,
}

impl AxisSystem {
    /// Build from config, returning every validation error on failure.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, Vec<String>> {
        validate_scoring(config)?;
        Ok(Self::build(config.effective_axes().unwrap_or_default()))
    }

    pub fn mbti() -> Self {
        Self::build(mbti_axes())
    }

    fn build(axes: Vec<AxisConfig>) -> Self {
        let axes = axes
            .into_iter()
            .map(|a| Axis {
                name: a.name.trim().to_string(),
                categories: a.categories.iter().map(|c| Category::new(c)).collect(),
                tie_default: Category::new(&a.tie_default),
                summary: a.summary.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            })
            .collect();
        Self { axes }
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Every category in canonical order (axis by axis).
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.axes.iter().flat_map(|a| a.categories.iter())
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.axes.iter().any(|a| a.contains(category))
    }

    /// All type codes this system can produce, in canonical order.
    pub fn all_codes(&self) -> Vec<TypeCode> {
        let mut codes: Vec<Vec<Category>> = vec![Vec::new()];
        for axis in &self.axes {
            codes = codes
                .into_iter()
                .flat_map(|prefix| {
                    axis.categories.iter().map(move |c| {
                        let mut next = prefix.clone();
                        next.push(c.clone());
                        next
                    })
                })
                .collect();
        }
        codes.into_iter().map(TypeCode).collect()
    }
}

/// One resolved category per axis, in canonical axis order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeCode(Vec<Category>);

impl TypeCode {
    pub fn new(letters: Vec<Category>) -> Self {
        TypeCode(letters)
    }

    pub fn letters(&self) -> &[Category] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            f.write_str(c.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for TypeCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
