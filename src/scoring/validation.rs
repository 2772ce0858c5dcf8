use std::collections::HashMap;

use super::axes::Category;
use super::config::{ScoringConfig, PRESET_MBTI, PRESET_TEMPERAMENT};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.preset.is_some() && config.axes.is_some() {
        errors.push("scoring: set either 'preset' or 'axes', not both".to_string());
    }

    let axes = match config.effective_axes() {
        Some(axes) => axes,
        None => {
            errors.push(format!(
                "scoring.preset: unknown preset '{}' (expected '{}' or '{}')",
                config.preset.as_deref().unwrap_or_default(),
                PRESET_MBTI,
                PRESET_TEMPERAMENT
            ));
            return Err(errors);
        }
    };

    if axes.is_empty() {
        errors.push("scoring.axes: at least one axis is required".to_string());
    }

    // Category label -> index of the axis that first claimed it
    let mut owners: HashMap<Category, usize> = HashMap::new();

    for (i, axis) in axes.iter().enumerate() {
        if axis.name.trim().is_empty() {
            errors.push(format!("scoring.axes[{}].name: must not be empty", i));
        }

        if axis.categories.len() < 2 {
            errors.push(format!(
                "scoring.axes[{}].categories: need at least 2 categories, got {}",
                i,
                axis.categories.len()
            ));
        }

        for (j, raw) in axis.categories.iter().enumerate() {
            let category = Category::new(raw);
            if category.as_str().is_empty() {
                errors.push(format!(
                    "scoring.axes[{}].categories[{}]: must not be empty",
                    i, j
                ));
                continue;
            }
            match owners.get(&category) {
                Some(&owner) if owner == i => errors.push(format!(
                    "scoring.axes[{}].categories[{}]: '{}' is listed twice",
                    i, j, category
                )),
                Some(&owner) => errors.push(format!(
                    "scoring.axes[{}].categories[{}]: '{}' already belongs to axes[{}]",
                    i, j, category, owner
                )),
                None => {
                    owners.insert(category, i);
                }
            }
        }

        let tie_default = Category::new(&axis.tie_default);
        if !axis
            .categories
            .iter()
            .any(|c| Category::new(c) == tie_default)
        {
            errors.push(format!(
                "scoring.axes[{}].tie_default: '{}' is not one of the axis categories",
                i, axis.tie_default
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
