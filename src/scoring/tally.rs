use serde::ser::SerializeMap;
use serde::Serialize;

use super::axes::{AxisSystem, Category};
use crate::error::QuizError;
use crate::questions::Responses;

/// Per-category answer counts for one submission.
///
/// Holds an entry for every category of the axis system, in canonical
/// order, including those nobody picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(Category, u32)>,
}

impl Tally {
    /// All-zero tally over the system's categories.
    pub fn zeroed(system: &AxisSystem) -> Self {
        Self {
            counts: system.categories().map(|c| (c.clone(), 0)).collect(),
        }
    }

    /// Count for a category; zero when the category is unknown.
    pub fn get(&self, category: &Category) -> u32 {
        self.counts
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, u32)> {
        self.counts.iter().map(|(c, n)| (c, *n))
    }

    /// Returns false when the category is not part of this tally.
    fn increment(&mut self, category: &Category) -> bool {
        match self.counts.iter_mut().find(|(c, _)| c == category) {
            Some((_, n)) => {
                *n += 1;
                true
            }
            None => false,
        }
    }
}

impl Serialize for Tally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (category, count) in &self.counts {
            map.serialize_entry(category.as_str(), count)?;
        }
        map.end()
    }
}

/// Count one vote per response.
///
/// A response whose category is outside the axis system is a data fault and
/// fails the whole tally rather than being dropped.
pub fn tally_responses(responses: &Responses, system: &AxisSystem) -> Result<Tally, QuizError> {
    let mut tally = Tally::zeroed(system);

    for (question_id, category) in responses {
        if !tally.increment(category) {
            return Err(QuizError::UnknownCategory {
                question_id: question_id.clone(),
                category: category.to_string(),
            });
        }
    }

    Ok(tally)
}
