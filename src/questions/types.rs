use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::Category;

/// One selectable answer. Display order is free; only the category scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub category: Category,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Category of the option at `index` (0-based, in current display order)
    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.options.get(index).map(|o| &o.category)
    }
}

/// Selected category per question id.
pub type Responses = BTreeMap<String, Category>;
