use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::{AnswerOption, Question};
use crate::scoring::{AxisSystem, Category};

/// Row of the questions table: `id,question_text`
#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: String,
    question_text: String,
}

/// Row of the answers table: `question_id,personality_type,answer_text`
#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    personality_type: String,
    answer_text: String,
}

/// Load a question bank from its two CSV tables.
///
/// Questions keep the order of the questions file and options the order of
/// the answers file. Shuffling is a separate step.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, a question id
/// repeats, an answer points at no question, or a question has no answers.
pub fn load_question_bank(questions_path: &Path, answers_path: &Path) -> Result<Vec<Question>> {
    let questions_file = File::open(questions_path)
        .with_context(|| format!("Failed to open questions file at {}", questions_path.display()))?;
    let answers_file = File::open(answers_path)
        .with_context(|| format!("Failed to open answers file at {}", answers_path.display()))?;

    let questions = read_question_bank(questions_file, answers_file).with_context(|| {
        format!(
            "Invalid question bank ({} + {})",
            questions_path.display(),
            answers_path.display()
        )
    })?;

    tracing::debug!(
        count = questions.len(),
        path = %questions_path.display(),
        "loaded question bank"
    );

    Ok(questions)
}

/// Same as [`load_question_bank`] over arbitrary readers.
pub fn read_question_bank<Q: Read, A: Read>(questions: Q, answers: A) -> Result<Vec<Question>> {
    let mut bank: Vec<Question> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(questions);
    for (i, result) in rdr.deserialize().enumerate() {
        // +2: 1-based and the header line
        let line = i + 2;
        let row: QuestionRow =
            result.with_context(|| format!("questions line {}: malformed row", line))?;
        if row.id.is_empty() {
            bail!("questions line {}: empty id", line);
        }
        if index.contains_key(&row.id) {
            bail!("questions line {}: duplicate question id '{}'", line, row.id);
        }
        index.insert(row.id.clone(), bank.len());
        bank.push(Question {
            id: row.id,
            text: row.question_text,
            options: Vec::new(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(answers);
    for (i, result) in rdr.deserialize().enumerate() {
        let line = i + 2;
        let row: AnswerRow =
            result.with_context(|| format!("answers line {}: malformed row", line))?;
        let Some(&pos) = index.get(&row.question_id) else {
            bail!(
                "answers line {}: question id '{}' does not exist",
                line,
                row.question_id
            );
        };
        bank[pos].options.push(AnswerOption {
            category: Category::new(&row.personality_type),
            text: row.answer_text,
        });
    }

    if let Some(q) = bank.iter().find(|q| q.options.is_empty()) {
        bail!("question '{}' has no answer options", q.id);
    }

    Ok(bank)
}

/// Options whose category the axis system does not know, as
/// `(question id, category)`. Picking one of them fails scoring.
pub fn unknown_categories(questions: &[Question], system: &AxisSystem) -> Vec<(String, Category)> {
    questions
        .iter()
        .flat_map(|q| {
            q.options
                .iter()
                .filter(|o| !system.contains(&o.category))
                .map(move |o| (q.id.clone(), o.category.clone()))
        })
        .collect()
}
