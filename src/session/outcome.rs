use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::QuizError;
use crate::questions::Responses;
use crate::reference::{TypeDescription, TypeTable};
use crate::scoring::{resolve, tally_responses, AxisOutcome, AxisSystem, Tally, TypeCode};

/// Everything the exporter needs about one resolved submission.
#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub name: String,
    pub type_code: TypeCode,
    pub description: TypeDescription,
    pub tally: Tally,
    pub breakdown: Vec<AxisOutcome>,
    pub generated_at: DateTime<Utc>,
}

/// Tally, resolve and look up in sequence. The first failing step wins.
pub(crate) fn resolve_submission(
    name: &str,
    responses: &Responses,
    system: &AxisSystem,
    table: &TypeTable,
) -> Result<QuizOutcome, QuizError> {
    let tally = tally_responses(responses, system)?;
    let resolution = resolve(&tally, system);
    let description = table.lookup(&resolution.code.to_string())?.clone();

    Ok(QuizOutcome {
        name: name.to_string(),
        type_code: resolution.code,
        description,
        tally,
        breakdown: resolution.breakdown,
        generated_at: Utc::now(),
    })
}
