use thiserror::Error;

/// Why a single submission could not be resolved.
///
/// The `Display` text of each variant is what the user sees, so it says what
/// to do next rather than what went wrong internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Please enter your name before submitting.")]
    MissingIdentity,

    #[error("Please answer every question before submitting ({} unanswered: {})", .missing.len(), .missing.join(", "))]
    IncompleteResponses { missing: Vec<String> },

    #[error("Answer to question {question_id} maps to unknown category '{category}'. The question bank does not match the scoring axes.")]
    UnknownCategory {
        question_id: String,
        category: String,
    },

    #[error("Personality type '{code}' was not found in the type description table.")]
    UnknownTypeCode { code: String },

    #[error("Question '{question_id}' is not part of this questionnaire.")]
    UnknownQuestion { question_id: String },

    #[error("'{category}' is not one of the options for question {question_id}. Pick one of the listed answers.")]
    InvalidChoice {
        question_id: String,
        category: String,
    },
}

/// Coarse classification used for exit codes and message styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The person taking the quiz can fix it (name, answers, question ids)
    Input,
    /// Reference data is inconsistent; retrying will not help
    DataFault,
}

impl QuizError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::MissingIdentity
            | QuizError::IncompleteResponses { .. }
            | QuizError::UnknownQuestion { .. }
            | QuizError::InvalidChoice { .. } => ErrorKind::Input,
            QuizError::UnknownCategory { .. } | QuizError::UnknownTypeCode { .. } => {
                ErrorKind::DataFault
            }
        }
    }
}
