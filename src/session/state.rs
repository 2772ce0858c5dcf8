use crate::error::QuizError;
use crate::questions::{Question, Responses};
use crate::reference::TypeTable;
use crate::scoring::{AxisSystem, Category};

use super::outcome::{resolve_submission, QuizOutcome};

#[derive(Debug, Clone)]
pub enum SessionState {
    AwaitingIdentity,
    AwaitingResponses { name: String },
    Resolving,
    Resolved(QuizOutcome),
    Failed(QuizError),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Resolved(_) | SessionState::Failed(_))
    }
}

/// One person's pass through the questionnaire.
///
/// Borrows the question bank, axes and type table, which stay immutable and
/// can be shared by any number of sessions. Everything mutable lives here.
pub struct Session<'a> {
    questions: &'a [Question],
    system: &'a AxisSystem,
    table: &'a TypeTable,
    responses: Responses,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(questions: &'a [Question], system: &'a AxisSystem, table: &'a TypeTable) -> Self {
        Self {
            questions,
            system,
            table,
            responses: Responses::new(),
            state: SessionState::AwaitingIdentity,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &'a [Question] {
        self.questions
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Record the respondent's name. Blank names are rejected and leave the
    /// session waiting for one. No effect once the session is terminal.
    pub fn set_name(&mut self, name: &str) -> Result<(), QuizError> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::MissingIdentity);
        }
        self.state = SessionState::AwaitingResponses {
            name: name.to_string(),
        };
        Ok(())
    }

    /// Record (or replace) the selection for one question. The category
    /// must belong to one of that question's options. No effect once the
    /// session is terminal.
    pub fn answer(&mut self, question_id: &str, category: Category) -> Result<(), QuizError> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion {
                question_id: question_id.to_string(),
            })?;
        if !question.options.iter().any(|o| o.category == category) {
            return Err(QuizError::InvalidChoice {
                question_id: question_id.to_string(),
                category: category.to_string(),
            });
        }
        self.responses.insert(question_id.to_string(), category);
        Ok(())
    }

    /// Question ids without an answer, in presentation order.
    pub fn unanswered(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter(|q| !self.responses.contains_key(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    /// Try to resolve the submission.
    ///
    /// A missing name or unanswered questions are reported without leaving
    /// the current state, so the caller can fix them and submit again.
    /// Scoring and lookup faults move the session to `Failed`. Once
    /// terminal, the stored outcome or error is returned again.
    pub fn submit(&mut self) -> Result<&QuizOutcome, QuizError> {
        if let SessionState::AwaitingResponses { name } = &self.state {
            if self.unanswered().is_empty() {
                let name = name.clone();
                self.state = SessionState::Resolving;
                self.state =
                    match resolve_submission(&name, &self.responses, self.system, self.table) {
                        Ok(outcome) => {
                            tracing::debug!(
                                name = %outcome.name,
                                code = %outcome.type_code,
                                "submission resolved"
                            );
                            SessionState::Resolved(outcome)
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "submission failed");
                            SessionState::Failed(err)
                        }
                    };
            }
        }

        match &self.state {
            SessionState::Resolved(outcome) => Ok(outcome),
            SessionState::Failed(err) => Err(err.clone()),
            SessionState::AwaitingIdentity => Err(QuizError::MissingIdentity),
            SessionState::AwaitingResponses { .. } | SessionState::Resolving => {
                Err(QuizError::IncompleteResponses {
                    missing: self.unanswered(),
                })
            }
        }
    }
}

/// Resolve a complete submission in one call.
pub fn score_submission(
    name: &str,
    responses: &Responses,
    questions: &[Question],
    system: &AxisSystem,
    table: &TypeTable,
) -> Result<QuizOutcome, QuizError> {
    let mut session = Session::new(questions, system, table);
    session.set_name(name)?;
    for (question_id, category) in responses {
        session.answer(question_id, category.clone())?;
    }
    session.submit().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::AnswerOption;
    use crate::reference::TypeDescription;

    fn question(id: &str, a: &str, b: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: vec![
                AnswerOption {
                    category: Category::new(a),
                    text: a.to_string(),
                },
                AnswerOption {
                    category: Category::new(b),
                    text: b.to_string(),
                },
            ],
        }
    }

    fn bank() -> Vec<Question> {
        vec![
            question("1", "E", "I"),
            question("2", "S", "N"),
            question("3", "T", "F"),
            question("4", "J", "P"),
        ]
    }

    fn complete_table() -> TypeTable {
        let records = AxisSystem::mbti()
            .all_codes()
            .iter()
            .map(|code| TypeDescription {
                type_code: code.to_string(),
                nickname: format!("{} nickname", code),
                traits: "traits".to_string(),
                recommendation: "careers".to_string(),
            })
            .collect();
        TypeTable::from_records(records).unwrap()
    }

    fn answer_all(session: &mut Session, picks: &[(&str, &str)]) {
        for (q, c) in picks {
            session.answer(q, Category::new(c)).unwrap();
        }
    }

    #[test]
    fn test_happy_path() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);

        session.set_name("  Ayu  ").unwrap();
        answer_all(&mut session, &[("1", "E"), ("2", "N"), ("3", "T"), ("4", "J")]);

        let outcome = session.submit().unwrap();
        assert_eq!(outcome.name, "Ayu");
        assert_eq!(outcome.type_code.to_string(), "ENTJ");
        assert_eq!(outcome.description.nickname, "ENTJ nickname");
        assert_eq!(outcome.tally.total(), 4);
        assert!(matches!(session.state(), SessionState::Resolved(_)));
    }

    #[test]
    fn test_blank_name_stays_awaiting_identity() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);

        assert_eq!(session.set_name("   "), Err(QuizError::MissingIdentity));
        assert!(matches!(session.state(), SessionState::AwaitingIdentity));
    }

    #[test]
    fn test_submit_without_name() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);
        answer_all(&mut session, &[("1", "E"), ("2", "N"), ("3", "T"), ("4", "J")]);

        assert_eq!(session.submit().unwrap_err(), QuizError::MissingIdentity);
        assert!(matches!(session.state(), SessionState::AwaitingIdentity));

        // Answers given before the name survive
        session.set_name("Budi").unwrap();
        assert!(session.submit().is_ok());
    }

    #[test]
    fn test_missing_answer_stays_awaiting_responses() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);
        session.set_name("Citra").unwrap();
        answer_all(&mut session, &[("1", "E"), ("2", "N"), ("4", "J")]);

        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            QuizError::IncompleteResponses {
                missing: vec!["3".to_string()]
            }
        );
        assert!(matches!(
            session.state(),
            SessionState::AwaitingResponses { .. }
        ));

        session.answer("3", Category::new("F")).unwrap();
        assert_eq!(session.submit().unwrap().type_code.to_string(), "ENFJ");
    }

    #[test]
    fn test_unknown_type_code_fails() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = TypeTable::from_records(vec![]).unwrap();
        let mut session = Session::new(&questions, &system, &table);
        session.set_name("Dewi").unwrap();
        answer_all(&mut session, &[("1", "E"), ("2", "N"), ("3", "T"), ("4", "J")]);

        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            QuizError::UnknownTypeCode {
                code: "ENTJ".to_string()
            }
        );
        assert!(matches!(session.state(), SessionState::Failed(_)));
        // Terminal: same error again, later edits ignored
        session.answer("1", Category::new("I")).unwrap();
        assert_eq!(session.submit().unwrap_err(), err);
    }

    #[test]
    fn test_unknown_category_fails() {
        let questions = vec![question("1", "E", "X")];
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);
        session.set_name("Eka").unwrap();
        session.answer("1", Category::new("X")).unwrap();

        let err = session.submit().unwrap_err();
        assert!(matches!(err, QuizError::UnknownCategory { .. }));
        assert!(matches!(session.state(), SessionState::Failed(_)));
    }

    #[test]
    fn test_unknown_question_rejected() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);

        let err = session.answer("99", Category::new("E")).unwrap_err();
        assert!(matches!(err, QuizError::UnknownQuestion { .. }));
        assert!(session.responses().is_empty());
    }

    #[test]
    fn test_choice_outside_options_rejected() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);
        session.set_name("Indah").unwrap();

        // "E" belongs to question 1 only
        for id in ["2", "3", "4"] {
            assert_eq!(
                session.answer(id, Category::new("E")),
                Err(QuizError::InvalidChoice {
                    question_id: id.to_string(),
                    category: "E".to_string(),
                })
            );
        }
        session.answer("1", Category::new("e")).unwrap();
        assert_eq!(session.responses().len(), 1);
        assert_eq!(
            session.submit().unwrap_err(),
            QuizError::IncompleteResponses {
                missing: vec!["2".to_string(), "3".to_string(), "4".to_string()]
            }
        );
    }

    #[test]
    fn test_score_submission_rejects_choice_outside_options() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut responses = Responses::new();
        for q in ["1", "2", "3", "4"] {
            responses.insert(q.to_string(), Category::new("E"));
        }

        let err = score_submission("Joko", &responses, &questions, &system, &table).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidChoice {
                question_id: "2".to_string(),
                category: "E".to_string(),
            }
        );
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
    }

    #[test]
    fn test_answer_overwrites() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let mut session = Session::new(&questions, &system, &table);
        session.set_name("Fajar").unwrap();
        answer_all(&mut session, &[("1", "E"), ("2", "N"), ("3", "T"), ("4", "J")]);
        session.answer("1", Category::new("I")).unwrap();

        assert_eq!(session.submit().unwrap().type_code.to_string(), "INTJ");
    }

    #[test]
    fn test_failed_session_does_not_affect_next() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();

        let mut first = Session::new(&questions, &system, &table);
        first.set_name("Gita").unwrap();
        first.answer("1", Category::new("E")).unwrap();
        assert!(first.submit().is_err());

        let mut responses = Responses::new();
        for (q, c) in [("1", "I"), ("2", "S"), ("3", "F"), ("4", "P")] {
            responses.insert(q.to_string(), Category::new(c));
        }
        let outcome = score_submission("Hadi", &responses, &questions, &system, &table).unwrap();
        assert_eq!(outcome.type_code.to_string(), "ISFP");
    }

    #[test]
    fn test_score_submission_missing_name() {
        let questions = bank();
        let system = AxisSystem::mbti();
        let table = complete_table();
        let err = score_submission("", &Responses::new(), &questions, &system, &table).unwrap_err();
        assert_eq!(err, QuizError::MissingIdentity);
    }
}
