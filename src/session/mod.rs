mod outcome;
mod state;

pub use outcome::QuizOutcome;
pub use state::{score_submission, Session, SessionState};
