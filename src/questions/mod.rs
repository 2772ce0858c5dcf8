pub mod answers_file;
pub mod loader;
pub mod shuffle;
pub mod types;

pub use answers_file::{load_answers_file, AnswersFile};
pub use loader::{load_question_bank, read_question_bank, unknown_categories};
pub use shuffle::{arrange_questions, shuffle_questions};
pub use types::{AnswerOption, Question, Responses};
