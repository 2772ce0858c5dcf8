pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod questions;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod session;

pub use error::{ErrorKind, QuizError};
