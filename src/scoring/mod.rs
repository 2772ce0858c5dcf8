pub mod axes;
pub mod config;
pub mod resolver;
pub mod tally;
pub mod validation;

pub use axes::{Axis, AxisSystem, Category, TypeCode};
pub use config::{AxisConfig, ScoringConfig};
pub use resolver::{resolve, AxisOutcome, Resolution};
pub use tally::{tally_responses, Tally};
pub use validation::validate_scoring;
