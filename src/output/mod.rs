pub mod formatter;

pub use formatter::{
    format_breakdown, format_intro, format_outcome, format_quiz_error, format_tally_chart,
    format_type_table, should_use_colors, wrap_text,
};
