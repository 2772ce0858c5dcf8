use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::error::{ErrorKind, QuizError};
use crate::reference::TypeTable;
use crate::scoring::{AxisOutcome, AxisSystem, Tally};
use crate::session::QuizOutcome;

/// Longest bar in the tally chart, in characters
const MAX_BAR: usize = 30;

/// Width used for wrapping when stdout is not a terminal
const DEFAULT_WIDTH: usize = 80;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(10);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Horizontal bar per category, scaled so the largest count spans
/// `MAX_BAR` characters.
///
/// ```text
/// E  ######  3
/// I  ####    2
/// ```
pub fn format_tally_chart(tally: &Tally) -> String {
    let max = tally.iter().map(|(_, n)| n).max().unwrap_or(0);
    let label_width = tally
        .iter()
        .map(|(c, _)| c.as_str().chars().count())
        .max()
        .unwrap_or(1);

    tally
        .iter()
        .map(|(category, count)| {
            let bar_len = if max == 0 {
                0
            } else {
                (count as usize * MAX_BAR).div_ceil(max as usize)
            };
            format!(
                "{:<lw$}  {:<bw$}  {}",
                category.as_str(),
                "#".repeat(bar_len),
                count,
                lw = label_width,
                bw = MAX_BAR
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per axis: counts and the winner, flagging tie-breaks.
pub fn format_breakdown(breakdown: &[AxisOutcome]) -> String {
    breakdown
        .iter()
        .map(|o| {
            let counts = o
                .counts
                .iter()
                .map(|(c, n)| format!("{}={}", c, n))
                .collect::<Vec<_>>()
                .join(" ");
            let tie = if o.tie_broken { " (tie, default)" } else { "" };
            format!("{}: {} -> {}{}", o.axis, counts, o.winner, tie)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Questionnaire introduction: one legend line per axis, then how to answer.
pub fn format_intro(system: &AxisSystem, question_count: usize, use_colors: bool) -> String {
    let title = "Personality Questionnaire";
    let mut out = vec![
        if use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        },
        "=".repeat(title.len()),
        String::new(),
        format!(
            "Your answers are sorted along {} {}:",
            system.axes().len(),
            if system.axes().len() == 1 { "axis" } else { "axes" }
        ),
    ];

    let name_width = system
        .axes()
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0);
    for axis in system.axes() {
        let pair = axis
            .categories
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" vs ");
        let mut line = format!("  {:<width$}  {}", axis.name, pair, width = name_width);
        if let Some(ref summary) = axis.summary {
            line.push_str(&format!("  ({})", summary));
        }
        out.push(line);
    }

    out.push(String::new());
    out.push("How to answer:".to_string());
    out.push("  Answer honestly and spontaneously. There are no right or wrong answers.".to_string());
    out.push("  Pick the option closest to what you naturally do, not what you aspire to.".to_string());
    out.push(format!(
        "  {} questions in total. Type the number of your choice and press Enter.",
        question_count
    ));

    out.join("\n")
}

/// Full result as shown in the terminal after a submission.
pub fn format_outcome(outcome: &QuizOutcome, use_colors: bool) -> String {
    let width = get_terminal_width().unwrap_or(DEFAULT_WIDTH).saturating_sub(4);
    let desc = &outcome.description;
    let code = outcome.type_code.to_string();

    let heading = if use_colors {
        format!(
            "Personality type for {}: {} - {}",
            outcome.name.bold(),
            code.cyan().bold(),
            desc.nickname.yellow()
        )
    } else {
        format!(
            "Personality type for {}: {} - {}",
            outcome.name, code, desc.nickname
        )
    };

    let mut out = vec![heading, String::new()];

    let traits_label = if use_colors {
        "Traits:".bold().to_string()
    } else {
        "Traits:".to_string()
    };
    out.push(traits_label);
    out.extend(wrap_text(&desc.traits, width).into_iter().map(|l| format!("  {}", l)));
    out.push(String::new());

    let careers_label = if use_colors {
        "Well-suited careers:".bold().to_string()
    } else {
        "Well-suited careers:".to_string()
    };
    out.push(careers_label);
    out.extend(
        wrap_text(&desc.recommendation, width)
            .into_iter()
            .map(|l| format!("  {}", l)),
    );
    out.push(String::new());

    out.push(format_breakdown(&outcome.breakdown));
    out.push(String::new());
    out.push(format_tally_chart(&outcome.tally));

    out.join("\n")
}

/// Type table listing: "CODE  Nickname" per row.
pub fn format_type_table(table: &TypeTable, use_colors: bool) -> String {
    if table.is_empty() {
        return "No type descriptions found.".to_string();
    }

    let code_width = table
        .iter()
        .map(|r| r.type_code.chars().count())
        .max()
        .unwrap_or(4);

    table
        .iter()
        .map(|r| {
            let code = format!("{:<width$}", r.type_code.to_uppercase(), width = code_width);
            if use_colors {
                format!("{}  {}", code.cyan(), r.nickname)
            } else {
                format!("{}  {}", code, r.nickname)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User-facing rendering of a submission error. Input problems read as
/// warnings, data faults as errors.
pub fn format_quiz_error(err: &QuizError, use_colors: bool) -> String {
    match (err.kind(), use_colors) {
        (ErrorKind::Input, true) => format!("{} {}", "Warning:".yellow().bold(), err),
        (ErrorKind::Input, false) => format!("Warning: {}", err),
        (ErrorKind::DataFault, true) => format!("{} {}", "Error:".red().bold(), err),
        (ErrorKind::DataFault, false) => format!("Error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::Responses;
    use crate::reference::TypeDescription;
    use crate::scoring::{resolve, tally_responses, AxisSystem, Category};
    use chrono::Utc;

    fn sample_outcome() -> QuizOutcome {
        let system = AxisSystem::mbti();
        let mut responses = Responses::new();
        for (q, c) in [("1", "E"), ("2", "E"), ("3", "S"), ("4", "T"), ("5", "F"), ("6", "P")] {
            responses.insert(q.to_string(), Category::new(c));
        }
        let tally = tally_responses(&responses, &system).unwrap();
        let resolution = resolve(&tally, &system);
        QuizOutcome {
            name: "Ayu Lestari".to_string(),
            type_code: resolution.code,
            description: TypeDescription {
                type_code: "ESFP".to_string(),
                nickname: "The Entertainer".to_string(),
                traits: "Outgoing, playful and generous.".to_string(),
                recommendation: "Performer, event planner".to_string(),
            },
            tally,
            breakdown: resolution.breakdown,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_intro_lists_every_axis() {
        let intro = format_intro(&AxisSystem::mbti(), 20, false);
        assert!(intro.starts_with("Personality Questionnaire\n========================="));
        assert!(intro.contains("sorted along 4 axes:"));
        assert!(intro.contains("  energy      E vs I  (Extraversion vs Introversion"));
        assert!(intro.contains("  lifestyle   J vs P  (Judging vs Perceiving"));
        assert!(intro.contains("20 questions in total."));
    }

    #[test]
    fn test_intro_without_summaries() {
        let system = AxisSystem::from_config(&crate::scoring::ScoringConfig {
            preset: Some("temperament".to_string()),
            axes: None,
        })
        .unwrap();
        let intro = format_intro(&system, 8, false);
        assert!(intro.contains("sorted along 1 axis:"));
        assert!(intro.contains("  temperament  SANGUINE vs CHOLERIC vs MELANCHOLIC vs PHLEGMATIC\n"));
    }

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("one two three", 40), vec!["one two three"]);
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("alpha beta gamma delta epsilon", 12);
        assert_eq!(lines, vec!["alpha beta", "gamma delta", "epsilon"]);
    }

    #[test]
    fn test_wrap_text_long_word() {
        let lines = wrap_text("a supercalifragilistic b", 10);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 20).is_empty());
    }

    #[test]
    fn test_tally_chart_scaling() {
        let outcome = sample_outcome();
        let chart = format_tally_chart(&outcome.tally);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 8);
        // E has the max count (2) and gets the full bar
        assert!(lines[0].starts_with("E  "));
        assert_eq!(lines[0].matches('#').count(), MAX_BAR);
        // S has 1 of 2
        assert_eq!(lines[2].matches('#').count(), MAX_BAR / 2);
        // I has none
        assert_eq!(lines[1].matches('#').count(), 0);
        assert!(lines[1].ends_with(" 0"));
    }

    #[test]
    fn test_tally_chart_all_zero() {
        let tally = Tally::zeroed(&AxisSystem::mbti());
        let chart = format_tally_chart(&tally);
        assert_eq!(chart.matches('#').count(), 0);
    }

    #[test]
    fn test_breakdown_marks_ties() {
        let outcome = sample_outcome();
        let text = format_breakdown(&outcome.breakdown);
        assert!(text.contains("energy: E=2 I=0 -> E"));
        assert!(text.contains("judgement: T=1 F=1 -> F (tie, default)"));
    }

    #[test]
    fn test_format_outcome_plain() {
        let outcome = sample_outcome();
        let text = format_outcome(&outcome, false);
        assert!(text.starts_with("Personality type for Ayu Lestari: ESFP - The Entertainer"));
        assert!(text.contains("Traits:"));
        assert!(text.contains("Outgoing, playful and generous."));
        assert!(text.contains("Well-suited careers:"));
        assert!(text.contains("Performer, event planner"));
    }

    #[test]
    fn test_format_type_table() {
        let table = TypeTable::from_records(vec![
            TypeDescription {
                type_code: "intj".to_string(),
                nickname: "The Architect".to_string(),
                traits: String::new(),
                recommendation: String::new(),
            },
            TypeDescription {
                type_code: "ENFP".to_string(),
                nickname: "The Campaigner".to_string(),
                traits: String::new(),
                recommendation: String::new(),
            },
        ])
        .unwrap();
        let text = format_type_table(&table, false);
        assert_eq!(text, "INTJ  The Architect\nENFP  The Campaigner");
    }

    #[test]
    fn test_format_type_table_empty() {
        assert_eq!(
            format_type_table(&TypeTable::default(), false),
            "No type descriptions found."
        );
    }

    #[test]
    fn test_format_quiz_error() {
        assert!(format_quiz_error(&QuizError::MissingIdentity, false).starts_with("Warning: "));
        let err = QuizError::UnknownTypeCode {
            code: "ZZZZ".to_string(),
        };
        assert!(format_quiz_error(&err, false).starts_with("Error: "));
    }
}
