use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use crate::questions::Question;
use crate::scoring::Category;
use crate::session::Session;

/// Write `message`, then read one line. Returns the trimmed input, or
/// `None` at EOF.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Interactive prompts that fill a [`Session`] from a terminal (or any
/// reader/writer pair).
pub struct Collector<R, W> {
    input: R,
    output: W,
    use_colors: bool,
}

impl<R: BufRead, W: Write> Collector<R, W> {
    pub fn new(input: R, output: W, use_colors: bool) -> Self {
        Self {
            input,
            output,
            use_colors,
        }
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        prompt_line(&mut self.input, &mut self.output, message)
    }

    /// Ask for the respondent's name until the session accepts one.
    /// Returns false if input ended first.
    pub fn collect_name(&mut self, session: &mut Session) -> Result<bool> {
        loop {
            let Some(name) = self.prompt("Enter your full name: ")? else {
                return Ok(false);
            };
            match session.set_name(&name) {
                Ok(()) => return Ok(true),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    /// Ask one question until a valid option number is entered.
    /// Returns `None` if input ended first.
    pub fn ask(&mut self, number: usize, total: usize, question: &Question) -> Result<Option<Category>> {
        writeln!(self.output)?;
        let heading = format!("{}/{}  {}", number, total, question.text);
        if self.use_colors {
            writeln!(self.output, "{}", heading.bold())?;
        } else {
            writeln!(self.output, "{}", heading)?;
        }
        for (i, option) in question.options.iter().enumerate() {
            writeln!(self.output, "   {}) {}", i + 1, option.text)?;
        }

        let count = question.options.len();
        loop {
            let Some(input) = self.prompt(&format!("Choice [1-{}]: ", count))? else {
                return Ok(None);
            };
            match input.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if let Some(category) = question.category_at(n - 1) {
                        return Ok(Some(category.clone()));
                    }
                }
                _ => {}
            }
            writeln!(
                self.output,
                "  Invalid: enter a number between 1 and {}. Try again.",
                count
            )?;
        }
    }

    /// Collect the name, then one answer per question in display order.
    ///
    /// Stops quietly at end of input; submitting afterwards reports what is
    /// still missing.
    pub fn run(&mut self, session: &mut Session) -> Result<()> {
        if !self.collect_name(session)? {
            return Ok(());
        }

        let questions = session.questions();
        let total = questions.len();
        for (i, question) in questions.iter().enumerate() {
            match self.ask(i + 1, total, question)? {
                Some(category) => session.answer(&question.id, category)?,
                None => return Ok(()),
            }
        }
        Ok(())
    }
}
