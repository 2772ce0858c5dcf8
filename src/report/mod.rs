use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::output::{format_breakdown, format_tally_chart};
use crate::scoring::{AxisOutcome, Tally};
use crate::session::QuizOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Flat result record handed to the document renderers.
#[derive(Debug, Serialize)]
pub struct ReportRecord<'a> {
    pub name: &'a str,
    pub type_code: String,
    pub nickname: &'a str,
    pub traits: &'a str,
    pub recommendation: &'a str,
    pub tally: &'a Tally,
    pub breakdown: &'a [AxisOutcome],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> ReportRecord<'a> {
    pub fn from_outcome(outcome: &'a QuizOutcome, with_chart: bool) -> Self {
        Self {
            name: &outcome.name,
            type_code: outcome.type_code.to_string(),
            nickname: &outcome.description.nickname,
            traits: &outcome.description.traits,
            recommendation: &outcome.description.recommendation,
            tally: &outcome.tally,
            breakdown: &outcome.breakdown,
            chart: with_chart.then(|| format_tally_chart(&outcome.tally)),
            generated_at: outcome.generated_at,
        }
    }
}

/// Render a report document in the given format.
pub fn render(outcome: &QuizOutcome, format: ReportFormat) -> Result<String> {
    let record = ReportRecord::from_outcome(outcome, true);
    match format {
        ReportFormat::Markdown => Ok(render_markdown(&record)),
        ReportFormat::Text => Ok(render_text(&record)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(&record).context("Failed to serialize report")
        }
    }
}

fn render_markdown(r: &ReportRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Personality Test Result for {}\n\n", r.name));
    out.push_str(&format!("**Personality type:** {} - {}\n\n", r.type_code, r.nickname));
    out.push_str(&format!("## Traits\n\n{}\n\n", r.traits));
    out.push_str(&format!("## Well-suited careers\n\n{}\n\n", r.recommendation));
    out.push_str("## Breakdown\n\n");
    for line in format_breakdown(r.breakdown).lines() {
        out.push_str(&format!("- {}\n", line));
    }
    if let Some(ref chart) = r.chart {
        out.push_str(&format!("\n## Answer tally\n\n```text\n{}\n```\n", chart));
    }
    out.push_str(&format!(
        "\n_Generated {}_\n",
        r.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

fn render_text(r: &ReportRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Personality Test Result for {}\n\n", r.name));
    out.push_str(&format!("Personality type: {} - {}\n\n", r.type_code, r.nickname));
    out.push_str(&format!("Traits: {}\n\n", r.traits));
    out.push_str(&format!("Well-suited careers: {}\n\n", r.recommendation));
    out.push_str(&format_breakdown(r.breakdown));
    out.push('\n');
    if let Some(ref chart) = r.chart {
        out.push('\n');
        out.push_str(chart);
        out.push('\n');
    }
    out.push_str(&format!(
        "\nGenerated {}\n",
        r.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// `persona_result_<Name_With_Underscores>.<ext>`
pub fn report_file_name(name: &str, format: ReportFormat) -> String {
    let stem: String = name
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let stem = if stem.is_empty() { "anonymous".to_string() } else { stem };
    format!("persona_result_{}.{}", stem, format.extension())
}

/// Render and write the report into `dir` atomically. Returns the path.
pub fn write_report(dir: &Path, outcome: &QuizOutcome, format: ReportFormat) -> Result<PathBuf> {
    let content = render(outcome, format)?;

    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory at {}", dir.display()))?;
    }

    let path = dir.join(report_file_name(&outcome.name, format));

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .context("Failed to write report")?;
    file.commit().context("Failed to save report")?;

    tracing::debug!(path = %path.display(), ?format, "report written");

    Ok(path)
}
