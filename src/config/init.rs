use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::collector::prompt_line;
use crate::config::{get_config_path, Config, DataConfig, ReportConfig, ShuffleConfig};
use crate::scoring::config::{preset_axes, PRESET_MBTI};
use crate::scoring::{AxisConfig, Category, ScoringConfig};

const SAMPLE_QUESTIONS: &str = include_str!("../../data/questions.csv");
const SAMPLE_ANSWERS: &str = include_str!("../../data/answers.csv");
const SAMPLE_TYPES: &str = include_str!("../../data/types.csv");

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let line = prompt_line(input, output, &format!("{} [{}]: ", message, default))?
        .unwrap_or_default();
    if line.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(line)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let line = prompt_line(input, output, &format!("{} [{}]: ", message, hint))?
        .unwrap_or_default()
        .to_lowercase();
    if line.is_empty() {
        Ok(default_yes)
    } else {
        Ok(line == "y" || line == "yes")
    }
}

/// Copy the bundled MBTI question bank and type table into `dir`.
///
/// Existing files are left alone unless `overwrite` is set. Returns the
/// paths actually written.
pub fn write_sample_data(dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let defaults = DataConfig::default();
    let files = [
        (defaults.questions, SAMPLE_QUESTIONS),
        (defaults.answers, SAMPLE_ANSWERS),
        (defaults.types, SAMPLE_TYPES),
    ];

    let mut written = Vec::new();
    for (name, content) in files {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            continue;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Run the interactive init wizard to create a config file and sample data.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    println!();
    println!("Persona Quiz Configuration Wizard");
    println!("=================================");
    println!();

    // 1. Axis set
    println!("Answers are tallied along scoring axes. 'mbti' uses the four classic");
    println!("pairs (E/I, S/N, T/F, J/P); 'temperament' uses a single four-way axis.");
    let preset = loop {
        let answer = prompt_with_default(&mut input, &mut output, "Axis preset", PRESET_MBTI)?;
        if preset_axes(&answer).is_some() {
            break answer.to_lowercase();
        }
        println!("  Invalid: expected 'mbti' or 'temperament'. Try again.");
    };

    // 2. Tie-breaks
    println!();
    println!("When both sides of an axis get the same number of answers, a fixed");
    println!("default category wins. Pick one per axis or keep the defaults.");
    let mut axes: Vec<AxisConfig> = preset_axes(&preset).unwrap_or_default();
    let customise =
        prompt_yes_no(&mut input, &mut output, "Customise tie-break defaults?", false)?;
    if customise {
        for axis in axes.iter_mut() {
            let choices = axis.categories.join("/");
            axis.tie_default = loop {
                let answer = prompt_with_default(
                    &mut input,
                    &mut output,
                    &format!("  Tie default for {} ({})", axis.name, choices),
                    &axis.tie_default,
                )?;
                let picked = Category::new(&answer);
                if axis.categories.iter().any(|c| Category::new(c) == picked) {
                    break picked.to_string();
                }
                println!("  Invalid: must be one of {}. Try again.", choices);
            };
        }
    }
    let scoring = if customise {
        ScoringConfig {
            preset: None,
            axes: Some(axes),
        }
    } else {
        ScoringConfig {
            preset: Some(preset.clone()),
            axes: None,
        }
    };

    // 3. Shuffle
    println!();
    let shuffle_enabled = prompt_yes_no(
        &mut input,
        &mut output,
        "Shuffle question and answer order?",
        true,
    )?;

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        &mut input,
        &mut output,
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &mut input,
            &mut output,
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        data: DataConfig::default(),
        scoring: Some(scoring),
        shuffle: ShuffleConfig {
            enabled: shuffle_enabled,
            seed: None,
        },
        report: ReportConfig::default(),
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let config_dir = config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());

    // 6. Sample data (MBTI only)
    if preset == PRESET_MBTI {
        let install = prompt_yes_no(
            &mut input,
            &mut output,
            "Install the sample MBTI question bank and type table?",
            true,
        )?;
        if install {
            for path in write_sample_data(&config_dir, false)? {
                println!("  wrote {}", path.display());
            }
        }
    } else {
        println!("Add questions.csv, answers.csv and types.csv for your axes next to the config.");
    }

    println!("Run `persona-quiz` to take the questionnaire.");

    Ok(())
}
