use clap::{Parser, Subcommand};
use std::path::PathBuf;

use persona_quiz::config::Config;
use persona_quiz::questions::Question;
use persona_quiz::reference::TypeTable;
use persona_quiz::report::ReportFormat;
use persona_quiz::scoring::AxisSystem;
use persona_quiz::session::{QuizOutcome, Session};
use persona_quiz::{ErrorKind, QuizError};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_IO: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the questionnaire interactively (default if no subcommand)
    Take {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Score a pre-filled answers file without prompting
    Score {
        /// YAML or JSON file mapping question id to chosen category
        #[arg(short, long)]
        answers: PathBuf,

        /// Respondent name (overrides the name in the answers file)
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// List the type description table
    Types {
        /// Report type codes the scoring axes can produce but the table lacks
        #[arg(long)]
        check: bool,
    },
    /// Create a config file and install sample data
    Init,
}

#[derive(clap::Args, Debug, Default)]
struct ReportArgs {
    /// Report format (defaults to the config file setting)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Directory for the report (defaults to the config file setting, then the current directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the result without writing a report file
    #[arg(long)]
    no_report: bool,
}

#[derive(Parser, Debug)]
#[command(name = "persona-quiz")]
#[command(about = "Short-form personality questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/persona-quiz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Seed for question shuffling (reproducible order)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Reference data loaded once at startup and only read afterwards.
struct QuizData {
    config: Config,
    system: AxisSystem,
    questions: Vec<Question>,
    table: TypeTable,
}

fn load_data(config_path: Option<PathBuf>, seed: Option<u64>) -> QuizData {
    let config = match persona_quiz::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.scoring.clone().unwrap_or_default();
    let system = match AxisSystem::from_config(&scoring) {
        Ok(s) => s,
        Err(errors) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    let table = match TypeTable::load(&config.data.types) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Type table error: {:#}", e);
            eprintln!("Run `persona-quiz init` to install the sample data.");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let bank = match persona_quiz::questions::load_question_bank(
        &config.data.questions,
        &config.data.answers,
    ) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Question bank error: {:#}", e);
            eprintln!("Run `persona-quiz init` to install the sample data.");
            std::process::exit(EXIT_CONFIG);
        }
    };

    for (question_id, category) in persona_quiz::questions::unknown_categories(&bank, &system) {
        tracing::warn!(
            question = %question_id,
            category = %category,
            "answer option maps to a category outside the scoring axes"
        );
    }

    let questions = persona_quiz::questions::arrange_questions(
        bank,
        config.shuffle.enabled,
        seed.or(config.shuffle.seed),
    );

    QuizData {
        config,
        system,
        questions,
        table,
    }
}

fn exit_code_for(err: &QuizError) -> i32 {
    match err.kind() {
        ErrorKind::Input => EXIT_INPUT,
        ErrorKind::DataFault => EXIT_DATA,
    }
}

/// Print the result and export the report. Returns the process exit code.
fn finish(outcome: &QuizOutcome, data: &QuizData, args: &ReportArgs, use_colors: bool) -> i32 {
    println!();
    println!("{}", persona_quiz::output::format_outcome(outcome, use_colors));

    if args.no_report {
        return EXIT_SUCCESS;
    }

    let format = args.format.unwrap_or(data.config.report.format);
    let dir = args
        .out_dir
        .clone()
        .or_else(|| data.config.report.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    match persona_quiz::report::write_report(&dir, outcome, format) {
        Ok(path) => {
            println!();
            println!("Report saved to {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to save report: {:#}", e);
            EXIT_IO
        }
    }
}

fn run_take(data: &QuizData, args: &ReportArgs, use_colors: bool) -> i32 {
    println!(
        "{}",
        persona_quiz::output::format_intro(&data.system, data.questions.len(), use_colors)
    );
    println!();

    let mut session = Session::new(&data.questions, &data.system, &data.table);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut collector =
        persona_quiz::collector::Collector::new(stdin.lock(), stdout.lock(), use_colors);
    if let Err(e) = collector.run(&mut session) {
        eprintln!("Input error: {:#}", e);
        return EXIT_IO;
    }
    drop(collector);

    match session.submit() {
        Ok(outcome) => {
            let outcome = outcome.clone();
            finish(&outcome, data, args, use_colors)
        }
        Err(err) => {
            eprintln!();
            eprintln!("{}", persona_quiz::output::format_quiz_error(&err, use_colors));
            exit_code_for(&err)
        }
    }
}

fn run_score(
    data: &QuizData,
    answers: &PathBuf,
    name: Option<String>,
    args: &ReportArgs,
    use_colors: bool,
) -> i32 {
    let file = match persona_quiz::questions::load_answers_file(answers) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Answers error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let name = name.or_else(|| file.name.clone()).unwrap_or_default();
    let result = persona_quiz::session::score_submission(
        &name,
        &file.responses(),
        &data.questions,
        &data.system,
        &data.table,
    );

    match result {
        Ok(outcome) => finish(&outcome, data, args, use_colors),
        Err(err) => {
            eprintln!("{}", persona_quiz::output::format_quiz_error(&err, use_colors));
            exit_code_for(&err)
        }
    }
}

fn run_types(data: &QuizData, check: bool, use_colors: bool) -> i32 {
    println!(
        "{}",
        persona_quiz::output::format_type_table(&data.table, use_colors)
    );

    if !check {
        return EXIT_SUCCESS;
    }

    let missing = data.table.missing_codes(&data.system);
    if missing.is_empty() {
        println!();
        println!(
            "All {} type codes are described.",
            data.system.all_codes().len()
        );
        EXIT_SUCCESS
    } else {
        eprintln!();
        eprintln!("Missing descriptions for {} type codes:", missing.len());
        for code in missing {
            eprintln!("  - {}", code);
        }
        EXIT_DATA
    }
}

fn main() {
    let cli = Cli::parse();
    persona_quiz::logging::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Take {
        report: ReportArgs::default(),
    });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = persona_quiz::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let data = load_data(config_path, cli.seed);
    tracing::debug!(
        questions = data.questions.len(),
        types = data.table.len(),
        axes = data.system.axes().len(),
        "reference data ready"
    );

    let use_colors = persona_quiz::output::should_use_colors();

    let code = match command {
        Commands::Take { report } => run_take(&data, &report, use_colors),
        Commands::Score {
            answers,
            name,
            report,
        } => run_score(&data, &answers, name, &report, use_colors),
        Commands::Types { check } => run_types(&data, check, use_colors),
        Commands::Init => EXIT_SUCCESS,
    };

    std::process::exit(code);
}
