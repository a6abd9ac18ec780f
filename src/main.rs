use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};

use roadmap_tools::clipboard::StdoutClipboard;
use roadmap_tools::config::AppConfig;
use roadmap_tools::error::AppError;
use roadmap_tools::store::{FileBackend, StoreHandle};
use roadmap_tools::telemetry;
use roadmap_tools::tools::aps::{ApsCalculator, ApsOutcome, SubjectMarks};
use roadmap_tools::tools::checklist::{nsfas_readiness_defaults, Checklist, ItemFilter};
use roadmap_tools::tools::matrix::{
    DecisionMatrix, FilterMode, MatrixRow, RowPatch, SkillsField, SortDirection, SortKey,
};
use roadmap_tools::tools::planner::{PlannerTemplate, WeeklyPlanner, DAY_LABELS, SLOT_COUNT};
use roadmap_tools::tools::wizard::{Answer, FundingAssessment, FundingWizard, Question, QuestionKind, StepOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "roadmap",
    about = "Career-guidance decision tools: decision matrix, APS calculator, funding wizard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score career options in the decision matrix
    Matrix {
        #[command(subcommand)]
        command: MatrixCommand,
    },
    /// Calculate an APS total and pass-level outlook
    Aps {
        #[command(subcommand)]
        command: ApsCommand,
    },
    /// Walk the funding eligibility wizard
    Wizard {
        #[command(subcommand)]
        command: WizardCommand,
    },
    /// Track application readiness items
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommand,
    },
    /// Lay out the weekly study planner
    Planner {
        #[command(subcommand)]
        command: PlannerCommand,
    },
    /// Dump every tool's persisted state as JSON
    Export,
}

#[derive(Subcommand, Debug)]
enum MatrixCommand {
    /// Print the row set, optionally sorted or filtered
    Show(MatrixShowArgs),
    /// Append a blank row
    Add,
    /// Update fields on one row and recompute its total
    Update(MatrixUpdateArgs),
    /// Remove one row
    Remove {
        /// Row id, as printed by `matrix show`
        id: String,
    },
    /// Write the row set to a CSV or JSON file
    Export(MatrixExportArgs),
    /// Replace the row set from a CSV or JSON file
    Import(MatrixImportArgs),
    /// Restore the worked example rows
    Seed,
    /// Remove every row
    Clear,
}

#[derive(Args, Debug)]
struct MatrixShowArgs {
    /// Sort the printed rows
    #[arg(long, value_enum)]
    sort: Option<SortKeyArg>,
    /// Sort direction, descending by default for totals
    #[arg(long, value_enum, default_value = "desc")]
    direction: DirectionArg,
    /// Only show rows tied for the best total
    #[arg(long)]
    top: bool,
}

#[derive(Args, Debug)]
struct MatrixUpdateArgs {
    /// Row id, as printed by `matrix show`
    id: String,
    #[arg(long)]
    name: Option<String>,
    /// Interest score, 1-5
    #[arg(long)]
    interest: Option<i64>,
    /// Skills rating: a 1-5 score or free text with an embedded number
    #[arg(long)]
    skills: Option<String>,
    /// Job demand score, 1-5
    #[arg(long)]
    demand: Option<i64>,
    #[arg(long)]
    qualification: Option<String>,
    #[arg(long)]
    funding: Option<String>,
}

#[derive(Args, Debug)]
struct MatrixExportArgs {
    /// Destination file; the extension picks the format unless --format is given
    path: PathBuf,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args, Debug)]
struct MatrixImportArgs {
    /// Source file; the extension picks the format unless --format is given
    path: PathBuf,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Subcommand, Debug)]
enum ApsCommand {
    /// Band seven subject percentages (home language first) and evaluate pass levels
    Calc {
        /// Seven marks in subject order; noisy values coerce to 0
        #[arg(num_args = 7)]
        marks: Vec<String>,
    },
    /// Print the last calculated outcome
    Show,
    /// Publish the last summary through the clipboard capability
    Copy,
    /// Forget the persisted inputs and outcome
    Clear,
}

#[derive(Subcommand, Debug)]
enum WizardCommand {
    /// Print the questions with any saved answers
    Show,
    /// Answer the first unanswered question
    Answer(WizardAnswerArgs),
    /// Print the assessment once every question is answered
    Result,
    /// Clear all answers and start over
    Reset,
}

#[derive(Args, Debug)]
struct WizardAnswerArgs {
    /// Answer yes to a yes/no question
    #[arg(long, conflicts_with = "no")]
    yes: bool,
    /// Answer no to a yes/no question
    #[arg(long)]
    no: bool,
    /// Pick one of the listed options
    #[arg(long)]
    choice: Option<String>,
    /// Enter an amount in Rands
    #[arg(long)]
    amount: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum ChecklistCommand {
    /// Print the readiness items with completion stats
    Show {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
    /// Flip one item's checked state
    Toggle {
        /// Item id, as printed by `checklist show`
        id: String,
    },
    /// Append a new open item
    Add { label: String },
    /// Remove one item
    Remove { id: String },
    /// Drop every completed item
    ClearCompleted,
    /// Check every item
    MarkAll,
    /// Restore the default readiness items
    Reset,
}

#[derive(Subcommand, Debug)]
enum PlannerCommand {
    /// Print the weekly grid
    Show,
    /// Write one study block
    Set {
        /// Day index, 0 = Monday
        day: usize,
        /// Slot index within the day, 0-5
        slot: usize,
        text: String,
    },
    /// Replace the week with a preset shape
    Template {
        #[arg(value_enum)]
        name: TemplateArg,
    },
    /// Blank the whole week
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortKeyArg {
    Total,
    Name,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionArg {
    Asc,
    Desc,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    Csv,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FilterArg {
    All,
    Open,
    Done,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TemplateArg {
    Balanced,
    Exam,
    Light,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let backend = Arc::new(FileBackend::open(&config.storage.data_file));
    let store = StoreHandle::with_root(backend, config.storage.root_namespace.clone());

    match cli.command {
        Command::Matrix { command } => run_matrix(store, command),
        Command::Aps { command } => run_aps(store, command),
        Command::Wizard { command } => run_wizard(store, command),
        Command::Checklist { command } => run_checklist(store, command),
        Command::Planner { command } => run_planner(store, command),
        Command::Export => {
            let exported = store.export_all();
            println!("{}", serde_json::to_string_pretty(&exported).map_err(|err| {
                AppError::InvalidInput(format!("stored state is not serializable: {err}"))
            })?);
            Ok(())
        }
    }
}

fn run_matrix(store: StoreHandle, command: MatrixCommand) -> Result<(), AppError> {
    let mut matrix = DecisionMatrix::attach(store);
    match command {
        MatrixCommand::Show(args) => {
            let rows = match (args.sort, args.top) {
                (_, true) => matrix.filtered_view(FilterMode::TopScoreOnly),
                (Some(key), false) => {
                    let key = match key {
                        SortKeyArg::Total => SortKey::Total,
                        SortKeyArg::Name => SortKey::Name,
                    };
                    let direction = match args.direction {
                        DirectionArg::Asc => SortDirection::Asc,
                        DirectionArg::Desc => SortDirection::Desc,
                    };
                    matrix.sorted_view(key, direction)
                }
                (None, false) => matrix.filtered_view(FilterMode::All),
            };
            render_matrix_rows(&rows);
        }
        MatrixCommand::Add => {
            let row = matrix.add_row();
            println!("Added row {}", row.id);
        }
        MatrixCommand::Update(args) => {
            let patch = RowPatch {
                name: args.name,
                interest: args.interest,
                skills: args.skills.map(parse_skills),
                demand: args.demand,
                qualification: args.qualification,
                funding: args.funding,
            };
            let row = matrix.update_row(&args.id, patch)?;
            println!("Updated row {} -> total {}", row.id, row.total);
        }
        MatrixCommand::Remove { id } => {
            matrix.remove_row(&id)?;
            println!("Removed row {id}");
        }
        MatrixCommand::Export(args) => {
            let format = resolve_format(args.format, &args.path)?;
            let payload = match format {
                FormatArg::Csv => matrix.export_csv()?,
                FormatArg::Json => matrix.export_json()?,
            };
            std::fs::write(&args.path, payload)?;
            println!("Exported {} rows to {}", matrix.rows().len(), args.path.display());
        }
        MatrixCommand::Import(args) => {
            let format = resolve_format(args.format, &args.path)?;
            let payload = std::fs::read_to_string(&args.path)?;
            let count = match format {
                FormatArg::Csv => matrix.import_csv(&payload)?,
                FormatArg::Json => matrix.import_json(&payload)?,
            };
            println!("Imported {count} rows from {}", args.path.display());
        }
        MatrixCommand::Seed => {
            matrix.reset_examples();
            render_matrix_rows(matrix.rows());
        }
        MatrixCommand::Clear => {
            matrix.clear();
            println!("Matrix cleared");
        }
    }
    Ok(())
}

/// A value that parses cleanly as a number is a score; anything else is
/// kept as free text for the embedded-number extraction.
fn parse_skills(raw: String) -> SkillsField {
    match raw.trim().parse::<f64>() {
        Ok(score) if score.is_finite() => SkillsField::Score(score),
        _ => SkillsField::FreeText(raw),
    }
}

fn resolve_format(format: Option<FormatArg>, path: &std::path::Path) -> Result<FormatArg, AppError> {
    if let Some(format) = format {
        return Ok(format);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => Ok(FormatArg::Csv),
        Some("json") => Ok(FormatArg::Json),
        _ => Err(AppError::InvalidInput(format!(
            "cannot infer format from '{}'; pass --format csv|json",
            path.display()
        ))),
    }
}

fn render_matrix_rows(rows: &[MatrixRow]) {
    if rows.is_empty() {
        println!("No rows. Use `matrix add` or `matrix seed` to get started.");
        return;
    }
    for row in rows {
        let skills = match &row.skills {
            SkillsField::Score(score) => format!("{score}"),
            SkillsField::FreeText(text) if text.is_empty() => "-".to_string(),
            SkillsField::FreeText(text) => text.clone(),
        };
        println!(
            "- {} | {} | interest {} | skills {} | demand {} | {} | {} | total {}",
            row.id,
            if row.name.is_empty() { "(unnamed)" } else { &row.name },
            row.interest,
            skills,
            row.demand,
            row.qualification,
            row.funding,
            row.total
        );
    }
}

fn run_aps(store: StoreHandle, command: ApsCommand) -> Result<(), AppError> {
    let calculator = ApsCalculator::attach(store);
    match command {
        ApsCommand::Calc { marks } => {
            if marks.len() != 7 {
                return Err(AppError::InvalidInput(
                    "exactly 7 subject marks are required".to_string(),
                ));
            }
            let raw: [&str; 7] = [
                &marks[0], &marks[1], &marks[2], &marks[3], &marks[4], &marks[5], &marks[6],
            ];
            let outcome = calculator.calculate(SubjectMarks::from_raw(raw));
            render_aps_outcome(&outcome);
        }
        ApsCommand::Show => match calculator.last() {
            Some(outcome) => render_aps_outcome(&outcome),
            None => println!("No calculation stored yet. Run `aps calc` first."),
        },
        ApsCommand::Copy => {
            if calculator.copy_summary(&StdoutClipboard) {
                println!("(summary published)");
            } else {
                println!("Nothing to copy yet. Run `aps calc` first.");
            }
        }
        ApsCommand::Clear => {
            calculator.clear();
            println!("APS state cleared");
        }
    }
    Ok(())
}

fn render_aps_outcome(outcome: &ApsOutcome) {
    println!("Subject points");
    for (index, (mark, points)) in outcome.marks.iter().zip(outcome.points.iter()).enumerate() {
        let subject = match index {
            0 => "Home Language",
            1 => "First Additional Language",
            _ => "Subject",
        };
        if index >= 2 {
            println!("- {} {}: {}% -> {} points", subject, index + 1, mark, points);
        } else {
            println!("- {}: {}% -> {} points", subject, mark, points);
        }
    }
    println!();
    for line in outcome.summary_lines() {
        println!("{line}");
    }
}

fn run_wizard(store: StoreHandle, command: WizardCommand) -> Result<(), AppError> {
    let mut wizard = FundingWizard::attach(store);
    match command {
        WizardCommand::Show => {
            for (index, question) in roadmap_tools::tools::wizard::script().iter().enumerate() {
                let saved = match wizard.saved_answer(question.key) {
                    Some(Answer::Flag(true)) => "Yes".to_string(),
                    Some(Answer::Flag(false)) => "No".to_string(),
                    Some(Answer::Choice(choice)) => choice.clone(),
                    Some(Answer::Amount(value)) => format!("R{value}"),
                    None => "(unanswered)".to_string(),
                };
                println!("{}. {} [{}]", index + 1, question.text, saved);
            }
        }
        WizardCommand::Answer(args) => {
            replay_saved_answers(&mut wizard);
            let Some(question) = wizard.current_question() else {
                println!("All questions are answered.");
                if let Some(assessment) = wizard.result() {
                    render_assessment(&assessment);
                }
                return Ok(());
            };
            let answer = answer_from_args(question, &args);
            match wizard.next(answer) {
                StepOutcome::NeedsInput(issue) => {
                    println!("{}", question.text);
                    if let Some(help) = question.help {
                        println!("  {help}");
                    }
                    if !question.options.is_empty() {
                        println!("  options: {}", question.options.join(" | "));
                    }
                    println!("Cannot continue: {}", issue.label());
                }
                StepOutcome::Advanced(index) => {
                    println!("Answer saved.");
                    if let Some(next) = wizard.current_question() {
                        println!("Next ({} of {}): {}", index + 1, roadmap_tools::tools::wizard::script().len(), next.text);
                    }
                }
                StepOutcome::Completed(assessment) => render_assessment(&assessment),
            }
        }
        WizardCommand::Result => {
            replay_saved_answers(&mut wizard);
            match wizard.result() {
                Some(assessment) => render_assessment(&assessment),
                None => {
                    let answered = wizard.position();
                    let total = roadmap_tools::tools::wizard::script().len();
                    println!("{answered} of {total} questions answered. Use `wizard answer` to continue.");
                }
            }
        }
        WizardCommand::Reset => {
            wizard.reset();
            println!("Wizard reset");
        }
    }
    Ok(())
}

/// Advance past every question that already has a stored answer, so the
/// cursor lands on the first unanswered one.
fn replay_saved_answers(wizard: &mut FundingWizard) {
    loop {
        let Some(question) = wizard.current_question() else {
            break;
        };
        let Some(saved) = wizard.saved_answer(question.key).cloned() else {
            break;
        };
        match wizard.next(Some(saved)) {
            StepOutcome::Advanced(_) => {}
            _ => break,
        }
    }
}

fn answer_from_args(question: &Question, args: &WizardAnswerArgs) -> Option<Answer> {
    match question.kind {
        QuestionKind::Boolean => {
            if args.yes {
                Some(Answer::Flag(true))
            } else if args.no {
                Some(Answer::Flag(false))
            } else {
                None
            }
        }
        QuestionKind::Select => args.choice.clone().map(Answer::Choice),
        QuestionKind::Number => args.amount.map(Answer::Amount),
    }
}

fn render_assessment(assessment: &FundingAssessment) {
    println!(
        "NSFAS status: {}",
        if assessment.eligible {
            "Likely Eligible"
        } else {
            "Check Requirements"
        }
    );
    println!(
        "Household income threshold used: R{}. Your input: R{}.",
        assessment.threshold, assessment.income
    );
    if !assessment.diagnostics.is_empty() {
        println!("What to check or fix:");
        for line in &assessment.diagnostics {
            println!("- {line}");
        }
    }
    if assessment.teaching_interest {
        println!("Teaching path (Funza Lushaka):");
        println!("- Consider the Funza Lushaka bursary if pursuing a BEd (Foundation Phase is prioritized).");
        println!("- Covers tuition, accommodation, and stipend; recipients commit to teach in public schools.");
    }
}

fn run_checklist(store: StoreHandle, command: ChecklistCommand) -> Result<(), AppError> {
    let mut checklist = Checklist::attach(store, "readiness", nsfas_readiness_defaults());
    match command {
        ChecklistCommand::Show { filter } => {
            let filter = match filter {
                FilterArg::All => ItemFilter::All,
                FilterArg::Open => ItemFilter::Open,
                FilterArg::Done => ItemFilter::Done,
            };
            for item in checklist.view(filter) {
                println!(
                    "[{}] {} {}",
                    if item.checked { "x" } else { " " },
                    item.id,
                    item.label
                );
            }
            let stats = checklist.stats();
            println!(
                "\n{}/{} done ({}%) - {}",
                stats.done,
                stats.total,
                stats.percent,
                checklist.readiness().label()
            );
        }
        ChecklistCommand::Toggle { id } => {
            checklist.toggle(&id);
            println!("Toggled {id}");
        }
        ChecklistCommand::Add { label } => match checklist.add(&label) {
            Some(item) => println!("Added {}", item.id),
            None => println!("Blank labels are ignored"),
        },
        ChecklistCommand::Remove { id } => {
            checklist.remove(&id);
            println!("Removed {id}");
        }
        ChecklistCommand::ClearCompleted => {
            checklist.clear_completed();
            println!("Completed items removed");
        }
        ChecklistCommand::MarkAll => {
            checklist.mark_all();
            println!("All items checked");
        }
        ChecklistCommand::Reset => {
            checklist.reset_to_defaults();
            println!("Checklist reset to defaults");
        }
    }
    Ok(())
}

fn run_planner(store: StoreHandle, command: PlannerCommand) -> Result<(), AppError> {
    let mut planner = WeeklyPlanner::attach(store);
    match command {
        PlannerCommand::Show => {
            for (day, row) in planner.matrix().iter().enumerate() {
                println!("{}", DAY_LABELS[day]);
                for (slot, text) in row.iter().enumerate().take(SLOT_COUNT) {
                    if !text.is_empty() {
                        println!("  {slot}: {text}");
                    }
                }
            }
        }
        PlannerCommand::Set { day, slot, text } => {
            planner.set_entry(day, slot, &text)?;
            println!("Set {} slot {slot}", DAY_LABELS.get(day).copied().unwrap_or("?"));
        }
        PlannerCommand::Template { name } => {
            let template = match name {
                TemplateArg::Balanced => PlannerTemplate::Balanced,
                TemplateArg::Exam => PlannerTemplate::Exam,
                TemplateArg::Light => PlannerTemplate::Light,
            };
            planner.apply_template(template);
            println!("Applied {} template", template.label());
        }
        PlannerCommand::Clear => {
            planner.clear_week();
            println!("Week cleared");
        }
    }
    Ok(())
}
