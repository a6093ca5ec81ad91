use clap::{ArgAction, Parser, ValueEnum};
use formlogic::prelude::*;
use itertools::Itertools;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyCli {
    UntouchedOnly,
    Always,
}

/// Evaluate a form's conditional logic against a set of answers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form JSON file (a form document or an export)
    form_path: String,
    /// Optional path to an answers JSON file
    answers_path: Option<String>,

    /// Comma-separated ids of fields the user has edited
    #[arg(long, value_delimiter = ',')]
    touched: Vec<String>,

    /// When setValue actions may overwrite answers
    #[arg(short, long, value_enum, default_value = "untouched-only")]
    policy: PolicyCli,

    /// Fail on rules that reference fields missing from the form
    #[arg(long)]
    strict: bool,

    /// Write the compiled logic snapshot to this path
    #[arg(long)]
    save_compiled: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let form_json = fs::read_to_string(&cli.form_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read form file '{}': {}",
            &cli.form_path, e
        ))
    });
    let form = FormExport::import(&form_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to import form: {}", e)));

    let mut answers = match &cli.answers_path {
        Some(path) => SampleAnswers::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load answers from '{}': {}", path, e))
        }),
        None => {
            println!("No answers file provided. Evaluating field defaults.");
            default_answers(&form)
        }
    };
    answers.touched.extend(cli.touched.iter().cloned());

    // --- 2. Compilation ---
    let compile_start = Instant::now();
    let compiled = Compiler::builder(form)
        .strict_references(cli.strict)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    println!(
        "Compiled {} rule(s) over {} field(s) in {:?}",
        compiled.rules.len(),
        compiled.fields.len(),
        compile_duration
    );
    for diagnostic in &compiled.diagnostics {
        println!("  ! {}", diagnostic);
    }

    if let Some(path) = &cli.save_compiled {
        compiled
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save compiled logic: {}", e)));
        println!("Saved compiled logic to '{}'", path);
    }

    // --- 3. Evaluation ---
    let policy = match cli.policy {
        PolicyCli::UntouchedOnly => SetValuePolicy::UntouchedOnly,
        PolicyCli::Always => SetValuePolicy::Always,
    };
    let evaluator = Evaluator::with_options(
        compiled,
        EvaluatorOptions {
            set_value_policy: policy,
        },
    );

    let eval_start = Instant::now();
    let result = evaluator.eval_touched(answers.values(), &answers.touched());
    let eval_duration = eval_start.elapsed();

    // --- 4. Results ---
    println!("\nFired rules:");
    if result.reasons.is_empty() {
        println!("  -> none");
    }
    for reason in &result.reasons {
        println!("  -> {}", reason);
    }

    println!("\nFields:");
    for field in &evaluator.logic().fields {
        let Some(state) = result.projection.field(&field.id) else {
            continue;
        };
        let value = result
            .values
            .get(&field.id)
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "  {:<24} {:<8} {:<9} {}",
            field.id,
            if state.visible { "visible" } else { "hidden" },
            if state.required { "required" } else { "optional" },
            value
        );
    }

    if let Some(jump) = result.projection.jump_to() {
        println!("\nJump to: {} (page {})", jump.field_id, jump.page + 1);
    }

    println!("\nSubmission check:");
    match validate_submission(&evaluator.logic().fields, &result.projection, &result.values) {
        Ok(()) => println!("  -> ok"),
        Err(errors) => {
            let lines = errors.issues().iter().map(|i| format!("  -> {}", i.message)).join("\n");
            println!("{}", lines);
        }
    }

    println!("\n--- Performance Summary ---");
    println!("Compilation:     {:?}", compile_duration);
    println!("Evaluation:      {:?}", eval_duration);
    println!("Total Execution: {:?}", total_start.elapsed());
}

fn default_answers(form: &FormModel) -> SampleAnswers {
    let mut answers = SampleAnswers::default();
    for field in &form.fields {
        if let Some(value) = &field.default_value {
            answers.insert(&field.id, value.clone());
        }
    }
    answers
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
