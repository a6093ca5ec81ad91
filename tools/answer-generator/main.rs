use clap::Parser;
use formlogic::ast::Value;
use formlogic::data::SampleAnswers;
use formlogic::form::{FieldKind, FormExport, FormField};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random answer snapshots for a form
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form JSON file
    #[arg(short, long)]
    form: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_answers.json")]
    output: String,

    /// Probability that a field is left unanswered
    #[arg(long, default_value_t = 0.2)]
    skip_probability: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.skip_probability) {
        eprintln!(
            "Error: --skip-probability ({}) must be between 0 and 1",
            cli.skip_probability
        );
        std::process::exit(1);
    }

    let form = FormExport::import(&fs::read_to_string(&cli.form)?)?;
    println!(
        "Generating answers for '{}' ({} fields)...",
        form.name,
        form.fields.len()
    );

    let mut answers = SampleAnswers::default();
    for field in form.fields.iter().filter(|f| f.kind.collects_input()) {
        if rng.random_bool(cli.skip_probability) {
            continue;
        }
        if let Some(value) = generate_value(&mut rng, field) {
            answers.insert(&field.id, value);
        }
    }
    println!("-> Answered {} field(s).", answers.values.len());

    let json_output = serde_json::to_string_pretty(&answers)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved answers to '{}'",
        cli.output
    );

    Ok(())
}

/// Produces a plausible answer for the field's kind.
fn generate_value<R: Rng>(rng: &mut R, field: &FormField) -> Option<Value> {
    let pick = |rng: &mut R| field.options.choose(rng).cloned().map(Value::Text);

    match &field.kind {
        FieldKind::Checkbox | FieldKind::MultipleChoice | FieldKind::PictureChoice => {
            let picked: Vec<Value> = field
                .options
                .iter()
                .filter(|_| rng.random_bool(0.5))
                .cloned()
                .map(Value::Text)
                .collect();
            Some(Value::List(picked))
        }
        FieldKind::Radio | FieldKind::Select => pick(rng),
        FieldKind::YesNo => Some(Value::Bool(rng.random_bool(0.5))),
        FieldKind::Number => Some(Value::Number(rng.random_range(0..1000) as f64)),
        FieldKind::Rating => Some(Value::Number(rng.random_range(1..=5) as f64)),
        FieldKind::OpinionScale => Some(Value::Number(rng.random_range(0..=10) as f64)),
        FieldKind::Email => Some(Value::Text(format!(
            "user{}@example.com",
            rng.random_range(1..10_000)
        ))),
        FieldKind::Phone | FieldKind::PhoneNumber => Some(Value::Text(format!(
            "+1555{:07}",
            rng.random_range(0..10_000_000)
        ))),
        FieldKind::Date => Some(Value::Text(format!(
            "2024-{:02}-{:02}",
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        ))),
        FieldKind::Time => Some(Value::Text(format!(
            "{:02}:{:02}",
            rng.random_range(0..24),
            rng.random_range(0..60)
        ))),
        FieldKind::File | FieldKind::Signature | FieldKind::InputTable | FieldKind::Payment => {
            None
        }
        _ if !field.options.is_empty() => pick(rng),
        _ => Some(Value::Text(format!(
            "Sample answer {}",
            rng.random_range(1..1000)
        ))),
    }
}
