//! tutor CLI: driving adapter for the tutor lesson engine.
//!
//! Subcommands:
//! - `info` - print registered interactions and rules
//! - `check <content>` - validate a lesson loads without errors
//! - `classify <content> --state S --answer JSON [--trace]` - grade one answer
//! - `play <content> --answers FILE` - play a lesson with scripted answers

use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tutor::{
    AnswerClassifier, AnswerOutcome, ClassifierRegistry, Destination, EphemeralState, Exploration,
    ExplorationPlayer, StateKind, TypedValue,
};

mod cli;

use crate::cli::{ClassifyArgs, Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Info => {
            cmd_info();
            Ok(())
        }
        Command::Check { content } => cmd_check(&content),
        Command::Classify(args) => cmd_classify(&args),
        Command::Play { content, answers } => cmd_play(&content, &answers),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_info() {
    let registry = build_registry();

    println!("Registered interactions:");
    for kind in registry.interaction_kinds() {
        let Some(classifiers) = registry.get_interaction_classifier(kind) else {
            continue;
        };
        let rules = classifiers.rule_types();
        if rules.is_empty() {
            println!("  {kind} (no rules)");
        } else {
            println!("  {kind}: {}", rules.join(", "));
        }
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let exploration = load_exploration(path)?;
    let registry = build_registry();

    exploration
        .validate(&registry)
        .with_context(|| format!("content invalid: \"{}\"", path.display()))?;

    println!(
        "Content valid: \"{}\" ({} states)",
        exploration.id,
        exploration.states.len()
    );
    Ok(())
}

fn cmd_classify(args: &ClassifyArgs) -> Result<()> {
    let exploration = load_exploration(&args.content)?;
    let state = exploration
        .resolve_state(&args.state, "--state")
        .context("unknown state")?;
    let answer = parse_answer(&args.answer)?;

    let classifier = AnswerClassifier::new(Arc::new(build_registry()));
    let (result, trace) = classifier
        .classify_with_trace(&state.interaction, &answer)
        .with_context(|| format!("classification failed in state \"{}\"", state.name))?;

    if args.trace {
        println!("{trace}\n");
    }
    if let Some(misconception) = result.misconception_id() {
        println!("misconception: {misconception}");
    }
    print_outcome(&AnswerOutcome::for_outcome(&state.name, result.outcome()));
    Ok(())
}

fn cmd_play(content: &Path, answers_path: &Path) -> Result<()> {
    let exploration = load_exploration(content)?;
    let answers: Vec<TypedValue> = load_value(answers_path)
        .and_then(|value| serde_json::from_value(value).context("answers must be a list"))?;

    let mut player = ExplorationPlayer::new(Arc::new(build_registry()));
    player.begin(exploration)?;
    print_state(&player.current_state()?);

    let total = answers.len();
    for (index, answer) in answers.into_iter().enumerate() {
        let current = player.current_state()?;
        if current.is_terminal() {
            bail!(
                "{} answers left over after reaching \"{}\"",
                total - index,
                current.state.name
            );
        }
        debug!(index, ?answer, "submitting scripted answer");
        println!("> {answer:?}");
        let outcome = player.submit_answer(answer)?;
        print_outcome(&outcome);
        if matches!(outcome.destination, Destination::State(_)) {
            player.move_to_next_state()?;
            print_state(&player.current_state()?);
        }
    }

    let last = player.current_state()?;
    player.finish()?;
    if last.is_terminal() {
        println!("Lesson complete");
    } else {
        println!("Stopped at \"{}\"", last.state.name);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn build_registry() -> ClassifierRegistry {
    ClassifierRegistry::with_core_interactions()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Content loading
// ═══════════════════════════════════════════════════════════════════════════════

/// Read a YAML or JSON file into a JSON value, choosing by extension.
fn load_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).context("JSON parse error")
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).context("YAML parse error")
    }
}

fn load_exploration(path: &Path) -> Result<Exploration> {
    let value = load_value(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("\"{}\" is not a valid exploration", path.display()))
}

fn parse_answer(json: &str) -> Result<TypedValue> {
    serde_json::from_str(json).with_context(|| format!("invalid answer {json}"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

fn describe_destination(destination: &Destination) -> String {
    match destination {
        Destination::SameState => "stay on this state".to_string(),
        Destination::State(name) => format!("go to \"{name}\""),
        Destination::RefresherExploration(id) => format!("refresher exploration \"{id}\""),
        Destination::MissingPrerequisiteSkill(skill) => format!("prerequisite skill \"{skill}\""),
    }
}

fn print_outcome(outcome: &AnswerOutcome) {
    let verdict = if outcome.labelled_as_correct {
        "correct"
    } else {
        "incorrect"
    };
    println!("{verdict}: {}", describe_destination(&outcome.destination));
    if !outcome.feedback.html.is_empty() {
        println!("  {}", outcome.feedback.html);
    }
}

fn print_state(current: &EphemeralState) {
    let status = match &current.kind {
        StateKind::Pending { wrong_answers } => format!("pending, {} wrong", wrong_answers.len()),
        StateKind::Completed { answers } => format!("completed, {} answers", answers.len()),
        StateKind::Terminal => "terminal".to_string(),
    };
    println!("[{}] ({status})", current.state.name);
    if !current.state.content.html.is_empty() {
        println!("  {}", current.state.content.html);
    }
}
