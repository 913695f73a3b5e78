use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use intent_classifier::cli::args::IntentArgs;
use intent_classifier::cli::commands::run_interactive;
use intent_classifier::cli::output::{BANNER, LOW_CONFIDENCE_NOTICE};

const TWO_INTENTS: &str = "\
Text,Intent
\"book a flight to paris\",BookFlight
\"i need a plane ticket\",BookFlight
\"reserve a flight to rome\",BookFlight
\"book me on a flight tomorrow\",BookFlight
\"find flights to london\",BookFlight
\"what is my balance\",CheckBalance
\"how much money do i have\",CheckBalance
\"show my account balance\",CheckBalance
\"check my savings balance\",CheckBalance
\"what's in my account\",CheckBalance
";

fn args(dir: &Path, data: &Path, extra: &[&str]) -> IntentArgs {
    let log_file = dir.join("low_confidence.log");
    let mut argv = vec![
        "intent-classifier".to_string(),
        "--data".to_string(),
        data.display().to_string(),
        "--log-file".to_string(),
        log_file.display().to_string(),
        "--seed".to_string(),
        "1".to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    IntentArgs::try_parse_from(argv).unwrap()
}

fn write_dataset(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("intents.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_two_intent_session() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, TWO_INTENTS);
    let args = args(dir.path(), &data, &[]);

    let mut output = Vec::new();
    let stats = run_interactive(
        &args,
        Cursor::new("book a flight to paris\nqqqq\nexit\n"),
        &mut output,
    )
    .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(stats.predictions, 2);
    assert_eq!(stats.logged, 1);
    assert!(output.starts_with(BANNER));
    assert!(output.contains("Predicted Intent: BookFlight\n"));
    assert_eq!(output.matches(LOW_CONFIDENCE_NOTICE).count(), 1);

    // Unknown text has no features and scores uniformly.
    assert!(output.contains("Confidence: 50.00%"));

    let log = fs::read_to_string(dir.path().join("low_confidence.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);

    let fields: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[1], "qqqq");
    assert_eq!(fields[2], "BookFlight");
    assert_eq!(fields[3], "0.50");
    let confidence: f32 = fields[3].parse().unwrap();
    assert!(confidence < 0.6);
}

#[test]
fn test_invalid_utf8_input_does_not_end_session() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, TWO_INTENTS);
    let args = args(dir.path(), &data, &[]);

    let mut output = Vec::new();
    let stats = run_interactive(
        &args,
        Cursor::new(&b"caf\xe9 booking\nbook a flight to paris\nexit\n"[..]),
        &mut output,
    )
    .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(stats.predictions, 2);
    assert_eq!(output.matches("Predicted Intent: ").count(), 2);
    assert!(output.contains("Predicted Intent: BookFlight\n"));
}

#[test]
fn test_exit_sentinel_without_predictions() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, TWO_INTENTS);
    let args = args(dir.path(), &data, &[]);

    for input in ["exit\n", "EXIT\n", "  Exit  \n", "\n", ""] {
        let stats = run_interactive(&args, Cursor::new(input), Vec::new()).unwrap();
        assert_eq!(stats.predictions, 0, "{input:?}");
    }
    assert!(!dir.path().join("low_confidence.log").exists());
}

#[test]
fn test_sorted_scores_and_json() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, TWO_INTENTS);

    let sorted = args(dir.path(), &data, &["--scores", "sorted"]);
    let mut output = Vec::new();
    run_interactive(&sorted, Cursor::new("what is my balance\n"), &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Confidence Scores (sorted):\n   CheckBalance: "));
    assert!(output.contains("   BookFlight: "));

    let json = args(dir.path(), &data, &["--format", "json"]);
    let mut output = Vec::new();
    run_interactive(&json, Cursor::new("what is my balance\nexit\n"), &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["intent"], "CheckBalance");
    assert_eq!(value["scores"].as_array().unwrap().len(), 2);
}

#[test]
fn test_missing_training_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let args = args(dir.path(), &dir.path().join("missing.csv"), &[]);

    let err = run_interactive(&args, Cursor::new("exit\n"), Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load training data"));
}

#[test]
fn test_single_intent_is_fatal() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir, "Text,Intent\nhello,Greeting\nhi,Greeting\n");
    let args = args(dir.path(), &data, &[]);

    let err = run_interactive(&args, Cursor::new("exit\n"), Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("at least 2 distinct intents"));
}
