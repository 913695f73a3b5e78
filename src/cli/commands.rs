//! Command implementation: load, train, then serve the interactive session.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::cli::args::IntentArgs;
use crate::cli::session::{Session, SessionStats};
use crate::ml::intent_classifier::{
    self, IntentClassifier, PredictionEngine, TrainedModel, UserQuery,
};

/// Run the classifier on the process's stdin and stdout.
pub fn execute_command(args: IntentArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(&args, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Load and train, then run a session over the given line source and sink.
pub fn run_interactive<R: BufRead, W: Write>(
    args: &IntentArgs,
    input: R,
    output: W,
) -> Result<SessionStats> {
    let dataset = intent_classifier::load_training_data(&args.data).with_context(|| {
        format!("failed to load training data from {}", args.data.display())
    })?;
    let model = train_model(args, &dataset)?;

    let engine = PredictionEngine::new(&model);
    log::info!("Serving predictions with {}", engine.name());

    let mut session = Session::new(&engine, &dataset, args.session_config(), input, output);
    let stats = session.run().context("interactive session failed")?;
    Ok(stats)
}

/// Fit the training pipeline on a loaded dataset.
pub fn train_model(args: &IntentArgs, dataset: &[UserQuery]) -> Result<TrainedModel> {
    let model = intent_classifier::train_with(
        dataset,
        args.featurizer_options(),
        args.trainer_options(),
    )
    .with_context(|| format!("failed to train on {}", args.data.display()))?;

    let summary = model.linear_model().summary();
    log::info!(
        "Intents: {} (primal {:.4}, duality gap {:.4})",
        model.key_values().join(", "),
        summary.primal,
        summary.duality_gap()
    );
    Ok(model)
}
