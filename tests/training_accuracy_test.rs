use std::path::PathBuf;

use intent_classifier::error::Result;
use intent_classifier::ml::intent_classifier::{
    IntentClassifier, PredictionEngine, SdcaOptions, UserQuery, argmax, distinct_intents,
    load_training_data, train,
};

fn sample_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("intents.csv")
}

#[test]
fn test_training_accuracy_on_sample_data() -> Result<()> {
    let dataset = load_training_data(sample_data())?;
    let model = train(&dataset, SdcaOptions::default().with_seed(7))?;
    let engine = PredictionEngine::new(&model);

    let mut correct = 0;
    for row in &dataset {
        let prediction = engine.predict(&UserQuery::new(row.text.clone()))?;
        if Some(prediction.intent.as_str()) == row.label() {
            correct += 1;
        }
    }

    let accuracy = correct as f32 / dataset.len() as f32;
    assert!(accuracy >= 0.7, "training accuracy {accuracy}");
    Ok(())
}

#[test]
fn test_prediction_properties() -> Result<()> {
    let dataset = load_training_data(sample_data())?;
    let model = train(&dataset, SdcaOptions::default().with_seed(3))?;
    let engine = PredictionEngine::new(&model);
    let labels = engine.class_labels().unwrap().to_vec();

    assert_eq!(labels.len(), 5);
    assert_eq!(labels, distinct_intents(&dataset));

    for text in ["fly me to rome", "is it raining", "hey", "", "send cash to mom"] {
        let query = UserQuery::new(text);
        let first = engine.predict(&query)?;
        let second = engine.predict(&query)?;

        assert_eq!(first.scores.len(), labels.len());
        assert_eq!(first.intent, labels[argmax(&first.scores)]);
        assert_eq!(first, second);

        let total: f32 = first.scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }
    Ok(())
}

#[test]
fn test_repeated_predictions_are_bit_identical() -> Result<()> {
    let dataset = load_training_data(sample_data())?;
    let model = train(&dataset, SdcaOptions::default().with_seed(5))?;
    let engine = PredictionEngine::new(&model);
    let query = UserQuery::new("how much money is in my checking account and savings today");

    let first = engine.predict(&query)?;
    for _ in 0..200 {
        let again = engine.predict(&query)?;
        let bits = |scores: &[f32]| scores.iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&again.scores), bits(&first.scores));
        assert_eq!(again.intent, first.intent);
    }
    Ok(())
}

#[test]
fn test_seeded_training_is_reproducible() -> Result<()> {
    let dataset = load_training_data(sample_data())?;
    let options = SdcaOptions::default().with_seed(11);
    let first = train(&dataset, options.clone())?;
    let second = train(&dataset, options)?;

    let query = UserQuery::new("what's my checking balance");
    let a = PredictionEngine::new(&first).predict(&query)?;
    let b = PredictionEngine::new(&second).predict(&query)?;
    assert_eq!(a, b);
    Ok(())
}
