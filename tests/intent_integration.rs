//! Intent classification integration tests

use command_agent::core::types::arg_str;
use command_agent::intent::{IntentAction, IntentClassifier, MIN_CONFIDENCE};

fn classify(text: &str) -> (IntentAction, f32) {
    let intent = IntentClassifier::new().classify(text);
    (intent.action, intent.confidence)
}

#[test]
fn test_sample_phrases() {
    let cases = [
        ("README 파일 읽어줘", IntentAction::ReadFile),
        ("test.txt 파일 만들어줘", IntentAction::WriteFile),
        ("프로젝트에 뭐가 있는지 보여줘", IntentAction::ListDirectory),
        ("find file config", IntentAction::SearchFiles),
        ("2 더하기 3은 얼마야?", IntentAction::Calculate),
        ("지금 몇시야?", IntentAction::GetCurrentTime),
        ("프로젝트 분석해줘", IntentAction::AnalyzeProject),
    ];
    for (text, expected) in cases {
        let (action, confidence) = classify(text);
        assert_eq!(action, expected, "input {:?}", text);
        assert!(confidence >= 0.8, "input {:?}", text);
    }
}

#[test]
fn test_unmatched_input_is_unknown() {
    for text in ["", "  ", "ok", "thanks a lot"] {
        let intent = IntentClassifier::new().classify(text);
        assert_eq!(intent.action, IntentAction::Unknown);
        assert!(intent.confidence <= 0.1);
        assert!(!intent.is_actionable(MIN_CONFIDENCE));
    }
}

#[test]
fn test_uppercase_input_still_matches() {
    let (action, _) = classify("READ FILE notes.md");
    assert_eq!(action, IntentAction::ReadFile);
}

#[test]
fn test_entities_come_from_original_case() {
    let intent = IntentClassifier::new().classify("READ FILE Notes.md");
    assert_eq!(arg_str(&intent.args, "path"), Some("Notes.md"));
}
