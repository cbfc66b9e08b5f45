//! End-to-end: vocabulary file on disk -> router -> replies.
//!
//! Run with: cargo test --test vocabulary_file

use std::io::Write;
use std::sync::Arc;

use italian_tutor::tutor::{Category, CommandRouter, Reply, VocabularySet};
use tempfile::NamedTempFile;

fn write_vocabulary(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_router_serves_file_vocabulary_in_file_order() {
    let file = write_vocabulary(
        r#"{
            "colors": {"Viola": "Purple", "Bianco": "White"},
            "numbers": {"Sei": "Six", "Sette": "Seven", "Otto": "Eight"}
        }"#,
    );
    let vocabulary = VocabularySet::load(file.path()).expect("vocabulary should load");
    let router = CommandRouter::new(Arc::new(vocabulary));

    assert_eq!(
        router.on_category(Category::Numbers),
        Reply::Text("🔢 Italian Numbers:\n\nSei = Six\nSette = Seven\nOtto = Eight\n".to_string())
    );
    assert_eq!(
        router.on_callback("quiz_colors"),
        Reply::Edit("Quiz: What does 'Viola' mean in English?".to_string())
    );
    assert_eq!(router.on_callback("quiz_greetings"), Reply::Silent);
    assert_eq!(
        router.on_callback("vocab_greetings"),
        Reply::Edit("👋 Italian Greetings:\n\n".to_string())
    );
}

#[test]
fn test_bundled_example_vocabulary_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/vocabulary.example.json");
    let from_file = VocabularySet::load(path).expect("example vocabulary should load");
    assert_eq!(from_file, VocabularySet::builtin());
}
