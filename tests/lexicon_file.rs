// tests/lexicon_file.rs
use std::fs;
use std::sync::Arc;

use email_classifier::ai_bootstrap::ClassifierRuntime;
use email_classifier::config::AppConfig;
use email_classifier::{Category, CategoryLexicon, LexiconError};

const CUSTOM: &str = r#"
support = ["Refund"]
marketing = ["webinar"]
corporate = ["offsite"]
spam = ["crypto giveaway"]
"#;

#[test]
fn load_from_file_roundtrips_keywords() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("lexicon.toml");
    fs::write(&p, CUSTOM).unwrap();

    let lex = CategoryLexicon::load_from_file(&p).unwrap();
    assert_eq!(lex.keywords(Category::Support), ["refund"]);
    assert_eq!(lex.keywords(Category::Spam), ["crypto giveaway"]);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = CategoryLexicon::load_from_file("no/such/lexicon.toml").unwrap_err();
    assert!(matches!(err, LexiconError::Read { .. }));
}

#[test]
fn builtin_file_matches_embedded_lexicon() {
    let from_disk = CategoryLexicon::load_from_file("config/lexicon.toml").unwrap();
    assert_eq!(from_disk, CategoryLexicon::builtin());
}

#[tokio::test]
async fn runtime_uses_configured_lexicon() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("lexicon.toml");
    fs::write(&p, CUSTOM).unwrap();

    let mut cfg = AppConfig::default();
    cfg.lexicon.path = Some(p);
    let rt = ClassifierRuntime::from_config(cfg).unwrap();

    let r = rt
        .classifier
        .classify("Join our free crypto giveaway")
        .await
        .unwrap();
    assert_eq!(r.category.predicted, Category::Spam);
    assert_eq!(r.category.confidence, 1.0);

    let shared = Arc::clone(&rt.classifier);
    assert_eq!(shared.lexicon().keywords(Category::Marketing), ["webinar"]);
}
