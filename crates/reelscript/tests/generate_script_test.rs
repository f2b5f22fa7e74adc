//! Tests for the top-level convenience functions.
//!
//! None of these reach the network unless the `api` feature is enabled.

use reelscript::{
    ApiKey, BuilderErrorKind, ConfigErrorKind, GeneratorConfig, ReelscriptErrorKind,
    generate_script_with_config,
};

#[tokio::test]
async fn test_missing_credential_is_config_error() -> anyhow::Result<()> {
    let err = generate_script_with_config(GeneratorConfig::default(), "sora模型", 1.0, 0.7, None)
        .await
        .unwrap_err();

    match err.kind() {
        ReelscriptErrorKind::Config(inner) => assert!(matches!(
            inner.kind,
            ConfigErrorKind::MissingCredential { .. }
        )),
        other => panic!("expected config error, got {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_blank_credential_is_config_error() -> anyhow::Result<()> {
    let err = generate_script_with_config(
        GeneratorConfig::default(),
        "sora模型",
        1.0,
        0.7,
        Some(ApiKey::new("  ")),
    )
    .await
    .unwrap_err();

    assert!(err.is_config(), "expected config error, got {err}");
    Ok(())
}

#[tokio::test]
async fn test_blank_subject_is_rejected() -> anyhow::Result<()> {
    let err = generate_script_with_config(
        GeneratorConfig::default(),
        "   ",
        1.0,
        0.7,
        Some(ApiKey::new("sk-test")),
    )
    .await
    .unwrap_err();

    match err.kind() {
        ReelscriptErrorKind::Builder(inner) => assert!(matches!(
            inner.kind(),
            BuilderErrorKind::InvalidField { field, .. } if field == "subject"
        )),
        other => panic!("expected builder error, got {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_non_positive_length_is_rejected() -> anyhow::Result<()> {
    for minutes in [0.0, -1.0, f64::NAN] {
        let err = generate_script_with_config(
            GeneratorConfig::default(),
            "sora模型",
            minutes,
            0.7,
            Some(ApiKey::new("sk-test")),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err.kind(), ReelscriptErrorKind::Builder(_)),
            "length {minutes}: {err}"
        );
    }
    Ok(())
}

#[cfg(feature = "api")]
#[tokio::test]
async fn test_live_generate_script() -> anyhow::Result<()> {
    let (research, title, script) = reelscript::generate_script("sora模型", 1.0, 0.7, None).await?;

    assert!(!research.is_empty());
    assert!(!title.is_empty());
    assert!(script.contains("开头") || script.contains("结尾"));
    Ok(())
}
