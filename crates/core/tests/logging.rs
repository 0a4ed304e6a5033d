use docsync_core::{DocsyncEngine, EngineConfig};

#[test]
fn test_engine_logs_into_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        log_component: "docsync-test".to_string(),
        log_dir: Some(dir.path().join("logs")),
        ..EngineConfig::default()
    };
    let engine = DocsyncEngine::builder(config).build().unwrap();

    let guard = engine.init_logging();
    tracing::info!("written through the file layer");
    drop(guard);

    let files: Vec<String> = std::fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("docsync-test"));
}
