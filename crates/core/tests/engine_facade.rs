use docsync_api::DocsyncError;
use docsync_api::models::{ClassLike, ClassMethod, Expr, NameScope, Param, Property, Stmt, TypeHint};
use docsync_core::{DocsyncEngine, EngineConfig};
use docsync_php::UseAddingCommander;
use docsync_php::inference::StrategyKind;
use docsync_php::inference::adapters::ClassHierarchy;
use std::io::Write;
use std::sync::Arc;

fn mailer_class() -> ClassLike {
    ClassLike::new("App\\Service\\Mailer")
        .with_property(Property::new("transport").with_doc("/**\n     * @var string\n     */"))
        .with_property(Property::new("attempts").with_default(Expr::int(0)))
        .with_method(
            ClassMethod::new("__construct")
                .with_param(Param::typed(
                    "transport",
                    TypeHint::nullable(TypeHint::class("Symfony\\Mailer\\Transport")),
                ))
                .with_stmt(Stmt::assign_this("transport", Expr::var("transport"))),
        )
        .with_method(
            ClassMethod::new("send").with_stmt(Stmt::assign_this("attempts", Expr::int(1))),
        )
        .with_scope(NameScope::new(Some("App\\Service")).with_file("src/Service/Mailer.php"))
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"inference": {{"strategies": ["all_assign"]}}, "log_component": "docsync-test"}}"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.log_component, "docsync-test");
    assert_eq!(config.inference.strategies.len(), 1);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DocsyncError::Io(_)));
}

#[test]
fn test_process_class_fixes_and_imports() {
    let config = EngineConfig {
        import_names: true,
        ..EngineConfig::default()
    };
    let engine = DocsyncEngine::builder(config)
        .with_class_hierarchy(Arc::new(ClassHierarchy::new()))
        .build()
        .unwrap();

    let mut class = mailer_class();
    let mut commander = UseAddingCommander::new();
    let report = engine.process_class(&mut class, &mut commander).unwrap();

    assert_eq!(report.fixed_properties, 2);
    assert_eq!(report.imported_names, vec!["Symfony\\Mailer\\Transport"]);
    assert_eq!(
        class.get_property("transport").unwrap().doc_comment.as_deref(),
        Some("/**\n     * @var Transport|null\n     */")
    );
    assert_eq!(
        class.get_property("attempts").unwrap().doc_comment.as_deref(),
        Some("/**\n * @var int\n */")
    );

    // the host applies the requested imports to the file
    let applied = Arc::new(
        NameScope::new(Some("App\\Service"))
            .with_file("src/Service/Mailer.php")
            .with_use("Symfony\\Mailer\\Transport"),
    );
    for property in class.properties_mut() {
        property.name_scope = Some(applied.clone());
    }

    // nothing left to do on the second pass
    let report = engine.process_class(&mut class, &mut commander).unwrap();
    assert_eq!(report.fixed_properties, 0);
    assert!(report.imported_names.is_empty());
}

#[test]
fn test_process_class_without_imports_keeps_absolute_names() {
    let engine = DocsyncEngine::builder(EngineConfig::default()).build().unwrap();
    let mut class = mailer_class();
    let mut commander = UseAddingCommander::new();

    let report = engine.process_class(&mut class, &mut commander).unwrap();
    assert_eq!(report.fixed_properties, 2);
    assert!(commander.is_empty());
    assert_eq!(
        class.get_property("transport").unwrap().doc_comment.as_deref(),
        Some("/**\n     * @var \\Symfony\\Mailer\\Transport|null\n     */")
    );
}

#[test]
fn test_fix_var_docs_uses_configured_strategies() {
    let mut config = EngineConfig::default();
    config.inference.strategies = vec![StrategyKind::ConstructorParam];
    let engine = DocsyncEngine::builder(config).build().unwrap();
    let mut class = mailer_class();

    assert_eq!(engine.fix_var_docs(&mut class).unwrap(), 1);
    assert!(class.get_property("attempts").unwrap().doc_comment.is_none());

    // the same engine keeps its inferer across calls
    assert_eq!(engine.fix_var_docs(&mut class).unwrap(), 0);
}
