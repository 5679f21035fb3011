//! Integration tests for lookups in hook arguments.

mod helpers;

use serde_json::json;
use stagehook_core::types::Stage;
use stagehook_engine::{HookError, OutcomeStatus};

#[tokio::test]
async fn test_default_fallback_reaches_hook() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.pre_deploy]]
path = "tests.hooks.record"
args = { value = "${default some_var::fallback}" }
"#,
    );

    app.run(Stage::PreDeploy).await.expect("run");
    assert_eq!(app.recorded()[0]["value"], json!("fallback"));
}

#[tokio::test]
async fn test_single_lookup_keeps_type() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[deployment.parameters]
ports = [80, 443]
site = { domain = "example.com" }

[[deployment.pre_deploy]]
path = "tests.hooks.record"
args = { ports = "${var ports}", domain = "${var site.domain}", joined = "${var ports::transform=str}" }
"#,
    );

    app.run(Stage::PreDeploy).await.expect("run");
    let call = &app.recorded()[0];
    assert_eq!(call["ports"], json!([80, 443]));
    assert_eq!(call["domain"], json!("example.com"));
    assert_eq!(call["joined"], json!("80,443"));
}

#[tokio::test]
async fn test_env_snapshot_and_file_query() {
    let dir = tempfile::tempdir().expect("tempdir");
    let query = dir.path().join("query.txt");
    std::fs::write(&query, "DEPLOY_TARGET::default=none-set\n").expect("write");

    let toml = format!(
        r#"
[[deployment.pre_deploy]]
path = "tests.hooks.record"
args = {{ target = "${{env file://{path}}}", other = "${{env DEPLOY_TARGET::default=x}}" }}
"#,
        path = query.display()
    );
    let mut app = helpers::TestApp::from_toml(&toml);
    app.context
        .env_vars
        .insert("DEPLOY_TARGET".to_string(), "blue".to_string());

    app.run(Stage::PreDeploy).await.expect("run");
    let call = &app.recorded()[0];
    assert_eq!(call["target"], json!("blue"));
    assert_eq!(call["other"], json!("blue"));
}

#[tokio::test]
async fn test_unresolvable_lookup() {
    let toml = r#"
[[deployment.pre_deploy]]
path = "tests.hooks.record"
required = false
args = { value = "${hook_data nothing.here}" }

[[deployment.pre_deploy]]
path = "tests.hooks.record"
args = { value = "${bogus lookup}" }
"#;
    let mut app = helpers::TestApp::from_toml(toml);

    let err = app.run(Stage::PreDeploy).await.expect_err("fatal");
    assert!(matches!(err, HookError::LookupResolution { .. }));
    assert!(err.to_string().contains("bogus"));
    assert!(app.recorded().is_empty());
}

#[tokio::test]
async fn test_concatenation_rejects_mapping() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[deployment.parameters]
site = { domain = "example.com" }

[[deployment.pre_deploy]]
path = "tests.hooks.record"
required = false
args = { value = "site=${var site}" }
"#,
    );

    let report = app.run(Stage::PreDeploy).await.expect("run");
    assert_eq!(report.hooks[0].status, OutcomeStatus::InvocationFailure);
    let error = report.hooks[0].error.as_deref().expect("error message");
    assert!(error.contains("mapping"));
}
