//! Integration tests for running configured stages.

mod helpers;

use serde_json::json;
use stagehook_core::types::Stage;
use stagehook_engine::{HookError, OutcomeStatus};

#[tokio::test]
async fn test_empty_stage() {
    let mut app = helpers::TestApp::from_toml("[deployment]\nnamespace = \"acme\"\n");
    let report = app.run(Stage::PreDeploy).await.expect("run");
    assert!(report.hooks.is_empty());
    assert!(app.context.hook_data().is_empty());
}

#[tokio::test]
async fn test_results_flow_between_hooks() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[deployment]
namespace = "acme"

[deployment.parameters]
bucket = "assets"

[[deployment.pre_deploy]]
path = "stagehook.builtins.data.echo"
data_key = "site"
args = { bucket_name = "${var bucket}-${default suffix::dev}" }

[[deployment.pre_deploy]]
path = "tests.hooks.record"
args = { name = "${hook_data site.bucket_name}" }
"#,
    );

    let report = app.run(Stage::PreDeploy).await.expect("run");
    assert_eq!(report.hooks.len(), 2);
    assert_eq!(report.hooks[0].stored_as.as_deref(), Some("site"));
    assert_eq!(app.recorded()[0]["name"], json!("assets-dev"));
}

#[tokio::test]
async fn test_missing_module_aborts_stage() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.pre_deploy]]
path = "nowhere.hooks.thing"
required = false

[[deployment.pre_deploy]]
path = "tests.hooks.record"
"#,
    );

    let err = app.run(Stage::PreDeploy).await.expect_err("fatal");
    assert!(matches!(err, HookError::ModuleResolution { .. }));
    assert!(app.recorded().is_empty());
}

#[tokio::test]
async fn test_optional_missing_builtin_is_tolerated() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.pre_deploy]]
path = "stagehook.builtins.blah"
required = false

[[deployment.pre_deploy]]
path = "tests.hooks.record"
"#,
    );

    let report = app.run(Stage::PreDeploy).await.expect("run");
    assert_eq!(report.hooks[0].status, OutcomeStatus::LoadFailure);
    assert_eq!(app.recorded().len(), 1);
}

#[tokio::test]
async fn test_optional_failures_are_tolerated() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.post_deploy]]
path = "tests.hooks.missing"
required = false

[[deployment.post_deploy]]
path = "tests.hooks.raise"
required = false
data_key = "raised"

[[deployment.post_deploy]]
path = "tests.hooks.record"
enabled = false

[[deployment.post_deploy]]
path = "tests.hooks.record"
args = { ran = true }
"#,
    );

    let report = app.run(Stage::PostDeploy).await.expect("run");
    let statuses: Vec<OutcomeStatus> = report.hooks.iter().map(|h| h.status).collect();
    assert_eq!(
        statuses,
        vec![
            OutcomeStatus::LoadFailure,
            OutcomeStatus::InvocationFailure,
            OutcomeStatus::Skipped,
            OutcomeStatus::Success,
        ]
    );
    assert_eq!(app.recorded().len(), 1);
    assert!(!app.context.hook_data().contains_key("raised"));
}

#[tokio::test]
async fn test_required_raise_aborts() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.post_destroy]]
path = "tests.hooks.raise"

[[deployment.post_destroy]]
path = "tests.hooks.record"
"#,
    );

    let err = app.run(Stage::PostDestroy).await.expect_err("fatal");
    assert!(matches!(err, HookError::Invocation { .. }));
    assert_eq!(err.path(), "tests.hooks.raise");
    assert!(app.recorded().is_empty());
}

#[tokio::test]
async fn test_duplicate_data_key() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[[deployment.pre_deploy]]
path = "stagehook.builtins.data.echo"
data_key = "out"
args = { value = "first" }

[[deployment.pre_deploy]]
path = "stagehook.builtins.data.echo"
data_key = "out"
args = { value = "second" }
"#,
    );

    let err = app.run(Stage::PreDeploy).await.expect_err("duplicate");
    assert!(matches!(err, HookError::DuplicateKey { .. }));
    assert_eq!(app.context.hook_data().find("out.value"), Some(&json!("first")));
}

#[tokio::test]
async fn test_stage_object_across_stages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("build");
    let toml = format!(
        r#"
[[deployment.pre_deploy]]
path = "stagehook.builtins.fs.EnsureDirectory"
data_key = "build_dir"
args = {{ path = "{path}" }}

[[deployment.pre_destroy]]
path = "stagehook.builtins.fs.EnsureDirectory"
data_key = "destroy_dir"
args = {{ path = "{path}" }}
"#,
        path = target.display()
    );
    let mut app = helpers::TestApp::from_toml(&toml);

    app.run(Stage::PreDeploy).await.expect("deploy");
    assert!(target.is_dir());
    assert_eq!(
        app.context.hook_data().find("build_dir.created"),
        Some(&json!(true))
    );

    let report = app.run(Stage::PreDestroy).await.expect("destroy");
    assert_eq!(report.hooks[0].status, OutcomeStatus::Empty);
    assert!(!app.context.hook_data().contains_key("destroy_dir"));
    assert!(target.is_dir());
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_output_published() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[deployment]
environment = "staging"

[[deployment.post_deploy]]
path = "stagehook.builtins.command.run_command"
data_key = "cmd"
args = { command = ["echo", "deployed"], capture_output = true }
"#,
    );

    app.run(Stage::PostDeploy).await.expect("run");
    assert_eq!(
        app.context.hook_data().find("cmd.stdout"),
        Some(&json!("deployed\n"))
    );
    assert_eq!(app.context.environment, "staging");
}

#[tokio::test]
async fn test_strict_results_from_config() {
    let mut app = helpers::TestApp::from_toml(
        r#"
[engine]
strict_results = true

[[deployment.pre_deploy]]
path = "stagehook.builtins.data.echo"
"#,
    );

    let err = app.run(Stage::PreDeploy).await.expect_err("strict");
    assert!(matches!(err, HookError::EmptyResult { .. }));
}
