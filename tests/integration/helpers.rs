//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use stagehook_core::config::AppConfig;
use stagehook_core::context::DeployContext;
use stagehook_core::error::AppError;
use stagehook_core::traits::StaticProvider;
use stagehook_core::types::Stage;
use stagehook_engine::{CapabilityRegistry, ClosureHook, HookError, HookExecutor, StageReport};
use stagehook_lookup::VariableResolver;

/// Args received by the recording hook, in call order.
pub type Calls = Arc<Mutex<Vec<Map<String, Value>>>>;

/// Test application context
pub struct TestApp {
    /// Loaded configuration
    pub config: AppConfig,
    /// Executor over built-in and test hooks
    pub executor: HookExecutor,
    /// Run context
    pub context: DeployContext,
    /// Provider passed to hooks
    pub provider: StaticProvider,
    /// Args seen by `tests.hooks.record`
    pub calls: Calls,
}

impl TestApp {
    /// Create a test application from a TOML document
    pub fn from_toml(toml: &str) -> Self {
        let config = AppConfig::from_toml_str(toml).expect("Failed to parse test config");
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));

        let mut registry = CapabilityRegistry::new();
        stagehook_builtins::register(&mut registry).expect("Failed to register builtins");
        register_test_hooks(&mut registry, calls.clone());

        let executor = HookExecutor::new(
            Arc::new(registry),
            Arc::new(VariableResolver::with_builtins()),
        )
        .with_config(config.engine.clone());
        let context = DeployContext::from_config(&config.deployment);

        Self {
            config,
            executor,
            context,
            provider: StaticProvider::new("test").with_region("us-east-1"),
            calls,
        }
    }

    /// Run the declarations configured for a stage
    pub async fn run(&mut self, stage: Stage) -> Result<StageReport, HookError> {
        let declarations = self.config.deployment.hooks_for(stage).to_vec();
        self.executor
            .run_stage(stage.as_str(), &declarations, &self.provider, &mut self.context)
            .await
    }

    /// Args received by the recording hook
    pub fn recorded(&self) -> Vec<Map<String, Value>> {
        self.calls.lock().expect("lock").clone()
    }
}

fn register_test_hooks(registry: &mut CapabilityRegistry, calls: Calls) {
    registry
        .register_function(
            "tests.hooks.record",
            Arc::new(ClosureHook::new("record", move |call| {
                calls.lock().expect("lock").push(call.args.clone());
                Ok(Value::Object(call.args.clone()))
            })),
        )
        .expect("register record");
    registry
        .register_function(
            "tests.hooks.raise",
            Arc::new(ClosureHook::new("raise", |_| {
                Err(AppError::invocation("hook raised"))
            })),
        )
        .expect("register raise");
}
