//! The two invocable hook shapes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use stagehook_core::context::DeployContext;
use stagehook_core::result::AppResult;
use stagehook_core::traits::Provider;

/// Everything a function hook is called with.
pub struct HookCall<'a> {
    /// Stage being run. Informational only.
    pub stage: &'a str,
    /// The deployment run context.
    pub context: &'a DeployContext,
    /// The infrastructure provider, passed through untouched.
    pub provider: &'a dyn Provider,
    /// Arguments with every lookup already resolved.
    pub args: Map<String, Value>,
}

impl HookCall<'_> {
    /// Returns a resolved argument.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Returns a resolved string argument.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

impl fmt::Debug for HookCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookCall")
            .field("stage", &self.stage)
            .field("run_id", &self.context.run_id())
            .field("provider", &self.provider.name())
            .field("args", &self.args)
            .finish()
    }
}

/// A hook called directly with context, provider and args.
#[async_trait]
pub trait HookFunction: Send + Sync + fmt::Debug {
    /// Runs the hook.
    ///
    /// A mapping result may be published to `hook_data`; errors are reported
    /// as invocation failures.
    async fn call(&self, call: HookCall<'_>) -> AppResult<Value>;
}

/// A hook object built from its args, with one entry point per stage.
#[async_trait]
pub trait StageHook: Send + Sync + fmt::Debug {
    /// Returns whether the object has an entry point for `stage`.
    fn handles(&self, stage: &str) -> bool;

    /// Runs the entry point for `stage`.
    ///
    /// Only called when [`StageHook::handles`] returned true.
    async fn run_stage(&self, stage: &str) -> AppResult<Value>;
}

/// Builds a stage hook from resolved args.
pub type StageHookFactory =
    Arc<dyn Fn(Map<String, Value>) -> AppResult<Box<dyn StageHook>> + Send + Sync>;

/// An invocable capability resolved from a symbolic path.
#[derive(Clone)]
pub enum Capability {
    /// Called with context, provider and args.
    Function(Arc<dyn HookFunction>),
    /// Constructed from args, then dispatched by stage.
    StageObject(StageHookFactory),
}

impl Capability {
    /// Short name of the capability shape.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::StageObject(_) => "stage_object",
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(hook) => f.debug_tuple("Function").field(hook).finish(),
            Self::StageObject(_) => f.debug_tuple("StageObject").field(&"<factory>").finish(),
        }
    }
}

/// A closure-based function hook for quick hook creation.
pub struct ClosureHook {
    /// Name shown in debug output.
    name: String,
    /// Hook body.
    handler: Arc<dyn Fn(&HookCall<'_>) -> AppResult<Value> + Send + Sync>,
}

impl ClosureHook {
    /// Creates a new closure-based hook.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&HookCall<'_>) -> AppResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for ClosureHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureHook")
            .field("name", &self.name)
            .field("handler", &"<closure>")
            .finish()
    }
}

#[async_trait]
impl HookFunction for ClosureHook {
    async fn call(&self, call: HookCall<'_>) -> AppResult<Value> {
        (self.handler)(&call)
    }
}
