//! Invocation adapter: one calling convention for both hook shapes.

use serde_json::{Map, Value};
use stagehook_core::context::DeployContext;
use stagehook_core::error::AppError;
use stagehook_core::traits::Provider;
use tracing::debug;

use crate::capability::{Capability, HookCall};

/// What invoking a capability produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// The hook ran and returned a value.
    Returned(Value),
    /// The stage object has no entry point for the stage.
    NoEntryPoint,
}

/// Invokes a capability for a stage.
///
/// A function receives context, provider and args. A stage object is built
/// from the args alone and its entry point for `stage` is run. Any error
/// raised while building or running the hook is returned as-is for the
/// executor to classify.
pub async fn invoke(
    capability: &Capability,
    stage: &str,
    context: &DeployContext,
    provider: &dyn Provider,
    args: Map<String, Value>,
) -> Result<Invocation, AppError> {
    match capability {
        Capability::Function(hook) => {
            let call = HookCall {
                stage,
                context,
                provider,
                args,
            };
            hook.call(call).await.map(Invocation::Returned)
        }
        Capability::StageObject(factory) => {
            let object = factory(args)?;
            if !object.handles(stage) {
                debug!(stage = %stage, hook = ?object, "No entry point for stage");
                return Ok(Invocation::NoEntryPoint);
            }
            object.run_stage(stage).await.map(Invocation::Returned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ClosureHook, StageHook};
    use async_trait::async_trait;
    use serde_json::json;
    use stagehook_core::error::ErrorKind;
    use stagehook_core::result::AppResult;
    use stagehook_core::traits::StaticProvider;
    use std::sync::Arc;

    #[derive(Debug)]
    struct OnlyDestroy;

    #[async_trait]
    impl StageHook for OnlyDestroy {
        fn handles(&self, stage: &str) -> bool {
            stage == "post_destroy"
        }

        async fn run_stage(&self, _stage: &str) -> AppResult<Value> {
            Ok(json!({"destroyed": true}))
        }
    }

    fn stage_object() -> Capability {
        Capability::StageObject(Arc::new(|args: Map<String, Value>| {
            if args.contains_key("fail") {
                return Err(AppError::invocation("bad args"));
            }
            Ok(Box::new(OnlyDestroy) as Box<dyn StageHook>)
        }))
    }

    #[tokio::test]
    async fn test_function_receives_stage_and_args() {
        let capability = Capability::Function(Arc::new(ClosureHook::new("echo", |call| {
            Ok(json!({"stage": call.stage, "provider": call.provider.name(), "x": call.arg("x")}))
        })));
        let context = DeployContext::new("ns", "dev");
        let provider = StaticProvider::new("aws");
        let mut args = Map::new();
        args.insert("x".into(), json!(1));

        let result = invoke(&capability, "pre_deploy", &context, &provider, args)
            .await
            .expect("invoke");
        assert_eq!(
            result,
            Invocation::Returned(json!({"stage": "pre_deploy", "provider": "aws", "x": 1}))
        );
    }

    #[tokio::test]
    async fn test_stage_object_dispatch() {
        let context = DeployContext::new("ns", "dev");
        let provider = StaticProvider::new("aws");
        let capability = stage_object();

        let result = invoke(&capability, "pre_deploy", &context, &provider, Map::new())
            .await
            .expect("invoke");
        assert_eq!(result, Invocation::NoEntryPoint);

        let result = invoke(&capability, "post_destroy", &context, &provider, Map::new())
            .await
            .expect("invoke");
        assert_eq!(result, Invocation::Returned(json!({"destroyed": true})));
    }

    #[tokio::test]
    async fn test_construction_error_is_returned() {
        let context = DeployContext::new("ns", "dev");
        let provider = StaticProvider::new("aws");
        let mut args = Map::new();
        args.insert("fail".into(), json!(true));

        let err = invoke(&stage_object(), "post_destroy", &context, &provider, args)
            .await
            .expect_err("construction fails");
        assert_eq!(err.kind, ErrorKind::Invocation);
    }
}
