//! `data.echo`: publishes its resolved args.

use stagehook_engine::prelude::*;

/// Returns its args unchanged, so lookups can be evaluated once and their
/// results shared through `hook_data`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

#[async_trait]
impl HookFunction for Echo {
    async fn call(&self, call: HookCall<'_>) -> AppResult<Value> {
        Ok(Value::Object(call.args))
    }
}
