//! Convenience macros for hook authors.

/// Builds a hook argument mapping.
///
/// # Example
/// ```rust,ignore
/// let args = hook_args!({
///     "path" => json!("/tmp/site"),
///     "quiet" => json!(true),
/// });
/// ```
#[macro_export]
macro_rules! hook_args {
    () => {
        $crate::prelude::Map::new()
    };
    ({ $($key:expr => $value:expr),* $(,)? }) => {{
        let mut args = $crate::prelude::Map::new();
        $(
            args.insert($key.to_string(), $value);
        )*
        args
    }};
}

/// Registers several function hooks under one module.
///
/// # Example
/// ```rust,ignore
/// register_functions!(registry, "stagehook.builtins.data", {
///     "echo" => EchoHook,
/// })?;
/// ```
#[macro_export]
macro_rules! register_functions {
    ($registry:expr, $module:expr, { $($name:expr => $hook:expr),* $(,)? }) => {{
        (|| -> ::std::result::Result<(), $crate::error::LoadError> {
            $(
                $registry.register_function(
                    &format!("{}.{}", $module, $name),
                    ::std::sync::Arc::new($hook),
                )?;
            )*
            Ok(())
        })()
    }};
}
