//! Capability registry: resolves symbolic hook paths to capabilities.
//!
//! A path is `<module>.<name>`, split at the last `.`. Modules and their
//! named capabilities are registered at startup; loading is a lookup.
//! Every dotted prefix of a registered module is itself a resolvable module,
//! so `pkg.missing` fails on the symbol when `pkg.tools` is registered.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stagehook_core::error::AppError;
use tracing::info;

use crate::capability::{Capability, HookFunction, StageHook, StageHookFactory};
use crate::error::LoadError;

/// Resolves a hook path to a capability.
pub trait CapabilityLoader: Send + Sync {
    /// Loads the capability registered under `path`.
    fn load(&self, path: &str) -> Result<Capability, LoadError>;
}

/// Summary of one registered capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityInfo {
    /// Full hook path.
    pub path: String,
    /// `function` or `stage_object`.
    pub shape: &'static str,
}

/// Registry of capabilities organized by module.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    /// Module path → capability name → capability.
    modules: HashMap<String, HashMap<String, Capability>>,
    /// Registered modules and all of their parent packages.
    packages: HashSet<String>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a capability under a full hook path.
    pub fn register(&mut self, path: &str, capability: Capability) -> Result<(), LoadError> {
        let (module, symbol) = split_path(path).ok_or_else(|| LoadError::InvalidPath {
            path: path.to_string(),
        })?;

        let entries = self.modules.entry(module.to_string()).or_default();
        if entries.contains_key(symbol) {
            return Err(LoadError::AlreadyRegistered {
                path: path.to_string(),
            });
        }

        info!(path = %path, shape = capability.shape(), "Hook capability registered");
        entries.insert(symbol.to_string(), capability);

        let mut package = module;
        loop {
            self.packages.insert(package.to_string());
            match package.rsplit_once('.') {
                Some((parent, _)) if !parent.is_empty() => package = parent,
                _ => break,
            }
        }
        Ok(())
    }

    /// Registers a function hook.
    pub fn register_function(
        &mut self,
        path: &str,
        hook: Arc<dyn HookFunction>,
    ) -> Result<(), LoadError> {
        self.register(path, Capability::Function(hook))
    }

    /// Registers a stage hook built by a custom factory.
    pub fn register_stage_factory(
        &mut self,
        path: &str,
        factory: StageHookFactory,
    ) -> Result<(), LoadError> {
        self.register(path, Capability::StageObject(factory))
    }

    /// Registers a stage hook whose fields are deserialized from its args.
    pub fn register_stage_hook<T>(&mut self, path: &str) -> Result<(), LoadError>
    where
        T: StageHook + DeserializeOwned + 'static,
    {
        let type_path = path.to_string();
        let factory: StageHookFactory = Arc::new(move |args: Map<String, Value>| {
            let hook: T = serde_json::from_value(Value::Object(args)).map_err(|e| {
                AppError::invocation(format!("Invalid args for '{type_path}': {e}"))
            })?;
            Ok(Box::new(hook) as Box<dyn StageHook>)
        });
        self.register_stage_factory(path, factory)
    }

    /// Returns whether a module resolves, either directly or as a parent
    /// package of a registered module.
    pub fn has_module(&self, module: &str) -> bool {
        self.packages.contains(module)
    }

    /// Lists every registered capability, sorted by path.
    pub fn list(&self) -> Vec<CapabilityInfo> {
        let sorted: BTreeMap<String, &'static str> = self
            .modules
            .iter()
            .flat_map(|(module, entries)| {
                entries
                    .iter()
                    .map(move |(symbol, cap)| (format!("{module}.{symbol}"), cap.shape()))
            })
            .collect();

        sorted
            .into_iter()
            .map(|(path, shape)| CapabilityInfo { path, shape })
            .collect()
    }

    /// Returns the number of registered capabilities.
    pub fn len(&self) -> usize {
        self.modules.values().map(HashMap::len).sum()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CapabilityLoader for CapabilityRegistry {
    fn load(&self, path: &str) -> Result<Capability, LoadError> {
        let Some((module, symbol)) = split_path(path) else {
            return Err(LoadError::ModuleNotFound {
                module: path.to_string(),
                path: path.to_string(),
            });
        };

        if !self.has_module(module) {
            return Err(LoadError::ModuleNotFound {
                module: module.to_string(),
                path: path.to_string(),
            });
        }

        self.modules
            .get(module)
            .and_then(|entries| entries.get(symbol))
            .cloned()
            .ok_or_else(|| LoadError::SymbolNotFound {
                module: module.to_string(),
                symbol: symbol.to_string(),
            })
    }
}

fn split_path(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('.')
        .filter(|(module, symbol)| !module.is_empty() && !symbol.is_empty())
}
