//! Core traits defined in `stagehook-core` and implemented by other crates.

pub mod lookup;
pub mod provider;

pub use lookup::{LookupResolver, NoopResolver};
pub use provider::{Provider, StaticProvider};
