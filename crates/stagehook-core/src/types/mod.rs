//! Core type definitions used across the stagehook workspace.

pub mod declaration;
pub mod id;
pub mod stage;
pub mod value;

pub use declaration::HookDeclaration;
pub use id::RunId;
pub use stage::Stage;
pub use value::{find_path, is_truthy};
