//! Role-based access control for the dashboard modules
//!
//! This module owns the closed role and module registries, the static
//! permission table, and the pure access evaluator consumed by route
//! guards and navigation builders.

mod evaluator;
mod module;
mod policy;
mod role;

// Re-export public types and functions
pub use evaluator::{accessible_modules, can_access};
pub use module::Module;
pub use policy::allowed_roles;
pub use role::Role;
