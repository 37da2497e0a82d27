//! Access evaluator
//!
//! Pure functions answering "can this role use this module". No I/O, no
//! allocation on the hot path, safe to call on every request.

use super::module::Module;
use super::policy::allowed_roles;
use super::role::Role;

/// Whether the given role may access the given module.
///
/// An absent role (unauthenticated session, or role not yet resolved)
/// denies unconditionally. Callers that need to distinguish "still
/// loading" from "signed out" must gate on the session loading flag
/// before evaluating; this function only answers the membership question.
pub fn can_access(role: Option<Role>, module: Module) -> bool {
    match role {
        Some(role) => allowed_roles(module).contains(&role),
        None => false,
    }
}

/// Modules the given role may access, in canonical navigation order.
///
/// Derived by filtering the module registry through [`can_access`], so it
/// can never disagree with the per-module answer.
pub fn accessible_modules(role: Option<Role>) -> Vec<Module> {
    Module::ALL
        .iter()
        .copied()
        .filter(|module| can_access(role, *module))
        .collect()
}
