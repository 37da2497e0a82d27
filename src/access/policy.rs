//! Static permission table
//!
//! The single source of truth for module access. Every module maps to a
//! non-empty set of roles, and the mapping is a total match so an added
//! module without a row is a compile error, not a runtime fallback.
//!
//! There is deliberately no admin bypass anywhere in the evaluator: admin
//! access exists only because `Admin` is listed in every row below. A
//! module that should lock admins out would simply omit them.

use super::module::Module;
use super::role::Role;

/// Roles permitted to access the given module
pub fn allowed_roles(module: Module) -> &'static [Role] {
    match module {
        Module::Dashboard => &[
            Role::Admin,
            Role::Manager,
            Role::Coach,
            Role::Setter,
            Role::Closer,
            Role::Eleve,
        ],
        Module::Messaging => &[
            Role::Admin,
            Role::Manager,
            Role::Coach,
            Role::Setter,
            Role::Closer,
            Role::Eleve,
        ],
        Module::Formation => &[Role::Admin, Role::Manager, Role::Coach, Role::Eleve],
        Module::Clients => &[Role::Admin, Role::Manager, Role::Coach],
        Module::Pipeline => &[Role::Admin, Role::Manager, Role::Setter, Role::Closer],
        Module::Calendrier => &[
            Role::Admin,
            Role::Manager,
            Role::Coach,
            Role::Setter,
            Role::Closer,
            Role::Eleve,
        ],
        Module::Activite => &[Role::Admin, Role::Manager],
        Module::Finances => &[Role::Admin],
        Module::Users => &[Role::Admin],
        Module::Notifications => &[
            Role::Admin,
            Role::Manager,
            Role::Coach,
            Role::Setter,
            Role::Closer,
            Role::Eleve,
        ],
    }
}
