//! Module registry
//!
//! The closed set of protected feature areas. Modules are statically known
//! at build time; there is no dynamic module registration.

use serde::{Deserialize, Serialize};

/// Protected feature area of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Messaging,
    /// Course content
    Formation,
    /// Client directory
    Clients,
    Pipeline,
    /// Calendar
    Calendrier,
    /// Activity tracking
    Activite,
    Finances,
    /// User administration
    Users,
    Notifications,
}

impl Module {
    /// All modules, in canonical navigation order
    pub const ALL: [Module; 10] = [
        Module::Dashboard,
        Module::Messaging,
        Module::Formation,
        Module::Clients,
        Module::Pipeline,
        Module::Calendrier,
        Module::Activite,
        Module::Finances,
        Module::Users,
        Module::Notifications,
    ];

    /// Wire tag used in API payloads and route paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Messaging => "messaging",
            Module::Formation => "formation",
            Module::Clients => "clients",
            Module::Pipeline => "pipeline",
            Module::Calendrier => "calendrier",
            Module::Activite => "activite",
            Module::Finances => "finances",
            Module::Users => "users",
            Module::Notifications => "notifications",
        }
    }

    /// Human-readable label for navigation menus
    pub fn label(&self) -> &'static str {
        match self {
            Module::Dashboard => "Tableau de bord",
            Module::Messaging => "Messagerie",
            Module::Formation => "Formations",
            Module::Clients => "Clients",
            Module::Pipeline => "Pipeline",
            Module::Calendrier => "Calendrier",
            Module::Activite => "Suivi d'activité",
            Module::Finances => "Finances",
            Module::Users => "Utilisateurs",
            Module::Notifications => "Notifications",
        }
    }

    /// Route prefix served by the gateway for this module
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Module::Dashboard => "/dashboard",
            Module::Messaging => "/messaging",
            Module::Formation => "/formation",
            Module::Clients => "/clients",
            Module::Pipeline => "/pipeline",
            Module::Calendrier => "/calendrier",
            Module::Activite => "/activite",
            Module::Finances => "/finances",
            Module::Users => "/users",
            Module::Notifications => "/notifications",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Module::Dashboard),
            "messaging" => Ok(Module::Messaging),
            "formation" => Ok(Module::Formation),
            "clients" => Ok(Module::Clients),
            "pipeline" => Ok(Module::Pipeline),
            "calendrier" => Ok(Module::Calendrier),
            "activite" => Ok(Module::Activite),
            "finances" => Ok(Module::Finances),
            "users" => Ok(Module::Users),
            "notifications" => Ok(Module::Notifications),
            _ => Err(format!("Invalid module: {}", s)),
        }
    }
}
