// User preferences

use serde::{Deserialize, Serialize};

use super::config::{ChatMode, Verbosity};

/// What the person using the assistant does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    #[default]
    Support,
    Sales,
    Engineering,
    Product,
    Other,
}

/// Register of generated answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalLevel {
    #[default]
    Business,
    Technical,
    Executive,
}

impl From<EmployeeRole> for TechnicalLevel {
    fn from(role: EmployeeRole) -> Self {
        match role {
            EmployeeRole::Engineering => TechnicalLevel::Technical,
            EmployeeRole::Product => TechnicalLevel::Executive,
            EmployeeRole::Support | EmployeeRole::Sales | EmployeeRole::Other => {
                TechnicalLevel::Business
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub default_mode: ChatMode,
    pub verbosity: Verbosity,
    pub show_technical_details: bool,
    pub include_competitive_info: bool,
    pub employee_role: EmployeeRole,
    pub auto_expand: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_mode: ChatMode::CustomerSupport,
            verbosity: Verbosity::Brief,
            show_technical_details: false,
            include_competitive_info: true,
            employee_role: EmployeeRole::Support,
            auto_expand: false,
        }
    }
}

/// Partial preference update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub default_mode: Option<ChatMode>,
    pub verbosity: Option<Verbosity>,
    pub show_technical_details: Option<bool>,
    pub include_competitive_info: Option<bool>,
    pub employee_role: Option<EmployeeRole>,
    pub auto_expand: Option<bool>,
}

impl UserPreferences {
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(v) = patch.default_mode {
            self.default_mode = v;
        }
        if let Some(v) = patch.verbosity {
            self.verbosity = v;
        }
        if let Some(v) = patch.show_technical_details {
            self.show_technical_details = v;
        }
        if let Some(v) = patch.include_competitive_info {
            self.include_competitive_info = v;
        }
        if let Some(v) = patch.employee_role {
            self.employee_role = v;
        }
        if let Some(v) = patch.auto_expand {
            self.auto_expand = v;
        }
    }

    pub fn technical_level(&self) -> TechnicalLevel {
        self.employee_role.into()
    }
}
