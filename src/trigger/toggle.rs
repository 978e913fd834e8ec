use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Disable switches as stored by the configuration collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    /// Suppress every handler
    pub disable_all: bool,
    /// Handler names to suppress
    pub disabled_handlers: BTreeSet<String>,
}

impl TriggerSettings {
    pub fn is_disabled(&self, handler_name: &str) -> bool {
        self.disable_all || self.disabled_handlers.contains(handler_name)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}

/// Disablement gate injected into a handler at construction.
///
/// Handlers consult this from `is_disabled`; nothing here is process-global.
#[derive(Clone, Default)]
pub enum DisableSwitch {
    #[default]
    Enabled,
    Disabled,
    /// Look the handler name up in a settings snapshot
    Settings { name: String, settings: Arc<TriggerSettings> },
    /// Computed on every check; must be side-effect free
    Predicate(Arc<dyn Fn() -> bool + Send + Sync>),
}

impl DisableSwitch {
    pub fn from_flag(disabled: bool) -> Self {
        if disabled {
            DisableSwitch::Disabled
        } else {
            DisableSwitch::Enabled
        }
    }

    pub fn from_settings(name: impl Into<String>, settings: Arc<TriggerSettings>) -> Self {
        DisableSwitch::Settings {
            name: name.into(),
            settings,
        }
    }

    pub fn predicate(check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        DisableSwitch::Predicate(Arc::new(check))
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            DisableSwitch::Enabled => false,
            DisableSwitch::Disabled => true,
            DisableSwitch::Settings { name, settings } => settings.is_disabled(name),
            DisableSwitch::Predicate(check) => check(),
        }
    }
}

impl fmt::Debug for DisableSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisableSwitch::Enabled => write!(f, "Enabled"),
            DisableSwitch::Disabled => write!(f, "Disabled"),
            DisableSwitch::Settings { name, settings } => f
                .debug_struct("Settings")
                .field("name", name)
                .field("settings", settings)
                .finish(),
            DisableSwitch::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}
