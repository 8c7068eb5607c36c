//! Host-facing machine options.

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Options a host can set in code or load from its own configuration.
///
/// Every field has a default, so partial configuration is accepted.
///
/// # Example
///
/// ```rust
/// use tickstate::MachineOptions;
///
/// let options: MachineOptions = serde_json::from_str(r#"{ "name": "game" }"#).unwrap();
/// assert_eq!(options.name, "game");
/// assert_eq!(options.history_limit, MachineOptions::default().history_limit);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Label attached to the machine's log events
    pub name: String,

    /// Number of state changes kept in the history, `0` disables it
    pub history_limit: usize,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            name: "state-machine".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let options: MachineOptions = serde_json::from_str("{}").unwrap();

        assert_eq!(options, MachineOptions::default());
    }

    #[test]
    fn config_overrides_fields() {
        let options: MachineOptions =
            serde_json::from_str(r#"{ "name": "game", "history_limit": 0 }"#).unwrap();

        assert_eq!(options.name, "game");
        assert_eq!(options.history_limit, 0);
    }

    #[test]
    fn options_roundtrip_through_json() {
        let options = MachineOptions {
            name: "ui".to_string(),
            history_limit: 8,
        };

        let json = serde_json::to_string(&options).unwrap();
        let parsed: MachineOptions = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, options);
    }
}
