//! # Domain Entities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Node-side output checks requested with `send_transaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputsValidator {
    /// No output script restrictions. Required for Spore and Cluster outputs.
    #[default]
    Passthrough,
    /// Only the node's well-known lock and type scripts.
    WellKnownScriptsOnly,
}

impl OutputsValidator {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputsValidator::Passthrough => "passthrough",
            OutputsValidator::WellKnownScriptsOnly => "well_known_scripts_only",
        }
    }
}

impl fmt::Display for OutputsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_value(OutputsValidator::Passthrough).unwrap(),
            "passthrough"
        );
        assert_eq!(
            serde_json::to_value(OutputsValidator::WellKnownScriptsOnly).unwrap(),
            "well_known_scripts_only"
        );
        assert_eq!(OutputsValidator::default().to_string(), "passthrough");
    }
}
