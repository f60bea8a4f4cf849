//! Woothee-backed user-agent classifier.

use super::{Classification, UserAgentClassifier};
use woothee::parser::Parser;

/// Classifies user agents with the woothee parser.
///
/// Woothee reports a device category (`pc`, `smartphone`, `mobilephone`,
/// `crawler`, ...) rather than a device type; the mapping below folds those
/// into the analytics vocabulary, defaulting to `"Desktop"`.
pub struct WootheeClassifier {
    parser: Parser,
}

impl WootheeClassifier {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    fn device_type(category: &str) -> &'static str {
        match category {
            "smartphone" | "mobilephone" => "Mobile",
            "appliance" => "Appliance",
            "crawler" => "Crawler",
            _ => "Desktop",
        }
    }
}

impl Default for WootheeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAgentClassifier for WootheeClassifier {
    fn classify(&self, user_agent: &str) -> Classification {
        let Some(result) = self.parser.parse(user_agent) else {
            return Classification::unknown();
        };

        let os_name = if result.os == "UNKNOWN" {
            "Unknown".to_string()
        } else {
            result.os.to_string()
        };

        Classification {
            os_name,
            device_type: Self::device_type(result.category).to_string(),
        }
    }
}
