//! User-agent classification for redirect analytics.
//!
//! Provides a [`UserAgentClassifier`] trait with a woothee-backed default
//! implementation. Any heuristic meeting the same contract may substitute.

mod woothee_classifier;

pub use woothee_classifier::WootheeClassifier;

/// Derived OS and device classification for a redirect event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub os_name: String,
    pub device_type: String,
}

/// Best-effort user-agent classifier.
///
/// On parse failure or an unrecognized result the defaults are
/// `os_name = "Unknown"` and `device_type = "Desktop"`. The desktop default
/// is deliberate: it keeps aggregation denominators stable for the large
/// share of browsers that send unclassifiable strings.
#[cfg_attr(test, mockall::automock)]
pub trait UserAgentClassifier: Send + Sync {
    fn classify(&self, user_agent: &str) -> Classification;
}

impl Classification {
    /// The fallback classification for unparseable user agents.
    pub fn unknown() -> Self {
        Self {
            os_name: "Unknown".to_string(),
            device_type: "Desktop".to_string(),
        }
    }
}
