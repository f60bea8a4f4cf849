//! Analytics rollup structures.
//!
//! These are the values memoized in the analytics cache and returned to
//! clients, serialized in the camelCase wire format. A cache hit is
//! deserialized and returned verbatim, so every field here must survive a
//! JSON round trip unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Redirect count for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub count: u64,
}

/// Event count per operating system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsBucket {
    pub os_name: String,
    pub unique_clicks: u64,
}

/// Event count per device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBucket {
    pub device_name: String,
    pub unique_clicks: u64,
}

/// Per-OS bucket for the owner scope: event count plus distinct visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsUserBucket {
    pub os_name: String,
    pub unique_clicks: u64,
    pub unique_users: u64,
}

/// Per-device bucket for the owner scope: event count plus distinct visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUserBucket {
    pub device_name: String,
    pub unique_clicks: u64,
    pub unique_users: u64,
}

/// Per-alias click summary inside a topic rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasClickSummary {
    /// Display identifier of the alias (custom alias when set).
    pub short_url: String,
    pub total_clicks: u64,
    pub unique_clicks: u64,
}

/// Rollup for a single alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRollup {
    pub total_clicks: u64,
    pub unique_clicks: u64,
    /// Exactly 7 entries, oldest to newest, ending today (UTC).
    pub clicks_by_date: Vec<DailyClicks>,
    pub os_type: Vec<OsBucket>,
    pub device_type: Vec<DeviceBucket>,
}

/// Rollup over all aliases sharing a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRollup {
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub clicks_by_date: Vec<DailyClicks>,
    pub os_type: Vec<OsBucket>,
    pub device_type: Vec<DeviceBucket>,
    pub urls: Vec<AliasClickSummary>,
}

/// Rollup over all aliases belonging to one owner.
///
/// The only scope whose OS/device buckets carry `uniqueUsers` in addition
/// to the raw event count; the asymmetry with the alias/topic scopes is
/// intentional and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRollup {
    pub total_urls: u64,
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub clicks_by_date: Vec<DailyClicks>,
    pub os_type: Vec<OsUserBucket>,
    pub device_type: Vec<DeviceUserBucket>,
}
