/// Shared data structures for the application state
///
/// These structs mirror the launch payload returned by the SpaceX API
/// and flow unchanged from the API layer into the UI layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single historical launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Unique, stable identifier of the launch
    pub flight_number: u32,
    pub mission_name: String,
    pub launch_date_utc: DateTime<Utc>,
    /// `None` when the outcome is unknown (e.g. the API returned null)
    #[serde(default)]
    pub launch_success: Option<bool>,
    #[serde(default)]
    pub details: Option<String>,
    pub rocket: Rocket,
    pub launch_site: LaunchSite,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub rocket_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSite {
    pub site_name: String,
    #[serde(default)]
    pub site_name_long: Option<String>,
}

/// Media attached to a launch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub mission_patch_small: Option<String>,
    /// Full-size Flickr photos, usually ending in `_o.jpg`
    #[serde(default)]
    pub flickr_images: Vec<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
}

impl LaunchRecord {
    /// Unknown outcomes count as failures.
    pub fn is_successful(&self) -> bool {
        self.launch_success.unwrap_or(false)
    }
}
