use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::device::Device;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,

    /// Originating device. Not kept in sync with the device list, so it may
    /// point at a device that has since been removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl Notification {
    /// Announcement pushed when a device joins the home.
    pub fn device_added(device: &Device) -> Self {
        Notification {
            id: Uuid::new_v4().to_string(),
            kind: NotificationKind::Success,
            title: "Device Added".to_string(),
            message: format!(
                "{} has been successfully added to {}",
                device.name, device.room
            ),
            timestamp: device.created_at,
            is_read: false,
            device_id: Some(device.id.clone()),
        }
    }
}
