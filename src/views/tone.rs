use palette::{FromColor, Hsv, Srgb};
use serde::Serialize;

use crate::model::{Device, DeviceStatus, DeviceType, NotificationKind};

/// Visual state of a device card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTone {
    Offline,
    Active,
    Inactive,
    Fault,
    Standby,
}

impl DeviceTone {
    pub fn of(device: &Device) -> Self {
        if !device.is_online {
            return DeviceTone::Offline;
        }

        match device.status {
            DeviceStatus::On => DeviceTone::Active,
            DeviceStatus::Off => DeviceTone::Inactive,
            DeviceStatus::Error => DeviceTone::Fault,
            DeviceStatus::Idle => DeviceTone::Standby,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTone {
    Alert,
    Positive,
    Neutral,
}

impl NotificationTone {
    pub fn of(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Warning | NotificationKind::Error => NotificationTone::Alert,
            NotificationKind::Success => NotificationTone::Positive,
            NotificationKind::Info => NotificationTone::Neutral,
        }
    }
}

/// What a light that is switched on currently emits: its color with the
/// value scaled by brightness. `None` for anything else, or when the color
/// is not a valid hex code.
pub fn light_output(device: &Device) -> Option<Hsv> {
    if device.device_type != DeviceType::Light || !device.is_on() {
        return None;
    }

    let rgb: Srgb<u8> = device
        .properties
        .color
        .as_deref()
        .unwrap_or("#FFFFFF")
        .parse()
        .ok()?;

    let brightness = device.properties.brightness.unwrap_or(100.0).clamp(0.0, 100.0) / 100.0;

    let mut hsv = Hsv::from_color(rgb.into_format::<f32>());
    hsv.value *= brightness as f32;

    Some(hsv)
}
