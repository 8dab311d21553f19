use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Brightness range offered by light controls (percent).
pub const BRIGHTNESS_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Speed levels offered by fan controls.
pub const FAN_SPEED_RANGE: RangeInclusive<u8> = 1..=5;

/// Setpoint range offered by AC controls (degrees Celsius).
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 16.0..=30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Light,
    Fan,
    Ac,
    Sensor,
    Security,
    Thermostat,
}

impl DeviceType {
    /// Capitalized name used in charts and tables.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceType::Light => "Light",
            DeviceType::Fan => "Fan",
            DeviceType::Ac => "Ac",
            DeviceType::Sensor => "Sensor",
            DeviceType::Security => "Security",
            DeviceType::Thermostat => "Thermostat",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    On,
    Off,
    Idle,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcMode {
    Cool,
    Heat,
    Fan,
    Auto,
}

/// Type dependent attributes of a device.
///
/// Every field is optional and nothing here is range checked. The constants
/// at the top of this module describe what the controls offer, but values
/// outside of them are stored as given.
#[derive(Builder, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    /// Light brightness (0 - 100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,

    /// Light color as a hex code, e.g. `#FFA500`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Fan speed level (1 - 5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,

    /// AC or thermostat setpoint in Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AcMode>,

    /// Latest sensor reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Sensor alert threshold, in the same unit as `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Current draw in watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_consumption: Option<f64>,
}

impl DeviceProperties {
    /// Property bag a freshly added device of the given type starts with.
    pub fn defaults_for(device_type: DeviceType) -> Self {
        let base = DeviceProperties {
            power_consumption: Some(0.0),
            ..Default::default()
        };

        match device_type {
            DeviceType::Light => DeviceProperties {
                brightness: Some(50.0),
                color: Some("#FFFFFF".to_string()),
                ..base
            },
            DeviceType::Fan => DeviceProperties {
                speed: Some(1),
                ..base
            },
            DeviceType::Ac => DeviceProperties {
                temperature: Some(22.0),
                mode: Some(AcMode::Cool),
                ..base
            },
            DeviceType::Sensor => DeviceProperties {
                value: Some(0.0),
                unit: Some("°C".to_string()),
                threshold: Some(30.0),
                ..base
            },
            DeviceType::Security | DeviceType::Thermostat => base,
        }
    }
}

/// A device as submitted for creation, before the store assigns identity and
/// timestamps.
#[derive(Builder, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct DeviceDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub room: String,
    #[builder(default = "DeviceStatus::Off")]
    pub status: DeviceStatus,
    #[builder(default = "true")]
    pub is_online: bool,
    #[builder(default)]
    pub properties: DeviceProperties,
}

impl DeviceDraft {
    /// Draft with the per-type default properties, switched off and online.
    pub fn for_type(
        name: impl Into<String>,
        device_type: DeviceType,
        room: impl Into<String>,
    ) -> Self {
        DeviceDraft {
            name: name.into(),
            device_type,
            room: room.into(),
            status: DeviceStatus::Off,
            is_online: true,
            properties: DeviceProperties::defaults_for(device_type),
        }
    }
}

/// Sparse set of field overrides for an existing device.
///
/// `properties` replaces the whole bag when present. Callers that only want
/// to change one property must start from the device's current bag.
#[derive(Builder, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<DeviceType>,
    pub room: Option<String>,
    pub status: Option<DeviceStatus>,
    pub is_online: Option<bool>,
    pub properties: Option<DeviceProperties>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub room: String,
    pub status: DeviceStatus,
    pub is_online: bool,
    #[serde(default)]
    pub properties: DeviceProperties,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,

    /// Power draw remembered while the device is toggled off.
    #[serde(skip)]
    pub(crate) resume_power: Option<f64>,
}

impl Device {
    pub fn from_draft(id: String, draft: DeviceDraft, now: DateTime<Utc>) -> Self {
        Device {
            id,
            name: draft.name,
            device_type: draft.device_type,
            room: draft.room,
            status: draft.status,
            is_online: draft.is_online,
            properties: draft.properties,
            created_at: now,
            last_updated: now,
            resume_power: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.status == DeviceStatus::On
    }

    /// Current draw in watts, 0 when unset.
    pub fn power_consumption(&self) -> f64 {
        self.properties.power_consumption.unwrap_or(0.0)
    }

    /// Refresh `last_updated`. Never moves it backwards or before `created_at`,
    /// even if the wall clock does.
    pub(crate) fn touch(&mut self) {
        self.last_updated = Utc::now().max(self.last_updated).max(self.created_at);
    }

    pub(crate) fn apply(&mut self, update: DeviceUpdate) {
        let DeviceUpdate {
            name,
            device_type,
            room,
            status,
            is_online,
            properties,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(device_type) = device_type {
            self.device_type = device_type;
        }
        if let Some(room) = room {
            self.room = room;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(is_online) = is_online {
            self.is_online = is_online;
        }
        if let Some(properties) = properties {
            self.properties = properties;
        }

        self.touch();
    }

    /// Flip between on and off. Anything that is not on turns on.
    ///
    /// Switching off zeroes the power draw and remembers the previous value;
    /// switching on restores it. A non-zero draw written while the device was
    /// off takes precedence over the remembered one. An explicit zero written
    /// while off does not count as a new value.
    pub(crate) fn toggle_power(&mut self) {
        if self.is_on() {
            self.resume_power = self.properties.power_consumption;
            self.status = DeviceStatus::Off;
            self.properties.power_consumption = Some(0.0);
        } else {
            let explicit = self.properties.power_consumption.filter(|watts| *watts != 0.0);
            let remembered = self.resume_power.take();

            self.status = DeviceStatus::On;
            self.properties.power_consumption = Some(explicit.or(remembered).unwrap_or(0.0));
        }

        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fan() -> Device {
        let draft = DeviceDraftBuilder::default()
            .name("Bedroom Fan")
            .device_type(DeviceType::Fan)
            .room("Bedroom")
            .status(DeviceStatus::On)
            .properties(
                DevicePropertiesBuilder::default()
                    .speed(3u8)
                    .power_consumption(45.0)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        Device::from_draft("2".to_string(), draft, Utc::now())
    }

    #[test]
    fn toggle_off_and_on_restores_power() {
        let mut device = fan();

        device.toggle_power();
        assert_eq!(device.status, DeviceStatus::Off);
        assert_eq!(device.properties.power_consumption, Some(0.0));

        device.toggle_power();
        assert_eq!(device.status, DeviceStatus::On);
        assert_eq!(device.properties.power_consumption, Some(45.0));
    }

    #[test]
    fn toggle_on_prefers_power_written_while_off() {
        let mut device = fan();
        device.toggle_power();
        device.properties.power_consumption = Some(60.0);

        device.toggle_power();
        assert_eq!(device.properties.power_consumption, Some(60.0));
    }

    #[test]
    fn toggle_on_ignores_zero_written_while_off() {
        let mut device = fan();
        device.toggle_power();
        device.properties.power_consumption = Some(0.0);

        device.toggle_power();
        assert_eq!(device.properties.power_consumption, Some(45.0));
    }

    #[test]
    fn toggle_from_idle_or_error_turns_on() {
        for status in [DeviceStatus::Idle, DeviceStatus::Error] {
            let mut device = fan();
            device.status = status;
            device.toggle_power();
            assert_eq!(device.status, DeviceStatus::On);
            assert_eq!(device.properties.power_consumption, Some(45.0));
        }
    }

    #[test]
    fn toggle_without_recorded_power_defaults_to_zero() {
        let mut device = fan();
        device.properties.power_consumption = None;

        device.toggle_power();
        device.toggle_power();
        assert_eq!(device.properties.power_consumption, Some(0.0));
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut device = fan();
        let before = device.clone();

        device.apply(DeviceUpdateBuilder::default().is_online(false).build().unwrap());

        assert!(!device.is_online);
        assert_eq!(device.name, before.name);
        assert_eq!(device.room, before.room);
        assert_eq!(device.status, before.status);
        assert_eq!(device.properties, before.properties);
        assert_eq!(device.created_at, before.created_at);
        assert!(device.last_updated >= before.last_updated);
    }

    #[test]
    fn apply_replaces_whole_property_bag() {
        let mut device = fan();

        device.apply(DeviceUpdate {
            properties: Some(DeviceProperties {
                speed: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(device.properties.speed, Some(5));
        assert_eq!(device.properties.power_consumption, None);
    }

    #[test]
    fn touch_never_precedes_creation() {
        let mut device = fan();
        device.created_at = Utc::now() + chrono::Duration::hours(1);
        device.touch();
        assert!(device.last_updated >= device.created_at);
    }

    #[test]
    fn draft_defaults_per_type() {
        let light = DeviceDraft::for_type("Hallway Light", DeviceType::Light, "Hallway");
        assert_eq!(light.status, DeviceStatus::Off);
        assert!(light.is_online);
        assert_eq!(light.properties.brightness, Some(50.0));
        assert_eq!(light.properties.color.as_deref(), Some("#FFFFFF"));
        assert_eq!(light.properties.power_consumption, Some(0.0));

        let ac = DeviceProperties::defaults_for(DeviceType::Ac);
        assert_eq!(ac.temperature, Some(22.0));
        assert_eq!(ac.mode, Some(AcMode::Cool));

        let security = DeviceProperties::defaults_for(DeviceType::Security);
        assert_eq!(
            security,
            DeviceProperties {
                power_consumption: Some(0.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn device_json_uses_dashboard_field_names() {
        let json = serde_json::to_value(fan()).unwrap();
        assert_eq!(json["type"], "fan");
        assert_eq!(json["status"], "on");
        assert_eq!(json["isOnline"], true);
        assert_eq!(json["properties"]["powerConsumption"], 45.0);
        assert!(json.get("resumePower").is_none());
    }
}
