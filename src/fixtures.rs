use std::{collections::HashSet, path::Path};

use chrono::{DateTime, Duration, TimeZone, Utc};
use color_eyre::Result;
use eyre::eyre;
use serde::Deserialize;

use crate::model::{
    AcMode, Device, DeviceProperties, DeviceStatus, DeviceType, Notification, NotificationKind,
    Role, User,
};

/// Initial contents of a store.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Parse a JSON seed. Errors name the path of the offending field.
pub fn parse_seed(json: &[u8]) -> Result<Seed> {
    let de = &mut serde_json::Deserializer::from_slice(json);
    let mut seed: Seed = serde_path_to_error::deserialize(de)?;

    let mut ids = HashSet::new();
    for device in &mut seed.devices {
        if !ids.insert(device.id.clone()) {
            return Err(eyre!("Duplicate device id {:?} in seed", device.id));
        }

        // Hand-written fixtures may carry stale timestamps
        device.last_updated = device.last_updated.max(device.created_at);
    }

    Ok(seed)
}

pub fn load_seed(path: &Path) -> Result<Seed> {
    let json = std::fs::read(path)
        .map_err(|e| eyre!("Could not read fixture file {}: {}", path.display(), e))?;

    parse_seed(&json).map_err(|e| e.wrap_err(format!("Invalid fixture file {}", path.display())))
}

fn fixture_device(
    id: &str,
    name: &str,
    device_type: DeviceType,
    room: &str,
    status: DeviceStatus,
    properties: DeviceProperties,
    created_at: DateTime<Utc>,
) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        device_type,
        room: room.to_string(),
        status,
        is_online: true,
        properties,
        created_at,
        last_updated: Utc::now().max(created_at),
        resume_power: None,
    }
}

/// Midnight UTC on the given day of January 2024.
fn january_2024(day: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// The demo home: six devices over four rooms and two unread notifications.
pub fn builtin_seed() -> Seed {
    let now = Utc::now();

    let devices = vec![
        fixture_device(
            "1",
            "Living Room Light",
            DeviceType::Light,
            "Living Room",
            DeviceStatus::On,
            DeviceProperties {
                brightness: Some(75.0),
                color: Some("#FFA500".to_string()),
                power_consumption: Some(12.0),
                ..Default::default()
            },
            january_2024(1, now),
        ),
        fixture_device(
            "2",
            "Bedroom Fan",
            DeviceType::Fan,
            "Bedroom",
            DeviceStatus::On,
            DeviceProperties {
                speed: Some(3),
                power_consumption: Some(45.0),
                ..Default::default()
            },
            january_2024(2, now),
        ),
        fixture_device(
            "3",
            "Living Room AC",
            DeviceType::Ac,
            "Living Room",
            DeviceStatus::On,
            DeviceProperties {
                temperature: Some(22.0),
                mode: Some(AcMode::Cool),
                power_consumption: Some(1200.0),
                ..Default::default()
            },
            january_2024(3, now),
        ),
        fixture_device(
            "4",
            "Temperature Sensor",
            DeviceType::Sensor,
            "Living Room",
            DeviceStatus::On,
            DeviceProperties {
                value: Some(24.5),
                unit: Some("°C".to_string()),
                threshold: Some(30.0),
                power_consumption: Some(2.0),
                ..Default::default()
            },
            january_2024(4, now),
        ),
        fixture_device(
            "5",
            "Kitchen Light",
            DeviceType::Light,
            "Kitchen",
            DeviceStatus::Off,
            DeviceProperties {
                brightness: Some(50.0),
                color: Some("#FFFFFF".to_string()),
                power_consumption: Some(0.0),
                ..Default::default()
            },
            january_2024(5, now),
        ),
        fixture_device(
            "6",
            "Security System",
            DeviceType::Security,
            "Entry",
            DeviceStatus::On,
            DeviceProperties {
                power_consumption: Some(15.0),
                ..Default::default()
            },
            january_2024(6, now),
        ),
    ];

    let notifications = vec![
        Notification {
            id: "1".to_string(),
            kind: NotificationKind::Warning,
            title: "High Temperature Alert".to_string(),
            message: "Living room temperature has exceeded the threshold (30°C)".to_string(),
            timestamp: now - Duration::minutes(30),
            is_read: false,
            device_id: Some("4".to_string()),
        },
        Notification {
            id: "2".to_string(),
            kind: NotificationKind::Info,
            title: "Device Added".to_string(),
            message: "Security System has been successfully added to your home".to_string(),
            timestamp: now - Duration::hours(2),
            is_read: false,
            device_id: Some("6".to_string()),
        },
    ];

    Seed {
        devices,
        notifications,
    }
}

/// Accounts listed in the admin user table.
pub fn mock_users() -> Vec<User> {
    let now = Utc::now();

    vec![
        User {
            id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@smarthome.com".to_string(),
            role: Role::Admin,
            avatar: None,
            created_at: january_2024(1, now),
            last_login: Some(now),
        },
        User {
            id: "2".to_string(),
            username: "user".to_string(),
            email: "user@smarthome.com".to_string(),
            role: Role::User,
            avatar: None,
            created_at: january_2024(1, now),
            last_login: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEED_JSON: &str = r#"{
        "devices": [
            {
                "id": "a",
                "name": "Porch Light",
                "type": "light",
                "room": "Porch",
                "status": "off",
                "isOnline": true,
                "properties": { "brightness": 40, "powerConsumption": 0 },
                "createdAt": "2024-03-01T00:00:00Z",
                "lastUpdated": "2024-02-01T00:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn builtin_seed_matches_demo_home() {
        let seed = builtin_seed();

        let ids: Vec<&str> = seed.devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

        let fan = &seed.devices[1];
        assert_eq!(fan.status, DeviceStatus::On);
        assert_eq!(fan.properties.power_consumption, Some(45.0));

        assert_eq!(seed.devices[0].created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(seed.devices.iter().all(|d| d.last_updated >= d.created_at));

        assert_eq!(seed.notifications.len(), 2);
        assert!(seed.notifications.iter().all(|n| !n.is_read));
    }

    #[test]
    fn parse_seed_fixes_stale_timestamps() {
        let seed = parse_seed(SEED_JSON.as_bytes()).unwrap();

        assert_eq!(seed.devices.len(), 1);
        assert!(seed.notifications.is_empty());

        let device = &seed.devices[0];
        assert_eq!(device.device_type, DeviceType::Light);
        assert_eq!(device.properties.brightness, Some(40.0));
        assert_eq!(device.last_updated, device.created_at);
    }

    #[test]
    fn parse_seed_reports_field_path() {
        let json = r#"{ "devices": [ { "id": "a", "type": "toaster" } ] }"#;
        let err = parse_seed(json.as_bytes()).unwrap_err();

        assert!(err.to_string().starts_with("devices[0]"), "{err}");
    }

    #[test]
    fn parse_seed_rejects_duplicate_ids() {
        let device = r#"{
            "id": "a", "name": "Lamp", "type": "light", "room": "Den",
            "status": "on", "isOnline": true,
            "createdAt": "2024-01-01T00:00:00Z", "lastUpdated": "2024-01-01T00:00:00Z"
        }"#;
        let json = format!(r#"{{ "devices": [ {device}, {device} ] }}"#);

        let err = parse_seed(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Duplicate device id"));
    }

    #[test]
    fn load_seed_reads_file() {
        let path = std::env::temp_dir().join(format!("seed-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, SEED_JSON).unwrap();

        let seed = load_seed(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(seed.unwrap().devices[0].name, "Porch Light");
    }

    #[test]
    fn load_seed_missing_file() {
        let err = load_seed(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Could not read fixture file"));
    }

    #[test]
    fn mock_users_have_one_admin() {
        let users = mock_users();
        assert_eq!(users.iter().filter(|u| u.is_admin()).count(), 1);
    }
}
