use serde::Serialize;

use crate::model::{Device, DeviceType, Room};

/// Headline numbers on the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_devices: usize,
    pub active_devices: usize,

    /// Share of devices that are on, rounded to a whole percent
    pub active_percent: u32,

    /// Watts
    pub total_power: f64,
    pub offline_devices: usize,
}

impl DashboardStats {
    pub fn from_devices(devices: &[Device]) -> Self {
        let total_devices = devices.len();
        let active_devices = devices.iter().filter(|d| d.is_on()).count();

        DashboardStats {
            total_devices,
            active_devices,
            active_percent: percent(active_devices, total_devices),
            total_power: total_power(devices),
            offline_devices: devices.iter().filter(|d| !d.is_online).count(),
        }
    }

    pub fn all_online(&self) -> bool {
        self.offline_devices == 0
    }

    pub fn system_status(&self) -> String {
        if self.all_online() {
            "All Online".to_string()
        } else {
            format!("{} Offline", self.offline_devices)
        }
    }
}

/// Per-room figures shown in each room's header.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub active_devices: usize,
    pub total_power: f64,
}

impl RoomSummary {
    pub fn from_room(room: &Room) -> Self {
        RoomSummary {
            active_devices: room.devices.iter().filter(|d| d.is_on()).count(),
            total_power: total_power(&room.devices),
        }
    }
}

/// Sensors whose latest reading is above their alert threshold.
pub fn sensor_alerts(devices: &[Device]) -> Vec<&Device> {
    devices
        .iter()
        .filter(|d| d.device_type == DeviceType::Sensor)
        .filter(|d| match (d.properties.value, d.properties.threshold) {
            (Some(value), Some(threshold)) => value > threshold,
            _ => false,
        })
        .collect()
}

pub(crate) fn total_power(devices: &[Device]) -> f64 {
    devices.iter().map(Device::power_consumption).sum()
}

/// `part / total` as a rounded percentage, 0 when `total` is 0.
pub(crate) fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    (part as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::builtin_seed;
    use crate::model::group_by_room;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_home_stats() {
        let seed = builtin_seed();
        let stats = DashboardStats::from_devices(&seed.devices);

        assert_eq!(
            stats,
            DashboardStats {
                total_devices: 6,
                active_devices: 5,
                active_percent: 83,
                total_power: 1274.0,
                offline_devices: 0,
            }
        );
        assert_eq!(stats.system_status(), "All Online");
    }

    #[test]
    fn offline_devices_change_status() {
        let mut devices = builtin_seed().devices;
        devices[0].is_online = false;
        devices[3].is_online = false;

        let stats = DashboardStats::from_devices(&devices);
        assert!(!stats.all_online());
        assert_eq!(stats.system_status(), "2 Offline");
    }

    #[test]
    fn empty_home_has_zero_percent() {
        let stats = DashboardStats::from_devices(&[]);
        assert_eq!(stats.active_percent, 0);
        assert_eq!(stats.total_power, 0.0);
    }

    #[test]
    fn living_room_summary() {
        let rooms = group_by_room(&builtin_seed().devices);
        let summary = RoomSummary::from_room(&rooms[0]);

        assert_eq!(rooms[0].name, "Living Room");
        assert_eq!(summary.active_devices, 3);
        assert_eq!(summary.total_power, 1214.0);
    }

    #[test]
    fn alerts_only_above_threshold() {
        let mut devices = builtin_seed().devices;
        assert!(sensor_alerts(&devices).is_empty());

        devices[3].properties.value = Some(31.2);
        let alerts: Vec<&str> = sensor_alerts(&devices).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(alerts, vec!["4"]);
    }
}
