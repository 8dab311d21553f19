use serde::Serialize;

use super::stats::total_power;
use crate::model::{Device, DeviceType};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    pub device_type: DeviceType,
    pub devices: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsage {
    pub room: String,
    pub devices: usize,
    pub power: f64,
}

/// Aggregates for the admin metrics screen. Groupings keep the order in which
/// a type or room first appears in the device list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub by_type: Vec<TypeCount>,
    pub by_room: Vec<RoomUsage>,
    pub total_power: f64,
    pub average_power: f64,

    /// Online devices as a percentage of all devices
    pub uptime: f64,
}

impl SystemMetrics {
    pub fn from_devices(devices: &[Device]) -> Self {
        let mut by_type: Vec<TypeCount> = vec![];
        let mut by_room: Vec<RoomUsage> = vec![];

        for device in devices {
            match by_type.iter_mut().find(|t| t.device_type == device.device_type) {
                Some(entry) => entry.devices += 1,
                None => by_type.push(TypeCount {
                    device_type: device.device_type,
                    devices: 1,
                }),
            }

            match by_room.iter_mut().find(|r| r.room == device.room) {
                Some(entry) => {
                    entry.devices += 1;
                    entry.power += device.power_consumption();
                }
                None => by_room.push(RoomUsage {
                    room: device.room.clone(),
                    devices: 1,
                    power: device.power_consumption(),
                }),
            }
        }

        let total_power = total_power(devices);
        let average_power = if devices.is_empty() {
            0.0
        } else {
            total_power / devices.len() as f64
        };
        let online = devices.iter().filter(|d| d.is_online).count();
        let uptime = if devices.is_empty() {
            0.0
        } else {
            online as f64 / devices.len() as f64 * 100.0
        };

        SystemMetrics {
            by_type,
            by_room,
            total_power,
            average_power,
            uptime,
        }
    }
}
