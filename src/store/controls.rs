//! Single-property adjustments made from device cards and the admin table.
//!
//! These keep the rest of the property bag intact and clamp to the ranges the
//! controls offer. The raw [`DeviceStore::update_device`] stays permissive.

use crate::model::device::{BRIGHTNESS_RANGE, FAN_SPEED_RANGE, TEMPERATURE_RANGE};

use super::DeviceStore;

impl DeviceStore {
    pub fn set_brightness(&self, id: &str, brightness: f64) {
        let brightness = brightness.clamp(*BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end());

        self.modify_device(id, |device| {
            device.properties.brightness = Some(brightness);
            device.touch();
        });
    }

    pub fn set_fan_speed(&self, id: &str, speed: u8) {
        let speed = speed.clamp(*FAN_SPEED_RANGE.start(), *FAN_SPEED_RANGE.end());

        self.modify_device(id, |device| {
            device.properties.speed = Some(speed);
            device.touch();
        });
    }

    pub fn set_temperature(&self, id: &str, temperature: f64) {
        let temperature = temperature.clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end());

        self.modify_device(id, |device| {
            device.properties.temperature = Some(temperature);
            device.touch();
        });
    }

    pub fn set_online(&self, id: &str, is_online: bool) {
        self.modify_device(id, |device| {
            device.is_online = is_online;
            device.touch();
        });
    }
}
