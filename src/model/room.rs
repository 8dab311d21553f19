use serde::Serialize;

use super::device::Device;

/// The only room with ambient readings. There is no environmental model
/// behind these numbers.
const AMBIENT_ROOM: &str = "Living Room";
const AMBIENT_TEMPERATURE: f64 = 24.5;
const AMBIENT_HUMIDITY: f64 = 65.0;

/// Devices sharing a room label. Rooms are never stored, only derived.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub devices: Vec<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

impl Room {
    fn new(name: &str, devices: Vec<Device>) -> Self {
        let ambient = name == AMBIENT_ROOM;

        Room {
            id: room_slug(name),
            name: name.to_string(),
            devices,
            temperature: ambient.then_some(AMBIENT_TEMPERATURE),
            humidity: ambient.then_some(AMBIENT_HUMIDITY),
        }
    }
}

/// Group devices by their room label, in order of first appearance.
pub fn group_by_room(devices: &[Device]) -> Vec<Room> {
    let mut names: Vec<&str> = vec![];

    for device in devices {
        if !names.contains(&device.room.as_str()) {
            names.push(&device.room);
        }
    }

    names
        .into_iter()
        .map(|name| {
            let members = devices
                .iter()
                .filter(|device| device.room == name)
                .cloned()
                .collect();

            Room::new(name, members)
        })
        .collect()
}

/// Lowercase the name and collapse each whitespace run into a single `-`.
fn room_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    slug
}
