use std::sync::Arc;

use chrono::Utc;
use log::{debug, trace};
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::model::{group_by_room, Device, DeviceDraft, DeviceUpdate, Notification, Room};

pub mod controls;
pub mod telemetry;

/// Everything the dashboard shows, as of one point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSnapshot {
    /// Bumped once for every accepted mutation
    pub version: u64,

    /// In insertion order
    pub devices: Vec<Device>,

    /// Newest first
    pub notifications: Vec<Notification>,
}

impl HomeSnapshot {
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.id == id)
    }

    pub fn rooms(&self) -> Vec<Room> {
        group_by_room(&self.devices)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count()
    }
}

/// Shared handle to the in-memory home state.
///
/// Clones point at the same state. Every accepted mutation publishes exactly
/// one new snapshot to subscribers; operations on unknown ids change nothing
/// and publish nothing.
#[derive(Clone, Debug)]
pub struct DeviceStore {
    state: Arc<watch::Sender<HomeSnapshot>>,
}

impl DeviceStore {
    pub fn new(devices: Vec<Device>, notifications: Vec<Notification>) -> Self {
        let (state, _) = watch::channel(HomeSnapshot {
            version: 0,
            devices,
            notifications,
        });

        DeviceStore {
            state: Arc::new(state),
        }
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        self.state.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    pub fn devices(&self) -> Vec<Device> {
        self.state.borrow().devices.clone()
    }

    pub fn device(&self, id: &str) -> Option<Device> {
        self.state.borrow().device(id).cloned()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.borrow().notifications.clone()
    }

    /// Devices grouped by room, recomputed on every call.
    pub fn rooms(&self) -> Vec<Room> {
        self.state.borrow().rooms()
    }

    /// Receive a new snapshot after each accepted mutation.
    pub fn subscribe(&self) -> watch::Receiver<HomeSnapshot> {
        self.state.subscribe()
    }

    /// Add a device and announce it with a notification. Returns the new id.
    pub fn add_device(&self, draft: DeviceDraft) -> String {
        let device = Device::from_draft(Uuid::new_v4().to_string(), draft, Utc::now());
        let notification = Notification::device_added(&device);
        let id = device.id.clone();

        debug!("Adding device {} ({}) to room {:?}", id, device.name, device.room);

        self.modify(|state| {
            state.devices.push(device);
            state.notifications.insert(0, notification);
            true
        });

        id
    }

    /// Shallow-merge `update` into the device. No-op for unknown ids.
    pub fn update_device(&self, id: &str, update: DeviceUpdate) {
        self.modify_device(id, |device| device.apply(update));
    }

    /// Remove the device. Notifications pointing at it are kept.
    pub fn remove_device(&self, id: &str) {
        let removed = self.modify(|state| {
            let len = state.devices.len();
            state.devices.retain(|device| device.id != id);
            state.devices.len() != len
        });

        if removed {
            debug!("Removed device {}", id);
        } else {
            trace!("remove_device: no device with id {}", id);
        }
    }

    /// Switch the device on or off, see [`Device::toggle_power`].
    pub fn toggle_device(&self, id: &str) {
        self.modify_device(id, Device::toggle_power);
    }

    pub fn mark_notification_read(&self, id: &str) {
        self.modify(|state| {
            match state
                .notifications
                .iter_mut()
                .find(|notification| notification.id == id)
            {
                Some(notification) if !notification.is_read => {
                    notification.is_read = true;
                    true
                }
                _ => false,
            }
        });
    }

    pub fn clear_all_notifications(&self) {
        self.modify(|state| {
            let had_notifications = !state.notifications.is_empty();
            state.notifications.clear();
            had_notifications
        });
    }

    /// Run `f` on the device with the given id, publishing if it exists.
    pub(crate) fn modify_device(&self, id: &str, f: impl FnOnce(&mut Device)) -> bool {
        let found = self.modify(|state| match state.devices.iter_mut().find(|d| d.id == id) {
            Some(device) => {
                f(device);
                true
            }
            None => false,
        });

        if !found {
            trace!("No device with id {}", id);
        }

        found
    }

    /// Apply `f` atomically. Subscribers are notified only when `f` reports a
    /// change.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut HomeSnapshot) -> bool) -> bool {
        self.state.send_if_modified(|state| {
            let changed = f(state);
            if changed {
                state.version += 1;
            }
            changed
        })
    }
}
