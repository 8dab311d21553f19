use crate::{
    fixtures::mock_users,
    model::{Device, DeviceDraft, User},
    store::DeviceStore,
    views::SystemMetrics,
};

/// Device and user management, only handed out to admins.
pub struct AdminPanel<'a> {
    store: &'a DeviceStore,
}

impl<'a> AdminPanel<'a> {
    pub fn open(user: &User, store: &'a DeviceStore) -> Option<Self> {
        user.is_admin().then_some(AdminPanel { store })
    }

    pub fn devices(&self) -> Vec<Device> {
        self.store.devices()
    }

    pub fn add_device(&self, draft: DeviceDraft) -> String {
        self.store.add_device(draft)
    }

    pub fn remove_device(&self, id: &str) {
        self.store.remove_device(id);
    }

    /// Flip a device's connectivity flag.
    pub fn toggle_online(&self, id: &str) {
        self.store.modify_device(id, |device| {
            device.is_online = !device.is_online;
            device.touch();
        });
    }

    pub fn users(&self) -> Vec<User> {
        mock_users()
    }

    pub fn metrics(&self) -> SystemMetrics {
        SystemMetrics::from_devices(&self.store.devices())
    }
}
