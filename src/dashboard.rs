use std::path::Path;

use color_eyre::Result;
use log::info;
use tokio::task::JoinHandle;

use crate::{
    fixtures::{builtin_seed, load_seed, Seed},
    settings::{Settings, TelemetrySettings},
    store::{telemetry::TelemetryTask, DeviceStore},
    views::{sensor_alerts, DashboardStats},
};

/// Owns a store together with its sensor telemetry.
///
/// Telemetry runs for as long as the dashboard lives and is cancelled by
/// [`Dashboard::shutdown`] or on drop.
pub struct Dashboard {
    store: DeviceStore,
    telemetry: TelemetryTask,
}

impl Dashboard {
    /// Seed from the configured fixture file, or the built-in demo home.
    pub fn start(settings: &Settings) -> Result<Self> {
        let seed = match &settings.fixtures.path {
            Some(path) => load_seed(Path::new(path))?,
            None => builtin_seed(),
        };

        Ok(Self::with_seed(seed, &settings.telemetry))
    }

    pub fn with_seed(seed: Seed, telemetry: &TelemetrySettings) -> Self {
        info!(
            "Seeding store with {} device(s) and {} notification(s)",
            seed.devices.len(),
            seed.notifications.len()
        );

        let store = DeviceStore::new(seed.devices, seed.notifications);
        let telemetry = TelemetryTask::spawn(&store, telemetry);

        Dashboard { store, telemetry }
    }

    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    pub async fn shutdown(self) {
        self.telemetry.stop().await;
    }
}

/// Log a one-line summary of every published snapshot.
pub fn start_snapshot_log_loop(store: &DeviceStore) -> JoinHandle<()> {
    let mut rx = store.subscribe();

    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            let stats = DashboardStats::from_devices(&snapshot.devices);

            info!(
                "v{}: {}/{} devices on, {} room(s), {}W, {}, {} unread",
                snapshot.version,
                stats.active_devices,
                stats.total_devices,
                snapshot.rooms().len(),
                stats.total_power,
                stats.system_status(),
                snapshot.unread_count()
            );

            for sensor in sensor_alerts(&snapshot.devices) {
                info!(
                    "{} in {} reads {}{}",
                    sensor.name,
                    sensor.room,
                    sensor.properties.value.unwrap_or_default(),
                    sensor.properties.unit.as_deref().unwrap_or_default()
                );
            }
        }
    })
}
