use log::{debug, error, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use super::DeviceStore;
use crate::{model::DeviceType, settings::TelemetrySettings};

impl DeviceStore {
    /// Give each sensor a fresh reading with the configured probability.
    ///
    /// All drifted sensors are published together as a single snapshot.
    /// Returns how many sensors got a new reading.
    pub fn simulate_sensor_drift<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        settings: &TelemetrySettings,
    ) -> usize {
        let probability = settings.probability();
        let mut drifted = 0;

        self.modify(|state| {
            for device in state.devices.iter_mut() {
                if device.device_type != DeviceType::Sensor || !rng.gen_bool(probability) {
                    continue;
                }

                device.properties.value = Some(draw_reading(rng, settings));
                device.touch();
                drifted += 1;
            }

            drifted > 0
        });

        drifted
    }
}

/// Uniform reading between `min_value` and `max_value`, rounded to one decimal.
fn draw_reading<R: Rng + ?Sized>(rng: &mut R, settings: &TelemetrySettings) -> f64 {
    let value = if settings.min_value < settings.max_value {
        rng.gen_range(settings.min_value..settings.max_value)
    } else {
        settings.min_value
    };

    (value * 10.0).round() / 10.0
}

/// Background task that periodically drifts sensor readings.
///
/// The task runs until [`TelemetryTask::stop`] is called or the value is
/// dropped.
#[derive(Debug)]
pub struct TelemetryTask {
    handle: Option<JoinHandle<()>>,
}

impl TelemetryTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: &DeviceStore, settings: &TelemetrySettings) -> Self {
        let store = store.clone();
        let task_settings = settings.clone();

        let handle = tokio::spawn(async move {
            let settings = task_settings;
            let mut rng = StdRng::from_entropy();
            let mut ticks = interval(settings.interval());
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // The first tick completes immediately
            ticks.tick().await;

            loop {
                ticks.tick().await;

                let drifted = store.simulate_sensor_drift(&mut rng, &settings);
                trace!("Telemetry tick, {} sensor(s) drifted", drifted);
            }
        });

        debug!("Started sensor telemetry every {:?}", settings.interval());

        TelemetryTask {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Cancel the task and wait for it to wind down.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();

            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!("Sensor telemetry task failed: {:?}", e);
                }
            }

            debug!("Stopped sensor telemetry");
        }
    }
}

impl Drop for TelemetryTask {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
