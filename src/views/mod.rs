//! Read-only projections over a [`crate::store::HomeSnapshot`].

pub mod metrics;
pub mod stats;
pub mod tone;

pub use metrics::{RoomUsage, SystemMetrics, TypeCount};
pub use stats::{sensor_alerts, DashboardStats, RoomSummary};
pub use tone::{light_output, DeviceTone, NotificationTone};
