pub mod device;
pub mod notification;
pub mod room;
pub mod user;

pub use device::{
    AcMode, Device, DeviceDraft, DeviceDraftBuilder, DeviceProperties, DevicePropertiesBuilder,
    DeviceStatus, DeviceType, DeviceUpdate, DeviceUpdateBuilder,
};
pub use notification::{Notification, NotificationKind};
pub use room::{group_by_room, Room};
pub use user::{Role, User};
