//! Device registry and per-evaluation status map.

pub mod registry;
pub mod status;

pub use registry::{DeviceEntry, DeviceRegistry, ESSENTIAL_PRIORITY};
pub use status::{COOLING, DeviceStatusMap, HEATING};
