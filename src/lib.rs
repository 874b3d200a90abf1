//! Camera-Modes: capability-gated registry of camera capture modes
//!
//! This library maps mode identifiers to controller factories, registering
//! optional modes only when the device supports them. Capabilities can be
//! probed from a V4L2 device or supplied directly for testing.

pub mod config;
pub mod device;
pub mod modes;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use config::{CapabilityOverrides, ModesConfig};
pub use device::V4L2Probe;
pub use modes::{build_standard_modes, ModeIds};
pub use registry::{ModeAgent, ModeFactory, ModeRegistry, ModeRegistryBuilder};
pub use traits::{
    Capabilities, CapabilityProbe, ModeCatalog, ModeController, ModeError, ModeId, Result,
    UiEvent,
};
