//! V4L2 capability probe using the v4l crate.

use v4l::capability::Flags;
use v4l::Device;

use crate::traits::{CapabilityProbe, ModeError, Result};

/// `V4L2_CID_EXPOSURE_ABSOLUTE`.
const CID_EXPOSURE_ABSOLUTE: u32 = 0x009a_0902;
/// `V4L2_CID_FOCUS_ABSOLUTE`.
const CID_FOCUS_ABSOLUTE: u32 = 0x009a_090a;

/// Capability probe backed by a V4L2 device.
///
/// - Panorama needs a continuous capture stream to stitch the sweep.
/// - Refocus needs manual focus control to sweep the focal plane.
/// - HDR needs manual exposure control to bracket.
#[derive(Debug, Clone, Default)]
pub struct V4L2Probe {
    driver: String,
    card: String,
    can_capture: bool,
    can_stream: bool,
    control_ids: Vec<u32>,
}

impl V4L2Probe {
    /// Open a V4L2 device by index (e.g., 0 for /dev/video0) and query it.
    pub fn open(index: u32) -> Result<Self> {
        let device = Device::new(index as usize)
            .map_err(|err| ModeError::DeviceOpenFailed(err.to_string()))?;

        let caps = device
            .query_caps()
            .map_err(|err| ModeError::DeviceOpenFailed(err.to_string()))?;

        let control_ids = match device.query_controls() {
            Ok(controls) => controls.into_iter().map(|control| control.id).collect(),
            Err(err) => {
                log::warn!("device {index}: control query failed, assuming none: {err}");
                Vec::new()
            }
        };

        let probe = Self {
            driver: caps.driver,
            card: caps.card,
            can_capture: caps.capabilities.contains(Flags::VIDEO_CAPTURE),
            can_stream: caps.capabilities.contains(Flags::STREAMING),
            control_ids,
        };
        log::debug!(
            "probed {} ({}): capture={} stream={} controls={}",
            probe.card,
            probe.driver,
            probe.can_capture,
            probe.can_stream,
            probe.control_ids.len()
        );
        Ok(probe)
    }

    /// Driver name.
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Card/device name.
    pub fn card(&self) -> &str {
        &self.card
    }

    fn has_control(&self, id: u32) -> bool {
        self.can_capture && self.control_ids.contains(&id)
    }
}

impl CapabilityProbe for V4L2Probe {
    fn has_panorama_capture(&self) -> bool {
        self.can_capture && self.can_stream
    }

    fn has_refocus_capture(&self) -> bool {
        self.has_control(CID_FOCUS_ABSOLUTE)
    }

    fn has_hdr_capture(&self) -> bool {
        self.has_control(CID_EXPOSURE_ABSOLUTE)
    }
}
