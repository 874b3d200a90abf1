//! Core traits and types for capture-mode registration.

use std::fmt;

use serde::Deserialize;

/// Application-defined identifier of a capture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ModeId(pub u32);

impl ModeId {
    /// Create a new `ModeId`.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ModeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Optional capture features supported by the current device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Wide-angle panorama and photosphere capture.
    pub has_panorama_capture: bool,
    /// Lens-blur refocus capture.
    pub has_refocus_capture: bool,
    /// HDR+ burst capture.
    pub has_hdr_capture: bool,
}

impl Capabilities {
    /// Capabilities with every optional feature absent.
    pub const NONE: Self = Self {
        has_panorama_capture: false,
        has_refocus_capture: false,
        has_hdr_capture: false,
    };

    /// Capabilities with every optional feature present.
    pub const ALL: Self = Self {
        has_panorama_capture: true,
        has_refocus_capture: true,
        has_hdr_capture: true,
    };

    /// Snapshot the answers of a probe into plain flags.
    #[must_use]
    pub fn probe(probe: &dyn CapabilityProbe) -> Self {
        Self {
            has_panorama_capture: probe.has_panorama_capture(),
            has_refocus_capture: probe.has_refocus_capture(),
            has_hdr_capture: probe.has_hdr_capture(),
        }
    }
}

/// Answers whether the device supports each optional capture feature.
pub trait CapabilityProbe {
    /// Whether panorama (and photosphere) capture is available.
    fn has_panorama_capture(&self) -> bool;

    /// Whether refocus capture is available.
    fn has_refocus_capture(&self) -> bool;

    /// Whether HDR capture is available.
    fn has_hdr_capture(&self) -> bool;
}

impl CapabilityProbe for Capabilities {
    fn has_panorama_capture(&self) -> bool {
        self.has_panorama_capture
    }

    fn has_refocus_capture(&self) -> bool {
        self.has_refocus_capture
    }

    fn has_hdr_capture(&self) -> bool {
        self.has_hdr_capture
    }
}

/// UI events forwarded to the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Shutter button pressed.
    ShutterPressed,
    /// Shutter button released.
    ShutterReleased,
    /// Preview surface tapped at the given coordinates.
    PreviewTapped {
        /// X coordinate in preview pixels.
        x: u32,
        /// Y coordinate in preview pixels.
        y: u32,
    },
    /// The application moved to the background.
    Paused,
    /// The application returned to the foreground.
    Resumed,
}

/// A running capture mode.
pub trait ModeController: Send {
    /// Begin capturing in this mode.
    fn start_capture(&mut self) -> Result<()>;

    /// Stop capturing and release per-mode state.
    fn stop_capture(&mut self) -> Result<()>;

    /// Handle a UI event. Returns `true` if the event was consumed.
    fn handle_event(&mut self, event: UiEvent) -> bool;
}

/// Constructors for every capture mode the application knows about.
///
/// `C` is the application context handed to each factory.
pub trait ModeCatalog<C: ?Sized> {
    /// Standard still photo mode.
    fn photo(&self, app: &C) -> Box<dyn ModeController>;

    /// Video recording mode.
    fn video(&self, app: &C) -> Box<dyn ModeController>;

    /// Wide-angle panorama mode.
    fn wide_angle_panorama(&self, app: &C) -> Box<dyn ModeController>;

    /// 360-degree photosphere mode.
    fn photo_sphere(&self, app: &C) -> Box<dyn ModeController>;

    /// Lens-blur refocus mode.
    fn refocus(&self, app: &C) -> Box<dyn ModeController>;

    /// HDR burst mode.
    fn hdr(&self, app: &C) -> Box<dyn ModeController>;
}

/// Error type for mode registration and probing.
#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    /// The default mode id does not name a registered mode.
    #[error("default mode {0} is not registered")]
    DefaultNotRegistered(ModeId),
    /// No mode is registered under the requested id.
    #[error("mode {0} is not registered")]
    UnknownMode(ModeId),
    /// A capability is present but its mode id was never configured.
    #[error("no mode id configured for {0} mode")]
    MissingModeId(&'static str),
    /// Configuration file could not be parsed.
    #[error("invalid mode configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to open the probed device.
    #[error("failed to open device: {0}")]
    DeviceOpenFailed(String),
    /// A mode controller failed to start or stop.
    #[error("controller error: {0}")]
    Controller(String),
}

/// Result type for mode operations.
pub type Result<T> = std::result::Result<T, ModeError>;
