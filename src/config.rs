//! Mode configuration loaded from TOML.
//!
//! ```toml
//! [modes]
//! photo = 0
//! video = 1
//! craft = 4
//! hdr = 5
//!
//! [capabilities]
//! hdr = false
//! ```
//!
//! Every key is optional. Missing mode ids fall back to [`ModeIds::default`];
//! missing capability keys leave the probed value untouched. An optional mode
//! id set to `false` is left unconfigured, so enabling its capability fails
//! with [`ModeError::MissingModeId`](crate::ModeError::MissingModeId).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::modes::ModeIds;
use crate::traits::{Capabilities, Result};

/// Forced capability values, applied on top of a probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilityOverrides {
    /// Force panorama capture on or off.
    pub panorama: Option<bool>,
    /// Force refocus capture on or off.
    pub refocus: Option<bool>,
    /// Force HDR capture on or off.
    #[serde(alias = "gcam")]
    pub hdr: Option<bool>,
}

impl CapabilityOverrides {
    /// Replace probed flags with any configured value.
    #[must_use]
    pub fn apply(&self, probed: Capabilities) -> Capabilities {
        Capabilities {
            has_panorama_capture: self.panorama.unwrap_or(probed.has_panorama_capture),
            has_refocus_capture: self.refocus.unwrap_or(probed.has_refocus_capture),
            has_hdr_capture: self.hdr.unwrap_or(probed.has_hdr_capture),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModesConfig {
    /// Mode identifiers.
    pub modes: ModeIds,
    /// Capability overrides.
    pub capabilities: CapabilityOverrides,
}

impl ModesConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded mode configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock::{MockApp, MockCatalog};
    use crate::modes::build_standard_modes;
    use crate::traits::{ModeError, ModeId};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ModesConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, ModesConfig::default());
        assert_eq!(config.modes.photo, ModeId(0));
        assert_eq!(config.modes.panorama, Some(ModeId(6)));
    }

    #[test]
    fn test_partial_modes_table() {
        let config = ModesConfig::from_toml_str(
            r"
            [modes]
            photo = 10
            gcam = 17
            ",
        )
        .expect("config should parse");

        assert_eq!(config.modes.photo, ModeId(10));
        assert_eq!(config.modes.hdr, Some(ModeId(17)));
        assert_eq!(config.modes.video, ModeId(1));
    }

    #[test]
    fn test_negative_mode_id_rejected() {
        let err = ModesConfig::from_toml_str("[modes]\nphoto = -1\n")
            .expect_err("negative id must fail");
        assert!(matches!(err, ModeError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ModesConfig::from_toml_str("[modes]\nslowmo = 9\n")
            .expect_err("unknown mode must fail");
        assert!(matches!(err, ModeError::Config(_)));
    }

    #[test]
    fn test_overrides_apply_on_top_of_probe() {
        let config = ModesConfig::from_toml_str(
            r"
            [capabilities]
            panorama = false
            hdr = true
            ",
        )
        .expect("config should parse");

        let probed = Capabilities {
            has_panorama_capture: true,
            has_refocus_capture: true,
            has_hdr_capture: false,
        };
        let effective = config.capabilities.apply(probed);

        assert_eq!(
            effective,
            Capabilities {
                has_panorama_capture: false,
                has_refocus_capture: true,
                has_hdr_capture: true,
            }
        );
    }

    #[test]
    fn test_optional_id_opt_out() {
        let config = ModesConfig::from_toml_str(
            r"
            [modes]
            hdr = false

            [capabilities]
            hdr = true
            ",
        )
        .expect("config should parse");
        assert_eq!(config.modes.hdr, None);
        assert_eq!(config.modes.refocus, Some(ModeId(3)));

        let capabilities = config.capabilities.apply(Capabilities::NONE);
        let err = build_standard_modes::<MockApp, _>(
            &capabilities,
            &config.modes,
            &Arc::new(MockCatalog),
        )
        .expect_err("hdr without an id must fail");
        assert!(matches!(err, ModeError::MissingModeId("hdr")));
    }

    #[test]
    fn test_optional_id_true_rejected() {
        let err = ModesConfig::from_toml_str("[modes]\npanorama = true\n")
            .expect_err("`true` is not a mode id");
        assert!(matches!(err, ModeError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ModesConfig::load("/nonexistent/camera-modes.toml")
            .expect_err("missing file must fail");
        assert!(matches!(err, ModeError::Io(_)));
    }
}
