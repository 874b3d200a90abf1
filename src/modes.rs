//! Standard capture-mode wiring.
//!
//! [`build_standard_modes`] registers the always-present photo, craft and
//! video modes, then the optional panorama, photosphere, refocus and HDR
//! modes for whichever capabilities the device reports.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::registry::{ModeRegistry, ModeRegistryBuilder};
use crate::traits::{Capabilities, ModeCatalog, ModeController, ModeError, ModeId, Result};

/// Resolved identifiers for each logical capture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModeIds {
    /// Standard photo mode.
    pub photo: ModeId,
    /// Craft (quick capture) mode.
    pub craft: ModeId,
    /// Video mode.
    pub video: ModeId,
    /// Wide-angle panorama mode.
    #[serde(deserialize_with = "optional_id")]
    pub panorama: Option<ModeId>,
    /// Photosphere mode.
    #[serde(deserialize_with = "optional_id")]
    pub photosphere: Option<ModeId>,
    /// Refocus mode.
    #[serde(deserialize_with = "optional_id")]
    pub refocus: Option<ModeId>,
    /// HDR mode.
    #[serde(alias = "gcam", deserialize_with = "optional_id")]
    pub hdr: Option<ModeId>,
}

/// Optional mode id: an integer, or `false` to leave the mode unconfigured.
fn optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<ModeId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrOff {
        Id(ModeId),
        Off(bool),
    }

    match IdOrOff::deserialize(deserializer)? {
        IdOrOff::Id(id) => Ok(Some(id)),
        IdOrOff::Off(false) => Ok(None),
        IdOrOff::Off(true) => Err(serde::de::Error::custom(
            "expected a mode id or `false`",
        )),
    }
}

impl Default for ModeIds {
    fn default() -> Self {
        Self {
            photo: ModeId(0),
            video: ModeId(1),
            photosphere: Some(ModeId(2)),
            refocus: Some(ModeId(3)),
            craft: ModeId(4),
            hdr: Some(ModeId(5)),
            panorama: Some(ModeId(6)),
        }
    }
}

impl ModeIds {
    /// Ids for the always-present modes only.
    #[must_use]
    pub const fn required(photo: ModeId, craft: ModeId, video: ModeId) -> Self {
        Self {
            photo,
            craft,
            video,
            panorama: None,
            photosphere: None,
            refocus: None,
            hdr: None,
        }
    }

    /// Logical name of the mode [`build_standard_modes`] registers under `id`.
    ///
    /// Modes whose capability is absent are skipped. When ids collide, the
    /// mode registered last wins, matching the registry's overwrite order.
    pub fn name_of(&self, id: ModeId, capabilities: &Capabilities) -> Option<&'static str> {
        let gated = |enabled: bool, mode: Option<ModeId>| mode.filter(|_| enabled);
        [
            ("hdr", gated(capabilities.has_hdr_capture, self.hdr)),
            ("refocus", gated(capabilities.has_refocus_capture, self.refocus)),
            (
                "photosphere",
                gated(capabilities.has_panorama_capture, self.photosphere),
            ),
            ("panorama", gated(capabilities.has_panorama_capture, self.panorama)),
            ("video", Some(self.video)),
            ("craft", Some(self.craft)),
            ("photo", Some(self.photo)),
        ]
        .into_iter()
        .find_map(|(name, mode)| (mode == Some(id)).then_some(name))
    }
}

fn configured(id: Option<ModeId>, name: &'static str) -> Result<ModeId> {
    id.ok_or(ModeError::MissingModeId(name))
}

/// Wrap a catalog method as a registry factory.
fn delegate<C, K>(
    catalog: &Arc<K>,
    make: fn(&K, &C) -> Box<dyn ModeController>,
) -> impl Fn(&C) -> Box<dyn ModeController> + Send + Sync + 'static
where
    C: ?Sized + 'static,
    K: ModeCatalog<C> + Send + Sync + 'static,
{
    let catalog = Arc::clone(catalog);
    move |app: &C| make(catalog.as_ref(), app)
}

/// Build the registry of standard capture modes.
///
/// Photo is the default. Craft shares the photo controller under its own id.
/// HDR is the only mode that does not claim the camera on activation.
///
/// # Errors
///
/// Returns [`ModeError::MissingModeId`] when a capability is present but the
/// id of its mode was not configured.
pub fn build_standard_modes<C, K>(
    capabilities: &Capabilities,
    ids: &ModeIds,
    catalog: &Arc<K>,
) -> Result<ModeRegistry<C>>
where
    C: ?Sized + 'static,
    K: ModeCatalog<C> + Send + Sync + 'static,
{
    let mut builder = ModeRegistryBuilder::<C>::new();

    builder.register_mode(ids.photo, true, delegate(catalog, K::photo));
    builder.set_default(ids.photo);
    // Craft reuses the photo controller under its own id.
    builder.register_mode(ids.craft, true, delegate(catalog, K::photo));
    builder.register_mode(ids.video, true, delegate(catalog, K::video));

    if capabilities.has_panorama_capture {
        builder.register_mode(
            configured(ids.panorama, "panorama")?,
            true,
            delegate(catalog, K::wide_angle_panorama),
        );
        builder.register_mode(
            configured(ids.photosphere, "photosphere")?,
            true,
            delegate(catalog, K::photo_sphere),
        );
    }
    if capabilities.has_refocus_capture {
        builder.register_mode(
            configured(ids.refocus, "refocus")?,
            true,
            delegate(catalog, K::refocus),
        );
    }
    if capabilities.has_hdr_capture {
        builder.register_mode(configured(ids.hdr, "hdr")?, false, delegate(catalog, K::hdr));
    }

    let registry = builder.finish()?;
    log::info!(
        "registered {} capture modes, default {}",
        registry.len(),
        ids.photo
    );
    Ok(registry)
}
