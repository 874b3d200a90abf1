//! Mode registry: a lookup table from mode id to controller factory.
//!
//! Registration happens on a [`ModeRegistryBuilder`]. [`ModeRegistryBuilder::finish`]
//! validates the default and yields an immutable [`ModeRegistry`] that can be
//! shared between threads.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::traits::{ModeController, ModeError, ModeId, Result};

/// Shared constructor for a mode controller.
pub type ModeFactory<C> = Arc<dyn Fn(&C) -> Box<dyn ModeController> + Send + Sync>;

/// Registry entry describing how to construct a mode.
pub struct ModeAgent<C: ?Sized> {
    mode_id: ModeId,
    requires_camera_resource: bool,
    factory: ModeFactory<C>,
}

impl<C: ?Sized> ModeAgent<C> {
    /// Identifier this agent is registered under.
    pub const fn mode_id(&self) -> ModeId {
        self.mode_id
    }

    /// Whether switching to this mode needs exclusive camera ownership.
    pub const fn requires_camera_resource(&self) -> bool {
        self.requires_camera_resource
    }

    /// Construct a fresh controller for this mode.
    pub fn create(&self, app: &C) -> Box<dyn ModeController> {
        (self.factory)(app)
    }
}

impl<C: ?Sized> Clone for ModeAgent<C> {
    fn clone(&self) -> Self {
        Self {
            mode_id: self.mode_id,
            requires_camera_resource: self.requires_camera_resource,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ModeAgent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeAgent")
            .field("mode_id", &self.mode_id)
            .field("requires_camera_resource", &self.requires_camera_resource)
            .finish_non_exhaustive()
    }
}

/// A registry under construction.
pub struct ModeRegistryBuilder<C: ?Sized> {
    agents: IndexMap<ModeId, ModeAgent<C>>,
    default_mode_id: Option<ModeId>,
}

impl<C: ?Sized> Default for ModeRegistryBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> ModeRegistryBuilder<C> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agents: IndexMap::new(),
            default_mode_id: None,
        }
    }

    /// Register a mode, replacing any agent already under `id`.
    ///
    /// A replaced agent keeps its original position in the listing order.
    pub fn register_mode<F>(&mut self, id: ModeId, requires_camera_resource: bool, factory: F)
    where
        F: Fn(&C) -> Box<dyn ModeController> + Send + Sync + 'static,
    {
        let agent = ModeAgent {
            mode_id: id,
            requires_camera_resource,
            factory: Arc::new(factory),
        };
        if self.agents.insert(id, agent).is_some() {
            log::warn!("mode {id} re-registered, previous agent replaced");
        } else {
            log::debug!("mode {id} registered (requires camera: {requires_camera_resource})");
        }
    }

    /// Remove a mode. Returns `true` if it was registered.
    pub fn unregister_mode(&mut self, id: ModeId) -> bool {
        self.agents.shift_remove(&id).is_some()
    }

    /// Mark `id` as the default mode.
    ///
    /// The id does not need to be registered yet; [`Self::finish`] checks it.
    pub fn set_default(&mut self, id: ModeId) {
        self.default_mode_id = Some(id);
    }

    /// Look up an agent registered so far.
    pub fn lookup(&self, id: ModeId) -> Option<&ModeAgent<C>> {
        self.agents.get(&id)
    }

    /// Finalize the registry.
    ///
    /// Fails if a default was set but no mode is registered under it.
    pub fn finish(self) -> Result<ModeRegistry<C>> {
        if let Some(default) = self.default_mode_id {
            if !self.agents.contains_key(&default) {
                return Err(ModeError::DefaultNotRegistered(default));
            }
        }
        Ok(ModeRegistry {
            agents: self.agents,
            default_mode_id: self.default_mode_id,
        })
    }
}

/// A finalized, read-only mode registry.
pub struct ModeRegistry<C: ?Sized> {
    agents: IndexMap<ModeId, ModeAgent<C>>,
    default_mode_id: Option<ModeId>,
}

impl<C: ?Sized> ModeRegistry<C> {
    /// Agent registered under `id`, if any.
    pub fn lookup(&self, id: ModeId) -> Option<&ModeAgent<C>> {
        self.agents.get(&id)
    }

    /// Whether a mode is registered under `id`.
    pub fn contains(&self, id: ModeId) -> bool {
        self.agents.contains_key(&id)
    }

    /// The default mode, if one was set.
    pub const fn default_mode_id(&self) -> Option<ModeId> {
        self.default_mode_id
    }

    /// Registered ids in registration order.
    pub fn registered_ids(&self) -> Vec<ModeId> {
        self.agents.keys().copied().collect()
    }

    /// Registered agents in registration order.
    pub fn agents(&self) -> impl Iterator<Item = &ModeAgent<C>> {
        self.agents.values()
    }

    /// Number of registered modes.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no mode is registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Construct the controller for `id`, or `None` if it is not registered.
    pub fn create_controller(&self, id: ModeId, app: &C) -> Option<Box<dyn ModeController>> {
        self.lookup(id).map(|agent| agent.create(app))
    }
}

impl<C: ?Sized> fmt::Debug for ModeRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("agents", &self.agents.values().collect::<Vec<_>>())
            .field("default_mode_id", &self.default_mode_id)
            .finish()
    }
}
