use thiserror::Error;

use crate::types::ObjectHandle;

/// Errors reported by the planner, the motion controllers, the registry and the engine adapters.
///
/// All variants are local to the offending call: the request is dropped and no other
/// object's state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    /// Spawn geometry leaves no room on the ground (object wider than the ground, or
    /// non-finite/negative extents).
    #[error("invalid spawn bounds: half extent {half_extent} does not fit ground half size {ground_half_size}")]
    InvalidBounds {
        half_extent: f32,
        ground_half_size: f32,
    },

    /// The engine has no body for this handle (not created yet, or already torn down).
    ///
    /// See also [`Self::UnboundController`].
    #[error("object {0} is not bound to a physics body")]
    UnboundObject(ObjectHandle),

    /// A controller received a gesture before being attached to any object.
    ///
    /// The controller-side half of the unbound-object condition; [`Self::UnboundObject`] is
    /// the engine-side half. Match both with [`DragError::is_unbound`].
    #[error("motion controller is not bound to an object")]
    UnboundController,

    /// A gesture was dispatched to a handle the registry never spawned.
    #[error("unknown object handle {0}")]
    UnknownHandle(ObjectHandle),

    /// Scene configuration failed to parse or validate.
    #[error("config error: {0}")]
    Config(String),
}

impl DragError {
    /// Was the target object not registered, either with the controller or with the engine?
    pub fn is_unbound(&self) -> bool {
        matches!(self, DragError::UnboundObject(_) | DragError::UnboundController)
    }
}
