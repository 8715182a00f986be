//! Gesture-driven motion mode controller.
//!
//! One [`MotionController`] drives one object. It turns the object's drag gesture stream into
//! [`MotionMode`] transitions and velocity writes on the physics engine.
//!
//! # Drag styles
//! - [`DragStyle::Translate`] (spheres): the object is dynamic until grabbed. `Began` makes it
//!   kinematic, each `Changed` writes a horizontal linear velocity, `Ended`/`Cancelled` hand it
//!   back to the simulation with whatever velocity it carries.
//! - [`DragStyle::Spin`] (box): the object is always kinematic. Every event, whatever its phase,
//!   writes an angular velocity about +Y proportional to the drag speed.
//!
//! Transitions not listed above (a second `Began` while held, `Changed` while dynamic, ...)
//! are no-ops rather than errors; gesture sources are expected to emit well-formed
//! `Began, Changed*, Ended|Cancelled` sequences.

use log::{debug, trace};

use crate::{
    constants::BOX_SPIN_FACTOR,
    engine::PhysicsEngine,
    error::DragError,
    types::{GesturePhase, GestureState, MotionMode, ObjectHandle, ObjectKind, Vec3},
};

/// How drags act on the controlled object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragStyle {
    /// Move in the horizontal plane while held; dynamic otherwise.
    Translate,
    /// Spin about +Y at `factor * |drag velocity|`; permanently kinematic.
    Spin { factor: f32 },
}

impl DragStyle {
    pub fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Sphere => DragStyle::Translate,
            ObjectKind::Box => DragStyle::Spin {
                factor: BOX_SPIN_FACTOR,
            },
        }
    }
}

/// What one gesture event did to the object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionUpdate {
    /// Mode after the event.
    pub mode: MotionMode,
    /// Whether this event changed the mode.
    pub mode_changed: bool,
    /// Linear velocity written this event (parent frame), if any.
    pub linear_velocity: Option<Vec3>,
    /// Angular velocity written this event (parent frame), if any.
    pub angular_velocity: Option<Vec3>,
}

impl MotionUpdate {
    fn unchanged(mode: MotionMode) -> Self {
        Self {
            mode,
            mode_changed: false,
            linear_velocity: None,
            angular_velocity: None,
        }
    }

    fn transition(mode: MotionMode) -> Self {
        Self {
            mode_changed: true,
            ..Self::unchanged(mode)
        }
    }
}

#[derive(Clone, Debug)]
pub struct MotionController {
    target: Option<ObjectHandle>,
    style: DragStyle,
    mode: MotionMode,
}

impl MotionController {
    /// Unbound controller with the style and initial mode of `kind`.
    pub fn new(kind: ObjectKind) -> Self {
        Self::with_style(DragStyle::for_kind(kind))
    }

    pub fn with_style(style: DragStyle) -> Self {
        let mode = match style {
            DragStyle::Translate => MotionMode::Dynamic,
            DragStyle::Spin { .. } => MotionMode::Kinematic,
        };
        Self {
            target: None,
            style,
            mode,
        }
    }

    /// Attach the controller to the object it drives.
    pub fn bind(&mut self, handle: ObjectHandle) {
        self.target = Some(handle);
    }

    pub fn bound(mut self, handle: ObjectHandle) -> Self {
        self.bind(handle);
        self
    }

    pub fn target(&self) -> Option<ObjectHandle> {
        self.target
    }

    pub fn style(&self) -> DragStyle {
        self.style
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Apply one gesture event to the bound object.
    ///
    /// Errors
    /// - [`DragError::UnboundController`] if [`Self::bind`] was never called.
    /// - [`DragError::UnboundObject`] if the engine has no body for the target.
    ///
    /// Both are detected before anything is written, so a failed call leaves the object and
    /// the controller untouched.
    pub fn apply<E: PhysicsEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        gesture: &GestureState,
    ) -> Result<MotionUpdate, DragError> {
        let handle = self.target.ok_or(DragError::UnboundController)?;
        let parent = engine.parent_transform(handle)?;
        let velocity = parent.vector_to_local(&gesture.velocity);

        trace!(
            "object {handle}: {:?} in {:?}, velocity {:?}",
            gesture.phase, self.mode, velocity
        );

        match self.style {
            DragStyle::Translate => self.translate(engine, handle, gesture.phase, velocity),
            DragStyle::Spin { factor } => {
                let angular = Vec3::new(0.0, velocity.norm() * factor, 0.0);
                engine.set_angular_velocity(handle, angular)?;
                Ok(MotionUpdate {
                    angular_velocity: Some(angular),
                    ..MotionUpdate::unchanged(self.mode)
                })
            }
        }
    }

    fn translate<E: PhysicsEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        handle: ObjectHandle,
        phase: GesturePhase,
        velocity: Vec3,
    ) -> Result<MotionUpdate, DragError> {
        match (phase, self.mode) {
            (GesturePhase::Began, MotionMode::Dynamic) => {
                self.switch(engine, handle, MotionMode::Kinematic)
            }
            (GesturePhase::Changed, MotionMode::Kinematic) => {
                // Vertical drag is ignored; held objects slide on the ground plane.
                let linear = Vec3::new(velocity.x, 0.0, velocity.z);
                engine.set_linear_velocity(handle, linear)?;
                Ok(MotionUpdate {
                    linear_velocity: Some(linear),
                    ..MotionUpdate::unchanged(self.mode)
                })
            }
            (GesturePhase::Ended | GesturePhase::Cancelled, MotionMode::Kinematic) => {
                self.switch(engine, handle, MotionMode::Dynamic)
            }
            _ => Ok(MotionUpdate::unchanged(self.mode)),
        }
    }

    fn switch<E: PhysicsEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        handle: ObjectHandle,
        mode: MotionMode,
    ) -> Result<MotionUpdate, DragError> {
        engine.set_mode(handle, mode)?;
        debug!("object {handle}: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        Ok(MotionUpdate::transition(mode))
    }
}
