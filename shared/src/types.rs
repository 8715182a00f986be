/*!
Core data types shared by the planner, the motion controller, the registry and
the engine adapters.

This module intentionally contains no algorithms. Positions are owned by the
physics engine; the types here only describe what to create and what to write.
*/

use nalgebra as na;
use std::fmt;

use crate::constants::{
    BOX_FRICTION, BOX_RESTITUTION, OBJECT_MASS, SPHERE_FRICTION, SPHERE_RESTITUTION,
};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// Opaque identity of an object created through a [`crate::PhysicsEngine`].
///
/// Handles are issued by the engine and never reused within one scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who owns an object's motion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionMode {
    /// The physics engine integrates the body (gravity, contacts, restitution).
    Dynamic,
    /// The body moves only by explicitly written velocities.
    Kinematic,
}

/// The two kinds of draggable objects in the scene.
///
/// The kind decides shape, physics material, initial [`MotionMode`] and which drag
/// behavior its controller uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Dragged across the ground; dynamic whenever it is not held.
    Sphere,
    /// Spun in place by drags; always kinematic.
    Box,
}

impl ObjectKind {
    pub fn initial_mode(self) -> MotionMode {
        match self {
            ObjectKind::Sphere => MotionMode::Dynamic,
            ObjectKind::Box => MotionMode::Kinematic,
        }
    }

    pub fn mass_props(self) -> MassProps {
        MassProps { mass: OBJECT_MASS }
    }

    pub fn material_props(self) -> MaterialProps {
        match self {
            ObjectKind::Sphere => MaterialProps {
                friction: SPHERE_FRICTION,
                restitution: SPHERE_RESTITUTION,
            },
            ObjectKind::Box => MaterialProps {
                friction: BOX_FRICTION,
                restitution: BOX_RESTITUTION,
            },
        }
    }
}

/// Shape used for both the render mesh and the collision shape of an object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeDef {
    /// Sphere/ball (meters).
    Sphere { radius: f32 },
    /// Axis-aligned cuboid with given half-extents (meters).
    Cuboid { half_extents: Vec3 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassProps {
    /// Kilograms.
    pub mass: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialProps {
    pub friction: f32,
    pub restitution: f32,
}

/// Display color, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const GREEN: Rgba = Rgba([0, 255, 0, 255]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);
    pub const BLUE: Rgba = Rgba([0, 0, 255, 255]);
    pub const MAGENTA: Rgba = Rgba([255, 0, 255, 255]);
    pub const YELLOW: Rgba = Rgba([255, 255, 0, 255]);

    /// Colors handed out to spheres in spawn order.
    pub const PALETTE: [Rgba; 5] = [
        Rgba::GREEN,
        Rgba::RED,
        Rgba::BLUE,
        Rgba::MAGENTA,
        Rgba::YELLOW,
    ];
}

/// Everything an engine needs to create one draggable object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObjectDesc {
    pub kind: ObjectKind,
    pub shape: ShapeDef,
    pub mass: MassProps,
    pub material: MaterialProps,
    pub initial_mode: MotionMode,
    pub color: Rgba,
    /// Spawn position in the parent (anchor) frame.
    pub position: Point3,
}

/// A rigid transform (isometry) of a parent frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub fn identity() -> Self {
        Self::new(Vec3::zeros(), Quat::identity())
    }

    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Convert to nalgebra `Isometry3` for use with Rapier.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }

    /// Express a world-space direction (velocity) in this frame. Translation is ignored.
    #[inline]
    pub fn vector_to_local(&self, world: &Vec3) -> Vec3 {
        self.rotation.inverse_transform_vector(world)
    }

    /// Express a direction given in this frame in world space. Translation is ignored.
    #[inline]
    pub fn vector_to_world(&self, local: &Vec3) -> Vec3 {
        self.rotation.transform_vector(local)
    }
}

/// Phase of a drag gesture, as reported by the gesture source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One drag gesture event for a single object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureState {
    pub phase: GesturePhase,
    /// World-space drag velocity (m/s). Resolved into the object's parent frame before use.
    pub velocity: Vec3,
}

impl GestureState {
    pub fn new(phase: GesturePhase, velocity: Vec3) -> Self {
        Self { phase, velocity }
    }

    pub fn began() -> Self {
        Self::new(GesturePhase::Began, Vec3::zeros())
    }

    pub fn changed(velocity: Vec3) -> Self {
        Self::new(GesturePhase::Changed, velocity)
    }

    pub fn ended() -> Self {
        Self::new(GesturePhase::Ended, Vec3::zeros())
    }

    pub fn cancelled() -> Self {
        Self::new(GesturePhase::Cancelled, Vec3::zeros())
    }
}
