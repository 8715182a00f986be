pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod rapier_scene;
pub mod registry;
pub mod spawn;
pub mod types;

pub use config::SceneConfig;
pub use constants::{
    BOX_SIZE, BOX_SPIN_FACTOR, GROUND_SIZE, OBJECT_MASS, PHYSICS_DT, SPHERE_COUNT, SPHERE_RADIUS,
};
pub use controller::{DragStyle, MotionController, MotionUpdate};
pub use engine::PhysicsEngine;
pub use error::DragError;
pub use rapier_scene::RapierScene;
pub use registry::{ObjectRegistry, PhysicsObject};
pub use spawn::{SpawnBounds, box_bounds, plan, sphere_bounds};
pub use types::{
    GesturePhase, GestureState, MassProps, MaterialProps, MotionMode, ObjectDesc, ObjectHandle,
    ObjectKind, Point3, Quat, Rgba, ShapeDef, Transform, Vec3,
};
