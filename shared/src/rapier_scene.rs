//! Rapier-backed implementation of the [`PhysicsEngine`] port.
//!
//! The scene mirrors an anchored AR layout:
//! - An anchor [`Transform`] is the parent frame of every object. Positions and velocities
//!   crossing the port are in anchor space; Rapier itself works in world space.
//! - A fixed ground slab of side `ground_size` sits under the anchor, its top face on the
//!   anchor's `y = 0` plane.
//! - Spheres become balls and boxes become cuboids, each on its own rigid body with the
//!   requested mass/friction/restitution.
//! - [`MotionMode::Dynamic`] maps to `RigidBodyType::Dynamic`, [`MotionMode::Kinematic`] to
//!   `RigidBodyType::KinematicVelocityBased`, so written velocities drive kinematic bodies and
//!   dynamic bodies keep whatever velocity they had when released.
//!
//! Determinism: handles are issued sequentially and bodies are inserted in creation order.

// Re-export Rapier so downstream crates can reach its types without depending on
// `rapier3d` directly.
pub use rapier3d;

use log::debug;
use rapier3d::prelude::*;
use std::collections::HashMap;

use crate::{
    config::SceneConfig,
    constants::{GRAVITY_MPS2, GROUND_HALF_THICKNESS},
    engine::PhysicsEngine,
    error::DragError,
    types::{Iso, MotionMode, ObjectDesc, ObjectHandle, Point3, Quat, ShapeDef, Transform, Vec3},
};

pub struct RapierScene {
    anchor: Transform,
    gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    handles: HashMap<ObjectHandle, RigidBodyHandle>,
    next_id: u32,
}

impl RapierScene {
    /// Build an empty scene with a ground of side `ground_size` under `anchor`, stepping at `dt`.
    pub fn new(anchor: Transform, ground_size: f32, dt: f32) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        let ground_body = bodies.insert(RigidBodyBuilder::fixed().pose(anchor.iso()).build());
        let half = ground_size / 2.0;
        let ground = ColliderBuilder::cuboid(half, GROUND_HALF_THICKNESS, half)
            .translation(Vec3::new(0.0, -GROUND_HALF_THICKNESS, 0.0))
            .build();
        colliders.insert_with_parent(ground, ground_body, &mut bodies);

        Self {
            anchor,
            gravity: Vec3::new(0.0, -GRAVITY_MPS2, 0.0),
            integration_parameters: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handles: HashMap::new(),
            next_id: 0,
        }
    }

    /// Scene for `config` anchored at `anchor`.
    pub fn from_config(anchor: Transform, config: &SceneConfig) -> Self {
        Self::new(anchor, config.ground_size, config.physics_dt)
    }

    pub fn anchor(&self) -> Transform {
        self.anchor
    }

    /// Advance the simulation by one timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    pub fn step_n(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Object center in anchor space.
    pub fn translation(&self, handle: ObjectHandle) -> Result<Vec3, DragError> {
        let body = self.body(handle)?;
        let world = Point3::from(*body.translation());
        Ok(self.anchor.iso().inverse_transform_point(&world).coords)
    }

    /// Object center in world space.
    pub fn world_translation(&self, handle: ObjectHandle) -> Result<Vec3, DragError> {
        Ok(*self.body(handle)?.translation())
    }

    /// Object orientation relative to the anchor.
    pub fn rotation(&self, handle: ObjectHandle) -> Result<Quat, DragError> {
        Ok(self.anchor.rotation.inverse() * self.body(handle)?.rotation())
    }

    /// Simulated linear velocity in anchor space.
    pub fn linear_velocity(&self, handle: ObjectHandle) -> Result<Vec3, DragError> {
        Ok(self.anchor.vector_to_local(self.body(handle)?.linvel()))
    }

    /// Simulated angular velocity in anchor space.
    pub fn angular_velocity(&self, handle: ObjectHandle) -> Result<Vec3, DragError> {
        Ok(self.anchor.vector_to_local(self.body(handle)?.angvel()))
    }

    /// Current mode as seen by Rapier.
    pub fn mode(&self, handle: ObjectHandle) -> Result<MotionMode, DragError> {
        Ok(match self.body(handle)?.body_type() {
            RigidBodyType::Dynamic => MotionMode::Dynamic,
            _ => MotionMode::Kinematic,
        })
    }

    fn body(&self, handle: ObjectHandle) -> Result<&RigidBody, DragError> {
        self.handles
            .get(&handle)
            .and_then(|h| self.bodies.get(*h))
            .ok_or(DragError::UnboundObject(handle))
    }

    fn body_mut(&mut self, handle: ObjectHandle) -> Result<&mut RigidBody, DragError> {
        self.handles
            .get(&handle)
            .and_then(|h| self.bodies.get_mut(*h))
            .ok_or(DragError::UnboundObject(handle))
    }
}

impl PhysicsEngine for RapierScene {
    fn create_object(&mut self, desc: &ObjectDesc) -> ObjectHandle {
        let pose: Iso = self.anchor.iso()
            * Iso::translation(desc.position.x, desc.position.y, desc.position.z);
        let body = rigid_body_builder(desc.initial_mode).pose(pose).build();
        let rb_handle = self.bodies.insert(body);

        let collider = collider_builder(&desc.shape)
            .mass(desc.mass.mass)
            .friction(desc.material.friction)
            .restitution(desc.material.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, rb_handle, &mut self.bodies);

        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.handles.insert(handle, rb_handle);

        debug!("rapier: created {:?} {handle} as {:?}", desc.kind, desc.initial_mode);
        handle
    }

    fn set_mode(&mut self, handle: ObjectHandle, mode: MotionMode) -> Result<(), DragError> {
        self.body_mut(handle)?.set_body_type(body_type(mode), true);
        Ok(())
    }

    fn set_linear_velocity(&mut self, handle: ObjectHandle, velocity: Vec3) -> Result<(), DragError> {
        let world = self.anchor.vector_to_world(&velocity);
        self.body_mut(handle)?.set_linvel(world, true);
        Ok(())
    }

    fn set_angular_velocity(
        &mut self,
        handle: ObjectHandle,
        velocity: Vec3,
    ) -> Result<(), DragError> {
        let world = self.anchor.vector_to_world(&velocity);
        self.body_mut(handle)?.set_angvel(world, true);
        Ok(())
    }

    fn parent_transform(&self, handle: ObjectHandle) -> Result<Transform, DragError> {
        self.body(handle)?;
        Ok(self.anchor)
    }
}

fn body_type(mode: MotionMode) -> RigidBodyType {
    match mode {
        MotionMode::Dynamic => RigidBodyType::Dynamic,
        MotionMode::Kinematic => RigidBodyType::KinematicVelocityBased,
    }
}

fn rigid_body_builder(mode: MotionMode) -> RigidBodyBuilder {
    match mode {
        MotionMode::Dynamic => RigidBodyBuilder::dynamic(),
        MotionMode::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
    }
}

fn collider_builder(shape: &ShapeDef) -> ColliderBuilder {
    match shape {
        ShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),
        ShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registry::ObjectRegistry,
        types::{GestureState, ObjectKind, Rgba},
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn scene() -> (RapierScene, SceneConfig) {
        let config = SceneConfig::default();
        (RapierScene::from_config(Transform::identity(), &config), config)
    }

    #[test]
    fn modes_map_to_rapier_body_types() {
        let (mut scene, config) = scene();
        let sphere = scene.create_object(&config.object_desc(
            ObjectKind::Sphere,
            Point3::new(0.0, 0.2, 0.0),
            Rgba::RED,
        ));
        let cube = scene.create_object(&config.object_desc(
            ObjectKind::Box,
            Point3::new(0.1, 0.03, 0.0),
            Rgba::GREEN,
        ));

        assert_eq!(scene.mode(sphere), Ok(MotionMode::Dynamic));
        assert_eq!(scene.mode(cube), Ok(MotionMode::Kinematic));

        scene.set_mode(sphere, MotionMode::Kinematic).unwrap();
        assert_eq!(scene.mode(sphere), Ok(MotionMode::Kinematic));
        scene.set_mode(sphere, MotionMode::Dynamic).unwrap();
        assert_eq!(scene.mode(sphere), Ok(MotionMode::Dynamic));
    }

    #[test]
    fn kinematic_sphere_follows_written_velocity() {
        let (mut scene, config) = scene();
        let h = scene.create_object(&config.object_desc(
            ObjectKind::Sphere,
            Point3::new(0.0, 0.2, 0.0),
            Rgba::RED,
        ));

        scene.set_mode(h, MotionMode::Kinematic).unwrap();
        scene
            .set_linear_velocity(h, Vec3::new(0.1, 0.0, -0.2))
            .unwrap();
        scene.step_n(30);

        // 0.5 s at the written velocity, no gravity while kinematic.
        let t = scene.translation(h).unwrap();
        assert!((t.x - 0.05).abs() < 1.0e-3, "x={}", t.x);
        assert!((t.y - 0.2).abs() < 1.0e-4, "y={}", t.y);
        assert!((t.z + 0.1).abs() < 1.0e-3, "z={}", t.z);
    }

    #[test]
    fn box_spins_about_vertical_axis() {
        let (mut scene, config) = scene();
        let h = scene.create_object(&config.object_desc(
            ObjectKind::Box,
            Point3::new(0.0, 0.03, 0.0),
            Rgba::GREEN,
        ));

        scene.set_angular_velocity(h, Vec3::new(0.0, 1.2, 0.0)).unwrap();
        scene.step_n(30);

        let r = scene.rotation(h).unwrap();
        let axis_angle = r.scaled_axis();
        assert!((axis_angle.y - 0.6).abs() < 1.0e-2, "angle={}", axis_angle.y);
        assert!(axis_angle.x.abs() < 1.0e-4 && axis_angle.z.abs() < 1.0e-4);

        // Kinematic: the box does not fall or drift.
        let t = scene.translation(h).unwrap();
        assert!((t - Vec3::new(0.0, 0.03, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn dynamic_sphere_falls_onto_the_ground() {
        let (mut scene, config) = scene();
        let h = scene.create_object(&config.object_desc(
            ObjectKind::Sphere,
            Point3::new(0.0, 0.2, 0.0),
            Rgba::RED,
        ));

        scene.step_n(120);

        let t = scene.translation(h).unwrap();
        assert!(t.y < 0.2);
        assert!(t.y > 0.0, "fell through the ground: y={}", t.y);
    }

    #[test]
    fn velocities_are_expressed_in_anchor_space() {
        // Anchor turned 90 degrees about +Y: anchor +X is world -Z.
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let anchor = Transform::new(Vec3::new(1.0, 0.0, 2.0), rotation);
        let config = SceneConfig::default();
        let mut scene = RapierScene::from_config(anchor, &config);

        let h = scene.create_object(&config.object_desc(
            ObjectKind::Sphere,
            Point3::new(0.0, 0.2, 0.0),
            Rgba::RED,
        ));
        assert_eq!(scene.parent_transform(h), Ok(anchor));

        let start = scene.world_translation(h).unwrap();
        assert!((start - Vec3::new(1.0, 0.2, 2.0)).norm() < 1.0e-5);

        scene.set_mode(h, MotionMode::Kinematic).unwrap();
        scene.set_linear_velocity(h, Vec3::new(0.6, 0.0, 0.0)).unwrap();
        scene.step_n(60);

        let local = scene.translation(h).unwrap();
        assert!((local.x - 0.6).abs() < 1.0e-2, "local x={}", local.x);

        let world = scene.world_translation(h).unwrap();
        assert!((world.z - (2.0 - 0.6)).abs() < 1.0e-2, "world z={}", world.z);
        assert!((world.x - 1.0).abs() < 1.0e-3);

        let v = scene.linear_velocity(h).unwrap();
        assert!((v - Vec3::new(0.6, 0.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn unknown_handles_are_unbound() {
        let (mut scene, _) = scene();
        let ghost = ObjectHandle(7);

        assert_eq!(
            scene.set_mode(ghost, MotionMode::Dynamic),
            Err(DragError::UnboundObject(ghost))
        );
        assert_eq!(
            scene.set_linear_velocity(ghost, Vec3::x()),
            Err(DragError::UnboundObject(ghost))
        );
        assert_eq!(
            scene.parent_transform(ghost),
            Err(DragError::UnboundObject(ghost))
        );
        assert!(scene.translation(ghost).is_err());
    }

    #[test]
    fn dragging_a_sphere_through_the_registry_moves_it() {
        let config = SceneConfig::default();
        let scene = RapierScene::from_config(Transform::identity(), &config);
        let mut reg = ObjectRegistry::new(scene, config);
        reg.populate(&mut StdRng::seed_from_u64(11)).unwrap();

        let sphere = reg.handles_of(ObjectKind::Sphere)[0];
        let start = reg.engine().translation(sphere).unwrap();

        reg.dispatch_gesture(sphere, GestureState::began()).unwrap();
        assert_eq!(reg.engine().mode(sphere), Ok(MotionMode::Kinematic));

        for _ in 0..20 {
            reg.dispatch_gesture(sphere, GestureState::changed(Vec3::new(0.3, 0.5, 0.0)))
                .unwrap();
            reg.engine_mut().step();
        }
        reg.dispatch_gesture(sphere, GestureState::ended()).unwrap();
        assert_eq!(reg.engine().mode(sphere), Ok(MotionMode::Dynamic));

        let end = reg.engine().translation(sphere).unwrap();
        assert!(end.x > start.x + 0.05, "start={start:?} end={end:?}");

        // Released with the drag velocity still on it; gravity ignores the dropped vertical drag.
        let v = reg.engine().linear_velocity(sphere).unwrap();
        assert!(v.x > 0.25, "v={v:?}");
    }
}
