//! Object registry: owns the scene's draggable objects and routes gestures to them.
//!
//! The registry owns the engine port and one [`PhysicsObject`] per spawned body. Each object
//! carries its own [`MotionController`]; nothing is shared between objects, so a failing
//! dispatch to one object never affects another.

use log::{debug, warn};
use rand::Rng;
use std::collections::BTreeMap;

use crate::{
    config::SceneConfig,
    controller::{MotionController, MotionUpdate},
    engine::PhysicsEngine,
    error::DragError,
    types::{GestureState, MotionMode, ObjectHandle, ObjectKind, Point3, Rgba, Vec3},
};

/// A spawned object as seen by the control layer.
///
/// Position lives in the engine; velocities here are the last values written, not simulated.
#[derive(Clone, Debug)]
pub struct PhysicsObject {
    pub handle: ObjectHandle,
    pub kind: ObjectKind,
    pub color: Rgba,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    controller: MotionController,
}

impl PhysicsObject {
    pub fn mode(&self) -> MotionMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &MotionController {
        &self.controller
    }
}

pub struct ObjectRegistry<E> {
    engine: E,
    config: SceneConfig,
    objects: BTreeMap<ObjectHandle, PhysicsObject>,
}

impl<E: PhysicsEngine> ObjectRegistry<E> {
    pub fn new(engine: E, config: SceneConfig) -> Self {
        Self {
            engine,
            config,
            objects: BTreeMap::new(),
        }
    }

    /// Create an object of `kind` at `position` (parent frame) and bind its controller.
    ///
    /// Spheres take the first palette color; use [`Self::spawn_colored`] to choose.
    pub fn spawn(&mut self, kind: ObjectKind, position: Point3) -> ObjectHandle {
        self.spawn_colored(kind, position, Rgba::PALETTE[0])
    }

    pub fn spawn_colored(&mut self, kind: ObjectKind, position: Point3, color: Rgba) -> ObjectHandle {
        let desc = self.config.object_desc(kind, position, color);
        let handle = self.engine.create_object(&desc);
        let controller = MotionController::with_style(self.config.drag_style(kind)).bound(handle);

        debug!(
            "spawned {kind:?} {handle} at ({:.3}, {:.3}, {:.3}) in {:?}",
            position.x,
            position.y,
            position.z,
            controller.mode()
        );

        self.objects.insert(
            handle,
            PhysicsObject {
                handle,
                kind,
                color,
                linear_velocity: Vec3::zeros(),
                angular_velocity: Vec3::zeros(),
                controller,
            },
        );
        handle
    }

    /// Spawn the configured scene: `sphere_count` spheres colored from the palette in order,
    /// then one box. Returns handles in spawn order.
    pub fn populate<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<ObjectHandle>, DragError> {
        // Validate both kinds before creating anything so a bad config spawns nothing.
        let sphere_bounds = self.config.spawn_bounds(ObjectKind::Sphere)?;
        let box_bounds = self.config.spawn_bounds(ObjectKind::Box)?;

        let mut handles = Vec::with_capacity(self.config.sphere_count + 1);
        for i in 0..self.config.sphere_count {
            let color = Rgba::PALETTE[i % Rgba::PALETTE.len()];
            let position = sphere_bounds.sample(rng);
            handles.push(self.spawn_colored(ObjectKind::Sphere, position, color));
        }
        let position = box_bounds.sample(rng);
        handles.push(self.spawn_colored(ObjectKind::Box, position, Rgba::GREEN));

        Ok(handles)
    }

    /// Route one gesture event to the controller of `handle`.
    ///
    /// Fails with [`DragError::UnknownHandle`] if the registry never spawned `handle`; the
    /// event is dropped and no object is touched. Controller errors are passed through.
    pub fn dispatch_gesture(
        &mut self,
        handle: ObjectHandle,
        gesture: GestureState,
    ) -> Result<MotionUpdate, DragError> {
        let Some(object) = self.objects.get_mut(&handle) else {
            warn!("dropping {:?} gesture for unknown object {handle}", gesture.phase);
            return Err(DragError::UnknownHandle(handle));
        };

        let update = object
            .controller
            .apply(&mut self.engine, &gesture)
            .inspect_err(|e| warn!("dropping {:?} gesture: {e}", gesture.phase))?;

        if let Some(v) = update.linear_velocity {
            object.linear_velocity = v;
        }
        if let Some(w) = update.angular_velocity {
            object.angular_velocity = w;
        }
        Ok(update)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&PhysicsObject> {
        self.objects.get(&handle)
    }

    /// Objects in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &PhysicsObject> {
        self.objects.values()
    }

    pub fn handles_of(&self, kind: ObjectKind) -> Vec<ObjectHandle> {
        self.iter()
            .filter(|o| o.kind == kind)
            .map(|o| o.handle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access, e.g. to step the simulation between gestures.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
