//! Scripted drag session.
//!
//! Stands in for a touch gesture source: it emits well-formed `Began, Changed*, Ended` (or
//! `Cancelled`) sequences, steps the simulation between events the way a frame loop would,
//! and collects where every object ended up.

use drag_shared::{
    DragError, GesturePhase, GestureState, MotionMode, ObjectHandle, ObjectKind, ObjectRegistry,
    RapierScene, Vec3,
};
use std::f32::consts::FRAC_PI_2;
use tracing::{debug, info};

/// Number of `Changed` events per scripted drag.
const DRAG_EVENTS: usize = 40;

/// Sphere drag speed (m/s).
const DRAG_SPEED: f32 = 0.3;

#[derive(Clone, Debug)]
pub struct ObjectSummary {
    pub handle: ObjectHandle,
    pub kind: ObjectKind,
    pub mode: MotionMode,
    pub translation: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub objects: Vec<ObjectSummary>,
    pub events: usize,
}

impl SessionReport {
    pub fn log(&self) {
        info!("session finished after {} gesture events", self.events);
        for o in &self.objects {
            info!(
                "{:?} {} {:?} at ({:+.3}, {:+.3}, {:+.3}) v=({:+.3}, {:+.3}, {:+.3}) w_y={:+.3}",
                o.kind,
                o.handle,
                o.mode,
                o.translation.x,
                o.translation.y,
                o.translation.z,
                o.linear_velocity.x,
                o.linear_velocity.y,
                o.linear_velocity.z,
                o.angular_velocity.y,
            );
        }
    }
}

/// Run the scripted session: settle, drag a sphere along a quarter circle, spin the box with
/// a speed ramp, grab-and-cancel a second sphere, settle again.
pub fn run(
    registry: &mut ObjectRegistry<RapierScene>,
    settle_steps: usize,
) -> Result<SessionReport, DragError> {
    let mut events = 0;
    registry.engine_mut().step_n(settle_steps);

    let spheres = registry.handles_of(ObjectKind::Sphere);
    let boxes = registry.handles_of(ObjectKind::Box);

    if let Some(&sphere) = spheres.first() {
        info!("dragging sphere {sphere}");
        let arc = (0..DRAG_EVENTS).map(|i| {
            let theta = FRAC_PI_2 * i as f32 / (DRAG_EVENTS - 1) as f32;
            // The gesture source reports some vertical jitter; the controller drops it.
            Vec3::new(theta.cos(), 0.2, theta.sin()) * DRAG_SPEED
        });
        events += drag(registry, sphere, arc, GesturePhase::Ended)?;
    }

    if let Some(&cube) = boxes.first() {
        info!("spinning box {cube}");
        let ramp = (0..DRAG_EVENTS).map(|i| Vec3::new(0.0, 0.0, 0.01 * (i + 1) as f32));
        events += drag(registry, cube, ramp, GesturePhase::Ended)?;
    }

    if let Some(&sphere) = spheres.get(1) {
        info!("grabbing and cancelling sphere {sphere}");
        events += drag(registry, sphere, std::iter::empty(), GesturePhase::Cancelled)?;
    }

    registry.engine_mut().step_n(settle_steps);

    let objects = registry
        .iter()
        .map(|o| -> Result<ObjectSummary, DragError> {
            let scene = registry.engine();
            Ok(ObjectSummary {
                handle: o.handle,
                kind: o.kind,
                mode: scene.mode(o.handle)?,
                translation: scene.translation(o.handle)?,
                linear_velocity: scene.linear_velocity(o.handle)?,
                angular_velocity: scene.angular_velocity(o.handle)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SessionReport { objects, events })
}

/// One complete drag on `handle`: `Began`, one `Changed` per velocity with a physics step after
/// each, then `finish`. Returns the number of events dispatched.
fn drag(
    registry: &mut ObjectRegistry<RapierScene>,
    handle: ObjectHandle,
    velocities: impl IntoIterator<Item = Vec3>,
    finish: GesturePhase,
) -> Result<usize, DragError> {
    let mut events = 1;
    let mut last = Vec3::zeros();

    registry.dispatch_gesture(handle, GestureState::new(GesturePhase::Began, last))?;
    for v in velocities {
        let update = registry.dispatch_gesture(handle, GestureState::changed(v))?;
        debug!("{handle}: {update:?}");
        registry.engine_mut().step();
        last = v;
        events += 1;
    }
    // Gesture sources report the final velocity on the terminal event too.
    registry.dispatch_gesture(handle, GestureState::new(finish, last))?;

    Ok(events + 1)
}
