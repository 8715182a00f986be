//! Physics/scene engine port.
//!
//! The controllers and the registry never simulate anything themselves. Every body they
//! create and every mode or velocity they write goes through [`PhysicsEngine`], which is
//! implemented by a real backend ([`crate::RapierScene`]) or by a recording mock in tests.
//!
//! Conventions
//! - Positions and velocities crossing this port are expressed in the object's parent
//!   (anchor) frame.
//! - Every call naming a handle fails with [`DragError::UnboundObject`] if the engine has
//!   no body for it.

use crate::{
    error::DragError,
    types::{MotionMode, ObjectDesc, ObjectHandle, Transform, Vec3},
};

pub trait PhysicsEngine {
    /// Create a body with mesh/collision shape, mass, material and initial mode from `desc`.
    fn create_object(&mut self, desc: &ObjectDesc) -> ObjectHandle;

    /// Hand motion ownership to the simulation (`Dynamic`) or to velocity writes (`Kinematic`).
    fn set_mode(&mut self, handle: ObjectHandle, mode: MotionMode) -> Result<(), DragError>;

    fn set_linear_velocity(&mut self, handle: ObjectHandle, velocity: Vec3)
    -> Result<(), DragError>;

    fn set_angular_velocity(
        &mut self,
        handle: ObjectHandle,
        velocity: Vec3,
    ) -> Result<(), DragError>;

    /// Transform of the frame the object lives in. Used to resolve world-space gesture
    /// velocities into parent space.
    fn parent_transform(&self, handle: ObjectHandle) -> Result<Transform, DragError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording engine for controller/registry tests.

    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum EngineCall {
        Create(ObjectHandle),
        SetMode(ObjectHandle, MotionMode),
        SetLinear(ObjectHandle, Vec3),
        SetAngular(ObjectHandle, Vec3),
    }

    /// Keeps every created description and every write, in order.
    #[derive(Default)]
    pub struct RecordingEngine {
        pub parent: Transform,
        pub created: HashMap<ObjectHandle, ObjectDesc>,
        pub calls: Vec<EngineCall>,
        next_id: u32,
    }

    impl RecordingEngine {
        pub fn with_parent(parent: Transform) -> Self {
            Self {
                parent,
                ..Self::default()
            }
        }

        /// Register a body without going through `create_object`, for controller-only tests.
        pub fn bind(&mut self, desc: &ObjectDesc) -> ObjectHandle {
            let handle = self.create_object(desc);
            self.calls.clear();
            handle
        }

        pub fn calls_for(&self, handle: ObjectHandle) -> Vec<EngineCall> {
            self.calls
                .iter()
                .copied()
                .filter(|c| match *c {
                    EngineCall::Create(h)
                    | EngineCall::SetMode(h, _)
                    | EngineCall::SetLinear(h, _)
                    | EngineCall::SetAngular(h, _) => h == handle,
                })
                .collect()
        }

        fn check(&self, handle: ObjectHandle) -> Result<(), DragError> {
            if self.created.contains_key(&handle) {
                Ok(())
            } else {
                Err(DragError::UnboundObject(handle))
            }
        }
    }

    impl PhysicsEngine for RecordingEngine {
        fn create_object(&mut self, desc: &ObjectDesc) -> ObjectHandle {
            let handle = ObjectHandle(self.next_id);
            self.next_id += 1;
            self.created.insert(handle, *desc);
            self.calls.push(EngineCall::Create(handle));
            handle
        }

        fn set_mode(&mut self, handle: ObjectHandle, mode: MotionMode) -> Result<(), DragError> {
            self.check(handle)?;
            self.calls.push(EngineCall::SetMode(handle, mode));
            Ok(())
        }

        fn set_linear_velocity(
            &mut self,
            handle: ObjectHandle,
            velocity: Vec3,
        ) -> Result<(), DragError> {
            self.check(handle)?;
            self.calls.push(EngineCall::SetLinear(handle, velocity));
            Ok(())
        }

        fn set_angular_velocity(
            &mut self,
            handle: ObjectHandle,
            velocity: Vec3,
        ) -> Result<(), DragError> {
            self.check(handle)?;
            self.calls.push(EngineCall::SetAngular(handle, velocity));
            Ok(())
        }

        fn parent_transform(&self, handle: ObjectHandle) -> Result<Transform, DragError> {
            self.check(handle)?;
            Ok(self.parent)
        }
    }
}
