/*!
Scene configuration.

Every field defaults to the reference scene in [`crate::constants`], so an empty TOML
document (or [`SceneConfig::default`]) reproduces it exactly. Callers load a file with
[`SceneConfig::load`] or a string with [`SceneConfig::from_toml_str`]; both validate the
geometry before returning.

```toml
ground_size = 0.5
sphere_count = 5
sphere_radius = 0.03
box_size = [0.12, 0.06, 0.06]
spin_factor = 15.0
seed = 42
```
*/

use serde::Deserialize;
use std::path::Path;

use crate::{
    constants::{
        BOX_SIZE, BOX_SPIN_FACTOR, GROUND_SIZE, PHYSICS_DT, SPHERE_COUNT, SPHERE_RADIUS,
    },
    controller::DragStyle,
    error::DragError,
    spawn::{SpawnBounds, box_bounds, sphere_bounds},
    types::{ObjectDesc, ObjectKind, Point3, Rgba, ShapeDef, Vec3},
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Side length of the square ground (meters).
    pub ground_size: f32,
    pub sphere_count: usize,
    pub sphere_radius: f32,
    /// Full box extents `[x, y, z]` (meters).
    pub box_size: [f32; 3],
    /// Box spin rate per unit drag speed.
    pub spin_factor: f32,
    /// Simulation timestep for engines that step at a fixed rate (seconds).
    pub physics_dt: f32,
    /// Spawn placement seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_size: GROUND_SIZE,
            sphere_count: SPHERE_COUNT,
            sphere_radius: SPHERE_RADIUS,
            box_size: BOX_SIZE,
            spin_factor: BOX_SPIN_FACTOR,
            physics_dt: PHYSICS_DT,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, DragError> {
        let config: Self = toml::from_str(s).map_err(|e| DragError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DragError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DragError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Reject configurations the planner or the engine cannot honor.
    pub fn validate(&self) -> Result<(), DragError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(DragError::Config(format!("{name} must be positive, got {v}")))
            }
        };

        positive("ground_size", self.ground_size)?;
        positive("sphere_radius", self.sphere_radius)?;
        positive("physics_dt", self.physics_dt)?;
        for (axis, v) in ["x", "y", "z"].iter().zip(self.box_size) {
            positive(&format!("box_size.{axis}"), v)?;
        }
        if !(self.spin_factor.is_finite() && self.spin_factor >= 0.0) {
            return Err(DragError::Config(format!(
                "spin_factor must be non-negative, got {}",
                self.spin_factor
            )));
        }

        // Objects must fit on the ground.
        self.spawn_bounds(ObjectKind::Sphere)?;
        self.spawn_bounds(ObjectKind::Box)?;
        Ok(())
    }

    pub fn box_extents(&self) -> Vec3 {
        Vec3::new(self.box_size[0], self.box_size[1], self.box_size[2])
    }

    pub fn shape(&self, kind: ObjectKind) -> ShapeDef {
        match kind {
            ObjectKind::Sphere => ShapeDef::Sphere {
                radius: self.sphere_radius,
            },
            ObjectKind::Box => ShapeDef::Cuboid {
                half_extents: self.box_extents() / 2.0,
            },
        }
    }

    pub fn spawn_bounds(&self, kind: ObjectKind) -> Result<SpawnBounds, DragError> {
        match kind {
            ObjectKind::Sphere => sphere_bounds(self.sphere_radius, self.ground_size),
            ObjectKind::Box => box_bounds(self.box_extents(), self.ground_size),
        }
    }

    pub fn drag_style(&self, kind: ObjectKind) -> DragStyle {
        match kind {
            ObjectKind::Sphere => DragStyle::Translate,
            ObjectKind::Box => DragStyle::Spin {
                factor: self.spin_factor,
            },
        }
    }

    /// Full creation request for an object of `kind` at `position`.
    pub fn object_desc(&self, kind: ObjectKind, position: Point3, color: Rgba) -> ObjectDesc {
        ObjectDesc {
            kind,
            shape: self.shape(kind),
            mass: kind.mass_props(),
            material: kind.material_props(),
            initial_mode: kind.initial_mode(),
            color,
            position,
        }
    }
}
