/// Side length of the square ground plane objects are spawned on (meters).
///
/// Spawn placement works with half of this value: an object of half extent `h`
/// may be placed anywhere in `[-(GROUND_SIZE / 2 - h), GROUND_SIZE / 2 - h]` on X and Z.
pub const GROUND_SIZE: f32 = 0.5;

/// Number of draggable spheres in the reference scene.
pub const SPHERE_COUNT: usize = 5;

/// Sphere radius (meters).
pub const SPHERE_RADIUS: f32 = 0.03;

/// Full box extents `[x, y, z]` (meters).
pub const BOX_SIZE: [f32; 3] = [0.12, 0.06, 0.06];

/// Mass shared by every draggable object (kilograms).
pub const OBJECT_MASS: f32 = 0.005;

pub const SPHERE_FRICTION: f32 = 0.5;
pub const SPHERE_RESTITUTION: f32 = 1.0;

pub const BOX_FRICTION: f32 = 0.1;
pub const BOX_RESTITUTION: f32 = 0.8;

/// Drag speed to spin rate multiplier for the box.
///
/// Angular velocity about +Y is `|drag velocity| * BOX_SPIN_FACTOR` (rad/s).
/// Tuned by feel, not derived from anything physical.
pub const BOX_SPIN_FACTOR: f32 = 15.0;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Fixed simulation timestep used by the Rapier scene (seconds).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Half thickness of the ground slab below the anchor plane (meters).
pub const GROUND_HALF_THICKNESS: f32 = 0.005;
