use strata_chunk::ChunkStore;
use strata_geom::{Aabb, Vec3};

pub const BODY_WIDTH: f32 = 0.6;
pub const BODY_HEIGHT: f32 = 1.8;
pub const EYE_HEIGHT: f32 = 1.62;
pub const GRAVITY: f32 = 32.0;
pub const JUMP_VELOCITY: f32 = 9.0;
pub const WALK_SPEED: f32 = 8.0;

// Sub-step length for swept movement; keeps fast bodies from tunnelling.
const STEP_RES: f32 = 0.05;

#[derive(Clone, Copy, Debug, Default)]
pub struct MoveInput {
    /// Desired horizontal direction; y is ignored.
    pub wish: Vec3,
    pub jump: bool,
    /// Fly mode only: -1 down, +1 up.
    pub vertical: f32,
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug)]
pub struct Observer {
    /// Feet position: x and z at the body centre, y at the soles.
    pub pos: Vec3,
    pub vel: Vec3,
    pub on_ground: bool,
    pub fly: bool,
    pub speed: f32,
}

impl Observer {
    pub fn new(feet: Vec3, fly: bool) -> Self {
        Self {
            pos: feet,
            vel: Vec3::ZERO,
            on_ground: false,
            fly,
            speed: WALK_SPEED,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, EYE_HEIGHT, 0.0)
    }

    #[inline]
    fn body_at(pos: Vec3) -> Aabb {
        Aabb::from_feet(pos, BODY_WIDTH, BODY_HEIGHT)
    }

    /// Moves along one axis in short steps and stops at the first step that
    /// would overlap the world. Returns the distance actually covered.
    fn move_axis(&mut self, store: &ChunkStore, axis: Axis, amt: f32) -> f32 {
        if amt == 0.0 {
            return 0.0;
        }
        let step = STEP_RES * amt.signum();
        let mut moved = 0.0f32;
        let mut remaining = amt;
        while remaining.abs() > 0.0001 {
            let s = if remaining.abs() < step.abs() {
                remaining
            } else {
                step
            };
            let mut p = self.pos;
            match axis {
                Axis::X => p.x += s,
                Axis::Y => p.y += s,
                Axis::Z => p.z += s,
            }
            if store.collides_aabb(&Self::body_at(p)) {
                break;
            }
            self.pos = p;
            moved += s;
            remaining -= s;
        }
        moved
    }

    /// Advances one frame. Walking resolves x, then z, then y against the
    /// store; a blocked axis loses its velocity. Flying ignores both gravity
    /// and collision.
    pub fn step(&mut self, store: &ChunkStore, input: &MoveInput, dt: f32) {
        let mut wish = input.wish.with_y(0.0).normalized();
        wish = wish * self.speed;

        if self.fly {
            self.vel = Vec3::new(wish.x, input.vertical.clamp(-1.0, 1.0) * self.speed, wish.z);
            self.pos += self.vel * dt;
            self.on_ground = false;
            return;
        }

        self.vel.x = wish.x;
        self.vel.z = wish.z;
        if input.jump && self.on_ground {
            self.vel.y = JUMP_VELOCITY;
            self.on_ground = false;
        }
        self.vel.y -= GRAVITY * dt;

        for (axis, amt) in [(Axis::X, self.vel.x * dt), (Axis::Z, self.vel.z * dt)] {
            let moved = self.move_axis(store, axis, amt);
            if (moved - amt).abs() > 1e-4 {
                match axis {
                    Axis::X => self.vel.x = 0.0,
                    _ => self.vel.z = 0.0,
                }
            }
        }

        let dy = self.vel.y * dt;
        let moved = self.move_axis(store, Axis::Y, dy);
        if (moved - dy).abs() > 1e-4 {
            // Landed, or bumped the ceiling.
            self.on_ground = dy < 0.0;
            self.vel.y = 0.0;
        } else {
            self.on_ground = false;
        }
    }
}
