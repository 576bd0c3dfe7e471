//! Scene records and geometry.  Pure data, no logic.

use std::ops::{AddAssign, Mul};

use crate::animation::Animator;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A 2D vector in world pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Collaborator handles ──────────────────────────────────────────────────────

/// Opaque id of a body owned by the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub usize);

/// Opaque id of a loaded texture.  Carries the (frame) size so physics
/// bodies can be sized from it without decoding anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureRef {
    pub id: usize,
    pub width: f32,
    pub height: f32,
}

/// Collision groups the scene registers colliders and overlaps between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Player,
    Platforms,
    Stars,
    Bombs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Entered on bomb contact.  Physics is paused until a restart.
    Frozen,
}

// ── Scene objects ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: BodyHandle,
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounce: f32,
    pub tint: Option<u32>,
    pub anims: Animator,
}

#[derive(Clone, Debug)]
pub struct Platform {
    pub body: BodyHandle,
    pub pos: Vec2,
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct Star {
    pub body: BodyHandle,
    pub pos: Vec2,
    /// Inactive stars are hidden and skipped by the physics world.
    pub active: bool,
    pub bounce_y: f32,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub body: BodyHandle,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Handles for every texture the scene draws with.
#[derive(Clone, Copy, Debug)]
pub struct SceneTextures {
    pub sky: TextureRef,
    pub ground: TextureRef,
    pub star: TextureRef,
    pub bomb: TextureRef,
    pub dude: TextureRef,
}

/// Text styling passed through to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: u32,
    /// 0xRRGGBB
    pub fill: u32,
}
