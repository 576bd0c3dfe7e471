//! Capability sets the session is driven through.
//!
//! The session never touches an engine directly: physics, drawing, input
//! and asset lookup all arrive as implementations of these traits, so the
//! rules can run headless under test with recording fakes.

use crate::entities::{BodyHandle, Group, TextStyle, TextureRef, Vec2};
use crate::error::GameResult;

/// Key states sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

pub trait InputPoller {
    fn poll(&mut self) -> InputState;
}

pub trait AssetLoader {
    fn load(&mut self, name: &str, path: &str) -> GameResult<TextureRef>;

    /// Load a sheet of equally sized frames.  The returned handle carries
    /// the frame size, not the sheet size.
    fn load_spritesheet(
        &mut self,
        name: &str,
        path: &str,
        frame_width: u32,
        frame_height: u32,
    ) -> GameResult<TextureRef>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    /// Non-solid contact registered with `add_overlap`.
    Overlap,
    /// Solid contact between two bodies registered with a notifying
    /// `add_collider`.
    Collide,
}

/// A contact reported by `PhysicsWorld::step`.  `first` belongs to the
/// first group of the registered pair, `second` to the other one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub kind: ContactKind,
    pub first: BodyHandle,
    pub second: BodyHandle,
}

pub trait PhysicsWorld {
    fn create_static_body(&mut self, pos: Vec2, texture: TextureRef, scale: f32) -> BodyHandle;
    fn create_dynamic_body(&mut self, group: Group, pos: Vec2, texture: TextureRef) -> BodyHandle;

    fn set_bounce(&mut self, body: BodyHandle, bounce: Vec2);
    fn set_collide_world_bounds(&mut self, body: BodyHandle, enabled: bool);

    fn set_velocity(&mut self, body: BodyHandle, vel: Vec2);
    fn set_velocity_x(&mut self, body: BodyHandle, vx: f32);
    fn set_velocity_y(&mut self, body: BodyHandle, vy: f32);
    fn velocity(&self, body: BodyHandle) -> Vec2;
    fn position(&self, body: BodyHandle) -> Vec2;

    /// Whether the body rested on another body during the last step.
    fn touching_down(&self, body: BodyHandle) -> bool;

    /// Re-enable a body at `pos` with zero velocity.
    fn enable_body(&mut self, body: BodyHandle, pos: Vec2);
    /// Remove a body from simulation and contact checks until re-enabled.
    fn disable_body(&mut self, body: BodyHandle);

    /// Solid contact between two groups.  With `notify` the step reports
    /// a `ContactKind::Collide` for every touching pair.
    fn add_collider(&mut self, a: Group, b: Group, notify: bool);
    fn add_overlap(&mut self, a: Group, b: Group);

    /// Advance the simulation by `dt` seconds.  A paused world does nothing
    /// and reports nothing.
    fn step(&mut self, dt: f32) -> Vec<Contact>;

    /// Drop every body and registration and resume.  Used to rebuild a
    /// session from scratch.
    fn reset(&mut self);

    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;

    fn gravity(&self) -> Vec2;
}

pub trait Renderer {
    fn draw_image(&mut self, pos: Vec2, texture: TextureRef, scale: f32) -> GameResult<()>;
    fn draw_sprite(
        &mut self,
        pos: Vec2,
        texture: TextureRef,
        frame: u32,
        tint: Option<u32>,
    ) -> GameResult<()>;
    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) -> GameResult<()>;

    /// Flush everything drawn since the previous call.
    fn present(&mut self) -> GameResult<()>;
}
