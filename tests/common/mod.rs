//! Recording fakes for the collaborator traits, shared by the suites.
#![allow(dead_code)]

use star_catcher::collaborators::{AssetLoader, Contact, PhysicsWorld, Renderer};
use star_catcher::entities::{BodyHandle, Group, TextStyle, TextureRef, Vec2};
use star_catcher::error::{GameError, GameResult};

// ── Assets ────────────────────────────────────────────────────────────────────

/// Hands out textures sized like the original art.  Names listed in
/// `missing` fail to load.
#[derive(Default)]
pub struct TestAssets {
    pub loaded: Vec<String>,
    pub missing: Vec<&'static str>,
}

impl TestAssets {
    fn texture(&mut self, name: &str, width: f32, height: f32) -> GameResult<TextureRef> {
        if self.missing.contains(&name) {
            return Err(GameError::MissingAsset {
                name: name.to_string(),
            });
        }
        self.loaded.push(name.to_string());
        Ok(TextureRef {
            id: self.loaded.len() - 1,
            width,
            height,
        })
    }
}

impl AssetLoader for TestAssets {
    fn load(&mut self, name: &str, _path: &str) -> GameResult<TextureRef> {
        let (w, h) = match name {
            "sky" => (800.0, 600.0),
            "ground" => (400.0, 32.0),
            "star" => (24.0, 22.0),
            "bomb" => (14.0, 14.0),
            _ => (1.0, 1.0),
        };
        self.texture(name, w, h)
    }

    fn load_spritesheet(
        &mut self,
        name: &str,
        _path: &str,
        frame_width: u32,
        frame_height: u32,
    ) -> GameResult<TextureRef> {
        self.texture(name, frame_width as f32, frame_height as f32)
    }
}

// ── Physics ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct MockBody {
    /// `None` for static bodies.
    pub group: Option<Group>,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    pub bounce: Vec2,
    pub world_bounds: bool,
    pub enabled: bool,
    pub touching_down: bool,
}

/// Records every call; `step` moves bodies by velocity (no gravity) and
/// returns whatever contacts the test queued in `pending`.
#[derive(Default)]
pub struct MockPhysics {
    pub bodies: Vec<MockBody>,
    pub colliders: Vec<(Group, Group, bool)>,
    pub overlaps: Vec<(Group, Group)>,
    pub pending: Vec<Contact>,
    pub enabled_at: Vec<(BodyHandle, Vec2)>,
    pub steps: usize,
    pub pause_calls: usize,
    pub reset_calls: usize,
    pub paused: bool,
}

impl MockPhysics {
    pub fn body(&self, handle: BodyHandle) -> &MockBody {
        &self.bodies[handle.0]
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut MockBody {
        &mut self.bodies[handle.0]
    }

    pub fn handles_in(&self, group: Group) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.group == Some(group))
            .map(|(i, _)| BodyHandle(i))
            .collect()
    }

    fn push(&mut self, group: Option<Group>, pos: Vec2, scale: f32) -> BodyHandle {
        self.bodies.push(MockBody {
            group,
            pos,
            vel: Vec2::ZERO,
            scale,
            bounce: Vec2::ZERO,
            world_bounds: false,
            enabled: true,
            touching_down: false,
        });
        BodyHandle(self.bodies.len() - 1)
    }
}

impl PhysicsWorld for MockPhysics {
    fn create_static_body(&mut self, pos: Vec2, _texture: TextureRef, scale: f32) -> BodyHandle {
        self.push(None, pos, scale)
    }

    fn create_dynamic_body(&mut self, group: Group, pos: Vec2, _texture: TextureRef) -> BodyHandle {
        self.push(Some(group), pos, 1.0)
    }

    fn set_bounce(&mut self, body: BodyHandle, bounce: Vec2) {
        self.body_mut(body).bounce = bounce;
    }

    fn set_collide_world_bounds(&mut self, body: BodyHandle, enabled: bool) {
        self.body_mut(body).world_bounds = enabled;
    }

    fn set_velocity(&mut self, body: BodyHandle, vel: Vec2) {
        self.body_mut(body).vel = vel;
    }

    fn set_velocity_x(&mut self, body: BodyHandle, vx: f32) {
        self.body_mut(body).vel.x = vx;
    }

    fn set_velocity_y(&mut self, body: BodyHandle, vy: f32) {
        self.body_mut(body).vel.y = vy;
    }

    fn velocity(&self, body: BodyHandle) -> Vec2 {
        self.body(body).vel
    }

    fn position(&self, body: BodyHandle) -> Vec2 {
        self.body(body).pos
    }

    fn touching_down(&self, body: BodyHandle) -> bool {
        self.body(body).touching_down
    }

    fn enable_body(&mut self, body: BodyHandle, pos: Vec2) {
        self.enabled_at.push((body, pos));
        let b = self.body_mut(body);
        b.enabled = true;
        b.pos = pos;
        b.vel = Vec2::ZERO;
    }

    fn disable_body(&mut self, body: BodyHandle) {
        self.body_mut(body).enabled = false;
    }

    fn add_collider(&mut self, a: Group, b: Group, notify: bool) {
        self.colliders.push((a, b, notify));
    }

    fn add_overlap(&mut self, a: Group, b: Group) {
        self.overlaps.push((a, b));
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        if self.paused {
            return Vec::new();
        }
        self.steps += 1;
        for body in self.bodies.iter_mut().filter(|b| b.group.is_some() && b.enabled) {
            body.pos += body.vel * dt;
        }
        std::mem::take(&mut self.pending)
    }

    fn reset(&mut self) {
        self.reset_calls += 1;
        self.bodies.clear();
        self.colliders.clear();
        self.overlaps.clear();
        self.pending.clear();
        self.paused = false;
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, 450.0)
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Image { pos: Vec2, texture: usize, scale: f32 },
    Sprite { pos: Vec2, frame: u32, tint: Option<u32> },
    Text { pos: Vec2, text: String, style: TextStyle },
    Present,
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl Renderer for RecordingRenderer {
    fn draw_image(&mut self, pos: Vec2, texture: TextureRef, scale: f32) -> GameResult<()> {
        self.calls.push(DrawCall::Image {
            pos,
            texture: texture.id,
            scale,
        });
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        pos: Vec2,
        _texture: TextureRef,
        frame: u32,
        tint: Option<u32>,
    ) -> GameResult<()> {
        self.calls.push(DrawCall::Sprite { pos, frame, tint });
        Ok(())
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) -> GameResult<()> {
        self.calls.push(DrawCall::Text {
            pos,
            text: text.to_string(),
            style: style.clone(),
        });
        Ok(())
    }

    fn present(&mut self) -> GameResult<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}
