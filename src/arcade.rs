//! Minimal arcade physics: axis-aligned boxes, constant gravity, bounce
//! against static bodies and the world rectangle.
//!
//! Every registered pair is checked exhaustively each fixed step; the scene
//! has a handful of bodies, so there is no broad phase.  A contact that
//! lasts several fixed steps is reported once per `step` call.  Positions are box
//! centres, matching how the session places sprites.

use log::{trace, warn};

use crate::collaborators::{Contact, ContactKind, PhysicsWorld};
use crate::config::GameConfig;
use crate::constants::{FIXED_STEP, REST_SPEED};
use crate::entities::{BodyHandle, Group, TextureRef, Vec2};

#[derive(Clone, Debug)]
struct Body {
    group: Group,
    dynamic: bool,
    pos: Vec2,
    half: Vec2,
    vel: Vec2,
    bounce: Vec2,
    collide_world_bounds: bool,
    enabled: bool,
    touching_down: bool,
    blocked_down: bool,
}

impl Body {
    fn overlaps(&self, other: &Body) -> bool {
        (self.pos.x - other.pos.x).abs() < self.half.x + other.half.x
            && (self.pos.y - other.pos.y).abs() < self.half.y + other.half.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pair {
    a: Group,
    b: Group,
    kind: PairKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PairKind {
    Collider { notify: bool },
    Overlap,
}

#[derive(Debug)]
pub struct ArcadeWorld {
    bodies: Vec<Body>,
    pairs: Vec<Pair>,
    gravity: Vec2,
    width: f32,
    height: f32,
    paused: bool,
    /// Simulated time not yet consumed by a fixed step.
    accumulator: f32,
}

impl ArcadeWorld {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bodies: Vec::new(),
            pairs: Vec::new(),
            gravity: Vec2::new(0.0, config.gravity),
            width: config.world_width,
            height: config.world_height,
            paused: false,
            accumulator: 0.0,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the body is pressed against the bottom edge of the world.
    pub fn blocked_down(&self, body: BodyHandle) -> bool {
        self.get(body).map(|b| b.blocked_down).unwrap_or(false)
    }

    pub fn is_enabled(&self, body: BodyHandle) -> bool {
        self.get(body).map(|b| b.enabled).unwrap_or(false)
    }

    fn get(&self, body: BodyHandle) -> Option<&Body> {
        self.bodies.get(body.0)
    }

    fn get_mut(&mut self, body: BodyHandle, op: &str) -> Option<&mut Body> {
        let found = self.bodies.get_mut(body.0);
        if found.is_none() {
            warn!("{}: unknown body {:?}", op, body);
        }
        found
    }

    fn push(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    // ── Integration ──────────────────────────────────────────────────────────

    fn fixed_step(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| b.dynamic && b.enabled) {
            body.vel += gravity * dt;
            body.pos += body.vel * dt;
            body.touching_down = false;
            body.blocked_down = false;
        }

        let pairs = self.pairs.clone();
        for pair in &pairs {
            match pair.kind {
                PairKind::Collider { notify } => self.collide_groups(pair.a, pair.b, notify, contacts),
                PairKind::Overlap => self.overlap_groups(pair.a, pair.b, contacts),
            }
        }

        let (width, height) = (self.width, self.height);
        for body in self
            .bodies
            .iter_mut()
            .filter(|b| b.dynamic && b.enabled && b.collide_world_bounds)
        {
            clamp_to_world(body, width, height);
        }
    }

    fn members(&self, group: Group) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.group == group && b.enabled)
            .map(|(i, _)| i)
            .collect()
    }

    fn collide_groups(&mut self, a: Group, b: Group, notify: bool, contacts: &mut Vec<Contact>) {
        for i in self.members(a) {
            for j in self.members(b) {
                if i == j || !self.bodies[i].overlaps(&self.bodies[j]) {
                    continue;
                }
                let (first_dynamic, second_dynamic) =
                    (self.bodies[i].dynamic, self.bodies[j].dynamic);
                match (first_dynamic, second_dynamic) {
                    (true, false) => separate(&mut self.bodies, i, j),
                    (false, true) => separate(&mut self.bodies, j, i),
                    _ => {}
                }
                if notify {
                    contacts.push(Contact {
                        kind: ContactKind::Collide,
                        first: BodyHandle(i),
                        second: BodyHandle(j),
                    });
                }
            }
        }
    }

    fn overlap_groups(&mut self, a: Group, b: Group, contacts: &mut Vec<Contact>) {
        for i in self.members(a) {
            for j in self.members(b) {
                if i != j && self.bodies[i].overlaps(&self.bodies[j]) {
                    contacts.push(Contact {
                        kind: ContactKind::Overlap,
                        first: BodyHandle(i),
                        second: BodyHandle(j),
                    });
                }
            }
        }
    }
}

/// Push dynamic body `d` out of static body `s` along the axis of least
/// penetration and reflect its velocity on that axis.
fn separate(bodies: &mut [Body], d: usize, s: usize) {
    let wall = bodies[s].clone();
    let body = &mut bodies[d];

    let dx = body.pos.x - wall.pos.x;
    let dy = body.pos.y - wall.pos.y;
    let overlap_x = body.half.x + wall.half.x - dx.abs();
    let overlap_y = body.half.y + wall.half.y - dy.abs();

    if overlap_y <= overlap_x {
        if dy < 0.0 {
            body.pos.y = wall.pos.y - wall.half.y - body.half.y;
            body.touching_down = true;
            if body.vel.y > 0.0 {
                body.vel.y = settle(-body.vel.y * body.bounce.y);
            }
        } else {
            body.pos.y = wall.pos.y + wall.half.y + body.half.y;
            if body.vel.y < 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
        }
    } else if dx < 0.0 {
        body.pos.x = wall.pos.x - wall.half.x - body.half.x;
        if body.vel.x > 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    } else {
        body.pos.x = wall.pos.x + wall.half.x + body.half.x;
        if body.vel.x < 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    }
}

fn clamp_to_world(body: &mut Body, width: f32, height: f32) {
    if body.pos.x - body.half.x < 0.0 {
        body.pos.x = body.half.x;
        body.vel.x = body.vel.x.abs() * body.bounce.x;
    } else if body.pos.x + body.half.x > width {
        body.pos.x = width - body.half.x;
        body.vel.x = -body.vel.x.abs() * body.bounce.x;
    }

    if body.pos.y - body.half.y < 0.0 {
        body.pos.y = body.half.y;
        body.vel.y = body.vel.y.abs() * body.bounce.y;
    } else if body.pos.y + body.half.y > height {
        body.pos.y = height - body.half.y;
        body.vel.y = settle(-body.vel.y.abs() * body.bounce.y);
        body.blocked_down = true;
    }
}

/// Zero out a rebound too small to leave the surface.
fn settle(vy: f32) -> f32 {
    if vy.abs() < REST_SPEED {
        0.0
    } else {
        vy
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn create_static_body(&mut self, pos: Vec2, texture: TextureRef, scale: f32) -> BodyHandle {
        self.push(Body {
            group: Group::Platforms,
            dynamic: false,
            pos,
            half: Vec2::new(texture.width * scale / 2.0, texture.height * scale / 2.0),
            vel: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: false,
            enabled: true,
            touching_down: false,
            blocked_down: false,
        })
    }

    fn create_dynamic_body(&mut self, group: Group, pos: Vec2, texture: TextureRef) -> BodyHandle {
        self.push(Body {
            group,
            dynamic: true,
            pos,
            half: Vec2::new(texture.width / 2.0, texture.height / 2.0),
            vel: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: false,
            enabled: true,
            touching_down: false,
            blocked_down: false,
        })
    }

    fn set_bounce(&mut self, body: BodyHandle, bounce: Vec2) {
        if let Some(b) = self.get_mut(body, "set_bounce") {
            b.bounce = bounce;
        }
    }

    fn set_collide_world_bounds(&mut self, body: BodyHandle, enabled: bool) {
        if let Some(b) = self.get_mut(body, "set_collide_world_bounds") {
            b.collide_world_bounds = enabled;
        }
    }

    fn set_velocity(&mut self, body: BodyHandle, vel: Vec2) {
        if let Some(b) = self.get_mut(body, "set_velocity") {
            b.vel = vel;
        }
    }

    fn set_velocity_x(&mut self, body: BodyHandle, vx: f32) {
        if let Some(b) = self.get_mut(body, "set_velocity_x") {
            b.vel.x = vx;
        }
    }

    fn set_velocity_y(&mut self, body: BodyHandle, vy: f32) {
        if let Some(b) = self.get_mut(body, "set_velocity_y") {
            b.vel.y = vy;
        }
    }

    fn velocity(&self, body: BodyHandle) -> Vec2 {
        self.get(body).map(|b| b.vel).unwrap_or_default()
    }

    fn position(&self, body: BodyHandle) -> Vec2 {
        self.get(body).map(|b| b.pos).unwrap_or_default()
    }

    fn touching_down(&self, body: BodyHandle) -> bool {
        self.get(body).map(|b| b.touching_down).unwrap_or(false)
    }

    fn enable_body(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(b) = self.get_mut(body, "enable_body") {
            b.enabled = true;
            b.pos = pos;
            b.vel = Vec2::ZERO;
            b.touching_down = false;
            b.blocked_down = false;
        }
    }

    fn disable_body(&mut self, body: BodyHandle) {
        if let Some(b) = self.get_mut(body, "disable_body") {
            b.enabled = false;
            b.vel = Vec2::ZERO;
        }
    }

    fn add_collider(&mut self, a: Group, b: Group, notify: bool) {
        self.pairs.push(Pair {
            a,
            b,
            kind: PairKind::Collider { notify },
        });
    }

    fn add_overlap(&mut self, a: Group, b: Group) {
        self.pairs.push(Pair {
            a,
            b,
            kind: PairKind::Overlap,
        });
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();
        if self.paused {
            return contacts;
        }

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= FIXED_STEP {
            self.accumulator -= FIXED_STEP;
            self.fixed_step(FIXED_STEP, &mut contacts);
            steps += 1;
        }

        let mut unique: Vec<Contact> = Vec::with_capacity(contacts.len());
        for contact in contacts {
            if !unique.contains(&contact) {
                unique.push(contact);
            }
        }
        trace!("step {:.4}s: {} fixed steps, {} contacts", dt, steps, unique.len());
        unique
    }

    fn reset(&mut self) {
        self.bodies.clear();
        self.pairs.clear();
        self.paused = false;
        self.accumulator = 0.0;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }
}
