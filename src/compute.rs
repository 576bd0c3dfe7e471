//! Game-session rules.
//!
//! `GameSession` owns a plain record for every scene object and drives the
//! injected collaborators (physics, renderer, asset loader).  Side effects
//! go through those collaborators and the injected RNG only, so callers
//! control determinism (tests pass a seeded RNG and recording fakes).

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::animation::{AnimationDef, AnimationKey, Animator, Repeat};
use crate::collaborators::{
    AssetLoader, Contact, ContactKind, InputState, PhysicsWorld, Renderer,
};
use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{
    BodyHandle, Bomb, Group, Platform, Player, SceneTextures, SessionState, Star, TextStyle,
    Vec2,
};
use crate::error::GameResult;

/// Frame shown before any animation has been played.
const IDLE_FRAME: u32 = 4;

// ── Pure helpers ─────────────────────────────────────────────────────────────

/// Load every texture the scene uses.
pub fn preload(loader: &mut impl AssetLoader) -> GameResult<SceneTextures> {
    Ok(SceneTextures {
        sky: loader.load("sky", "assets/sky.png")?,
        ground: loader.load("ground", "assets/platform.png")?,
        star: loader.load("star", "assets/star.png")?,
        bomb: loader.load("bomb", "assets/bomb.png")?,
        dude: loader.load_spritesheet(
            "dude",
            "assets/dude.png",
            PLAYER_FRAME_WIDTH,
            PLAYER_FRAME_HEIGHT,
        )?,
    })
}

pub fn player_animations() -> [AnimationDef; 3] {
    [
        AnimationDef {
            key: AnimationKey::Turn,
            frames: vec![4],
            frame_rate: 20.0,
            repeat: Repeat::Once,
        },
        AnimationDef::range(AnimationKey::Right, 5, 8, 10.0, Repeat::Forever),
        AnimationDef::range(AnimationKey::Left, 0, 3, 10.0, Repeat::Forever),
    ]
}

pub fn score_text(score: u32) -> String {
    format!("score: {}", score)
}

/// Horizontal spawn position for a new bomb.
///
/// A player on the left half gets a draw from [400, 400], which is always
/// 400; otherwise the draw is from [0, 400].  The draw happens in both
/// cases so the RNG sequence doesn't depend on the branch.
pub fn bomb_spawn_x(player_x: f32, rng: &mut impl Rng) -> f32 {
    let split = BOMB_SPLIT_X as i32;
    let x = if player_x < BOMB_SPLIT_X {
        rng.gen_range(split..=split)
    } else {
        rng.gen_range(0..=split)
    };
    x as f32
}

pub fn bomb_launch_velocity(rng: &mut impl Rng) -> Vec2 {
    let vx = rng.gen_range(-BOMB_MAX_SPEED_X..=BOMB_MAX_SPEED_X);
    Vec2::new(vx as f32, BOMB_FALL_SPEED)
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub stars: Vec<Star>,
    pub bombs: Vec<Bomb>,
    pub score: u32,
    pub state: SessionState,
    pub textures: SceneTextures,
    run_speed: f32,
    jump_velocity: f32,
}

impl GameSession {
    /// Build the scene: platforms, player, star row, empty bomb list, and
    /// every collider/overlap registration between them.
    pub fn initialize(
        config: &GameConfig,
        loader: &mut impl AssetLoader,
        physics: &mut impl PhysicsWorld,
        rng: &mut impl Rng,
    ) -> GameResult<Self> {
        let textures = preload(loader)?;

        let platforms: Vec<Platform> = PLATFORMS
            .iter()
            .map(|&(x, y, scale)| {
                let pos = Vec2::new(x, y);
                Platform {
                    body: physics.create_static_body(pos, textures.ground, scale),
                    pos,
                    scale,
                }
            })
            .collect();

        let start = Vec2::from(PLAYER_START);
        let body = physics.create_dynamic_body(Group::Player, start, textures.dude);
        physics.set_bounce(body, Vec2::splat(PLAYER_BOUNCE));
        physics.set_collide_world_bounds(body, true);

        let mut anims = Animator::new();
        for def in player_animations() {
            anims.register(def);
        }
        let player = Player {
            body,
            pos: start,
            vel: Vec2::ZERO,
            bounce: PLAYER_BOUNCE,
            tint: None,
            anims,
        };

        let stars: Vec<Star> = (0..STAR_COUNT)
            .map(|i| {
                let pos = Vec2::new(STAR_START_X + STAR_STEP_X * i as f32, 0.0);
                let body = physics.create_dynamic_body(Group::Stars, pos, textures.star);
                let bounce_y = rng.gen_range(STAR_BOUNCE_MIN..STAR_BOUNCE_MAX);
                physics.set_bounce(body, Vec2::new(0.0, bounce_y));
                Star {
                    body,
                    pos,
                    active: true,
                    bounce_y,
                }
            })
            .collect();

        physics.add_collider(Group::Player, Group::Platforms, false);
        physics.add_collider(Group::Stars, Group::Platforms, false);
        physics.add_overlap(Group::Player, Group::Stars);
        physics.add_collider(Group::Bombs, Group::Platforms, false);
        physics.add_collider(Group::Player, Group::Bombs, true);

        info!(
            "session started: {} platforms, {} stars, gravity {:?}",
            platforms.len(),
            stars.len(),
            physics.gravity()
        );

        Ok(Self {
            player,
            platforms,
            stars,
            bombs: Vec::new(),
            score: 0,
            state: SessionState::Running,
            textures,
            run_speed: config.run_speed,
            jump_velocity: config.jump_velocity,
        })
    }

    /// Throw the current scene away and build a fresh one.  Score, state and
    /// every entity return to their starting values.
    pub fn restart(
        &mut self,
        config: &GameConfig,
        loader: &mut impl AssetLoader,
        physics: &mut impl PhysicsWorld,
        rng: &mut impl Rng,
    ) -> GameResult<()> {
        let previous = self.score;
        physics.reset();
        *self = Self::initialize(config, loader, physics, rng)?;
        info!("session restarted (previous score {})", previous);
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.state == SessionState::Frozen
    }

    pub fn active_star_count(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }

    pub fn score_text(&self) -> String {
        score_text(self.score)
    }

    // ── Per-frame input ──────────────────────────────────────────────────────

    /// Apply this frame's key states to the player.  Left wins when both
    /// horizontal keys are held.  Jumping needs the player resting on a body.
    pub fn update(&mut self, input: &InputState, physics: &mut impl PhysicsWorld) {
        if self.is_frozen() {
            trace!("update ignored: session frozen");
            return;
        }

        let body = self.player.body;
        if input.left {
            physics.set_velocity_x(body, -self.run_speed);
            self.player.anims.play(AnimationKey::Left, true);
        } else if input.right {
            physics.set_velocity_x(body, self.run_speed);
            self.player.anims.play(AnimationKey::Right, true);
        } else {
            physics.set_velocity_x(body, 0.0);
            self.player.anims.play(AnimationKey::Turn, false);
        }

        if input.up && physics.touching_down(body) {
            physics.set_velocity_y(body, -self.jump_velocity);
        }

        self.player.vel = physics.velocity(body);
    }

    // ── Contact handlers ─────────────────────────────────────────────────────

    /// Collect `star`.  Returns `false` when nothing happened (frozen
    /// session, unknown handle or an already collected star).
    ///
    /// Collecting the last active star brings the whole row back at the top
    /// of the world and spawns exactly one bomb.
    pub fn on_star_overlap(
        &mut self,
        star: BodyHandle,
        physics: &mut impl PhysicsWorld,
        rng: &mut impl Rng,
    ) -> bool {
        if self.is_frozen() {
            return false;
        }
        let Some(target) = self.stars.iter_mut().find(|s| s.body == star) else {
            warn!("overlap reported for unknown star {:?}", star);
            return false;
        };
        if !target.active {
            return false;
        }

        physics.disable_body(star);
        target.active = false;
        self.score += 1;
        debug!("star {:?} collected, {}", star, self.score_text());

        if self.active_star_count() == 0 {
            self.reset_stars(physics);
            self.spawn_bomb(physics, rng);
        }
        true
    }

    /// Bomb touched the player: pause physics, tint the player and hold the
    /// `turn` frame.  Only [`GameSession::restart`] leaves this state.
    pub fn on_bomb_contact(&mut self, bomb: BodyHandle, physics: &mut impl PhysicsWorld) {
        if self.is_frozen() {
            return;
        }
        physics.pause();
        self.state = SessionState::Frozen;
        self.player.tint = Some(FROZEN_TINT);
        self.player.anims.play(AnimationKey::Turn, false);
        info!(
            "bomb {:?} hit the player; session frozen with {}",
            bomb,
            self.score_text()
        );
    }

    /// Route contacts from a physics step to the handlers above.  Routing
    /// stops at the first contact that freezes the session.
    pub fn handle_contacts(
        &mut self,
        contacts: &[Contact],
        physics: &mut impl PhysicsWorld,
        rng: &mut impl Rng,
    ) {
        for contact in contacts {
            if self.is_frozen() {
                break;
            }
            let Some(other) = self.other_than_player(contact) else {
                continue;
            };
            match contact.kind {
                ContactKind::Overlap => {
                    self.on_star_overlap(other, physics, rng);
                }
                ContactKind::Collide => {
                    if self.bombs.iter().any(|b| b.body == other) {
                        self.on_bomb_contact(other, physics);
                    }
                }
            }
        }
    }

    fn other_than_player(&self, contact: &Contact) -> Option<BodyHandle> {
        let player = self.player.body;
        if contact.first == player {
            Some(contact.second)
        } else if contact.second == player {
            Some(contact.first)
        } else {
            None
        }
    }

    fn reset_stars(&mut self, physics: &mut impl PhysicsWorld) {
        for star in &mut self.stars {
            let pos = Vec2::new(star.pos.x, 0.0);
            physics.enable_body(star.body, pos);
            star.pos = pos;
            star.active = true;
        }
    }

    fn spawn_bomb(&mut self, physics: &mut impl PhysicsWorld, rng: &mut impl Rng) {
        let player_x = physics.position(self.player.body).x;
        let x = bomb_spawn_x(player_x, rng);
        let vel = bomb_launch_velocity(rng);
        let pos = Vec2::new(x, BOMB_SPAWN_Y);

        let body = physics.create_dynamic_body(Group::Bombs, pos, self.textures.bomb);
        physics.set_bounce(body, Vec2::splat(BOMB_BOUNCE));
        physics.set_collide_world_bounds(body, true);
        physics.set_velocity(body, vel);
        self.bombs.push(Bomb { body, pos, vel });

        info!(
            "bomb #{} spawned at ({}, {}) moving ({}, {})",
            self.bombs.len(),
            pos.x,
            pos.y,
            vel.x,
            vel.y
        );
    }

    // ── Frame driver ─────────────────────────────────────────────────────────

    /// Copy simulated positions and velocities into the plain records.
    pub fn sync_from_physics(&mut self, physics: &impl PhysicsWorld) {
        self.player.pos = physics.position(self.player.body);
        self.player.vel = physics.velocity(self.player.body);
        for star in self.stars.iter_mut().filter(|s| s.active) {
            star.pos = physics.position(star.body);
        }
        for bomb in &mut self.bombs {
            bomb.pos = physics.position(bomb.body);
            bomb.vel = physics.velocity(bomb.body);
        }
    }

    /// Run one frame: input, physics step, record sync, contact routing and
    /// animation.
    pub fn frame(
        &mut self,
        input: &InputState,
        dt: f32,
        physics: &mut impl PhysicsWorld,
        rng: &mut impl Rng,
    ) {
        self.update(input, physics);
        let contacts = physics.step(dt);
        self.sync_from_physics(&*physics);
        self.handle_contacts(&contacts, physics, rng);
        if !self.is_frozen() {
            self.player.anims.tick(dt);
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Draw the scene back to front.  Does not present.
    pub fn render(&self, renderer: &mut impl Renderer) -> GameResult<()> {
        renderer.draw_image(Vec2::from(SKY_POS), self.textures.sky, 1.0)?;
        for platform in &self.platforms {
            renderer.draw_image(platform.pos, self.textures.ground, platform.scale)?;
        }
        for star in self.stars.iter().filter(|s| s.active) {
            renderer.draw_image(star.pos, self.textures.star, 1.0)?;
        }
        for bomb in &self.bombs {
            renderer.draw_image(bomb.pos, self.textures.bomb, 1.0)?;
        }

        let frame = self.player.anims.current_frame().unwrap_or(IDLE_FRAME);
        renderer.draw_sprite(self.player.pos, self.textures.dude, frame, self.player.tint)?;

        let style = TextStyle {
            font_size: SCORE_FONT_SIZE,
            fill: SCORE_FILL,
        };
        renderer.draw_text(Vec2::from(SCORE_POS), &self.score_text(), &style)
    }
}
