//! Compile-time tuning values.  `GameConfig::default()` reads the runtime
//! subset from here; everything else is fixed for every session.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

/// Downward acceleration in px/s².
pub const GRAVITY_Y: f32 = 450.0;

/// Physics integrates in fixed slices of this length regardless of the
/// frame rate the front-end runs at.
pub const FIXED_STEP: f32 = 1.0 / 60.0;

/// A bounce that leaves less vertical speed than this settles the body.
pub const REST_SPEED: f32 = 20.0;

pub const FRAME_RATE: u32 = 30;

// ── Scene layout ──────────────────────────────────────────────────────────────

pub const SKY_POS: (f32, f32) = (400.0, 300.0);

/// (x, y, scale) for every static platform.  The first one is the ground.
pub const PLATFORMS: [(f32, f32, f32); 4] = [
    (400.0, 568.0, 2.0),
    (600.0, 400.0, 1.0),
    (50.0, 250.0, 1.0),
    (750.0, 220.0, 1.0),
];

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START: (f32, f32) = (100.0, 450.0);
pub const PLAYER_BOUNCE: f32 = 0.2;
pub const RUN_SPEED: f32 = 160.0;
pub const JUMP_VELOCITY: f32 = 420.0;

/// `0xff000` as written in the original scene, i.e. 0x0FF000 (green).
pub const FROZEN_TINT: u32 = 0x0F_F000;

pub const PLAYER_FRAME_WIDTH: u32 = 32;
pub const PLAYER_FRAME_HEIGHT: u32 = 48;

// ── Stars ─────────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 21;
pub const STAR_START_X: f32 = 12.0;
pub const STAR_STEP_X: f32 = 50.0;
pub const STAR_BOUNCE_MIN: f32 = 0.4;
pub const STAR_BOUNCE_MAX: f32 = 0.8;

// ── Bombs ─────────────────────────────────────────────────────────────────────

/// Player x below this spawns the bomb on the right half.
pub const BOMB_SPLIT_X: f32 = 400.0;
pub const BOMB_SPAWN_Y: f32 = 16.0;
pub const BOMB_FALL_SPEED: f32 = 20.0;
pub const BOMB_MAX_SPEED_X: i32 = 200;
pub const BOMB_BOUNCE: f32 = 1.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const SCORE_POS: (f32, f32) = (15.0, 15.0);
pub const SCORE_FONT_SIZE: u32 = 32;
pub const SCORE_FILL: u32 = 0x00_0000;
