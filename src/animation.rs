//! Named sprite-sheet animations and their playback state.
//!
//! Definitions are registered once per session; `play` switches the
//! current clip and `tick` advances it by wall time.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Left,
    Right,
    Turn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play through once and hold the last frame.
    Once,
    Forever,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDef {
    pub key: AnimationKey,
    /// Sprite-sheet frame indices, in play order.
    pub frames: Vec<u32>,
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationDef {
    /// Clip over the inclusive frame range `start..=end`.
    pub fn range(key: AnimationKey, start: u32, end: u32, frame_rate: f32, repeat: Repeat) -> Self {
        Self {
            key,
            frames: (start..=end).collect(),
            frame_rate,
            repeat,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Playback {
    key: AnimationKey,
    index: usize,
    elapsed: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Animator {
    defs: HashMap<AnimationKey, AnimationDef>,
    current: Option<Playback>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: AnimationDef) {
        self.defs.insert(def.key, def);
    }

    pub fn is_registered(&self, key: AnimationKey) -> bool {
        self.defs.contains_key(&key)
    }

    /// Start `key` from its first frame.  With `ignore_if_playing` a clip
    /// that is already current keeps its position.  Unknown keys are ignored.
    pub fn play(&mut self, key: AnimationKey, ignore_if_playing: bool) {
        if ignore_if_playing && self.current_key() == Some(key) {
            return;
        }
        if !self.defs.contains_key(&key) {
            log::warn!("play: animation {:?} was never registered", key);
            return;
        }
        self.current = Some(Playback {
            key,
            index: 0,
            elapsed: 0.0,
        });
    }

    pub fn current_key(&self) -> Option<AnimationKey> {
        self.current.as_ref().map(|p| p.key)
    }

    /// Sprite-sheet frame to draw, if anything is playing.
    pub fn current_frame(&self) -> Option<u32> {
        let playback = self.current.as_ref()?;
        let def = self.defs.get(&playback.key)?;
        def.frames.get(playback.index).copied()
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(playback) = self.current.as_mut() else {
            return;
        };
        let Some(def) = self.defs.get(&playback.key) else {
            return;
        };
        if def.frames.len() < 2 || def.frame_rate <= 0.0 {
            return;
        }

        let frame_time = 1.0 / def.frame_rate;
        playback.elapsed += dt;
        while playback.elapsed >= frame_time {
            playback.elapsed -= frame_time;
            let next = playback.index + 1;
            if next < def.frames.len() {
                playback.index = next;
            } else if def.repeat == Repeat::Forever {
                playback.index = 0;
            } else {
                playback.elapsed = 0.0;
                break;
            }
        }
    }
}
