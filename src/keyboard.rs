//! Keyboard polling on top of a crossterm event channel.
//!
//! Instead of acting on each key event individually, the poller records the
//! frame number of the last press/repeat event for every key and treats a
//! key as held while that stamp is fresh.  Terminals with keyboard
//! enhancement send real releases and drop keys at once; classic terminals
//! only repeat presses, so keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use star_catcher::collaborators::{InputPoller, InputState};

/// The OS key-repeat rate is at least 15 Hz, so 4 frames at 30 FPS
/// (≈133 ms) is always refreshed before it lapses.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

pub struct KeyboardPoller {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    quit: bool,
    restart: bool,
    resized: Option<(u16, u16)>,
}

impl KeyboardPoller {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            quit: false,
            restart: false,
            resized: None,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Returns and clears a pending restart request.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| is_held(&self.key_frame, k, self.frame))
    }

    fn drain(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            let (code, kind, modifiers) = match event {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => (code, kind, modifiers),
                Event::Resize(cols, rows) => {
                    self.resized = Some((cols, rows));
                    continue;
                }
                _ => continue,
            };
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code.clone(), self.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            self.quit = true
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }
    }
}

impl InputPoller for KeyboardPoller {
    fn poll(&mut self) -> InputState {
        self.frame += 1;
        self.drain();
        InputState {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            up: self.any_held(&[
                KeyCode::Up,
                KeyCode::Char('w'),
                KeyCode::Char('W'),
                KeyCode::Char(' '),
            ]),
        }
    }
}
