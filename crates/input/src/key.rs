use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keys the flight scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Read-only "is key X currently held" capability.
pub trait KeyInput {
    fn is_key_down(&self, key: Key) -> bool;
}

impl<T: KeyInput + ?Sized> KeyInput for &T {
    fn is_key_down(&self, key: Key) -> bool {
        (**self).is_key_down(key)
    }
}

/// Held-key set fed by a window loop or a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: BTreeSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Replace the held set with exactly `keys`.
    pub fn set_held(&mut self, keys: &[Key]) {
        self.held = keys.iter().copied().collect();
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

impl KeyInput for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(feature = "winit")]
impl Key {
    /// Map a physical winit key code to a scene key, if it is one we use.
    pub fn from_winit(code: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode;
        match code {
            KeyCode::ArrowLeft => Some(Self::ArrowLeft),
            KeyCode::ArrowRight => Some(Self::ArrowRight),
            KeyCode::ArrowUp => Some(Self::ArrowUp),
            KeyCode::ArrowDown => Some(Self::ArrowDown),
            _ => None,
        }
    }
}
