use crate::key::{Key, KeyInput, KeyboardState};

/// Errors from parsing a steering script.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown steer symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("steer script is empty")]
    Empty,
}

/// One frame's worth of steering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Right,
    Left,
    Both,
    None,
}

impl Steer {
    fn keys(self) -> &'static [Key] {
        match self {
            Self::Right => &[Key::ArrowRight],
            Self::Left => &[Key::ArrowLeft],
            Self::Both => &[Key::ArrowLeft, Key::ArrowRight],
            Self::None => &[],
        }
    }
}

/// A looping per-frame steering script, e.g. `"RRR---LL"`.
///
/// `R` holds right, `L` holds left, `B` holds both, `-` or `.` holds nothing.
/// Whitespace is ignored. The script repeats once exhausted.
#[derive(Debug, Clone)]
pub struct InputScript {
    frames: Vec<Steer>,
    cursor: usize,
    state: KeyboardState,
}

impl InputScript {
    pub fn parse(script: &str) -> Result<Self, InputError> {
        let mut frames = Vec::new();
        for (position, symbol) in script.chars().enumerate() {
            let steer = match symbol.to_ascii_uppercase() {
                'R' => Steer::Right,
                'L' => Steer::Left,
                'B' => Steer::Both,
                '-' | '.' => Steer::None,
                c if c.is_whitespace() => continue,
                _ => return Err(InputError::UnknownSymbol { symbol, position }),
            };
            frames.push(steer);
        }
        if frames.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self {
            frames,
            cursor: 0,
            state: KeyboardState::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Load the next frame's keys into the held state and return the steer.
    pub fn advance(&mut self) -> Steer {
        let steer = self.frames[self.cursor % self.frames.len()];
        self.cursor += 1;
        self.state.set_held(steer.keys());
        steer
    }
}

impl KeyInput for InputScript {
    fn is_key_down(&self, key: Key) -> bool {
        self.state.is_key_down(key)
    }
}
