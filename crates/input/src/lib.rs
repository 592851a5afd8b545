//! Input capability: which keys are held this frame.
//!
//! # Invariants
//! - World logic only ever asks "is this key down"; it never sees raw events.
//! - Scripted input and live keyboard input are interchangeable.

pub mod key;
pub mod script;

pub use key::{Key, KeyInput, KeyboardState};
pub use script::{InputError, InputScript, Steer};

pub fn crate_info() -> &'static str {
    "skyline-input v0.1.0"
}
