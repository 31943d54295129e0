pub mod handler;

pub use handler::{ConfigChange, InputHandler, KeyAction};
