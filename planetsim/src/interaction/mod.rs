pub mod input;
pub mod drag;
