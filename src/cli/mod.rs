//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Exit-key polling using crossterm
//! - `display.rs`: Live HUD, session result and history listing
//! - `interrupt.rs`: Ctrl+C flag for headless runs

pub mod display;
pub mod input;
pub mod interrupt;

pub use display::Display;
pub use input::InputHandler;
pub use interrupt::InterruptFlag;
