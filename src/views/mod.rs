//! Presentation helpers: pure functions over tasks and dates.
//!
//! Nothing here reads a clock. Callers pass `today` explicitly.

pub mod calendar;
pub mod color;
pub mod format;
pub mod input;

pub use calendar::*;
pub use color::*;
pub use format::*;
pub use input::*;
