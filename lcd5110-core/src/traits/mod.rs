//! Hardware abstraction traits
//!
//! These traits define the interface between the display protocol
//! and board-specific signaling implementations.

pub mod link;

pub use link::{Line, SerialLink};
