//! Beam search route-finding visualizer.
//!
//! Shows the reference graph on an 80x24 terminal, lets the user pick a start
//! and a goal node, then replays the beam search one frontier path at a time
//! and highlights the route it finds. [`trace`] runs the same search without
//! a terminal.

pub mod layout;
pub mod trace;
pub mod visualizer;

pub use layout::{Layout, REFERENCE_LAYOUT};
pub use trace::trace;
pub use visualizer::{DemoConfig, HEIGHT, TITLE, Visualizer, WIDTH};
