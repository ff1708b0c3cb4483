//! **beamroute-ui**: the presentation toolkit behind the beam search
//! visualizer.
//!
//! Geometry primitives, styled cells, a character grid with frame diffing,
//! input messages, and the Elm-architecture application loop that drives a
//! [`Model`] through a back-end [`Driver`].

pub mod app;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use geom::{Point, Range};
pub use grid::{Cell, Frame, FrameCell, Grid};
pub use messages::{Key, MouseAction, Msg};
pub use style::{Color, Style};
