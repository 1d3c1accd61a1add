//! Pie-chart slice layout.
//!
//! Converts an ordered list of `(value, label)` pairs into non-overlapping
//! angular ranges on a circle and answers "which slice contains angle θ /
//! point (x, y)". Rendering is somebody else's problem: a drawing adapter
//! turns each [`layout::Slice`] into arc calls for whatever backend it likes.
//!
//! Angle convention, used everywhere in this crate: degrees, 0° along the
//! positive x axis, increasing *clockwise on screen* (screen coordinates put
//! +y downward, which is also the sweep direction of a cairo/canvas `arc`).

pub mod color;
pub mod geom;
pub mod layout;

mod macros;

pub use color::Color;
pub use geom::Point;
pub use layout::{BuildResult, Label, LayoutError, Slice, SliceInput, SliceSet};
