//! Renders the gradient badge icon set.
//!
//! The badge is a rounded square with a vertical indigo-to-orange gradient
//! and three translucent white bars. [`icon_gen::render_icon`] writes a
//! single size; [`icon_gen::generate_icons`] drives a whole run.

pub mod badge;
pub mod error;
pub mod icon_gen;
pub mod logging;
pub mod manifest;
pub mod raster;

pub use error::RenderError;
pub use icon_gen::{render_icon, Args};
