//! Single-page static site generator for course lessons.
//!
//! Renders every lesson in a fixed [`Outline`] into one anchored HTML page with
//! a sidebar table of contents, then publishes the shared figures directory and
//! a `.nojekyll` marker next to it.

pub mod assets;
pub mod builder;
pub mod outline;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder, INDEX_FILE};
pub use outline::{anchor, Leaf, Node, Outline, OutlineError};
