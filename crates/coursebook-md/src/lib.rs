//! Lesson chapter rendering.
//!
//! This crate turns a single Markdown lesson into an HTML fragment: it drops the
//! leading metadata block, flattens figure references to a shared `figures/`
//! directory and renders the Markdown with heading ids that stay unique across
//! a whole page.

pub mod figures;
pub mod frontmatter;
pub mod render;

pub use figures::{rewrite_figure_paths, rewrite_html_sources, FIGURES_DIR};
pub use frontmatter::extract_frontmatter;
pub use render::{render_chapter, render_markdown, slugify, HeadingIds};
