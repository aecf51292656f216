//! Single-page site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use coursebook_md::{render_chapter, HeadingIds, FIGURES_DIR};

use crate::assets::{copy_dir, write_nojekyll, AssetPipeline};
use crate::outline::{Leaf, Node, Outline, OutlineError};
use crate::templates::{Chapter, Context, Part, TemplateEngine};

/// Name of the generated page inside the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the outline paths are relative to
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Document title
    pub title: String,

    /// Sidebar heading
    pub heading: String,

    /// Minify the inline stylesheet
    pub minify: bool,

    /// Extra stylesheets appended to the inline CSS
    pub styles: Vec<PathBuf>,

    /// Lessons to publish
    pub outline: Outline,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("."),
            output_dir: PathBuf::from("docs"),
            title: "RNA-seq Differential Expression Analysis Workshop".to_string(),
            heading: "RNA-seq DE Workshop".to_string(),
            minify: true,
            styles: vec![],
            outline: Outline::workshop(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of chapters rendered
    pub chapters: usize,

    /// Outline paths with no file on disk
    pub skipped: Vec<PathBuf>,

    /// Number of figure files copied
    pub figures: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Path of the generated page
    pub output_file: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid outline: {0}")]
    Outline(#[from] OutlineError),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.config.outline.validate()?;

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let mut skipped = Vec::new();
        let parts = self.render_parts(&mut skipped)?;
        let chapters = parts.iter().map(|p| p.chapters.len()).sum();

        let context = Context {
            title: self.config.title.clone(),
            heading: self.config.heading.clone(),
            styles: self.stylesheet()?,
            parts,
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;

        let output_file = self.config.output_dir.join(INDEX_FILE);
        fs::write(&output_file, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let figures = self.copy_figures()?;

        write_nojekyll(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(BuildResult {
            chapters,
            skipped,
            figures,
            duration_ms: start.elapsed().as_millis() as u64,
            output_file,
        })
    }

    /// Render the outline into page parts.
    ///
    /// Consecutive top-level lessons share one part; each group is its own
    /// part. Lessons with no file on disk are left out and recorded in
    /// `skipped`, and a part left with no chapters is dropped.
    fn render_parts(&self, skipped: &mut Vec<PathBuf>) -> Result<Vec<Part>, BuildError> {
        let mut ids = HeadingIds::with_reserved(self.config.outline.leaves().map(Leaf::anchor));
        let mut parts: Vec<Part> = Vec::new();
        let mut loose: Vec<Chapter> = Vec::new();

        for node in self.config.outline.nodes() {
            match node {
                Node::Leaf(leaf) => {
                    if let Some(chapter) = self.render_leaf(leaf, 1, &mut ids, skipped)? {
                        loose.push(chapter);
                    }
                }
                Node::Group { title, leaves } => {
                    flush_loose(&mut parts, &mut loose);

                    let mut chapters = Vec::new();
                    for leaf in leaves.iter() {
                        if let Some(chapter) = self.render_leaf(leaf, 2, &mut ids, skipped)? {
                            chapters.push(chapter);
                        }
                    }

                    if chapters.is_empty() {
                        tracing::warn!("No lessons found for {}, leaving it out", title);
                        continue;
                    }

                    parts.push(Part {
                        title: Some(title.to_string()),
                        chapters,
                    });
                }
            }
        }

        flush_loose(&mut parts, &mut loose);

        Ok(parts)
    }

    /// Render a single lesson, or `None` if its file does not exist.
    fn render_leaf(
        &self,
        leaf: &Leaf,
        level: u8,
        ids: &mut HeadingIds,
        skipped: &mut Vec<PathBuf>,
    ) -> Result<Option<Chapter>, BuildError> {
        let path = self.config.content_dir.join(leaf.path);

        if !path.is_file() {
            tracing::warn!("Lesson not found, skipping: {}", path.display());
            skipped.push(path);
            return Ok(None);
        }

        let source = fs::read_to_string(&path).map_err(|e| BuildError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Rendering {}", path.display());

        Ok(Some(Chapter {
            anchor: leaf.anchor(),
            title: leaf.title.to_string(),
            level,
            html: render_chapter(&source, ids),
        }))
    }

    /// Build the inline stylesheet.
    fn stylesheet(&self) -> Result<String, BuildError> {
        let mut css = AssetPipeline::generate_css();

        for style_path in &self.config.styles {
            if !style_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path.display());
                continue;
            }

            let extra = fs::read_to_string(style_path).map_err(|e| BuildError::ReadError {
                path: style_path.display().to_string(),
                message: e.to_string(),
            })?;
            css.push('\n');
            css.push_str(&extra);
            tracing::info!("Included stylesheet {}", style_path.display());
        }

        if !self.config.minify {
            return Ok(css);
        }

        match AssetPipeline::minify_css(&css) {
            Ok(minified) => Ok(minified),
            Err(e) => {
                tracing::warn!("Keeping unminified CSS: {}", e);
                Ok(css)
            }
        }
    }

    /// Replace the output figures directory with the content one, if present.
    fn copy_figures(&self) -> Result<usize, BuildError> {
        let src = self.config.content_dir.join(FIGURES_DIR);
        if !src.is_dir() {
            tracing::debug!("No figures directory at {}", src.display());
            return Ok(0);
        }

        let dst = self.config.output_dir.join(FIGURES_DIR);
        let copied = copy_dir(&src, &dst).map_err(|e| {
            BuildError::WriteError(format!("copying {}: {}", src.display(), e))
        })?;

        tracing::info!("Copied {} figures to {}", copied, dst.display());

        Ok(copied)
    }
}

/// Move pending top-level chapters into their own part.
fn flush_loose(parts: &mut Vec<Part>, loose: &mut Vec<Chapter>) {
    if !loose.is_empty() {
        parts.push(Part {
            title: None,
            chapters: std::mem::take(loose),
        });
    }
}
