//! Asset pipeline: inline stylesheet, figure copying and hosting markers.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Marker file that stops GitHub Pages from running Jekyll over the output.
pub const NOJEKYLL: &str = ".nojekyll";

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the page stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// Replace `dst` with a recursive copy of `src`.
///
/// Anything previously under `dst` is removed first. Returns the number of
/// files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<usize> {
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    fs::create_dir_all(dst)?;

    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Write the empty `.nojekyll` marker into `dir`.
pub fn write_nojekyll(dir: &Path) -> io::Result<()> {
    fs::write(dir.join(NOJEKYLL), "")
}

const DEFAULT_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  line-height: 1.6;
  color: #333;
  background: #f5f5f5;
}

.container {
  display: flex;
  max-width: 1400px;
  margin: 0 auto;
  background: white;
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  width: 280px;
  background: #2c3e50;
  color: white;
  padding: 20px;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.sidebar h1 {
  font-size: 1.2em;
  margin-bottom: 20px;
  padding-bottom: 10px;
  border-bottom: 2px solid #34495e;
}

.sidebar ul {
  list-style: none;
}

.sidebar li {
  margin: 5px 0;
}

.sidebar a {
  color: #ecf0f1;
  text-decoration: none;
  display: block;
  padding: 8px 12px;
  border-radius: 4px;
  transition: background 0.2s;
}

.sidebar a:hover {
  background: #34495e;
}

.sidebar .part-title {
  color: #95a5a6;
  font-weight: bold;
  margin-top: 15px;
  margin-bottom: 5px;
  padding: 8px 12px;
  font-size: 0.9em;
  text-transform: uppercase;
}

/* Main content */
.content {
  flex: 1;
  padding: 40px;
  max-width: 900px;
}

.content h1 {
  color: #2c3e50;
  margin-bottom: 20px;
  padding-bottom: 10px;
  border-bottom: 2px solid #ecf0f1;
}

.content h2 {
  color: #34495e;
  margin-top: 30px;
  margin-bottom: 15px;
}

.content h3 {
  color: #34495e;
  margin-top: 25px;
  margin-bottom: 12px;
}

.content p {
  margin-bottom: 15px;
}

.content img {
  max-width: 100%;
  height: auto;
  margin: 20px 0;
  border-radius: 4px;
}

/* Code blocks */
.content pre {
  background: #f8f9fa;
  border: 1px solid #e9ecef;
  border-radius: 4px;
  padding: 15px;
  overflow-x: auto;
  margin: 20px 0;
}

.content code {
  background: #f8f9fa;
  padding: 2px 6px;
  border-radius: 3px;
  font-family: 'Monaco', 'Courier New', monospace;
  font-size: 0.9em;
}

.content pre code {
  background: none;
  padding: 0;
}

/* Tables */
.content table {
  width: 100%;
  border-collapse: collapse;
  margin: 20px 0;
}

.content table th,
.content table td {
  border: 1px solid #ddd;
  padding: 12px;
  text-align: left;
}

.content table th {
  background: #2c3e50;
  color: white;
}

.content table tr:nth-child(even) {
  background: #f8f9fa;
}

.content blockquote {
  border-left: 4px solid #3498db;
  padding-left: 20px;
  margin: 20px 0;
  color: #555;
}

.content ul, .content ol {
  margin: 15px 0;
  padding-left: 30px;
}

.content li {
  margin: 8px 0;
}

/* Responsive */
@media (max-width: 768px) {
  .container {
    flex-direction: column;
  }

  .sidebar {
    width: 100%;
    height: auto;
    position: relative;
  }

  .content {
    padding: 20px;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".sidebar"));
        assert!(css.contains(".part-title"));
        assert!(css.contains("@media (max-width: 768px)"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.sidebar {
    background: #2c3e50;
    padding: 20px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".sidebar"));
    }

    #[test]
    fn default_css_survives_minification() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();

        assert!(minified.len() < DEFAULT_CSS.len());
        assert!(minified.contains(".content pre code"));
    }

    #[test]
    fn copy_dir_replaces_previous_contents() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("figures");
        let dst = temp.path().join("site").join("figures");

        fs::create_dir_all(src.join("day-1")).unwrap();
        fs::write(src.join("pca.png"), b"png").unwrap();
        fs::write(src.join("day-1").join("counts.png"), b"png").unwrap();

        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("stale.png"), b"old").unwrap();

        let copied = copy_dir(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert!(dst.join("pca.png").exists());
        assert!(dst.join("day-1").join("counts.png").exists());
        assert!(!dst.join("stale.png").exists());
    }

    #[test]
    fn writes_empty_nojekyll() {
        let temp = tempdir().unwrap();

        write_nojekyll(temp.path()).unwrap();

        let marker = fs::read(temp.path().join(NOJEKYLL)).unwrap();
        assert!(marker.is_empty());
    }
}
