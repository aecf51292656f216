//! Figure path rewriting.
//!
//! Lessons live in per-day folders and refer to images as `../figures/x.png`,
//! while the published page sits next to a single flattened `figures/`
//! directory. Every image reference is normalized to `figures/x.png`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Directory name that figures are flattened into.
pub const FIGURES_DIR: &str = "figures";

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\((?:\.\./)?figures/([^)]+)\)").expect("valid markdown image regex")
});

static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\s+([^>]*?)src=["'](?:\.\./)?figures/([^"']+)["']([^>]*?)>"#)
        .expect("valid img tag regex")
});

static PARENT_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)src=["']\.\./figures/([^"']+)["']"#).expect("valid src attribute regex")
});

/// Rewrite Markdown image syntax pointing into a figures folder.
///
/// `![alt](../figures/a.png)` and `![alt](figures/a.png)` both become
/// `![alt](figures/a.png)`.
pub fn rewrite_markdown_figures(markdown: &str) -> Cow<'_, str> {
    MARKDOWN_IMAGE.replace_all(markdown, "![${1}](figures/${2})")
}

/// Rewrite raw `<img>` tags embedded in Markdown.
///
/// The tag name match is case-insensitive and either quote style is accepted.
/// Attributes around `src` are kept as written; the rewritten `src` always
/// uses double quotes.
pub fn rewrite_img_tags(markdown: &str) -> Cow<'_, str> {
    IMG_TAG.replace_all(markdown, r#"<img ${1}src="figures/${2}"${3}>"#)
}

/// Rewrite any parent-relative `src` attribute left in rendered HTML.
pub fn rewrite_html_sources(html: &str) -> Cow<'_, str> {
    PARENT_SRC.replace_all(html, r#"src="figures/${1}""#)
}

/// Apply both source-level rewrites to a Markdown document.
pub fn rewrite_figure_paths(markdown: &str) -> String {
    let markdown = rewrite_markdown_figures(markdown);
    rewrite_img_tags(&markdown).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flattens_parent_relative_markdown_images() {
        assert_eq!(
            rewrite_markdown_figures("See ![PCA plot](../figures/pca.png) below."),
            "See ![PCA plot](figures/pca.png) below."
        );
    }

    #[test]
    fn keeps_flattened_markdown_images() {
        let source = "![MA plot](figures/ma.png)";
        assert_eq!(rewrite_markdown_figures(source), source);
    }

    #[test]
    fn leaves_other_images_alone() {
        let source = "![logo](https://example.org/logo.png) ![x](../img/x.png)";
        assert_eq!(rewrite_markdown_figures(source), source);
    }

    #[test]
    fn rewrites_img_tags_and_keeps_attributes() {
        assert_eq!(
            rewrite_img_tags(r#"<img width="400" src="../figures/volcano.png" alt="Volcano">"#),
            r#"<img width="400" src="figures/volcano.png" alt="Volcano">"#
        );
    }

    #[test]
    fn img_tags_match_case_insensitively_with_single_quotes() {
        assert_eq!(
            rewrite_img_tags("<IMG src='../figures/heatmap.png'>"),
            r#"<img src="figures/heatmap.png">"#
        );
        assert_eq!(
            rewrite_img_tags("<img src='figures/heatmap.png'/>"),
            r#"<img src="figures/heatmap.png"/>"#
        );
    }

    #[test]
    fn both_forms_end_at_the_same_path() {
        let parent = rewrite_figure_paths("![a](../figures/dispersion.png)");
        let flat = rewrite_figure_paths("![a](figures/dispersion.png)");
        assert_eq!(parent, flat);

        let parent_tag = rewrite_figure_paths(r#"<img src="../figures/dispersion.png">"#);
        let flat_tag = rewrite_figure_paths(r#"<img src="figures/dispersion.png">"#);
        assert_eq!(parent_tag, flat_tag);
    }

    #[test]
    fn rewrites_leftover_html_sources() {
        assert_eq!(
            rewrite_html_sources(r#"<video SRC='../figures/demo.mp4'></video>"#),
            r#"<video src="figures/demo.mp4"></video>"#
        );
    }
}
