//! Template engine for rendering the single-page site.

use minijinja::{context, Environment};

/// A rendered lesson.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Chapter {
    /// Section anchor, also the sidebar link target
    pub anchor: String,
    /// Display title
    pub title: String,
    /// Heading level of the chapter title (1 top-level, 2 inside a group)
    pub level: u8,
    /// Rendered lesson HTML
    pub html: String,
}

/// A run of chapters, optionally under a group title.
///
/// Both the sidebar and the main content are rendered from the same parts, so
/// every sidebar link has a matching section.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Part {
    /// Group title, `None` for top-level lessons
    pub title: Option<String>,
    /// Chapters in document order
    pub chapters: Vec<Chapter>,
}

/// Context for rendering the page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Document title
    pub title: String,
    /// Sidebar heading
    pub heading: String,
    /// Inline stylesheet
    pub styles: String,
    /// Page structure
    pub parts: Vec<Part>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("page.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");

        env.add_template("nav.html", NAV_TEMPLATE)
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render the page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            heading => &context.heading,
            styles => &context.styles,
            parts => &context.parts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
{{ styles | safe }}
    </style>
</head>
<body>
    <div class="container">
        <nav class="sidebar">
            <h1>{{ heading }}</h1>
{% include "nav.html" %}
        </nav>
        <main class="content">
{% for part in parts %}
{% if part.title %}<h1>{{ part.title }}</h1>
{% endif %}
{% for chapter in part.chapters %}
<section id="{{ chapter.anchor }}">
<h{{ chapter.level }}>{{ chapter.title }}</h{{ chapter.level }}>
{{ chapter.html | safe }}
</section>
{% endfor %}
{% endfor %}
        </main>
    </div>
</body>
</html>
"##;

const NAV_TEMPLATE: &str = r##"{% for part in parts %}
{% if part.title %}<div class="part-title">{{ part.title }}</div>
{% endif %}<ul>
{% for chapter in part.chapters %}<li><a href="#{{ chapter.anchor }}">{{ chapter.title }}</a></li>
{% endfor %}</ul>
{% endfor %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(anchor: &str, title: &str, level: u8, html: &str) -> Chapter {
        Chapter {
            anchor: anchor.to_string(),
            title: title.to_string(),
            level,
            html: html.to_string(),
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let context = Context {
            title: "Workshop".to_string(),
            heading: "DE Workshop".to_string(),
            styles: "body { color: #333; }".to_string(),
            parts: vec![Part {
                title: None,
                chapters: vec![chapter("schedule", "Schedule", 1, "<p>Hello world</p>")],
            }],
        };

        let html = engine.render_page("page.html", &context).unwrap();

        assert!(html.contains("<title>Workshop</title>"));
        assert!(html.contains("body { color: #333; }"));
        assert!(html.contains(r#"<section id="schedule">"#));
        assert!(html.contains("<h1>Schedule</h1>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r##"<li><a href="#schedule">Schedule</a></li>"##));
        assert!(!html.contains("part-title"));
    }

    #[test]
    fn renders_groups() {
        let engine = TemplateEngine::new();

        let context = Context {
            title: "Workshop".to_string(),
            heading: "Docs".to_string(),
            styles: String::new(),
            parts: vec![Part {
                title: Some("Day 1".to_string()),
                chapters: vec![chapter(
                    "Day-1-01-intro-to-R",
                    "Introduction to R",
                    2,
                    "<p>R basics</p>",
                )],
            }],
        };

        let html = engine.render_page("page.html", &context).unwrap();

        assert!(html.contains(r#"<div class="part-title">Day 1</div>"#));
        assert!(html.contains("<h1>Day 1</h1>"));
        assert!(html.contains("<h2>Introduction to R</h2>"));
        assert!(html.contains(r##"href="#Day-1-01-intro-to-R""##));
    }

    #[test]
    fn escapes_titles_but_not_chapter_html() {
        let engine = TemplateEngine::new();

        let context = Context {
            title: "Workshop".to_string(),
            heading: "Docs".to_string(),
            styles: String::new(),
            parts: vec![Part {
                title: None,
                chapters: vec![chapter(
                    "annotation",
                    "Annotation & Visualization",
                    1,
                    "<em>kept</em>",
                )],
            }],
        };

        let html = engine.render_page("page.html", &context).unwrap();

        assert!(html.contains("Annotation &amp; Visualization"));
        assert!(html.contains("<em>kept</em>"));
    }
}
