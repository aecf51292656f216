//! Markdown to HTML rendering for lesson chapters.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::figures::{rewrite_figure_paths, rewrite_html_sources};
use crate::frontmatter::extract_frontmatter;

/// Heading ids handed out so far on a page.
///
/// All chapters end up in one HTML document, so ids must be unique across the
/// whole page, not per chapter. Section anchors are reserved up front so a
/// heading can never shadow a sidebar link target.
#[derive(Debug, Clone, Default)]
pub struct HeadingIds {
    seen: HashSet<String>,
}

impl HeadingIds {
    /// Create an empty id set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an id set with the given ids already taken.
    pub fn with_reserved<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark an id as taken. Returns false if it already was.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_string())
    }

    /// Derive a unique id for a heading.
    ///
    /// Duplicates get `_1`, `_2`, ... appended.
    pub fn assign(&mut self, heading: &str) -> String {
        let mut base = slugify(heading);
        if base.is_empty() {
            base = "section".to_string();
        }

        if self.seen.insert(base.clone()) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render Markdown to HTML.
///
/// Line breaks inside a paragraph are kept as `<br />` and every heading gets
/// an `id` attribute. An explicit `{#id}` is kept unless it is already taken on
/// the page. Footnote labels are rewritten to page-unique `fn-` ids.
pub fn render_markdown(content: &str, ids: &mut HeadingIds) -> String {
    let parser = Parser::new_ext(content, options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut events: Vec<Event> = Vec::new();
    let mut heading: Option<(usize, String)> = None; // (start event index, text)
    let mut footnotes: HashMap<String, String> = HashMap::new();

    for mut event in parser {
        match &mut event {
            Event::Start(Tag::Heading { .. }) => {
                heading = Some((events.len(), String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = heading.as_mut() {
                    buf.push_str(text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, text)) = heading.take() {
                    if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                        if let Some(explicit) = id.as_ref() {
                            if !ids.reserve(explicit) {
                                let fresh = ids.assign(explicit);
                                *id = Some(CowStr::from(fresh));
                            }
                        } else {
                            *id = Some(CowStr::from(ids.assign(&text)));
                        }
                    }
                }
            }

            Event::FootnoteReference(label) | Event::Start(Tag::FootnoteDefinition(label)) => {
                let key = label.to_string();
                let unique = footnotes
                    .entry(key)
                    .or_insert_with_key(|key| ids.assign(&format!("fn-{}", key)))
                    .clone();
                *label = CowStr::from(unique);
            }

            _ => {}
        }

        events.push(event);
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    html_output
}

/// Render one lesson file to an HTML fragment.
///
/// Strips the leading metadata block, flattens figure references, renders the
/// Markdown and finally fixes any parent-relative `src` the renderer let through.
pub fn render_chapter(source: &str, ids: &mut HeadingIds) -> String {
    let (_, content) = extract_frontmatter(source);
    let content = rewrite_figure_paths(content);
    let html_output = render_markdown(&content, ids);

    rewrite_html_sources(&html_output).into_owned()
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
