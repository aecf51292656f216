//! The compiled-in course outline.

use std::collections::HashMap;

/// A single lesson file and the title shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// Path relative to the content directory
    pub path: &'static str,
    /// Display title
    pub title: &'static str,
}

impl Leaf {
    /// In-page anchor for this lesson.
    pub fn anchor(&self) -> String {
        anchor(self.path)
    }
}

/// An entry in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A top-level lesson
    Leaf(Leaf),
    /// A titled group of lessons, e.g. one workshop day
    Group {
        title: &'static str,
        leaves: &'static [Leaf],
    },
}

/// Ordered, immutable description of the published page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    nodes: &'static [Node],
}

/// Errors in an outline definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("Duplicate lesson path in outline: {0}")]
    DuplicatePath(String),

    #[error("Lessons {first} and {second} both map to anchor #{anchor}")]
    AnchorCollision {
        anchor: String,
        first: String,
        second: String,
    },
}

impl Outline {
    /// Wrap a static node list.
    pub const fn new(nodes: &'static [Node]) -> Self {
        Self { nodes }
    }

    /// The RNA-seq differential expression workshop.
    pub const fn workshop() -> Self {
        Self::new(WORKSHOP)
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &'static [Node] {
        self.nodes
    }

    /// Every lesson in document order.
    pub fn leaves(&self) -> impl Iterator<Item = &'static Leaf> {
        self.nodes.iter().flat_map(|node| match node {
            Node::Leaf(leaf) => std::slice::from_ref(leaf),
            Node::Group { leaves, .. } => *leaves,
        })
    }

    /// Check that every lesson has a distinct path and a distinct anchor.
    pub fn validate(&self) -> Result<(), OutlineError> {
        let mut anchors: HashMap<String, &str> = HashMap::new();

        for leaf in self.leaves() {
            let anchor = leaf.anchor();

            if let Some(first) = anchors.get(anchor.as_str()) {
                if *first == leaf.path {
                    return Err(OutlineError::DuplicatePath(leaf.path.to_string()));
                }
                return Err(OutlineError::AnchorCollision {
                    anchor,
                    first: first.to_string(),
                    second: leaf.path.to_string(),
                });
            }

            anchors.insert(anchor, leaf.path);
        }

        Ok(())
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::workshop()
    }
}

/// Derive the in-page anchor for a lesson path.
///
/// The `.md` extension is dropped, every character outside `[A-Za-z0-9._-]`
/// (path separators, `&`, spaces, ...) becomes `-`, runs of `-` collapse to
/// one and the result is trimmed of `-`. Case is preserved.
pub fn anchor(path: &str) -> String {
    let stem = path.strip_suffix(".md").unwrap_or(path);

    let folded: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    folded
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

const fn leaf(path: &'static str, title: &'static str) -> Leaf {
    Leaf { path, title }
}

const WORKSHOP: &[Node] = &[
    Node::Leaf(leaf("index.md", "Introduction")),
    Node::Leaf(leaf("welcome-&-setup.md", "Welcome and Setup")),
    Node::Leaf(leaf("schedule.md", "Schedule")),
    Node::Leaf(leaf("useful_links.md", "Useful Links")),
    Node::Group {
        title: "Day 1",
        leaves: &[
            leaf("Day-1/01-intro-to-R.md", "Introduction to R"),
            leaf("Day-1/02-data-management&setup.md", "Data Management & Setup"),
            leaf("Day-1/03-normalization.md", "Normalization"),
            leaf("Day-1/optional-lesson_normalization.md", "Optional: Normalization"),
            leaf("Day-1/further-reading.md", "Further Reading"),
        ],
    },
    Node::Group {
        title: "Day 2",
        leaves: &[
            leaf("Day-2/01-exploratory-analysis.md", "Exploratory Analysis"),
            leaf("Day-2/02-fundamental-stats-for-DE.md", "Fundamental Statistics for DE"),
            leaf("Day-2/03-linear-modeling.md", "Linear Modeling"),
            leaf("Day-2/further-reading.md", "Further Reading"),
        ],
    },
    Node::Group {
        title: "Day 3",
        leaves: &[
            leaf(
                "Day-3/01-differential-expression-analysis.md",
                "Differential Expression Analysis",
            ),
            leaf("Day-3/02-annotation-&-visulaization.md", "Annotation & Visualization"),
            leaf("Day-3/03-putting-it-together.md", "Putting It Together"),
            leaf("Day-3/further-reading.md", "Further Reading"),
        ],
    },
    Node::Leaf(leaf("closing_remarks.md", "Closing Remarks")),
];
