//! Leading metadata block extraction.

/// Marker that opens and closes a metadata block.
const MARKER: &str = "---";

/// Split a lesson into its leading metadata block and the remaining content.
///
/// A metadata block is only recognized when the source starts with `---` at the
/// very first byte and the marker appears a second time somewhere after it.
/// The text between the two markers is returned as the metadata; everything
/// after the second marker is the content. When no block is present the
/// content is the whole source, unchanged.
pub fn extract_frontmatter(source: &str) -> (Option<&str>, &str) {
    let Some(after_open) = source.strip_prefix(MARKER) else {
        return (None, source);
    };

    let Some(close_pos) = after_open.find(MARKER) else {
        return (None, source);
    };

    let metadata = &after_open[..close_pos];
    let content = &after_open[close_pos + MARKER.len()..];

    (Some(metadata), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_metadata_block() {
        let source = "---\ntitle: Normalization\nauthor: Core team\n---\n\n# Normalization\n";

        let (metadata, content) = extract_frontmatter(source);

        assert_eq!(metadata, Some("\ntitle: Normalization\nauthor: Core team\n"));
        assert_eq!(content, "\n\n# Normalization\n");
    }

    #[test]
    fn handles_no_metadata() {
        let source = "# Just Markdown\n\nNo metadata here.";

        let (metadata, content) = extract_frontmatter(source);

        assert!(metadata.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn requires_marker_at_first_byte() {
        let source = "\n---\ntitle: Late\n---\n# Body";

        let (metadata, content) = extract_frontmatter(source);

        assert!(metadata.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn unclosed_block_keeps_source() {
        let source = "---\ntitle: Test\n# No closing marker";

        let (metadata, content) = extract_frontmatter(source);

        assert!(metadata.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn later_horizontal_rules_stay_in_content() {
        let source = "---\nlayout: lesson\n---\nIntro\n\n---\n\nMore";

        let (_, content) = extract_frontmatter(source);

        assert_eq!(content, "\nIntro\n\n---\n\nMore");
    }
}
