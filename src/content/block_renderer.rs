use crate::content::ContentBlock;

/// Turns a raw post body into display blocks, one block per line.
///
/// Lines are classified independently on their trimmed form. Consecutive
/// bullet lines stay separate blocks and blank lines become explicit
/// spacers, so the output length always equals the number of lines.
pub fn render_blocks(content: &str) -> Vec<ContentBlock> {
    content.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> ContentBlock {
    let trimmed = line.trim();

    // Longest heading prefix first, so "### " is not swallowed by "# "
    if let Some(text) = trimmed.strip_prefix("### ") {
        return ContentBlock::Heading { level: 3, text: text.to_string() };
    }
    if let Some(text) = trimmed.strip_prefix("## ") {
        return ContentBlock::Heading { level: 2, text: text.to_string() };
    }
    if let Some(text) = trimmed.strip_prefix("# ") {
        return ContentBlock::Heading { level: 1, text: text.to_string() };
    }

    if let Some(text) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        return ContentBlock::BulletItem { text: text.to_string() };
    }

    if trimmed.is_empty() {
        return ContentBlock::Spacer;
    }

    ContentBlock::Paragraph { text: trimmed.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> ContentBlock {
        ContentBlock::Heading { level, text: text.to_string() }
    }

    fn bullet(text: &str) -> ContentBlock {
        ContentBlock::BulletItem { text: text.to_string() }
    }

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph { text: text.to_string() }
    }

    #[test]
    fn test_render_mixed_body() {
        let blocks = render_blocks("# A\n## B\n### C\n- x\n- y\n\npara");
        assert_eq!(blocks, vec![
            heading(1, "A"),
            heading(2, "B"),
            heading(3, "C"),
            bullet("x"),
            bullet("y"),
            ContentBlock::Spacer,
            paragraph("para"),
        ]);
    }

    #[test]
    fn test_render_empty_input_is_one_spacer() {
        assert_eq!(render_blocks(""), vec![ContentBlock::Spacer]);
    }

    #[test]
    fn test_one_block_per_line() {
        let content = "# Title\n\ntext\n- a\n- b\n\n## Next\nmore text\n";
        let blocks = render_blocks(content);
        assert_eq!(blocks.len(), content.split('\n').count());
    }

    #[test]
    fn test_four_hashes_fall_through_to_paragraph() {
        assert_eq!(render_blocks("#### Deep"), vec![paragraph("#### Deep")]);
        assert_eq!(render_blocks("#Tight"), vec![paragraph("#Tight")]);
    }

    #[test]
    fn test_lines_are_trimmed_before_classifying() {
        assert_eq!(render_blocks("   ## Indented   "), vec![heading(2, "Indented")]);
        assert_eq!(render_blocks("  - spaced bullet  "), vec![bullet("spaced bullet")]);
        assert_eq!(render_blocks("   \t  "), vec![ContentBlock::Spacer]);
    }

    #[test]
    fn test_remainder_after_prefix_is_verbatim() {
        // Only the whole line is trimmed. What follows the marker stays as is.
        assert_eq!(render_blocks("#  two spaces"), vec![heading(1, " two spaces")]);
        assert_eq!(render_blocks("-  padded"), vec![bullet(" padded")]);
    }

    #[test]
    fn test_star_bullets() {
        let blocks = render_blocks("* first\n* second");
        assert_eq!(blocks, vec![bullet("first"), bullet("second")]);
    }

    #[test]
    fn test_marker_without_space_is_a_paragraph() {
        assert_eq!(render_blocks("-item"), vec![paragraph("-item")]);
        assert_eq!(render_blocks("*item"), vec![paragraph("*item")]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let content = "## Findings\n- isolation gaps\n\nSummary line";
        assert_eq!(render_blocks(content), render_blocks(content));
    }
}
