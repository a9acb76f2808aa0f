pub mod block_renderer;

/// One display unit derived from exactly one source line of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    BulletItem { text: String },
    Spacer,
    Paragraph { text: String },
}
