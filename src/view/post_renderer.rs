use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::config::Site;
use crate::content::block_renderer::render_blocks;
use crate::content::ContentBlock;
use crate::post::Post;

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    site_name: &'a str,
    title: &'a str,
    sector_key: &'static str,
    sector_label: &'static str,
    type_label: &'static str,
    author_name: &'a str,
    author_avatar: &'a str,
    published_date: String,
    read_time: u32,
    image_url: &'a str,
    blocks: Vec<BlockView>,
}

/// One flag per block kind so the template picks the markup with plain
/// mustache sections. Exactly one flag is set per view.
#[derive(Default, ramhorns::Content)]
struct BlockView {
    is_h1: bool,
    is_h2: bool,
    is_h3: bool,
    is_bullet: bool,
    is_spacer: bool,
    is_paragraph: bool,
    text: String,
}

impl BlockView {
    fn from_block(block: ContentBlock) -> BlockView {
        let mut view = BlockView::default();
        match block {
            ContentBlock::Heading { level: 1, text } => {
                view.is_h1 = true;
                view.text = text;
            }
            ContentBlock::Heading { level: 2, text } => {
                view.is_h2 = true;
                view.text = text;
            }
            // Any deeper heading renders in the smallest style.
            ContentBlock::Heading { level: _, text } => {
                view.is_h3 = true;
                view.text = text;
            }
            ContentBlock::BulletItem { text } => {
                view.is_bullet = true;
                view.text = text;
            }
            ContentBlock::Spacer => view.is_spacer = true,
            ContentBlock::Paragraph { text } => {
                view.is_paragraph = true;
                view.text = text;
            }
        }
        view
    }
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing post view template: {}", e),
                ));
            }
        };

        Ok(PostRenderer { template })
    }

    pub fn render(&self, site: &Site, post: &Post) -> String {
        let blocks = render_blocks(&post.content)
            .into_iter()
            .map(BlockView::from_block)
            .collect();

        self.template.render(&PostPage {
            site_name: &site.name,
            title: &post.title,
            sector_key: post.sector.key(),
            sector_label: post.sector.label(),
            type_label: post.content_type.label(),
            author_name: &post.author.name,
            author_avatar: &post.author.avatar,
            published_date: post.published_date.to_string(),
            read_time: post.read_time,
            image_url: &post.image_url,
            blocks,
        })
    }
}

#[derive(ramhorns::Content)]
struct NotFoundPage<'a> {
    site_name: &'a str,
    heading: &'static str,
    message: &'static str,
}

/// Shown for detail requests that match no post, with a 404 status.
pub struct NotFoundRenderer<'a> {
    pub template: Template<'a>,
}

impl NotFoundRenderer<'_> {
    pub fn new(not_found_tpl_src: &str) -> io::Result<NotFoundRenderer> {
        let template = match Template::new(not_found_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing not-found template: {}", e),
                ));
            }
        };

        Ok(NotFoundRenderer { template })
    }

    pub fn render(&self, site: &Site) -> String {
        self.template.render(&NotFoundPage {
            site_name: &site.name,
            heading: "Post Not Found",
            message: "The post you're looking for doesn't exist or has been removed.",
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::post::{Author, ContentType, Sector};

    use super::*;

    fn test_site() -> Site {
        Site {
            name: "SecureSector".to_string(),
            tagline: "Latest Content".to_string(),
            description: "Security insights".to_string(),
        }
    }

    fn test_post() -> Post {
        Post {
            id: "p-1".to_string(),
            title: "Ransomware & Recovery".to_string(),
            slug: "ransomware-recovery".to_string(),
            excerpt: "What recovery looks like.".to_string(),
            content: "# Outbreak\n\nContain first.\n- Isolate hosts\n- Rotate keys".to_string(),
            sector: Sector::Healthcare,
            content_type: ContentType::CaseStudy,
            author: Author {
                name: "Dr. Sarah Chen".to_string(),
                avatar: "/placeholder.svg".to_string(),
            },
            published_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            read_time: 8,
            image_url: "/placeholder.svg".to_string(),
            featured: false,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_post_page() {
        let template_src = "TITLE=[{{title}}]\
            |SECTOR=[{{sector_label}}]\
            |TYPE=[{{type_label}}]\
            |AUTHOR=[{{author_name}}]\
            |DATE=[{{published_date}}]\
            |READ=[{{read_time}} min read]\
            |BODY=[{{#blocks}}{{#is_h1}}<h1>{{text}}</h1>{{/is_h1}}{{#is_spacer}}<hr>{{/is_spacer}}{{#is_bullet}}<li>{{text}}</li>{{/is_bullet}}{{#is_paragraph}}<p>{{text}}</p>{{/is_paragraph}}{{/blocks}}]";
        let post_renderer = PostRenderer::new(template_src).unwrap();

        let res = post_renderer.render(&test_site(), &test_post());
        assert_eq!(
            res,
            "TITLE=[Ransomware &amp; Recovery]\
             |SECTOR=[Healthcare]\
             |TYPE=[Case Study]\
             |AUTHOR=[Dr. Sarah Chen]\
             |DATE=[2025-04-01]\
             |READ=[8 min read]\
             |BODY=[<h1>Outbreak</h1><hr><p>Contain first.</p><li>Isolate hosts</li><li>Rotate keys</li>]"
        );
    }

    #[test]
    fn test_render_escapes_body_text() {
        let template_src = "{{#blocks}}{{#is_paragraph}}<p>{{text}}</p>{{/is_paragraph}}{{/blocks}}";
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let mut post = test_post();
        post.content = "<script>alert(1)</script>".to_string();

        let res = post_renderer.render(&test_site(), &post);
        assert_eq!(res, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_deep_headings_render_as_h3() {
        let template_src =
            "{{#blocks}}{{#is_h2}}2:{{text}};{{/is_h2}}{{#is_h3}}3:{{text}};{{/is_h3}}{{/blocks}}";
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let mut post = test_post();
        post.content = "## Plan\n### Detail".to_string();

        let res = post_renderer.render(&test_site(), &post);
        assert_eq!(res, "2:Plan;3:Detail;");
    }

    #[test]
    fn test_render_not_found_page() {
        let template_src = "{{site_name}}: {{heading}} - {{{message}}}";
        let renderer = NotFoundRenderer::new(template_src).unwrap();

        let res = renderer.render(&test_site());
        assert_eq!(
            res,
            "SecureSector: Post Not Found - The post you're looking for doesn't exist or has been removed."
        );
    }
}
