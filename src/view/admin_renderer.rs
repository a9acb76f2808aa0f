use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::config::Site;
use crate::post::{ContentType, Post, PostDraft, Sector};

/// Outcome banner shown above the editor, e.g. "Post created successfully!".
pub struct Notice<'a> {
    pub message: &'a str,
    pub is_error: bool,
}

#[derive(ramhorns::Content)]
struct NoticeView<'a> {
    message: &'a str,
    is_error: bool,
}

#[derive(ramhorns::Content)]
struct OptionView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct RowView {
    id: String,
    title: String,
    type_label: &'static str,
    published_date: String,
}

/// One template serves both admin states. `logged_in` flips between the
/// sign-in panel and the editor, and the draft fields echo whatever the
/// author last submitted so a failed validation never clears the form.
#[derive(ramhorns::Content)]
struct AdminPage<'a> {
    site_name: &'a str,
    logged_in: bool,
    email: &'a str,
    notice: Option<NoticeView<'a>>,
    title: &'a str,
    excerpt: &'a str,
    content: &'a str,
    read_time: u32,
    image_url: &'a str,
    featured: bool,
    sectors: Vec<OptionView>,
    content_types: Vec<OptionView>,
    posts: Vec<RowView>,
    has_posts: bool,
}

pub struct AdminRenderer<'a> {
    pub template: Template<'a>,
}

impl AdminRenderer<'_> {
    pub fn new(admin_tpl_src: &str) -> io::Result<AdminRenderer> {
        let template = match Template::new(admin_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing admin template: {}", e),
                ));
            }
        };

        Ok(AdminRenderer { template })
    }

    pub fn render_login(&self, site: &Site, notice: Option<Notice>) -> String {
        let draft = PostDraft::default();
        self.template.render(&AdminPage {
            site_name: &site.name,
            logged_in: false,
            email: "",
            notice: notice.as_ref().map(notice_view),
            title: &draft.title,
            excerpt: &draft.excerpt,
            content: &draft.content,
            read_time: draft.read_time,
            image_url: &draft.image_url,
            featured: draft.featured,
            sectors: vec![],
            content_types: vec![],
            posts: vec![],
            has_posts: false,
        })
    }

    pub fn render_editor(
        &self,
        site: &Site,
        email: &str,
        draft: &PostDraft,
        notice: Option<Notice>,
        posts: &[Post],
    ) -> String {
        let rows: Vec<RowView> = posts.iter().map(row_view).collect();
        let has_posts = !rows.is_empty();
        self.template.render(&AdminPage {
            site_name: &site.name,
            logged_in: true,
            email,
            notice: notice.as_ref().map(notice_view),
            title: &draft.title,
            excerpt: &draft.excerpt,
            content: &draft.content,
            read_time: draft.read_time,
            image_url: &draft.image_url,
            featured: draft.featured,
            sectors: sector_options(draft.sector),
            content_types: content_type_options(draft.content_type),
            posts: rows,
            has_posts,
        })
    }
}

fn notice_view<'a>(notice: &Notice<'a>) -> NoticeView<'a> {
    NoticeView {
        message: notice.message,
        is_error: notice.is_error,
    }
}

fn sector_options(selected: Sector) -> Vec<OptionView> {
    Sector::ALL
        .iter()
        .map(|sector| OptionView {
            value: sector.key(),
            label: sector.label(),
            selected: *sector == selected,
        })
        .collect()
}

fn content_type_options(selected: ContentType) -> Vec<OptionView> {
    ContentType::ALL
        .iter()
        .map(|content_type| OptionView {
            value: content_type.key(),
            label: content_type.label(),
            selected: *content_type == selected,
        })
        .collect()
}

fn row_view(post: &Post) -> RowView {
    RowView {
        id: post.id.clone(),
        title: post.title.clone(),
        type_label: post.content_type.label(),
        published_date: post.published_date.to_string(),
    }
}
