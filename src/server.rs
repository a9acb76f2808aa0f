use std::io::ErrorKind;
use std::sync::{Arc, Mutex};
use std::{fs, io};

use chrono::Duration;
use ntex::util::Bytes;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use serde::Deserialize;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::metrics::{MetricHandler, MetricSender, MetricWriter, PageView};
use crate::post::{ContentType, Post, PostDraft, Sector};
use crate::post_filter::{filter_posts, first_featured, FilterSelection};
use crate::query_string::QueryString;
use crate::seed::starter_posts;
use crate::store::images::{ImageStore, MAX_IMAGE_BYTES};
use crate::store::json_file::JsonStore;
use crate::store::memory::MemoryStore;
use crate::store::{AdminDirectory, PostStore};
use crate::view::admin_renderer::{AdminRenderer, Notice};
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::{NotFoundRenderer, PostRenderer};
use crate::view::rss_renderer::RssChannel;

struct AppState {
    store: Box<dyn PostStore>,
    admins: AdminDirectory,
    images: ImageStore,
    metrics: MetricSender,
    config: Config,
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
}

#[derive(Deserialize)]
struct EditorForm {
    email: String,
    title: String,
    excerpt: String,
    content: String,
    sector: String,
    content_type: String,
    read_time: Option<String>,
    featured: Option<String>,
    image_url: Option<String>,
}

#[derive(Deserialize)]
struct DeleteForm {
    email: String,
    id: String,
}

fn request_origin(req: &HttpRequest) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .unwrap_or_else(|| "direct".to_string())
}

fn ok_html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn render_index(config: &Config, posts: &[Post], selection: &FilterSelection) -> io::Result<String> {
    let shown = filter_posts(posts, selection);
    let hero = first_featured(posts);

    // TODO: Cache the parsed templates instead of re-reading them per request
    let template_src = fs::read_to_string(config.paths.template_dir.join("index.tpl"))?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site, &shown, hero, selection))
}

fn render_post_page(config: &Config, post: &Post) -> io::Result<String> {
    let template_src = fs::read_to_string(config.paths.template_dir.join("view.tpl"))?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site, post))
}

fn render_not_found(config: &Config) -> io::Result<String> {
    let template_src = fs::read_to_string(config.paths.template_dir.join("not_found.tpl"))?;
    let renderer = NotFoundRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site))
}

fn render_login(config: &Config, notice: Option<Notice>) -> io::Result<String> {
    let template_src = fs::read_to_string(config.paths.template_dir.join("admin.tpl"))?;
    let renderer = AdminRenderer::new(&template_src)?;
    Ok(renderer.render_login(&config.site, notice))
}

fn render_editor(
    config: &Config,
    email: &str,
    draft: &PostDraft,
    notice: Option<Notice>,
    posts: &[Post],
) -> io::Result<String> {
    let template_src = fs::read_to_string(config.paths.template_dir.join("admin.tpl"))?;
    let renderer = AdminRenderer::new(&template_src)?;
    Ok(renderer.render_editor(&config.site, email, draft, notice, posts))
}

/// The number input posts free text, so anything unusable falls back to
/// the editor default of 5 minutes and the valid range is 1 to 60.
fn parse_read_time(raw: Option<&str>) -> u32 {
    match raw.and_then(|value| value.trim().parse::<u32>().ok()) {
        Some(minutes) => minutes.clamp(1, 60),
        None => 5,
    }
}

fn draft_from_form(form: &EditorForm) -> PostDraft {
    let image_url = match form.image_url {
        Some(ref url) if !url.trim().is_empty() => url.clone(),
        _ => "/placeholder.svg".to_string(),
    };

    PostDraft {
        title: form.title.clone(),
        excerpt: form.excerpt.clone(),
        content: form.content.clone(),
        sector: Sector::parse(&form.sector).unwrap_or(Sector::Healthcare),
        content_type: ContentType::parse(&form.content_type).unwrap_or(ContentType::Blog),
        read_time: parse_read_time(form.read_time.as_deref()),
        image_url,
        featured: form.featured.is_some(),
        ..PostDraft::default()
    }
}

#[web::get("/")]
async fn index(req: HttpRequest, state: web::types::State<Arc<Mutex<AppState>>>) -> web::HttpResponse {
    let selection = match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).get_selection(),
        None => FilterSelection::default(),
    };
    let origin = request_origin(&req);

    let (rendered, metrics) = {
        let state = state.lock().unwrap();
        let posts = match state.store.list_posts() {
            Ok(posts) => posts,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error listing posts: {}", e));
            }
        };
        let rendered = match render_index(&state.config, &posts, &selection) {
            Ok(rendered) => rendered,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error rendering post list: {}", e));
            }
        };
        (rendered, state.metrics.clone())
    };

    metrics.record(PageView::Index, origin).await;
    ok_html(rendered)
}

// Begin: Redirect region --------
#[web::get("/post/{ident}")]
async fn post_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", path.into_inner() + "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

#[web::get("/post/{ident}/")]
async fn post_view(
    req: HttpRequest,
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let identifier = path.into_inner();
    let origin = request_origin(&req);

    let (rendered, found, metrics) = {
        let state = state.lock().unwrap();
        let post = match state.store.find_post(&identifier) {
            Ok(post) => post,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error loading post {}: {}", identifier, e));
            }
        };

        let (rendered, found) = match post {
            Some(ref post) => (render_post_page(&state.config, post), true),
            None => (render_not_found(&state.config), false),
        };
        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error rendering post {}: {}", identifier, e));
            }
        };
        (rendered, found, state.metrics.clone())
    };

    if !found {
        return web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(rendered);
    }

    metrics.record(PageView::Post(identifier), origin).await;
    ok_html(rendered)
}

#[web::get("/rss")]
async fn rss(req: HttpRequest, state: web::types::State<Arc<Mutex<AppState>>>) -> web::HttpResponse {
    let origin = request_origin(&req);

    let (feed_xml, metrics) = {
        let state = state.lock().unwrap();
        let Some(ref feed) = state.config.rss_feed else {
            return web::HttpResponse::NotFound().body("RSS feed is not configured");
        };

        let mut posts = match state.store.list_posts() {
            Ok(posts) => posts,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error listing posts: {}", e));
            }
        };
        posts.truncate(feed.max_items.unwrap_or(20) as usize);

        let channel = RssChannel {
            title: &feed.title,
            site_url: &feed.site_url,
            description: &feed.description,
        };
        let feed_xml = match channel.render(&posts) {
            Ok(xml) => xml,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error rendering feed: {}", e));
            }
        };
        (feed_xml, state.metrics.clone())
    };

    metrics.record(PageView::Rss, origin).await;
    web::HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(feed_xml)
}

#[web::get("/admin")]
async fn admin(req: HttpRequest, state: web::types::State<Arc<Mutex<AppState>>>) -> web::HttpResponse {
    let origin = request_origin(&req);

    let (rendered, metrics) = {
        let state = state.lock().unwrap();
        let rendered = match render_login(&state.config, None) {
            Ok(rendered) => rendered,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error rendering admin page: {}", e));
            }
        };
        (rendered, state.metrics.clone())
    };

    metrics.record(PageView::Admin, origin).await;
    ok_html(rendered)
}

#[web::post("/admin/login")]
async fn admin_login(
    form: web::types::Form<LoginForm>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let form = form.into_inner();
    let state = state.lock().unwrap();

    if !state.admins.is_admin(&form.email) {
        let notice = Notice {
            message: "That email is not authorized to manage posts.",
            is_error: true,
        };
        return match render_login(&state.config, Some(notice)) {
            Ok(rendered) => ok_html(rendered),
            Err(e) => web::HttpResponse::InternalServerError()
                .body(format!("Error rendering admin page: {}", e)),
        };
    }

    let posts = match state.store.list_posts() {
        Ok(posts) => posts,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e));
        }
    };
    match render_editor(&state.config, &form.email, &PostDraft::default(), None, &posts) {
        Ok(rendered) => ok_html(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering editor: {}", e)),
    }
}

#[web::post("/admin/posts")]
async fn admin_save_post(
    form: web::types::Form<EditorForm>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let form = form.into_inner();
    let state = state.lock().unwrap();

    if !state.admins.is_admin(&form.email) {
        return web::HttpResponse::Forbidden().body("Access forbidden");
    }

    let draft = draft_from_form(&form);
    let (echo_draft, notice) = match draft.validate() {
        Err(message) => (
            draft,
            Notice {
                message,
                is_error: true,
            },
        ),
        Ok(()) => match state.store.insert_post(Post::compose(draft)) {
            Ok(saved) => {
                info!("Saved post {} ({})", saved.id, saved.slug);
                (
                    PostDraft::default(),
                    Notice {
                        message: "Post created successfully!",
                        is_error: false,
                    },
                )
            }
            Err(e) => {
                error!("Error saving post: {}", e);
                (
                    draft_from_form(&form),
                    Notice {
                        message: "Failed to save post. Please try again.",
                        is_error: true,
                    },
                )
            }
        },
    };

    let posts = match state.store.list_posts() {
        Ok(posts) => posts,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e));
        }
    };
    match render_editor(&state.config, &form.email, &echo_draft, Some(notice), &posts) {
        Ok(rendered) => ok_html(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering editor: {}", e)),
    }
}

#[web::post("/admin/posts/delete")]
async fn admin_delete_post(
    form: web::types::Form<DeleteForm>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let form = form.into_inner();
    let state = state.lock().unwrap();

    if !state.admins.is_admin(&form.email) {
        return web::HttpResponse::Forbidden().body("Access forbidden");
    }

    let notice = match state.store.delete_post(&form.id) {
        Ok(true) => Notice {
            message: "Post deleted.",
            is_error: false,
        },
        Ok(false) => Notice {
            message: "That post was already gone.",
            is_error: false,
        },
        Err(e) => {
            error!("Error deleting post {}: {}", form.id, e);
            Notice {
                message: "Failed to delete post. Please try again.",
                is_error: true,
            }
        }
    };

    let posts = match state.store.list_posts() {
        Ok(posts) => posts,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e));
        }
    };
    match render_editor(&state.config, &form.email, &PostDraft::default(), Some(notice), &posts) {
        Ok(rendered) => ok_html(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering editor: {}", e)),
    }
}

#[web::post("/admin/upload")]
async fn admin_upload(
    req: HttpRequest,
    body: Bytes,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let query = QueryString::from(req.uri().query().unwrap_or(""));
    let state = state.lock().unwrap();

    let authorized = match query.get("email") {
        Some(email) => state.admins.is_admin(email),
        None => false,
    };
    if !authorized {
        return web::HttpResponse::Unauthorized()
            .content_type("application/json")
            .body(serde_json::json!({ "error": "Access forbidden" }).to_string());
    }

    let Some(file_name) = query.get("name") else {
        return web::HttpResponse::BadRequest().body("Missing file name");
    };

    match state.images.save(file_name, &body) {
        Ok(url) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(serde_json::json!({ "url": url }).to_string()),
        Err(e) => web::HttpResponse::BadRequest().body(format!("Error storing image: {}", e)),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = state.lock().unwrap();
    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

#[web::get("/uploads/{file_name}")]
async fn upload_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = state.lock().unwrap();
    let file_path = state.images.resolve(&path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

// The stock cover art lives at the root, matching the URL stored on
// seeded posts.
#[web::get("/placeholder.svg")]
async fn placeholder_image(
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> Result<NamedFile, web::Error> {
    let state = state.lock().unwrap();
    let file_path = state.config.paths.public_dir.join("placeholder.svg");

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store: Box<dyn PostStore> = match config.store.path {
        Some(ref path) => {
            info!("Post store: {}", path.display());
            Box::new(JsonStore::open(path.clone())?)
        }
        None => {
            info!("Post store: in-memory starter catalogue");
            Box::new(MemoryStore::new(starter_posts()))
        }
    };

    // The handler owns the receiver task, so it has to outlive the server.
    let mut metric_handler = None;
    let mut metrics = MetricHandler::no_op();
    if let Some(ref metrics_cfg) = config.metrics {
        if let Some(ref location) = metrics_cfg.location {
            let time_slot = Duration::seconds(metrics_cfg.time_slot_secs.unwrap_or(60));
            let writer = match MetricWriter::new(location, time_slot) {
                Ok(writer) => writer,
                Err(e) => {
                    return Err(io::Error::new(
                        ErrorKind::Other,
                        format!("Error creating metrics writer: {}", e),
                    ));
                }
            };
            let handler = MetricHandler::new(writer);
            metrics = handler.new_sender();
            metric_handler = Some(handler);
            info!("Page metrics: {}", location.display());
        }
    }
    let _metric_handler = metric_handler;

    let admins = AdminDirectory::new(&config.admin.emails);
    if admins.is_empty() {
        warn!("No admin emails configured, the editor will reject every login");
    }
    let images = ImageStore::new(config.paths.uploads_dir.clone());

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(Mutex::new(AppState {
        store,
        admins,
        images,
        metrics,
        config,
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .state(web::types::PayloadConfig::new(MAX_IMAGE_BYTES + 16 * 1024))
            .state(web::types::FormConfig::default().limit(1024 * 1024))
            .service(index)
            .service(public_files)
            .service(upload_files)
            .service(placeholder_image)
            .service(rss)
            .service(post_view)
            .service(post_wo_slash)
            .service(admin)
            .service(admin_login)
            .service(admin_save_post)
            .service(admin_delete_post)
            .service(admin_upload)
    })
    .bind((bind_addr, bind_port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_form() -> EditorForm {
        EditorForm {
            email: "editor@securesector.example".to_string(),
            title: "Incident response drills".to_string(),
            excerpt: "Practice before it matters.".to_string(),
            content: "# Why drill\n\nTabletop first.".to_string(),
            sector: "supplychain".to_string(),
            content_type: "insight".to_string(),
            read_time: Some("9".to_string()),
            featured: Some("on".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_parse_read_time() {
        assert_eq!(parse_read_time(Some("12")), 12);
        assert_eq!(parse_read_time(Some(" 30 ")), 30);
        assert_eq!(parse_read_time(Some("0")), 1);
        assert_eq!(parse_read_time(Some("600")), 60);
        assert_eq!(parse_read_time(Some("soon")), 5);
        assert_eq!(parse_read_time(None), 5);
    }

    #[test]
    fn test_draft_from_form() {
        let draft = draft_from_form(&editor_form());
        assert_eq!(draft.title, "Incident response drills");
        assert_eq!(draft.sector, Sector::SupplyChain);
        assert_eq!(draft.content_type, ContentType::Insight);
        assert_eq!(draft.read_time, 9);
        assert_eq!(draft.image_url, "/placeholder.svg");
        assert_eq!(draft.author_name, "Admin User");
        assert!(draft.featured);
    }

    #[test]
    fn test_draft_from_form_defaults() {
        let mut form = editor_form();
        form.sector = "space".to_string();
        form.content_type = "podcast".to_string();
        form.read_time = None;
        form.featured = None;
        form.image_url = Some("  ".to_string());

        let draft = draft_from_form(&form);
        assert_eq!(draft.sector, Sector::Healthcare);
        assert_eq!(draft.content_type, ContentType::Blog);
        assert_eq!(draft.read_time, 5);
        assert_eq!(draft.image_url, "/placeholder.svg");
        assert!(!draft.featured);
    }

    #[test]
    fn test_uploaded_image_url_survives() {
        let mut form = editor_form();
        form.image_url = Some("/uploads/3f2a.png".to_string());

        let draft = draft_from_form(&form);
        assert_eq!(draft.image_url, "/uploads/3f2a.png");
    }
}
