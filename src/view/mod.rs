pub mod admin_renderer;
pub mod list_renderer;
pub mod post_renderer;
pub mod rss_renderer;
