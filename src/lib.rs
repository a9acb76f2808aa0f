pub mod config;
pub mod server;
mod seed;
mod metrics;
mod query_string;
mod text_utils;
mod post_filter;
mod content;
mod view;
pub mod logger;
pub mod post;
pub mod store;
pub mod util;
