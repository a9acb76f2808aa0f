use std::fmt::Write;
use std::path::PathBuf;

use securesector::post::{ContentType, Post, PostDraft, Sector};
use securesector::store::json_file::JsonStore;
use securesector::store::PostStore;
use securesector::util::os_helper::get_name;

use crate::{PostArgs, PostOutput};

fn get_author(args: &PostArgs) -> String {
    if let Some(ref name) = args.name {
        return name.clone();
    }

    get_name()
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# Replace with a heading");
    let _ = writeln!(&mut buf, "");
    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");
    let _ = writeln!(&mut buf, "- First supporting point");
    let _ = writeln!(&mut buf, "- Second supporting point");

    buf
}

fn draft_from_args(args: &PostArgs) -> PostDraft {
    PostDraft {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| "Replace with title".to_string()),
        excerpt: "Replace with a short summary of the post".to_string(),
        content: render_body(),
        sector: Sector::parse(&args.sector).unwrap_or(Sector::Healthcare),
        content_type: ContentType::parse(&args.content_type).unwrap_or(ContentType::Blog),
        author_name: get_author(args),
        ..PostDraft::default()
    }
}

pub fn post_cmd(args: PostArgs) {
    let req_title = match args.output {
        PostOutput::Stdout => false,
        _ => true,
    };

    if req_title && args.title.is_none() {
        eprintln!("For the store output, title is required");
        return;
    }

    let post = Post::compose(draft_from_args(&args));

    match args.output {
        PostOutput::Stdout => {
            println!("{}", serde_json::to_string_pretty(&post).unwrap());
        }
        PostOutput::Store => {
            let store_path = PathBuf::from(
                args.store_path.unwrap_or_else(|| "posts.json".to_string()),
            );
            let store = match JsonStore::open(store_path.clone()) {
                Ok(store) => store,
                Err(e) => {
                    eprintln!("Error opening store {}: {}", store_path.display(), e);
                    return;
                }
            };
            match store.insert_post(post) {
                Ok(saved) => println!("Added post {} ({})", saved.id, saved.slug),
                Err(e) => eprintln!("Error adding post: {}", e),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_uses_cli_values() {
        let args = PostArgs {
            name: Some("Quinn".to_string()),
            title: Some("Vendor risk reviews".to_string()),
            sector: "finance".to_string(),
            content_type: "case-study".to_string(),
            output: PostOutput::Stdout,
            store_path: None,
        };

        let draft = draft_from_args(&args);
        assert_eq!(draft.author_name, "Quinn");
        assert_eq!(draft.title, "Vendor risk reviews");
        assert_eq!(draft.sector, Sector::Finance);
        assert_eq!(draft.content_type, ContentType::CaseStudy);
    }

    #[test]
    fn test_missing_title_gets_placeholder() {
        let args = PostArgs {
            name: Some("Quinn".to_string()),
            title: None,
            sector: "space".to_string(),
            content_type: "blog".to_string(),
            output: PostOutput::Stdout,
            store_path: None,
        };

        let draft = draft_from_args(&args);
        assert_eq!(draft.title, "Replace with title");
        assert_eq!(draft.sector, Sector::Healthcare);
    }

    #[test]
    fn test_sample_body_renders_as_blocks() {
        let body = render_body();
        assert!(body.starts_with("# Replace with a heading\n"));
        assert!(body.contains("- First supporting point"));
    }
}
