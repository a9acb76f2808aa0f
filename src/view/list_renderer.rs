use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::config::Site;
use crate::post::{ContentType, Post, Sector};
use crate::post_filter::FilterSelection;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_name: &'a str,
    tagline: &'a str,
    description: &'a str,
    query: &'a str,
    // Active filter keys, empty when unfiltered. The search form posts
    // them back as hidden inputs so a search keeps the current filters.
    selected_sector: &'static str,
    selected_type: &'static str,
    hero: Option<CardView>,
    sector_chips: Vec<ChipView>,
    type_tabs: Vec<ChipView>,
    posts: Vec<CardView>,
    has_posts: bool,
    empty_message: &'static str,
}

#[derive(ramhorns::Content)]
struct CardView {
    link: String,
    title: String,
    excerpt: String,
    sector_key: &'static str,
    sector_label: &'static str,
    type_label: &'static str,
    author_name: String,
    author_avatar: String,
    published_date: String,
    read_time: u32,
    image_url: String,
}

#[derive(ramhorns::Content)]
struct ChipView {
    href: String,
    label: &'static str,
    active: bool,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(t) => t,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing listing template: {}", e),
                ))
            }
        };
        Ok(ListRenderer { template })
    }

    pub fn render(
        &self,
        site: &Site,
        posts: &[&Post],
        hero: Option<&Post>,
        selection: &FilterSelection,
    ) -> String {
        let cards: Vec<CardView> = posts.iter().map(|post| card_view(post)).collect();
        let has_posts = !cards.is_empty();
        let page = ListPage {
            site_name: &site.name,
            tagline: &site.tagline,
            description: &site.description,
            query: &selection.query,
            selected_sector: selection.sector.map(|s| s.key()).unwrap_or(""),
            selected_type: selection.content_type.map(|t| t.key()).unwrap_or(""),
            hero: hero.map(card_view),
            sector_chips: sector_chips(selection),
            type_tabs: type_tabs(selection),
            posts: cards,
            has_posts,
            empty_message: empty_message(selection.content_type),
        };
        self.template.render(&page)
    }
}

/// Detail pages are addressed by slug, with the id as a fallback for
/// posts saved before slugs existed.
pub fn post_link(post: &Post) -> String {
    let ident = if post.slug.is_empty() {
        post.id.as_str()
    } else {
        post.slug.as_str()
    };
    format!("/post/{}/", ident)
}

/// Builds the listing URL for a chip or tab, carrying over whatever else
/// is selected so switching one facet never resets the others.
fn listing_href(sector: Option<Sector>, content_type: Option<ContentType>, query: &str) -> String {
    let mut params: Vec<(&str, &str)> = vec![];
    if let Some(sector) = sector {
        params.push(("sector", sector.key()));
    }
    if let Some(content_type) = content_type {
        params.push(("type", content_type.key()));
    }
    if !query.is_empty() {
        params.push(("q", query));
    }
    if params.is_empty() {
        return "/".to_string();
    }
    match serde_urlencoded::to_string(&params) {
        Ok(encoded) => format!("/?{}", encoded),
        Err(_) => "/".to_string(),
    }
}

fn sector_chips(selection: &FilterSelection) -> Vec<ChipView> {
    let mut chips = vec![ChipView {
        href: listing_href(None, selection.content_type, &selection.query),
        label: "All Sectors",
        active: selection.sector.is_none(),
    }];
    for sector in Sector::ALL {
        chips.push(ChipView {
            href: listing_href(Some(sector), selection.content_type, &selection.query),
            label: sector.label(),
            active: selection.sector == Some(sector),
        });
    }
    chips
}

fn type_tabs(selection: &FilterSelection) -> Vec<ChipView> {
    let mut tabs = vec![ChipView {
        href: listing_href(selection.sector, None, &selection.query),
        label: "All",
        active: selection.content_type.is_none(),
    }];
    for content_type in ContentType::ALL {
        tabs.push(ChipView {
            href: listing_href(selection.sector, Some(content_type), &selection.query),
            label: tab_label(content_type),
            active: selection.content_type == Some(content_type),
        });
    }
    tabs
}

fn tab_label(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Blog => "Blogs",
        ContentType::CaseStudy => "Case Studies",
        ContentType::Insight => "Insights",
    }
}

fn empty_message(content_type: Option<ContentType>) -> &'static str {
    match content_type {
        None => "No posts found matching your criteria.",
        Some(ContentType::Blog) => "No blog posts found matching your criteria.",
        Some(ContentType::CaseStudy) => "No case studies found matching your criteria.",
        Some(ContentType::Insight) => "No insights found matching your criteria.",
    }
}

fn card_view(post: &Post) -> CardView {
    CardView {
        link: post_link(post),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        sector_key: post.sector.key(),
        sector_label: post.sector.label(),
        type_label: post.content_type.label(),
        author_name: post.author.name.clone(),
        author_avatar: post.author.avatar.clone(),
        published_date: post.published_date.to_string(),
        read_time: post.read_time,
        image_url: post.image_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::starter_posts;

    fn test_site() -> Site {
        Site {
            name: "SecureSector".to_string(),
            tagline: "Latest Content".to_string(),
            description: "Security insights".to_string(),
        }
    }

    #[test]
    fn test_render_cards_and_site_header() {
        let tpl = "{{site_name}}|{{query}}|{{#posts}}[{{title}}]{{/posts}}";
        let renderer = ListRenderer::new(tpl).unwrap();
        let posts = starter_posts();
        let shown: Vec<&Post> = vec![&posts[0], &posts[1]];
        let selection = FilterSelection {
            query: "cloud".to_string(),
            ..FilterSelection::default()
        };
        let html = renderer.render(&test_site(), &shown, None, &selection);
        assert_eq!(
            html,
            "SecureSector|cloud|\
             [Zero Trust Architecture in Healthcare: Protecting Patient Data]\
             [Blockchain for Supply Chain Transparency: Beyond the Hype]"
        );
    }

    #[test]
    fn test_render_empty_message_only_without_posts() {
        let tpl = "{{#has_posts}}LIST{{/has_posts}}{{^has_posts}}{{empty_message}}{{/has_posts}}";
        let renderer = ListRenderer::new(tpl).unwrap();
        let site = test_site();

        let selection = FilterSelection::default();
        let html = renderer.render(&site, &[], None, &selection);
        assert_eq!(html, "No posts found matching your criteria.");

        let selection = FilterSelection {
            content_type: Some(ContentType::CaseStudy),
            ..FilterSelection::default()
        };
        let html = renderer.render(&site, &[], None, &selection);
        assert_eq!(html, "No case studies found matching your criteria.");

        let posts = starter_posts();
        let shown: Vec<&Post> = vec![&posts[0]];
        let html = renderer.render(&site, &shown, None, &selection);
        assert_eq!(html, "LIST");
    }

    #[test]
    fn test_render_hero_section() {
        let tpl = "{{#hero}}HERO={{title}}@{{{link}}};{{/hero}}{{#posts}}[{{title}}]{{/posts}}";
        let renderer = ListRenderer::new(tpl).unwrap();
        let posts = starter_posts();
        let shown: Vec<&Post> = vec![&posts[2]];
        let selection = FilterSelection::default();

        let html = renderer.render(&test_site(), &shown, Some(&posts[0]), &selection);
        assert_eq!(
            html,
            "HERO=Zero Trust Architecture in Healthcare: Protecting Patient Data\
             @/post/zero-trust-architecture-in-healthcare-protecting-patient-data/;\
             [Securing Smart Buildings: Cybersecurity Challenges in Commercial Real Estate]"
        );

        let html = renderer.render(&test_site(), &shown, None, &selection);
        assert_eq!(
            html,
            "[Securing Smart Buildings: Cybersecurity Challenges in Commercial Real Estate]"
        );
    }

    #[test]
    fn test_sector_chips_carry_selection() {
        let tpl = "{{#sector_chips}}{{label}}={{{href}}}{{#active}}!{{/active}};{{/sector_chips}}";
        let renderer = ListRenderer::new(tpl).unwrap();
        let selection = FilterSelection {
            sector: Some(Sector::Finance),
            query: "zero".to_string(),
            ..FilterSelection::default()
        };
        let html = renderer.render(&test_site(), &[], None, &selection);
        assert_eq!(
            html,
            "All Sectors=/?q=zero;\
             Healthcare=/?sector=healthcare&q=zero;\
             Finance=/?sector=finance&q=zero!;\
             Real Estate=/?sector=realestate&q=zero;\
             Supply Chain=/?sector=supplychain&q=zero;"
        );
    }

    #[test]
    fn test_type_tabs_carry_selection() {
        let tpl = "{{#type_tabs}}{{label}}={{{href}}}{{#active}}!{{/active}};{{/type_tabs}}";
        let renderer = ListRenderer::new(tpl).unwrap();
        let selection = FilterSelection {
            sector: Some(Sector::Healthcare),
            content_type: Some(ContentType::Insight),
            ..FilterSelection::default()
        };
        let html = renderer.render(&test_site(), &[], None, &selection);
        assert_eq!(
            html,
            "All=/?sector=healthcare;\
             Blogs=/?sector=healthcare&type=blog;\
             Case Studies=/?sector=healthcare&type=case-study;\
             Insights=/?sector=healthcare&type=insight!;"
        );
    }

    #[test]
    fn test_selected_keys_feed_the_search_form() {
        let tpl = "{{#selected_sector}}s={{selected_sector}}{{/selected_sector}}\
                   {{#selected_type}}t={{selected_type}}{{/selected_type}}";
        let renderer = ListRenderer::new(tpl).unwrap();

        let selection = FilterSelection {
            sector: Some(Sector::SupplyChain),
            content_type: Some(ContentType::CaseStudy),
            ..FilterSelection::default()
        };
        let html = renderer.render(&test_site(), &[], None, &selection);
        assert_eq!(html, "s=supplychaint=case-study");

        let html = renderer.render(&test_site(), &[], None, &FilterSelection::default());
        assert_eq!(html, "");
    }

    #[test]
    fn test_listing_href() {
        assert_eq!(listing_href(None, None, ""), "/");
        assert_eq!(
            listing_href(Some(Sector::RealEstate), None, ""),
            "/?sector=realestate"
        );
        assert_eq!(
            listing_href(Some(Sector::Finance), Some(ContentType::CaseStudy), "zero trust"),
            "/?sector=finance&type=case-study&q=zero+trust"
        );
    }

    #[test]
    fn test_post_link_falls_back_to_id() {
        let posts = starter_posts();
        assert_eq!(
            post_link(&posts[1]),
            "/post/blockchain-for-supply-chain-transparency-beyond-the-hype/"
        );
        let mut unslugged = posts[1].clone();
        unslugged.slug = String::new();
        assert_eq!(post_link(&unslugged), "/post/2/");
    }
}
