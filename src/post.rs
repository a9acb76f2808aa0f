use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text_utils::slugify;

/// Industry verticals a post can be filed under. The wire format keeps the
/// historical single-word keys, e.g. "realestate" and "supplychain".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Healthcare,
    Finance,
    RealEstate,
    SupplyChain,
}

impl Sector {
    pub const ALL: [Sector; 4] = [
        Sector::Healthcare,
        Sector::Finance,
        Sector::RealEstate,
        Sector::SupplyChain,
    ];

    pub fn parse(value: &str) -> Option<Sector> {
        match value {
            "healthcare" => Some(Sector::Healthcare),
            "finance" => Some(Sector::Finance),
            "realestate" => Some(Sector::RealEstate),
            "supplychain" => Some(Sector::SupplyChain),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Sector::Healthcare => "healthcare",
            Sector::Finance => "finance",
            Sector::RealEstate => "realestate",
            Sector::SupplyChain => "supplychain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
            Sector::RealEstate => "Real Estate",
            Sector::SupplyChain => "Supply Chain",
        }
    }
}

/// Editorial format of a post. "case-study" keeps its dash on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Blog,
    CaseStudy,
    Insight,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Blog,
        ContentType::CaseStudy,
        ContentType::Insight,
    ];

    pub fn parse(value: &str) -> Option<ContentType> {
        match value {
            "blog" => Some(ContentType::Blog),
            "case-study" => Some(ContentType::CaseStudy),
            "insight" => Some(ContentType::Insight),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::CaseStudy => "case-study",
            ContentType::Insight => "insight",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Blog => "Blog",
            ContentType::CaseStudy => "Case Study",
            ContentType::Insight => "Insight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

/// A published article. Field names follow the store's JSON document,
/// which uses camelCase except for the legacy created_at column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub sector: Sector,
    pub content_type: ContentType,
    pub author: Author,
    pub published_date: NaiveDate,
    pub read_time: u32,
    pub image_url: String,
    pub featured: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Fields the admin editor collects. Everything derived (id, slug, dates)
/// is filled in by [Post::compose].
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub sector: Sector,
    pub content_type: ContentType,
    pub author_name: String,
    pub read_time: u32,
    pub image_url: String,
    pub featured: bool,
}

impl Default for PostDraft {
    /// A pristine editor form: healthcare blog, 5 minute read, stock image.
    fn default() -> PostDraft {
        PostDraft {
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            sector: Sector::Healthcare,
            content_type: ContentType::Blog,
            author_name: "Admin User".to_string(),
            read_time: 5,
            image_url: "/placeholder.svg".to_string(),
            featured: false,
        }
    }
}

impl PostDraft {
    /// Checks the required fields top to bottom and reports the first one
    /// that is blank, so the editor shows a single message at a time.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Please enter a title for your post");
        }
        if self.excerpt.trim().is_empty() {
            return Err("Please enter an excerpt for your post");
        }
        if self.content.trim().is_empty() {
            return Err("Please enter content for your post");
        }
        Ok(())
    }
}

impl Post {
    pub fn compose(draft: PostDraft) -> Post {
        let slug = slugify(&draft.title);
        Post {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            slug,
            excerpt: draft.excerpt,
            content: draft.content,
            sector: draft.sector,
            content_type: draft.content_type,
            author: Author {
                name: draft.author_name,
                avatar: "/placeholder.svg".to_string(),
            },
            published_date: Local::now().date_naive(),
            read_time: draft.read_time,
            image_url: draft.image_url,
            featured: draft.featured,
            created_at: Utc::now(),
        }
    }

    /// Matches the post id first, then the slug. Both are compared verbatim.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.id == identifier || self.slug == identifier
    }
}
