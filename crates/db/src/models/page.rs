//! Static page and page revision models and DTOs.

use brandpanel_core::page_content::PageContent;
use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `static_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaticPage {
    pub id: DbId,
    pub brand_id: DbId,
    pub slug: String,
    pub title: String,
    pub content: Json<PageContent>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    /// Current revision number. Earlier states live in `page_revisions`.
    pub revision: i32,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StaticPage {
    /// The versioned fields of the page as a JSON document, in the same
    /// shape as [`PageRevision::snapshot`].
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "content": self.content.0,
            "meta_title": self.meta_title,
            "meta_description": self.meta_description,
            "meta_keywords": self.meta_keywords,
        })
    }
}

/// DTO for creating a page. The slug defaults to one generated from the title.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStaticPage {
    pub brand_id: DbId,
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub content: PageContent,
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
    #[validate(length(max = 500))]
    pub meta_keywords: Option<String>,
    pub is_published: Option<bool>,
}

/// DTO for updating a page. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStaticPage {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub content: Option<PageContent>,
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
    #[validate(length(max = 500))]
    pub meta_keywords: Option<String>,
    pub is_published: Option<bool>,
}

impl UpdateStaticPage {
    /// Whether applying this update changes a versioned field of `page`.
    pub fn changes_versioned_fields(&self, page: &StaticPage) -> bool {
        fn differs<T: PartialEq>(new: &Option<T>, current: &T) -> bool {
            new.as_ref().is_some_and(|n| n != current)
        }
        fn differs_opt(new: &Option<String>, current: &Option<String>) -> bool {
            new.is_some() && new != current
        }

        differs(&self.title, &page.title)
            || differs(&self.content, &page.content.0)
            || differs_opt(&self.meta_title, &page.meta_title)
            || differs_opt(&self.meta_description, &page.meta_description)
            || differs_opt(&self.meta_keywords, &page.meta_keywords)
    }
}

/// An immutable snapshot from the `page_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageRevision {
    pub id: DbId,
    pub page_id: DbId,
    pub revision: i32,
    pub title: String,
    pub content: Json<PageContent>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub edited_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl PageRevision {
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "content": self.content.0,
            "meta_title": self.meta_title,
            "meta_description": self.meta_description,
            "meta_keywords": self.meta_keywords,
        })
    }
}

/// Revision list entry without the content body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageRevisionSummary {
    pub id: DbId,
    pub revision: i32,
    pub title: String,
    pub edited_by: Option<DbId>,
    pub created_at: Timestamp,
}
