//! Structured static-page content.
//!
//! Page bodies are stored in a JSON column but always go through
//! [`PageContent`], a tagged union of the layouts the public sites know how
//! to render. The `type` field selects the variant:
//!
//! ```json
//! { "type": "faq", "items": [{ "question": "...", "answer": "..." }] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper bound on the serialized size of a page body.
pub const MAX_CONTENT_BYTES: usize = 512 * 1024;

/// Maximum number of sections or FAQ items on a page.
pub const MAX_BLOCKS: usize = 100;

const MAX_HEADING_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageContent {
    /// A single block of sanitized HTML produced by the admin editor.
    RichText { html: String },
    /// An ordered list of titled sections.
    Sections { sections: Vec<PageSection> },
    /// Question/answer pairs.
    Faq { items: Vec<FaqItem> },
    /// A hero banner followed by sections.
    Landing {
        hero: Hero,
        #[serde(default)]
        sections: Vec<PageSection>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub heading: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

impl PageContent {
    /// Variant name as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RichText { .. } => "rich_text",
            Self::Sections { .. } => "sections",
            Self::Faq { .. } => "faq",
            Self::Landing { .. } => "landing",
        }
    }

    /// Check structural constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::RichText { html } => {
                if html.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "Rich text content must not be empty".into(),
                    ));
                }
            }
            Self::Sections { sections } => {
                if sections.is_empty() {
                    return Err(CoreError::Validation(
                        "Sections content needs at least one section".into(),
                    ));
                }
                validate_sections(sections)?;
            }
            Self::Faq { items } => {
                if items.is_empty() {
                    return Err(CoreError::Validation(
                        "FAQ content needs at least one item".into(),
                    ));
                }
                if items.len() > MAX_BLOCKS {
                    return Err(CoreError::Validation(format!(
                        "FAQ content may have at most {MAX_BLOCKS} items"
                    )));
                }
                for (i, item) in items.iter().enumerate() {
                    if item.question.trim().is_empty() || item.answer.trim().is_empty() {
                        return Err(CoreError::Validation(format!(
                            "FAQ item {i} needs both a question and an answer"
                        )));
                    }
                }
            }
            Self::Landing { hero, sections } => {
                require_heading(&hero.title, "Hero title")?;
                if hero.cta_label.is_some() != hero.cta_url.is_some() {
                    return Err(CoreError::Validation(
                        "Hero call-to-action needs both a label and a URL".into(),
                    ));
                }
                validate_sections(sections)?;
            }
        }

        let size = serde_json::to_vec(self)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize page content: {e}")))?
            .len();
        if size > MAX_CONTENT_BYTES {
            return Err(CoreError::Validation(format!(
                "Page content must be at most {MAX_CONTENT_BYTES} bytes"
            )));
        }
        Ok(())
    }
}

fn validate_sections(sections: &[PageSection]) -> Result<(), CoreError> {
    if sections.len() > MAX_BLOCKS {
        return Err(CoreError::Validation(format!(
            "A page may have at most {MAX_BLOCKS} sections"
        )));
    }
    for section in sections {
        require_heading(&section.heading, "Section heading")?;
    }
    Ok(())
}

fn require_heading(text: &str, what: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }
    if text.len() > MAX_HEADING_LENGTH {
        return Err(CoreError::Validation(format!(
            "{what} must be at most {MAX_HEADING_LENGTH} characters"
        )));
    }
    Ok(())
}
