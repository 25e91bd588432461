//! Raw scrape results as handed over by the scraping engine.
//!
//! Every field is optional here. Absence is only resolved during
//! normalization, so `anchorText: ""` and a missing `anchorText` stay
//! distinguishable until the canonical record decides what to keep.

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// A heading as reported by the scraper, with optional nested headings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHeading {
    /// Heading element name (`h1`..`h6`); required
    pub tag: Option<String>,

    /// Heading text content; `null` and a missing key both read as absent
    pub text: Option<String>,

    /// Nested headings, absent for leaves
    pub children: Option<Vec<RawHeading>>,
}

impl RawHeading {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            text: Some(text.into()),
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<RawHeading>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_child(mut self, child: RawHeading) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }
}

/// HTTP status observed for a link target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLinkStatus {
    /// Scrapers report `-1` and other out-of-range codes for failed fetches
    pub code: Option<i64>,
    pub redirect_url: Option<String>,
}

/// A link found on a scraped page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLink {
    /// Link target; required
    pub link_url: Option<String>,
    pub anchor_text: Option<String>,
    pub is_follow: Option<bool>,
    pub status: Option<RawLinkStatus>,
}

impl RawLink {
    pub fn new(link_url: impl Into<String>) -> Self {
        Self {
            link_url: Some(link_url.into()),
            ..Default::default()
        }
    }

    pub fn with_anchor_text(mut self, text: impl Into<String>) -> Self {
        self.anchor_text = Some(text.into());
        self
    }

    pub fn with_follow(mut self, is_follow: bool) -> Self {
        self.is_follow = Some(is_follow);
        self
    }

    pub fn with_status(mut self, code: u16, redirect_url: impl Into<String>) -> Self {
        self.status = Some(RawLinkStatus {
            code: Some(code.into()),
            redirect_url: Some(redirect_url.into()),
        });
        self
    }
}

/// One scraped page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawArticle {
    /// Client-side selection id; never sent to the backend
    pub id: Option<serde_json::Value>,

    /// Page URL; required
    pub article_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_indexable: Option<bool>,
    pub internal_links: Option<Vec<RawLink>>,
    pub outer_links: Option<Vec<RawLink>>,
    pub headings: Option<Vec<RawHeading>>,

    /// JSON-LD blocks, passed through untouched
    pub json_ld: Option<Vec<serde_json::Value>>,
}

impl RawArticle {
    pub fn new(article_url: impl Into<String>) -> Self {
        Self {
            article_url: Some(article_url.into()),
            ..Default::default()
        }
    }

    /// Parse the scraper's JSON array of articles.
    pub fn from_json_array(json: &str) -> Result<Vec<RawArticle>> {
        serde_json::from_str(json).map_err(|e| NormalizeError::InvalidJson(e.to_string()))
    }

    pub fn with_meta_title(mut self, title: impl Into<String>) -> Self {
        self.meta_title = Some(title.into());
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn with_indexable(mut self, is_indexable: bool) -> Self {
        self.is_indexable = Some(is_indexable);
        self
    }

    pub fn with_internal_links(mut self, links: Vec<RawLink>) -> Self {
        self.internal_links = Some(links);
        self
    }

    pub fn with_outer_links(mut self, links: Vec<RawLink>) -> Self {
        self.outer_links = Some(links);
        self
    }

    pub fn with_headings(mut self, headings: Vec<RawHeading>) -> Self {
        self.headings = Some(headings);
        self
    }

    pub fn with_json_ld(mut self, blocks: Vec<serde_json::Value>) -> Self {
        self.json_ld = Some(blocks);
        self
    }
}
