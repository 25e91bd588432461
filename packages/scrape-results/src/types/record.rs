//! Canonical, transport-ready records produced by normalization.
//!
//! Field names serialize in camelCase to match the persistence API.

use serde::{Deserialize, Serialize};

/// A heading with its nested sub-headings. `children` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingNode {
    pub tag: String,
    pub text: String,
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// HTTP status of a link target.
///
/// `code == 0` means the scraper did not report a status. It is not an
/// HTTP status and must not be treated as one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatus {
    pub code: u16,
    pub redirect_url: String,
}

impl LinkStatus {
    pub const UNKNOWN_CODE: u16 = 0;

    pub fn is_known(&self) -> bool {
        self.code != Self::UNKNOWN_CODE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub url: String,

    /// `None` (serialized as `null`) is distinct from `Some("")`
    pub anchor_text: Option<String>,
    pub is_follow: bool,
    pub status: LinkStatus,
}

/// One scraped page in canonical form; identity is `article_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub article_url: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub is_indexable: bool,
    pub internal_links: Vec<LinkRecord>,
    pub outer_links: Vec<LinkRecord>,

    /// Top-level headings in document order
    pub headings: Vec<HeadingNode>,
    pub json_ld: Vec<serde_json::Value>,
}

impl ArticleRecord {
    /// Internal link count, as shown in result listings.
    pub fn link_count(&self) -> usize {
        self.internal_links.len()
    }

    pub fn heading_count(&self) -> usize {
        self.headings.iter().map(HeadingNode::node_count).sum()
    }
}
