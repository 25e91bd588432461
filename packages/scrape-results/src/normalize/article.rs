use super::headings::{normalize_headings_with, HeadingLimits};
use super::links::normalize_links;
use crate::error::{NormalizeError, Result};
use crate::types::{ArticleRecord, RawArticle};

/// Normalize an article with the default [`HeadingLimits`].
pub fn normalize_article(raw: &RawArticle) -> Result<ArticleRecord> {
    normalize_article_with(raw, HeadingLimits::default())
}

/// Convert a raw article into its canonical record.
///
/// Meta title and description pass through as-is, including absence.
/// JSON-LD blocks are copied without inspection. The client-side `id` is
/// dropped.
pub fn normalize_article_with(raw: &RawArticle, limits: HeadingLimits) -> Result<ArticleRecord> {
    let article_url = match raw.article_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => {
            return Err(NormalizeError::MissingField {
                location: String::new(),
                field: "articleUrl",
            })
        }
    };

    let internal_links = normalize_links(raw.internal_links.as_deref())
        .map_err(|e| e.within("internalLinks"))?;
    let outer_links =
        normalize_links(raw.outer_links.as_deref()).map_err(|e| e.within("outerLinks"))?;
    let headings = normalize_headings_with(raw.headings.as_deref().unwrap_or_default(), limits)
        .map_err(|e| e.within("headings"))?;

    Ok(ArticleRecord {
        article_url,
        meta_title: raw.meta_title.clone(),
        meta_description: raw.meta_description.clone(),
        is_indexable: raw.is_indexable.unwrap_or(false),
        internal_links,
        outer_links,
        headings,
        json_ld: raw.json_ld.clone().unwrap_or_default(),
    })
}
