//! Raw scrape results → canonical records.
//!
//! All functions here are pure: same input, value-equal output, no I/O.
//! Required fields (`articleUrl`, `linkUrl`, heading `tag`) fail with a
//! [`NormalizeError`] naming the record path instead of being dropped.

pub mod article;
pub mod headings;
pub mod links;

pub use article::{normalize_article, normalize_article_with};
pub use headings::{normalize_headings, normalize_headings_with, HeadingLimits};
pub use links::{normalize_link, normalize_links};

use crate::error::{NormalizeError, Result};
use crate::types::{RawArticle, SubmissionBatch};

/// Normalize every article into a batch, with default heading limits.
pub fn prepare_batch(project_id: i64, raw: &[RawArticle]) -> Result<SubmissionBatch> {
    prepare_batch_with(project_id, raw, HeadingLimits::default())
}

/// Normalize every article into a batch, in order.
///
/// The first failing article aborts the whole batch; partial batches are
/// never produced.
pub fn prepare_batch_with(
    project_id: i64,
    raw: &[RawArticle],
    limits: HeadingLimits,
) -> Result<SubmissionBatch> {
    let articles = raw
        .iter()
        .enumerate()
        .map(|(index, article)| {
            normalize_article_with(article, limits)
                .map_err(|e| e.within(&format!("articles[{index}]")))
        })
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e: &NormalizeError| {
            tracing::warn!(project_id, error = %e, "Rejected scrape results during normalization");
        })?;

    Ok(SubmissionBatch::new(project_id, articles))
}
