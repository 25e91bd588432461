pub mod raw;
pub mod record;
pub mod submission;

pub use raw::{RawArticle, RawHeading, RawLink, RawLinkStatus};
pub use record::{ArticleRecord, HeadingNode, LinkRecord, LinkStatus};
pub use submission::{
    CancellableSubmission, SubmissionBatch, SubmissionOutcome, UNREACHABLE_MESSAGE,
};
