//! Heading tree normalization.
//!
//! Walks the raw tree with an explicit work stack so that hostile input
//! (a producer that keeps re-emitting the same node as its own child) fails
//! with a bounded error instead of exhausting the call stack.

use std::iter::Enumerate;
use std::slice::Iter;

use crate::error::{NormalizeError, Result};
use crate::types::{HeadingNode, RawHeading};

/// Bounds applied while walking a heading tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLimits {
    /// Maximum nesting depth; top-level headings are depth 1
    pub max_depth: usize,

    /// Maximum number of nodes across all top-level headings of one article
    pub max_nodes: usize,
}

impl HeadingLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
    pub const DEFAULT_MAX_NODES: usize = 10_000;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Default for HeadingLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }
}

/// A node whose children are still being converted.
struct Frame<'a> {
    /// `None` for the synthetic root holding the top-level headings
    node: Option<(String, String)>,
    location: String,
    pending: Enumerate<Iter<'a, RawHeading>>,
    built: Vec<HeadingNode>,
}

impl<'a> Frame<'a> {
    fn root(headings: &'a [RawHeading]) -> Self {
        Self {
            node: None,
            location: String::new(),
            pending: headings.iter().enumerate(),
            built: Vec::with_capacity(headings.len()),
        }
    }

    fn child_location(&self, index: usize) -> String {
        if self.node.is_none() {
            format!("[{index}]")
        } else {
            format!("{}.children[{index}]", self.location)
        }
    }
}

/// Normalize headings with the default [`HeadingLimits`].
pub fn normalize_headings(raw: &[RawHeading]) -> Result<Vec<HeadingNode>> {
    normalize_headings_with(raw, HeadingLimits::default())
}

/// Convert raw headings into canonical nodes, preserving order and nesting.
///
/// Absent child lists become empty ones. Error locations are relative to
/// `raw`, e.g. `[0].children[2]`.
pub fn normalize_headings_with(
    raw: &[RawHeading],
    limits: HeadingLimits,
) -> Result<Vec<HeadingNode>> {
    let mut stack = vec![Frame::root(raw)];
    let mut visited = 0usize;

    loop {
        // The root frame sits at depth 0, so a child's depth is the stack height.
        let depth = stack.len();
        let Some(top) = stack.last_mut() else { break };

        match top.pending.next() {
            Some((index, heading)) => {
                visited += 1;

                if visited > limits.max_nodes {
                    return Err(NormalizeError::HeadingNodeLimitExceeded {
                        location: top.child_location(index),
                        limit: limits.max_nodes,
                    });
                }
                if depth > limits.max_depth {
                    return Err(NormalizeError::HeadingDepthExceeded {
                        location: top.child_location(index),
                        limit: limits.max_depth,
                    });
                }

                let tag = match heading.tag.as_deref() {
                    Some(tag) if !tag.trim().is_empty() => tag.to_string(),
                    _ => {
                        return Err(NormalizeError::MissingField {
                            location: top.child_location(index),
                            field: "tag",
                        })
                    }
                };

                let text = heading.text.clone().unwrap_or_default();

                match heading.children.as_deref() {
                    Some(children) if !children.is_empty() => {
                        let location = top.child_location(index);
                        stack.push(Frame {
                            node: Some((tag, text)),
                            location,
                            pending: children.iter().enumerate(),
                            built: Vec::with_capacity(children.len()),
                        });
                    }
                    _ => top.built.push(HeadingNode::leaf(tag, text)),
                }
            }
            None => {
                let Some(done) = stack.pop() else { break };
                match (stack.last_mut(), done.node) {
                    (Some(parent), Some((tag, text))) => parent.built.push(HeadingNode {
                        tag,
                        text,
                        children: done.built,
                    }),
                    _ => return Ok(done.built),
                }
            }
        }
    }

    Ok(Vec::new())
}
