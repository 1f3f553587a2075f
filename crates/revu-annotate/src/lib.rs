//! Revu Annotate - the scoped annotation API handed to diff plugins.
//!
//! This crate provides:
//! - A minimal owned element tree standing in for rendered diff lines
//! - The annotator primitive (character range to nested highlight spans)
//! - [`AnnotationContext`], the per-line capability given to plugin code
//! - [`AnnotationStyle`] descriptors with process-wide class deduplication
//!
//! Nothing here suspends, and nothing throws across the plugin boundary:
//! every failure condition (absent element, wrong side, malformed
//! change/patch numbers, out-of-range offsets) degrades to a silent
//! no-op, because contexts are handed to arbitrary third-party code that
//! cannot be trusted to pre-validate its inputs.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod annotate;
mod context;
mod dom;
mod style;

pub use annotate::{HIGHLIGHT_TAG, annotate_element};
pub use context::{AnnotationContext, SIDE_ATTRIBUTE};
pub use dom::{Element, ElementRef, Node};
pub use style::{AnnotationStyle, CssStyle};
