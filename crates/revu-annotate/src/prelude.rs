//! Prelude module - commonly used types for convenient import.
//!
//! Use `use revu_annotate::prelude::*;` to import all essential types.

// Element tree
pub use crate::{Element, ElementRef, Node};

// Annotator primitive
pub use crate::{HIGHLIGHT_TAG, annotate_element};

// Plugin-facing API
pub use crate::{AnnotationContext, AnnotationStyle, CssStyle, SIDE_ATTRIBUTE};
