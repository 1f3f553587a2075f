//! Per-line annotation context.
//!
//! One context is constructed for every rendered diff line and handed to
//! plugin annotation callbacks, then discarded after the pass. Plugin
//! code is side-agnostic: the same callback runs against contexts from
//! both panes, and the side checks here are the mechanism that silently
//! filters calls meant for the other pane.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::error;

use revu_core::{DiffLine, Side};

use crate::annotate::annotate_element;
use crate::dom::ElementRef;
use crate::style::AnnotationStyle;

/// Attribute binding a content element to its pane.
pub const SIDE_ATTRIBUTE: &str = "data-side";

/// Capability handed to plugin code for annotating one rendered diff line.
///
/// The context never owns the style descriptors it is given, and every
/// effect is confined to the two elements it was constructed with. All
/// failure conditions degrade to silent no-ops rather than errors,
/// because the context is handed to arbitrary third-party code that
/// cannot be trusted to pre-validate its inputs.
#[derive(Debug)]
pub struct AnnotationContext {
    content: Option<ElementRef>,
    line_number: Option<ElementRef>,
    /// Descriptor of the rendered line.
    pub line: DiffLine,
    /// File path the line belongs to (e.g. `/COMMIT_MSG`).
    pub path: String,
    /// Numeric change number, or NaN if the input was malformed.
    pub change_num: f64,
    /// Numeric patch set number, or NaN if the input was malformed.
    pub patch_num: f64,
    side_mismatches: AtomicU64,
}

impl AnnotationContext {
    /// Build a context for one rendered line.
    ///
    /// `change_num` and `patch_num` arrive as text (patch identifiers can
    /// be `"edit"` or `"PARENT"`). A value that does not parse is logged
    /// as a diagnostic and stored as NaN; construction still succeeds,
    /// and annotation calls on the degraded context become no-ops.
    #[must_use]
    pub fn new(
        content: Option<ElementRef>,
        line_number: Option<ElementRef>,
        line: DiffLine,
        path: impl Into<String>,
        change_num: &str,
        patch_num: &str,
    ) -> Self {
        let change = parse_numeric(change_num);
        let patch = parse_numeric(patch_num);
        if change.is_nan() || patch.is_nan() {
            error!(change_num, patch_num, "invalid annotation context parameters");
        }
        Self {
            content,
            line_number,
            line,
            path: path.into(),
            change_num: change,
            patch_num: patch,
            side_mismatches: AtomicU64::new(0),
        }
    }

    /// Annotate `[offset, offset + length)` of the line's content text
    /// with `style`.
    ///
    /// No-op unless the content element exists, is bound to `side` via
    /// its `data-side` attribute, and the context was constructed with
    /// valid change/patch numbers. Out-of-range tails are clamped by the
    /// annotator. Never fails toward the caller.
    pub fn annotate_range(
        &self,
        offset: usize,
        length: usize,
        style: &dyn AnnotationStyle,
        side: Side,
    ) {
        if self.change_num.is_nan() || self.patch_num.is_nan() {
            return;
        }
        let Some(content) = &self.content else {
            return;
        };
        let Some(bound) = content.attribute(SIDE_ATTRIBUTE) else {
            return;
        };
        if bound != side.as_str() {
            // Expected for side-agnostic plugin code; counted, not surfaced.
            self.side_mismatches.fetch_add(1, Ordering::Relaxed);
            return;
        }
        let class = style.class_name(content);
        let _ = content.with_mut(|el| annotate_element(el, offset, length, &class));
    }

    /// Apply `style` to the whole line-number element.
    ///
    /// No-op unless the line-number element exists and carries the side
    /// token in its class list. Never fails toward the caller.
    pub fn annotate_line_number(&self, style: &dyn AnnotationStyle, side: Side) {
        if self.change_num.is_nan() || self.patch_num.is_nan() {
            return;
        }
        let Some(line_number) = &self.line_number else {
            return;
        };
        if !line_number.has_class(side.as_str()) {
            return;
        }
        style.apply(line_number);
    }

    /// Number of `annotate_range` calls dropped because the element was
    /// bound to the other side. Diagnostic only; the drops themselves
    /// stay silent toward plugin code.
    #[must_use]
    pub fn side_mismatch_count(&self) -> u64 {
        self.side_mismatches.load(Ordering::Relaxed)
    }
}

/// Parse a numeric identifier, NaN on failure.
fn parse_numeric(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}
