//! The annotator primitive.
//!
//! Wraps an exact character range of an element's flattened text in a new
//! inline highlight span. Repeated passes compose: prior spans are
//! recursed into rather than disturbed, so overlapping annotations nest
//! and non-overlapping annotations are order-independent.

use crate::dom::{Element, Node};

/// Tag used for highlight spans created by the annotator.
pub const HIGHLIGHT_TAG: &str = "hl";

/// Wrap `[offset, offset + length)` of `parent`'s flattened text in
/// highlight spans carrying `css_class`.
///
/// Ranges extending past the available text are clamped; the out-of-range
/// tail is silently dropped. A zero-length range is a no-op. Synchronous
/// and pure: touches nothing outside `parent`.
pub fn annotate_element(parent: &mut Element, offset: usize, length: usize, css_class: &str) {
    let mut offset = offset;
    let mut length = length;
    let mut idx = 0usize;
    while idx < parent.children().len() {
        if length == 0 {
            break;
        }
        let node_len = parent.children()[idx].text_len();
        // Node entirely before the range: consume it from the offset.
        if node_len <= offset {
            offset = offset.saturating_sub(node_len);
            idx = idx.saturating_add(1);
            continue;
        }
        // Portion of the range that falls inside this node.
        let sub_len = length.min(node_len.saturating_sub(offset));
        match parent.children_mut().get_mut(idx) {
            Some(Node::Element(child)) => {
                annotate_element(child, offset, sub_len, css_class);
                idx = idx.saturating_add(1);
            },
            Some(Node::Text(_)) => {
                idx = wrap_text_node(parent, idx, offset, sub_len, css_class);
            },
            None => break,
        }
        if length == sub_len {
            break;
        }
        length = length.saturating_sub(sub_len);
        offset = 0;
    }
}

/// Split the text node at `idx` and wrap `[offset, offset + length)` of
/// it in a new highlight span. Returns the child index just past the span.
fn wrap_text_node(
    parent: &mut Element,
    idx: usize,
    offset: usize,
    length: usize,
    css_class: &str,
) -> usize {
    let Some(Node::Text(slot)) = parent.children_mut().get_mut(idx) else {
        return idx.saturating_add(1);
    };
    let text = std::mem::take(slot);
    let start = char_to_byte(&text, offset);
    let end = char_to_byte(&text, offset.saturating_add(length));
    let before = &text[..start];
    let middle = &text[start..end];
    let after = &text[end..];

    let mut span = Element::new(HIGHLIGHT_TAG);
    span.add_class(css_class);
    span.append_text(middle);

    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement.push(Node::Text(before.to_string()));
    }
    replacement.push(Node::Element(span));
    if !after.is_empty() {
        replacement.push(Node::Text(after.to_string()));
    }

    let past_span = idx
        .saturating_add(usize::from(!before.is_empty()))
        .saturating_add(1);
    parent.children_mut().splice(idx..=idx, replacement);
    past_span
}

/// Byte index of the `idx`-th character, clamped to the end of the string.
fn char_to_byte(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map_or(s.len(), |(byte, _)| byte)
}
