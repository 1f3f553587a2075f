//! Style descriptors supplied by plugin code.
//!
//! A style descriptor is an opaque capability: the annotation context
//! invokes it but never owns it. The stock [`CssStyle`] maps a CSS rule
//! body to a generated class name through a process-wide, append-only
//! registry, so identical rules across plugins and contexts share one
//! class and repeated identical calls cause no class churn.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use tracing::debug;

use crate::dom::ElementRef;

/// Plugin-supplied styling directive.
///
/// Implementations must tolerate being invoked from multiple annotation
/// contexts sharing one descriptor. Under the cooperative execution model
/// no concurrent execution occurs, so re-entrancy safety is the only
/// requirement.
pub trait AnnotationStyle {
    /// Resolve the deduplicated class name to use on `element`.
    fn class_name(&self, element: &ElementRef) -> String;

    /// Apply the style to the whole element.
    fn apply(&self, element: &ElementRef);
}

/// Prefix for generated annotation class names.
const CLASS_PREFIX: &str = "revu-style-";

/// Process-wide rule-text to class-name registry. Append-only: injected
/// styles cannot be retracted, so neither can their classes.
fn class_registry() -> &'static RwLock<HashMap<String, String>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve (or mint) the class name for a rule body.
fn class_for_rules(rules: &str) -> String {
    if let Ok(registry) = class_registry().read()
        && let Some(existing) = registry.get(rules)
    {
        return existing.clone();
    }
    match class_registry().write() {
        Ok(mut registry) => {
            if let Some(existing) = registry.get(rules) {
                return existing.clone();
            }
            let name = format!("{CLASS_PREFIX}{}", registry.len());
            debug!(class = %name, "registered annotation style");
            registry.insert(rules.to_string(), name.clone());
            name
        },
        // Poisoned registry: fall back to a stable, unregistered name
        // rather than panicking toward plugin code.
        Err(_) => format!("{CLASS_PREFIX}unregistered"),
    }
}

/// The stock [`AnnotationStyle`]: a CSS rule body with a memoized class.
#[derive(Debug)]
pub struct CssStyle {
    rules: String,
    class: OnceLock<String>,
}

impl CssStyle {
    /// Create a style from a CSS rule body, e.g.
    /// `"background-color: #f2cc94"`.
    #[must_use]
    pub fn new(rules: impl Into<String>) -> Self {
        Self {
            rules: rules.into(),
            class: OnceLock::new(),
        }
    }

    /// The CSS rule body backing this style.
    #[must_use]
    pub fn rules(&self) -> &str {
        &self.rules
    }
}

impl AnnotationStyle for CssStyle {
    fn class_name(&self, _element: &ElementRef) -> String {
        self.class
            .get_or_init(|| class_for_rules(&self.rules))
            .clone()
    }

    fn apply(&self, element: &ElementRef) {
        element.add_class(&self.class_name(element));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn element() -> ElementRef {
        ElementRef::new(Element::new("td"))
    }

    #[test]
    fn identical_rules_share_one_class() {
        let a = CssStyle::new("background-color: #f2cc94");
        let b = CssStyle::new("background-color: #f2cc94");
        let el = element();
        assert_eq!(a.class_name(&el), b.class_name(&el));
    }

    #[test]
    fn distinct_rules_get_distinct_classes() {
        let a = CssStyle::new("color: red");
        let b = CssStyle::new("color: blue");
        let el = element();
        assert_ne!(a.class_name(&el), b.class_name(&el));
    }

    #[test]
    fn class_name_is_memoized_per_descriptor() {
        let style = CssStyle::new("font-weight: bold");
        let el = element();
        let first = style.class_name(&el);
        let second = style.class_name(&el);
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_apply_adds_the_class_once() {
        let style = CssStyle::new("text-decoration: underline");
        let el = element();
        style.apply(&el);
        style.apply(&el);
        let count = el
            .with(|e| e.classes().len())
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn generated_names_carry_the_prefix() {
        let style = CssStyle::new("opacity: 0.5");
        let el = element();
        assert!(style.class_name(&el).starts_with(CLASS_PREFIX));
    }
}
