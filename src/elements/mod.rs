//! Source elements: the attribute view a flowable is built from.
//!
//! A flowable never sees the markup parser. It only needs to ask whether an
//! attribute exists and what its raw string value is, so that capability is
//! the [`SourceElement`] trait. Two implementations ship with the crate:
//!
//! - [`AttributeMap`]: an ordered in-memory map, handy for programmatic use
//!   and tests
//! - [`XmlElement`]: an element read from markup with `quick-xml`

mod xml;

pub use xml::XmlElement;

use indexmap::IndexMap;

/// Read-only attribute access on a markup element.
///
/// Semantics follow the DOM: [`get_attribute`](SourceElement::get_attribute)
/// returns an empty string for attributes that are not present.
pub trait SourceElement {
    /// Whether the element carries an attribute named `name`.
    fn has_attribute(&self, name: &str) -> bool;

    /// Raw string value of attribute `name`, or `""` when absent.
    fn get_attribute(&self, name: &str) -> &str;
}

impl<T: SourceElement + ?Sized> SourceElement for &T {
    fn has_attribute(&self, name: &str) -> bool {
        (**self).has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> &str {
        (**self).get_attribute(name)
    }
}

impl<T: SourceElement + ?Sized> SourceElement for Box<T> {
    fn has_attribute(&self, name: &str) -> bool {
        (**self).has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> &str {
        (**self).get_attribute(name)
    }
}

/// Ordered attribute map implementing [`SourceElement`].
///
/// # Examples
///
/// ```
/// use pdf_barcode::elements::{AttributeMap, SourceElement};
///
/// let node = AttributeMap::new().with("code", "EAN13").with("x", "1cm");
/// assert!(node.has_attribute("code"));
/// assert_eq!(node.get_attribute("x"), "1cm");
/// assert_eq!(node.get_attribute("width"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    attributes: IndexMap<String, String>,
}

impl AttributeMap {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the map has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SourceElement for AttributeMap {
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    fn get_attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }
}
