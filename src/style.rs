//! Style parameter collection.
//!
//! A barcode element carries its visual style as markup attributes. Before
//! every draw those attributes are gathered into a [`StyleParams`] set, typed
//! by the group each attribute belongs to:
//!
//! | Group | Attributes | Resolved through |
//! |-------|------------|------------------|
//! | color | `barFillColor`, `background`, `strokeColor`, `barStrokeColor`, `fillColor`, `textColor` | [`ColorResolver`] |
//! | verbatim | `fontName`, `humanReadable`, `debug`, `lquiet`, `rquiet`, `quiet` | nothing |
//! | length | `strokeWidth`, `barWidth`, `barStrokeWidth`, `barHeight`, `fontSize`, `isoScale` | [`UnitParser`] |
//!
//! Only attributes present on the element produce entries, so a symbology's
//! own defaults apply to everything else. The single exception is
//! `barStrokeWidth`, which always starts at [`BASELINE_BAR_STROKE_WIDTH`].

use crate::color::{Color, ColorResolver};
use crate::elements::SourceElement;
use crate::error::{Error, Result};
use crate::units::UnitParser;
use indexmap::IndexMap;
use serde::Serialize;

/// Attributes resolved into colors.
pub const COLOR_ATTRIBUTES: [&str; 6] = [
    "barFillColor",
    "background",
    "strokeColor",
    "barStrokeColor",
    "fillColor",
    "textColor",
];

/// Attributes passed through as raw strings.
pub const TEXT_ATTRIBUTES: [&str; 6] = ["fontName", "humanReadable", "debug", "lquiet", "rquiet", "quiet"];

/// Attributes resolved into lengths.
pub const LENGTH_ATTRIBUTES: [&str; 6] = [
    "strokeWidth",
    "barWidth",
    "barStrokeWidth",
    "barHeight",
    "fontSize",
    "isoScale",
];

/// Bar outline width used when the element does not set one.
///
/// Small enough to be invisible, non-zero so symbologies that stroke bars by
/// default do not fall back to their own visible width.
pub const BASELINE_BAR_STROKE_WIDTH: f32 = 0.00001;

/// A single resolved style value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StyleValue {
    /// Color-group value
    Color(Color),
    /// Verbatim-group value
    Text(String),
    /// Length-group value, in points
    Length(f32),
}

/// Ordered keyword parameters handed to a symbology's drawing constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleParams {
    entries: IndexMap<String, StyleValue>,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self::baseline()
    }
}

impl StyleParams {
    /// Parameters with only the baseline bar stroke width.
    pub fn baseline() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(
            "barStrokeWidth".to_string(),
            StyleValue::Length(BASELINE_BAR_STROKE_WIDTH),
        );
        Self { entries }
    }

    /// Parameters with no entries at all; symbology defaults everywhere.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Gather style attributes present on `node`.
    ///
    /// Errors from the color resolver or unit parser propagate unchanged.
    pub fn collect<E>(node: &E, units: &dyn UnitParser, colors: &dyn ColorResolver) -> Result<Self>
    where
        E: SourceElement + ?Sized,
    {
        let mut params = Self::baseline();

        for name in COLOR_ATTRIBUTES {
            if node.has_attribute(name) {
                let color = colors.resolve(node.get_attribute(name))?;
                params.insert(name, StyleValue::Color(color));
            }
        }

        for name in TEXT_ATTRIBUTES {
            if node.has_attribute(name) {
                params.insert(name, StyleValue::Text(node.get_attribute(name).to_string()));
            }
        }

        for name in LENGTH_ATTRIBUTES {
            if node.has_attribute(name) {
                let length = units.parse_length(node.get_attribute(name))?;
                params.insert(name, StyleValue::Length(length));
            }
        }

        log::trace!("Collected {} style parameters", params.len());
        Ok(params)
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: StyleValue) -> &mut Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: StyleValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Raw entry lookup.
    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries.get(name)
    }

    /// Whether an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Color entry, if present. A value of another type is an error.
    pub fn color(&self, name: &str) -> Result<Option<Color>> {
        match self.entries.get(name) {
            None => Ok(None),
            Some(StyleValue::Color(c)) => Ok(Some(*c)),
            Some(other) => Err(mismatch(name, other)),
        }
    }

    /// Length entry, if present. A value of another type is an error.
    pub fn length(&self, name: &str) -> Result<Option<f32>> {
        match self.entries.get(name) {
            None => Ok(None),
            Some(StyleValue::Length(l)) => Ok(Some(*l)),
            Some(other) => Err(mismatch(name, other)),
        }
    }

    /// Verbatim entry, if present. A value of another type is an error.
    pub fn text(&self, name: &str) -> Result<Option<&str>> {
        match self.entries.get(name) {
            None => Ok(None),
            Some(StyleValue::Text(t)) => Ok(Some(t.as_str())),
            Some(other) => Err(mismatch(name, other)),
        }
    }

    /// Boolean-like verbatim entry.
    ///
    /// `1`, `true`, `yes`, `on` are true; `0`, `false`, `no`, `off` and the
    /// empty string are false (case-insensitive).
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        match self.text(name)? {
            None => Ok(None),
            Some(raw) => parse_flag(raw).map(Some).ok_or_else(|| Error::InvalidStyle {
                name: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// Interpret a boolean-like string.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn mismatch(name: &str, value: &StyleValue) -> Error {
    Error::InvalidStyle {
        name: name.to_string(),
        value: format!("{:?}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::StandardColors;
    use crate::elements::AttributeMap;
    use crate::units::{StandardUnits, MM};

    fn collect(node: &AttributeMap) -> Result<StyleParams> {
        StyleParams::collect(node, &StandardUnits::new(), &StandardColors::new())
    }

    #[test]
    fn test_groups_are_disjoint_and_complete() {
        let mut all: Vec<&str> = COLOR_ATTRIBUTES
            .iter()
            .chain(TEXT_ATTRIBUTES.iter())
            .chain(LENGTH_ATTRIBUTES.iter())
            .copied()
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 18);
    }

    #[test]
    fn test_baseline_only() {
        let params = collect(&AttributeMap::new().with("code", "EAN13").with("x", "1cm")).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get("barStrokeWidth"),
            Some(&StyleValue::Length(BASELINE_BAR_STROKE_WIDTH))
        );
    }

    #[test]
    fn test_color_group() {
        let params = collect(&AttributeMap::new().with("barFillColor", "#000000")).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.color("barFillColor").unwrap(), Some(Color::black()));
    }

    #[test]
    fn test_text_group_is_verbatim() {
        let params = collect(
            &AttributeMap::new()
                .with("humanReadable", "True")
                .with("fontName", "Courier"),
        )
        .unwrap();
        assert_eq!(params.text("humanReadable").unwrap(), Some("True"));
        assert_eq!(params.text("fontName").unwrap(), Some("Courier"));
    }

    #[test]
    fn test_length_group() {
        let params = collect(&AttributeMap::new().with("barHeight", "10mm")).unwrap();
        let height = params.length("barHeight").unwrap().unwrap();
        assert!((height - 10.0 * MM).abs() < 1e-3);
    }

    #[test]
    fn test_explicit_bar_stroke_width_replaces_baseline() {
        let params = collect(&AttributeMap::new().with("barStrokeWidth", "0.5")).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.length("barStrokeWidth").unwrap(), Some(0.5));
    }

    #[test]
    fn test_malformed_values_propagate() {
        let err = collect(&AttributeMap::new().with("textColor", "nope")).unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));

        let err = collect(&AttributeMap::new().with("fontSize", "big")).unwrap_err();
        assert!(matches!(err, Error::InvalidLength(_)));
    }

    #[test]
    fn test_typed_accessors_reject_mismatch() {
        let params = StyleParams::empty().with("quiet", StyleValue::Length(1.0));
        assert!(params.text("quiet").is_err());
        assert_eq!(params.length("missing").unwrap(), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);

        let params = StyleParams::empty().with("quiet", StyleValue::Text("maybe".into()));
        assert!(matches!(params.flag("quiet"), Err(Error::InvalidStyle { .. })));
    }
}
