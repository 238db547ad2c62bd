//! Markup-backed source elements.

use super::{AttributeMap, SourceElement};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An element read from markup: tag name, attributes, and text content.
///
/// The text content of a `<barCode>` element is the value it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: AttributeMap,
    text: String,
}

impl XmlElement {
    /// Tag name (local part).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text content, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute view of this element.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Mutable attribute view of this element.
    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }

    /// Parse a single element; the root of `xml`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::elements::{SourceElement, XmlElement};
    ///
    /// let node = XmlElement::parse(r#"<barCode code="EAN8" x="1cm">96385074</barCode>"#)?;
    /// assert_eq!(node.get_attribute("code"), "EAN8");
    /// assert_eq!(node.text(), "96385074");
    /// # Ok::<(), pdf_barcode::Error>(())
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let mut element = Self::from_start(e)?;
                    element.text = Self::read_text(&mut reader)?;
                    return Ok(element);
                },
                Ok(Event::Empty(ref e)) => return Self::from_start(e),
                Ok(Event::Eof) => {
                    return Err(Error::Xml("document has no root element".to_string()));
                },
                Err(e) => return Err(Error::Xml(format!("parse error: {}", e))),
                _ => {},
            }
        }
    }

    /// Collect every element named `tag` anywhere in `xml`, in document order.
    ///
    /// Elements of the same name nested inside a match are not reported
    /// separately; their text becomes part of the outer match.
    pub fn find_all(xml: &str, tag: &str) -> Result<Vec<Self>> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        let mut found = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == tag.as_bytes() => {
                    let mut element = Self::from_start(e)?;
                    element.text = Self::read_text(&mut reader)?;
                    found.push(element);
                },
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == tag.as_bytes() => {
                    found.push(Self::from_start(e)?);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(format!("parse error: {}", e))),
                _ => {},
            }
        }

        log::debug!("Found {} <{}> elements", found.len(), tag);
        Ok(found)
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
        let mut attributes = AttributeMap::new();

        for attr in e.attributes() {
            let attr = attr.map_err(|e| Error::Xml(format!("bad attribute in <{}>: {}", name, e)))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("bad value for {}: {}", key, e)))?;
            attributes.set(key, value.into_owned());
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
        })
    }

    /// Read up to the matching end tag, concatenating text and CDATA.
    fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
        let mut text = String::new();
        let mut depth = 1usize;

        while depth > 0 {
            match reader.read_event() {
                Ok(Event::Start(_)) => depth += 1,
                Ok(Event::End(_)) => depth -= 1,
                Ok(Event::Text(t)) => {
                    let chunk = t
                        .unescape()
                        .map_err(|e| Error::Xml(format!("bad text content: {}", e)))?;
                    text.push_str(&chunk);
                },
                Ok(Event::CData(c)) => text.push_str(&String::from_utf8_lossy(&c)),
                Ok(Event::Eof) => {
                    return Err(Error::Xml("unexpected end of document".to_string()));
                },
                Err(e) => return Err(Error::Xml(format!("parse error: {}", e))),
                _ => {},
            }
        }

        Ok(text.trim().to_string())
    }
}

impl SourceElement for XmlElement {
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> &str {
        self.attributes.get_attribute(name)
    }
}
