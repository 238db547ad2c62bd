//! PDF object model and serialization.
//!
//! Only the object kinds a barcode page needs: names, numbers, strings,
//! arrays, dictionaries, streams and indirect references. Dictionaries keep
//! insertion order so output is deterministic.

use indexmap::IndexMap;
use std::io::Write;

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Integer value
    Integer(i64),
    /// Real value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (written with a leading /)
    Name(String),
    /// Array of objects
    Array(Vec<PdfObject>),
    /// Dictionary
    Dictionary(IndexMap<String, PdfObject>),
    /// Stream (dictionary + data); `Length` is written from the data
    Stream {
        /// Stream dictionary
        dict: IndexMap<String, PdfObject>,
        /// Stream data
        data: Vec<u8>,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

impl PdfObject {
    /// Name object.
    pub fn name(name: impl Into<String>) -> Self {
        PdfObject::Name(name.into())
    }

    /// String object.
    pub fn string(text: &str) -> Self {
        PdfObject::String(text.as_bytes().to_vec())
    }

    /// Reference object.
    pub fn reference(id: u32) -> Self {
        PdfObject::Reference(ObjectRef::new(id, 0))
    }

    /// Rectangle array `[llx lly urx ury]`.
    pub fn rect(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Real(llx),
            PdfObject::Real(lly),
            PdfObject::Real(urx),
            PdfObject::Real(ury),
        ])
    }

    /// Dictionary from key/value pairs, in order.
    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &PdfObject) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, id: u32, obj: &PdfObject) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        writeln!(buf, "{} 0 obj", id)?;
        self.write_object(&mut buf, obj)?;
        write!(buf, "\nendobj\n")?;
        Ok(buf)
    }

    fn write_object<W: Write>(&self, w: &mut W, obj: &PdfObject) -> std::io::Result<()> {
        match obj {
            PdfObject::Integer(i) => write!(w, "{}", i),
            PdfObject::Real(r) => write_real(w, *r),
            PdfObject::String(s) => write_string(w, s),
            PdfObject::Name(n) => write_name(w, n),
            PdfObject::Array(arr) => {
                write!(w, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    self.write_object(w, item)?;
                }
                write!(w, "]")
            },
            PdfObject::Dictionary(dict) => self.write_dictionary(w, dict),
            PdfObject::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.insert("Length".to_string(), PdfObject::Integer(data.len() as i64));
                self.write_dictionary(w, &dict)?;
                write!(w, "\nstream\n")?;
                w.write_all(data)?;
                write!(w, "\nendstream")
            },
            PdfObject::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &IndexMap<String, PdfObject>,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;
        for (key, value) in dict {
            write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        write!(w, ">>")
    }
}

/// Write a real number, trimming trailing zeros.
pub(crate) fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 {
        write!(w, "{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        write!(w, "{}", trimmed)
    }
}

/// Write a PDF string: literal when printable, hex otherwise.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let is_printable = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

    if is_printable {
        write!(w, "(")?;
        write_escaped(w, data)?;
        write!(w, ")")
    } else {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        write!(w, ">")
    }
}

/// Escape the bytes of a literal string body.
pub(crate) fn write_escaped<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    for &byte in data {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}

/// Write a PDF name, escaping delimiters and non-regular bytes as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'!'..=b'~'
                if !matches!(
                    byte,
                    b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
                ) =>
            {
                w.write_all(&[byte])?
            },
            _ => write!(w, "#{:02X}", byte)?,
        }
    }
    Ok(())
}
