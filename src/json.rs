//! JSON loading and deterministic rendering.
//!
//! Input is read whole and parsed into a [`serde_json::Value`] array. Output
//! is rendered with four-space indentation, `,` at line ends and `": "`
//! between keys and values, and without a trailing newline, so repeated runs
//! over the same input are byte-identical and diff cleanly.
//!
//! With [`OutputEncoding::Ascii`] every non-ASCII character is written as a
//! lowercase `\uXXXX` escape (UTF-16 surrogate pairs above the BMP), which
//! reproduces the layout of the files the memory game was first built with.
//!
//! # Examples
//!
//! ```
//! use record_reducer::json::{to_pretty_json, OutputEncoding};
//! use serde_json::json;
//!
//! let bytes = to_pretty_json(&json!([{"title": "Münze"}]), OutputEncoding::Ascii)?;
//! assert_eq!(bytes, b"[\n    {\n        \"title\": \"M\\u00fcnze\"\n    }\n]");
//! # Ok::<(), record_reducer::ReduceError>(())
//! ```

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

use crate::error::{ReduceError, Result};

const INDENT: &[u8] = b"    ";

/// Character encoding of rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// Non-ASCII characters written as UTF-8 (default)
    #[default]
    Utf8,
    /// Non-ASCII characters written as `\uXXXX` escapes
    Ascii,
}

/// Read `path` and parse it as a JSON array.
///
/// # Errors
///
/// Returns [`ReduceError::Input`] if the file is missing, unreadable or not
/// UTF-8, [`ReduceError::InvalidJson`] if it does not parse, and
/// [`ReduceError::NotAnArray`] if the top-level value is not an array.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|source| ReduceError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&text, path)
}

/// Parse `text` (read from `path`) as a JSON array.
///
/// # Errors
///
/// See [`load_records`].
pub fn parse_records(text: &str, path: &Path) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).map_err(|source| ReduceError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(ReduceError::NotAnArray {
            path: path.to_path_buf(),
            found: type_name(&other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render `value` as indented JSON bytes.
///
/// Object keys appear in the order `value` serializes them; the record types
/// in this crate serialize with sorted keys.
///
/// # Errors
///
/// Returns [`ReduceError::Serialize`] if `value` cannot be serialized.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, encoding: OutputEncoding) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let pretty = PrettyFormatter::with_indent(INDENT);
    match encoding {
        OutputEncoding::Utf8 => {
            let mut ser = serde_json::Serializer::with_formatter(&mut buffer, pretty);
            value.serialize(&mut ser)?;
        },
        OutputEncoding::Ascii => {
            let mut ser =
                serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter { inner: pretty });
            value.serialize(&mut ser)?;
        },
    }
    Ok(buffer)
}

/// Wraps another formatter and escapes every non-ASCII character.
struct AsciiFormatter<F> {
    inner: F,
}

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (pos, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..pos])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = pos + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
