//! Pretty JSON output for notebook files.
//!
//! Both files are written with a two-space indent. The backup escapes every
//! non-ASCII character and DEL as `\uXXXX` (UTF-16 surrogate pairs above the
//! BMP); the cleaned notebook keeps them literal.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::core::errors::{AppError, AppResult};

const INDENT: &[u8] = b"  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsciiMode {
    /// Escape non-ASCII characters and DEL.
    Escape,
    /// Write non-ASCII characters as UTF-8.
    Preserve,
}

pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T, mode: AsciiMode) -> AppResult<String> {
    if mode == AsciiMode::Preserve {
        return Ok(serde_json::to_string_pretty(value)?);
    }
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiEscapingFormatter::new());
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|err| AppError::InvalidJson(err.to_string()))
}

// ── ASCII escaping ───────────────────────────────────────────────────────────

struct AsciiEscapingFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiEscapingFormatter<'a> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for AsciiEscapingFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}
