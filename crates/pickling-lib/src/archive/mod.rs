//! JSON archives: named value pairs written into, and read out of, a single
//! top-level JSON object.
//!
//! An output archive buffers its entries and only emits the object when
//! [`JsonOutputArchive::finish`] consumes it. Until then the writer holds
//! nothing, so a caller must finish the archive before reading its buffer.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use serde::de::{DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::value::RawValue;

use crate::errors::{PicklingError, Result};

/// Indentation of emitted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// Compact output on a single line.
    #[default]
    None,
    Spaces(u8),
    Tabs(u8),
}

impl Indent {
    fn unit(&self) -> Option<Vec<u8>> {
        match *self {
            Indent::None => None,
            Indent::Spaces(n) => Some(vec![b' '; n as usize]),
            Indent::Tabs(n) => Some(vec![b'\t'; n as usize]),
        }
    }
}

impl FromStr for Indent {
    type Err = PicklingError;

    /// Accepts `none`, a space count such as `4`, or a tab count such as `tab1`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Indent::None);
        }
        let invalid = || PicklingError::Config(format!("invalid indent: {s:?}"));
        if let Some(count) = s.strip_prefix("tab") {
            let n = if count.is_empty() { 1 } else { count.parse().map_err(|_| invalid())? };
            return Ok(Indent::Tabs(n));
        }
        s.parse().map(Indent::Spaces).map_err(|_| invalid())
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::None => write!(f, "none"),
            Indent::Spaces(n) => write!(f, "{n}"),
            Indent::Tabs(n) => write!(f, "tab{n}"),
        }
    }
}

/// Formatting options shared by all output archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveOptions {
    pub indent: Indent,
}

impl ArchiveOptions {
    pub fn no_indent() -> Self {
        Self { indent: Indent::None }
    }

    /// Four-space indentation.
    pub fn pretty() -> Self {
        Self {
            indent: Indent::Spaces(4),
        }
    }
}

/// Write `value` to `writer` as JSON using `options`, then flush.
pub fn write_value<W, T>(mut writer: W, value: &T, options: &ArchiveOptions) -> Result<W>
where
    W: Write,
    T: Serialize + ?Sized,
{
    match options.indent.unit() {
        None => serde_json::to_writer(&mut writer, value)?,
        Some(unit) => {
            let formatter = PrettyFormatter::with_indent(&unit);
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            value.serialize(&mut serializer)?;
        }
    }
    writer.flush()?;
    Ok(writer)
}

/// Render `value` as a JSON string using `options`.
pub fn to_string_with<T>(value: &T, options: &ArchiveOptions) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let buffer = write_value(Vec::new(), value, options)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Buffers named values and writes them as one JSON object on [`finish`](Self::finish).
///
/// Each value is serialized when it is written, so `write` reports the
/// serializer's errors. Entries keep their insertion order. Dropping an
/// archive without finishing it discards the buffered entries and leaves the
/// writer untouched.
pub struct JsonOutputArchive<W: Write> {
    writer: Option<W>,
    options: ArchiveOptions,
    entries: Vec<(String, Vec<u8>)>,
}

impl<W: Write> JsonOutputArchive<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, ArchiveOptions::default())
    }

    pub fn with_options(writer: W, options: ArchiveOptions) -> Self {
        Self {
            writer: Some(writer),
            options,
            entries: Vec::new(),
        }
    }

    /// Serialize `value` into the archive under `name`.
    pub fn write<T>(&mut self, name: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.entries.iter().any(|(existing, _)| existing == name) {
            return Err(PicklingError::DuplicateField(name.to_string()));
        }
        let encoded = write_value(Vec::new(), value, &self.options)?;
        self.entries.push((name.to_string(), encoded));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emit the buffered object, flush, and hand the writer back.
    pub fn finish(mut self) -> Result<W> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("archive already finished"))?;
        let entries = std::mem::take(&mut self.entries);
        write_object(&mut writer, &entries, self.options.indent.unit().as_deref())?;
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write> Drop for JsonOutputArchive<W> {
    fn drop(&mut self) {
        if self.writer.is_some() && !self.entries.is_empty() {
            tracing::warn!(
                entries = self.entries.len(),
                "JSON output archive dropped without finish, output discarded"
            );
        }
    }
}

/// Lays out already encoded entries the way `PrettyFormatter` (or the compact
/// formatter when `unit` is `None`) would lay out the whole object.
///
/// Encoded values never contain a raw newline inside a string, so every
/// newline in a pretty value is structural and gets one more indent level.
fn write_object<W: Write>(
    writer: &mut W,
    entries: &[(String, Vec<u8>)],
    unit: Option<&[u8]>,
) -> Result<()> {
    if entries.is_empty() {
        writer.write_all(b"{}")?;
        return Ok(());
    }
    writer.write_all(b"{")?;
    for (i, (name, encoded)) in entries.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        match unit {
            None => {
                serde_json::to_writer(&mut *writer, name)?;
                writer.write_all(b":")?;
                writer.write_all(encoded)?;
            }
            Some(unit) => {
                writer.write_all(b"\n")?;
                writer.write_all(unit)?;
                serde_json::to_writer(&mut *writer, name)?;
                writer.write_all(b": ")?;
                for (j, line) in encoded.split(|&b| b == b'\n').enumerate() {
                    if j > 0 {
                        writer.write_all(b"\n")?;
                        writer.write_all(unit)?;
                    }
                    writer.write_all(line)?;
                }
            }
        }
    }
    if unit.is_some() {
        writer.write_all(b"\n")?;
    }
    writer.write_all(b"}")?;
    Ok(())
}

/// Top-level entries in document order, each kept as unparsed JSON text.
struct Entries(Vec<(String, Box<RawValue>)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Entries, A::Error> {
                let mut entries: Vec<(String, Box<RawValue>)> = Vec::new();
                while let Some((name, raw)) = map.next_entry::<String, Box<RawValue>>()? {
                    // Last occurrence wins, as with serde_json's own maps.
                    match entries.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(slot) => slot.1 = raw,
                        None => entries.push((name, raw)),
                    }
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reads named values out of a JSON object.
///
/// Entries stay as unparsed text until they are read, so each value is
/// deserialized straight from its source text. Top-level keys the caller
/// never asks for are ignored.
#[derive(Debug, Clone)]
pub struct JsonInputArchive {
    entries: Vec<(String, Box<RawValue>)>,
}

impl JsonInputArchive {
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    fn from_raw(raw: Box<RawValue>) -> Result<Self> {
        match kind_of(raw.get()) {
            "object" => {
                let Entries(entries) = serde_json::from_str(raw.get())?;
                Ok(Self { entries })
            }
            found => Err(PicklingError::NotAnObject { found }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Deserialize the entry stored under `name`.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let raw = self
            .get(name)
            .ok_or_else(|| PicklingError::MissingField(name.to_string()))?;
        Ok(serde_json::from_str(raw.get())?)
    }

    /// Overwrite `target` with the entry stored under `name`.
    ///
    /// `target` is left unchanged when reading fails.
    pub fn read_into<T: DeserializeOwned>(&self, name: &str, target: &mut T) -> Result<()> {
        *target = self.read(name)?;
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, raw)| raw.as_ref())
    }
}

fn kind_of(raw: &str) -> &'static str {
    match raw.trim_start().as_bytes().first().copied() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b't' | b'f') => "boolean",
        Some(b'n') => "null",
        _ => "number",
    }
}
