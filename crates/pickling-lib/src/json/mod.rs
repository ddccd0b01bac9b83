//! String-in/string-out pickling over `serde_json`.
//!
//! A pickled value is a JSON object with a single entry under [`LABEL`]:
//!
//! ```text
//! {"cereal":{"x":3,"y":"hi"}}
//! ```
//!
//! The label is only a container key. Field names and nesting come from the
//! value's own `Serialize`/`Deserialize` implementation.

use serde::{de::DeserializeOwned, Serialize};

use crate::archive::{ArchiveOptions, JsonInputArchive, JsonOutputArchive};
use crate::errors::Result;

/// Top-level key every pickled value is stored under.
pub const LABEL: &str = "cereal";

/// A value that can describe its fields to the serializer and be rebuilt from them.
///
/// Implemented for every `Serialize + DeserializeOwned` type. Deserialization
/// assembles the value from parsed fields, so `Default` is not required.
pub trait Pickle: Serialize + DeserializeOwned {}

impl<T: Serialize + DeserializeOwned> Pickle for T {}

/// Serialize a value to compact JSON under [`LABEL`].
pub fn serialize<T: Pickle>(value: &T) -> Result<String> {
    serialize_with(value, ArchiveOptions::no_indent())
}

/// Serialize a value to four-space indented JSON under [`LABEL`].
pub fn serialize_pretty<T: Pickle>(value: &T) -> Result<String> {
    serialize_with(value, ArchiveOptions::pretty())
}

/// Serialize a value under [`LABEL`] with explicit formatting options.
pub fn serialize_with<T: Pickle>(value: &T, options: ArchiveOptions) -> Result<String> {
    let buffer = {
        let mut archive = JsonOutputArchive::with_options(Vec::new(), options);
        archive.write(LABEL, value)?;
        archive.finish()?
    };
    let text = String::from_utf8(buffer)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    tracing::debug!(
        value_type = std::any::type_name::<T>(),
        bytes = text.len(),
        "Serialized value"
    );
    Ok(text)
}

/// Deserialize a value from JSON produced by [`serialize`].
///
/// Fails when the text is malformed, when its top level is not an object, or
/// when [`LABEL`] is absent.
pub fn deserialize<T: Pickle>(text: &str) -> Result<T> {
    let value = JsonInputArchive::parse(text)?.read(LABEL)?;
    tracing::debug!(
        value_type = std::any::type_name::<T>(),
        bytes = text.len(),
        "Deserialized value"
    );
    Ok(value)
}

/// Deserialize into an existing value, overwriting it.
///
/// `target` is left unchanged when deserialization fails.
pub fn deserialize_into<T: Pickle>(text: &str, target: &mut T) -> Result<()> {
    JsonInputArchive::parse(text)?.read_into(LABEL, target)
}
