//! Pickling registry: types are enabled under a stable name, pickled into a
//! [`Reduction`], and rebuilt by one unpickler that serves every enabled type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{PicklingError, Result};
use crate::json::{self, Pickle};

/// What a pickling host stores for one value: the name the type was enabled
/// under and the value's serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reduction {
    pub type_name: String,
    pub data: String,
}

type Unpickler = fn(&str) -> Result<Box<dyn Any + Send>>;

struct Entry {
    rust_name: &'static str,
    unpickle: Unpickler,
}

fn unpickle_erased<T: Pickle + Send + 'static>(data: &str) -> Result<Box<dyn Any + Send>> {
    let value: T = json::deserialize(data)?;
    Ok(Box::new(value))
}

/// Maps enabled type names to their unpicklers.
#[derive(Default)]
pub struct Registry {
    by_name: HashMap<String, Entry>,
    by_type: HashMap<TypeId, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables pickling for `T` under `name`.
    ///
    /// Returns an error if the name or the type is already enabled.
    pub fn enable<T>(&mut self, name: impl Into<String>) -> Result<&mut Self>
    where
        T: Pickle + Send + 'static,
    {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(PicklingError::AlreadyEnabled(name));
        }
        if let Some(existing) = self.by_type.get(&TypeId::of::<T>()) {
            return Err(PicklingError::AlreadyEnabled(format!(
                "{} (as {})",
                type_name::<T>(),
                existing
            )));
        }
        tracing::debug!(name = %name, rust_type = type_name::<T>(), "Enabled pickling");
        self.by_type.insert(TypeId::of::<T>(), name.clone());
        self.by_name.insert(
            name,
            Entry {
                rust_name: type_name::<T>(),
                unpickle: unpickle_erased::<T>,
            },
        );
        Ok(self)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Enabled names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Pickle `value` into a reduction carrying its enabled name.
    pub fn reduce<T: Pickle + 'static>(&self, value: &T) -> Result<Reduction> {
        let type_name = self
            .by_type
            .get(&TypeId::of::<T>())
            .ok_or_else(|| PicklingError::NotEnabled(type_name::<T>().to_string()))?;
        Ok(Reduction {
            type_name: type_name.clone(),
            data: json::serialize(value)?,
        })
    }

    /// Rebuild the value a reduction describes, whatever its type.
    pub fn unpickle(&self, reduction: &Reduction) -> Result<Box<dyn Any + Send>> {
        let entry = self.entry(&reduction.type_name)?;
        (entry.unpickle)(&reduction.data)
    }

    /// Rebuild the value a reduction describes as a `T`.
    pub fn unpickle_as<T: 'static>(&self, reduction: &Reduction) -> Result<T> {
        let entry = self.entry(&reduction.type_name)?;
        let value = (entry.unpickle)(&reduction.data)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| PicklingError::TypeMismatch {
                expected: type_name::<T>().to_string(),
                found: entry.rust_name.to_string(),
            })
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.by_name
            .get(name)
            .ok_or_else(|| PicklingError::NotEnabled(name.to_string()))
    }
}
