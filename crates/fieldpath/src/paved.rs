use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::path::{Path, Segment};
use crate::{Error, Result};

/// Resolve `path` to a location in `doc`.
///
/// Absence is a normal outcome, not an error kind of its own making: a
/// missing field, an index past the end of a sequence, or a lookup against a
/// value of the wrong kind all yield [`Error::NotFound`]. Shape mismatch is
/// only reported by the decode step in [`get_into`].
pub fn resolve<'a>(doc: &'a Value, path: &Path) -> Result<&'a Value> {
    let mut cur = doc;
    for seg in path.segments() {
        cur = match seg {
            Segment::Field(name) => cur.as_object().and_then(|m| m.get(name)),
            Segment::Index(idx) => cur.as_array().and_then(|a| a.get(*idx)),
        }
        .ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })?;
    }
    Ok(cur)
}

/// Resolve `path` and decode the value there into `T`.
pub fn get_into<T: DeserializeOwned>(doc: &Value, path: &str) -> Result<T> {
    let parsed: Path = path.parse()?;
    let value = resolve(doc, &parsed)?;
    T::deserialize(value).map_err(|source| Error::Decode {
        path: parsed.to_string(),
        source,
    })
}

/// Encode `value` and write it at `path`, creating intermediate objects for
/// absent field segments.
///
/// Arrays are never created or grown implicitly: an index segment whose array
/// is absent, or whose index is at or past the current length, fails with
/// [`Error::Invalid`]. Callers build sequences by setting the whole array
/// value, or append explicitly. Writes are strict where reads are lenient: a
/// parent of the wrong kind is also [`Error::Invalid`]. A failed write may
/// leave empty intermediate objects behind.
pub fn set_value<T: Serialize + ?Sized>(doc: &mut Value, path: &str, value: &T) -> Result<()> {
    let parsed: Path = path.parse()?;
    let encoded = serde_json::to_value(value).map_err(|source| Error::Decode {
        path: parsed.to_string(),
        source,
    })?;
    let invalid = |reason: &str| Error::Invalid {
        path: parsed.to_string(),
        reason: reason.to_string(),
    };
    let Some((last, parents)) = parsed.segments().split_last() else {
        return Err(invalid("empty path"));
    };

    let mut cur = doc;
    for seg in parents {
        match seg {
            Segment::Field(name) => {
                if cur.is_null() {
                    *cur = Value::Object(serde_json::Map::new());
                }
                let Value::Object(map) = cur else {
                    return Err(invalid("intermediate value is not an object"));
                };
                cur = map.entry(name.clone()).or_insert(Value::Null);
            }
            Segment::Index(idx) => {
                let Value::Array(arr) = cur else {
                    return Err(invalid("intermediate sequence is absent"));
                };
                cur = arr
                    .get_mut(*idx)
                    .ok_or_else(|| invalid("index past end of sequence"))?;
            }
        }
    }
    match last {
        Segment::Field(name) => {
            if cur.is_null() {
                *cur = Value::Object(serde_json::Map::new());
            }
            let Value::Object(map) = cur else {
                return Err(invalid("target parent is not an object"));
            };
            map.insert(name.clone(), encoded);
        }
        Segment::Index(idx) => {
            let Value::Array(arr) = cur else {
                return Err(invalid("target sequence is absent"));
            };
            let slot = arr
                .get_mut(*idx)
                .ok_or_else(|| invalid("index past end of sequence"))?;
            *slot = encoded;
        }
    }
    Ok(())
}

/// Remove the value at `path` if present; a no-op when any part of the path
/// is absent. Delete is idempotent "make sure nothing is there", so only
/// syntax errors surface.
pub fn delete_value(doc: &mut Value, path: &str) -> Result<()> {
    let parsed: Path = path.parse()?;
    let Some((last, parents)) = parsed.segments().split_last() else {
        return Ok(());
    };
    let mut cur = doc;
    for seg in parents {
        let next = match seg {
            Segment::Field(name) => cur.as_object_mut().and_then(|m| m.get_mut(name)),
            Segment::Index(idx) => cur.as_array_mut().and_then(|a| a.get_mut(*idx)),
        };
        match next {
            Some(v) => cur = v,
            None => return Ok(()),
        }
    }
    match last {
        Segment::Field(name) => {
            if let Some(map) = cur.as_object_mut() {
                map.remove(name);
            }
        }
        Segment::Index(idx) => {
            if let Some(arr) = cur.as_array_mut() {
                if *idx < arr.len() {
                    arr.remove(*idx);
                }
            }
        }
    }
    Ok(())
}

/// A document "paved" for repeated field-path access. Borrows the document
/// mutably for the duration, which also pins down the single-writer
/// discipline at the type level.
#[derive(Debug)]
pub struct Paved<'a> {
    object: &'a mut Value,
}

impl<'a> Paved<'a> {
    pub fn new(object: &'a mut Value) -> Self {
        Self { object }
    }

    pub fn get_value(&self, path: &str) -> Result<&Value> {
        let parsed: Path = path.parse()?;
        resolve(self.object, &parsed)
    }

    pub fn get_into<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        get_into(self.object, path)
    }

    pub fn set_value<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        set_value(self.object, path, value)
    }

    pub fn delete_value(&mut self, path: &str) -> Result<()> {
        delete_value(self.object, path)
    }
}
