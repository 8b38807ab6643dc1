//! Private module for selective re-export.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};

/// A variable's value: an integer or a tag drawn from a finite enum domain.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Int(i64),
    Tag(Arc<str>),
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Tag(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Tag(Arc::from(s))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Tag(t) => write!(f, "{t}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => ser.serialize_i64(*i),
            Value::Tag(t) => ser.serialize_str(t),
        }
    }
}

/// An immutable variable store.
///
/// Updates return a fresh `Memory` and leave the receiver untouched, so one
/// store can back any number of configurations. A digest of the full
/// contents is precomputed at construction: equality short-circuits on it
/// and hashing feeds it directly.
#[derive(Clone)]
pub struct Memory {
    vars: Arc<BTreeMap<Arc<str>, Value>>,
    digest: u64,
}

impl Memory {
    /// Builds a store from `(name, value)` pairs.
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Arc<str>>,
        V: Into<Value>,
    {
        Self::from_vars(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn from_vars(vars: BTreeMap<Arc<str>, Value>) -> Self {
        let digest = crate::fingerprint(&vars);
        Memory {
            vars: Arc::new(vars),
            digest,
        }
    }

    /// Looks up a variable. `None` is the absent value; lookups never fail.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Returns a new store with one variable rebound.
    pub fn with(&self, key: impl Into<Arc<str>>, value: impl Into<Value>) -> Memory {
        let mut vars = (*self.vars).clone();
        vars.insert(key.into(), value.into());
        Self::from_vars(vars)
    }

    /// Returns a new store with every given variable rebound as one atomic
    /// update. Unmentioned variables keep their prior values. A variable
    /// repeated within one call is an error in the calling model, never a
    /// silent last-write-wins.
    pub fn set<K, V>(&self, assignments: impl IntoIterator<Item = (K, V)>) -> Result<Memory>
    where
        K: Into<Arc<str>>,
        V: Into<Value>,
    {
        let mut vars = (*self.vars).clone();
        let mut written: Vec<Arc<str>> = Vec::new();
        for (k, v) in assignments {
            let key = k.into();
            if written.contains(&key) {
                return Err(Error::RepeatedAssignment {
                    key: key.to_string(),
                });
            }
            vars.insert(Arc::clone(&key), v.into());
            written.push(key);
        }
        Ok(Self::from_vars(vars))
    }

    /// Iterates variables in name order.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (&**k, v))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for Memory {
    /// The empty store.
    fn default() -> Self {
        Self::from_vars(BTreeMap::new())
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.vars == other.vars
    }
}

impl Eq for Memory {}

impl Hash for Memory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.vars.iter()).finish()
    }
}

impl Serialize for Memory {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.vars.len()))?;
        for (k, v) in self.vars.iter() {
            map.serialize_entry(&**k, v)?;
        }
        map.end()
    }
}
