use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Value bound to a defined name.
///
/// A bare `-DNAME` binds the integer 1; `-DNAME=text` binds the literal
/// string. Both render through `Display` when substituted into a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

/// One `NAME[=VALUE]` binding parsed from a `-D` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: Value,
}

/// Parse the payload of a `-D` flag.
///
/// The first `=` splits name from value; later `=` characters belong to the
/// value. Without an `=`, the name is bound to the integer 1.
pub fn parse_define(spec: &str) -> Result<Define, String> {
    let (name, value) = match spec.split_once('=') {
        Some((name, value)) => (name, Value::Str(value.to_string())),
        None => (spec, Value::Int(1)),
    };

    if name.is_empty() {
        return Err(format!("define has no name: '{}'", spec));
    }

    Ok(Define {
        name: name.to_string(),
        value,
    })
}

/// Immutable name-to-value table consulted by the filter.
///
/// Built once from the command line and never mutated during a run. Keys are
/// kept ordered so `--show-defines` output is stable.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Defines {
    map: BTreeMap<String, Value>,
}

impl Defines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect parsed `-D` flags in command-line order; a repeated name
    /// silently takes the last value.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = Define>,
    {
        let mut defines = Self::new();
        for define in flags {
            defines.insert(define.name, define.value);
        }
        defines
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
