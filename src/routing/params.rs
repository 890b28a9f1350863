//! Extracted path parameters.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::routing::pattern::ParamKind;

/// A converted parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl ParamValue {
    /// Convert raw captured text according to the declared kind.
    pub fn parse(kind: ParamKind, raw: &str) -> Option<Self> {
        match kind {
            ParamKind::Text => Some(ParamValue::Text(raw.to_owned())),
            ParamKind::Integer => raw.parse().ok().map(ParamValue::Integer),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            ParamValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A single URL parameter: the name declared in the pattern and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

/// Parameters of a matched route, in pattern declaration order.
///
/// Values can be read by position or by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first parameter declared with `name`.
    pub fn by_name(&self, name: &str) -> Option<&ParamValue> {
        self.0
            .iter()
            .find(|param| param.name == name)
            .map(|param| &param.value)
    }

    pub fn get(&self, index: usize) -> Option<&Param> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }

    pub fn push(&mut self, param: Param) {
        self.0.push(param);
    }
}

impl Index<usize> for Params {
    type Output = ParamValue;

    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i].value
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
