//! Shared utilities for integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use hashbang_router::routing::ParamValue;

/// Build a full URL whose fragment is `hash_path`.
#[allow(dead_code)]
pub fn url(hash_path: &str) -> String {
    format!("https://app.test/index.html#{}", hash_path)
}

/// Records handler invocations: (handler label, positional arguments).
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<(&'static str, Vec<String>)>>>,
}

#[allow(dead_code)]
impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &'static str, args: Vec<String>) {
        self.calls.borrow_mut().push((label, args));
    }

    pub fn calls(&self) -> Vec<(&'static str, Vec<String>)> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Option<(&'static str, Vec<String>)> {
        self.calls.borrow().last().cloned()
    }
}

/// Text of a parameter value.
#[allow(dead_code)]
pub fn text(value: &ParamValue) -> String {
    value.to_string()
}
