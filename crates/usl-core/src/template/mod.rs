//! Minimal expression templates for overlay fields.
//!
//! Syntax is a small subset of Go-style text templates:
//!
//! ```text
//! {{ .source | pathescape }}
//! {{ pwd }}/{{ .name }}
//! {{ upper "text" }}
//! ```
//!
//! Available functions: `pathescape`, `pwd`, `lower`, `upper`. Looking up a
//! variable that does not exist is an error.

mod ast;
mod evaluator;
mod parser;

use std::collections::{BTreeMap, HashMap};

use crate::error::TemplateError;

use ast::Node;

/// Source of variable values for rendering.
pub trait Variables {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl Variables for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Variables for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    pub fn render(&self, vars: &impl Variables) -> Result<String, TemplateError> {
        evaluator::evaluate(&self.nodes, vars)
    }
}
