use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalogue::{denomination, normalize_code};
use super::types::TermValue;

/// Code of the root Business Group.
pub const INVOICE_CODE: &str = "BG0000";

/// Children of a node, keyed by code. Each key holds every occurrence in
/// insertion order; nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Children {
    groups: BTreeMap<String, Vec<BusinessGroup>>,
    terms: BTreeMap<String, Vec<BusinessTerm>>,
}

fn key(code: &str) -> &str {
    normalize_code(code).unwrap_or(code)
}

/// Multiplicity-aware access shared by the invoice root and every group
/// occurrence.
///
/// Codes may be given bare (`"BG0004"`) or with a descriptive suffix
/// (`"BG0004Seller"`).
pub trait Node {
    fn children(&self) -> &Children;

    fn children_mut(&mut self) -> &mut Children;

    /// All occurrences of a group, in insertion order. Empty if none.
    fn groups(&self, code: &str) -> &[BusinessGroup] {
        self.children()
            .groups
            .get(key(code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The `index`-th occurrence of a group.
    fn group(&self, code: &str, index: usize) -> Option<&BusinessGroup> {
        self.groups(code).get(index)
    }

    /// All occurrences of a term, in insertion order. Empty if none.
    fn terms(&self, code: &str) -> &[BusinessTerm] {
        self.children()
            .terms
            .get(key(code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn term(&self, code: &str, index: usize) -> Option<&BusinessTerm> {
        self.terms(code).get(index)
    }

    /// Value of the `index`-th occurrence of a term.
    fn term_value(&self, code: &str, index: usize) -> Option<&TermValue> {
        self.term(code, index).map(BusinessTerm::value)
    }

    fn group_mut(&mut self, code: &str, index: usize) -> Option<&mut BusinessGroup> {
        self.children_mut()
            .groups
            .get_mut(key(code))
            .and_then(|groups| groups.get_mut(index))
    }

    /// Append an occurrence and return a handle to it.
    fn push_group(&mut self, group: BusinessGroup) -> &mut BusinessGroup {
        let occurrences = self
            .children_mut()
            .groups
            .entry(group.code.clone())
            .or_default();
        occurrences.push(group);
        let last = occurrences.len() - 1;
        &mut occurrences[last]
    }

    fn push_term(&mut self, term: BusinessTerm) {
        self.children_mut()
            .terms
            .entry(term.code.clone())
            .or_default()
            .push(term);
    }

    /// Codes of all groups present, sorted.
    fn group_codes(&self) -> Vec<&str> {
        self.children().groups.keys().map(String::as_str).collect()
    }

    fn term_codes(&self) -> Vec<&str> {
        self.children().terms.keys().map(String::as_str).collect()
    }
}

/// BG-0: the semantic invoice root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    children: Children,
}

impl Invoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Node::push_group`].
    pub fn with_group(mut self, group: BusinessGroup) -> Self {
        self.push_group(group);
        self
    }

    /// Builder-style [`Node::push_term`].
    pub fn with_term(mut self, code: &str, value: impl Into<TermValue>) -> Self {
        self.push_term(BusinessTerm::new(code, value));
        self
    }

    pub fn code(&self) -> &str {
        INVOICE_CODE
    }
}

impl Node for Invoice {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

/// One occurrence of a Business Group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessGroup {
    code: String,
    children: Children,
}

impl BusinessGroup {
    pub fn new(code: &str) -> Self {
        Self {
            code: key(code).to_string(),
            children: Children::default(),
        }
    }

    /// Builder-style [`Node::push_term`].
    pub fn with_term(mut self, code: &str, value: impl Into<TermValue>) -> Self {
        self.push_term(BusinessTerm::new(code, value));
        self
    }

    /// Builder-style [`Node::push_group`].
    pub fn with_group(mut self, group: BusinessGroup) -> Self {
        self.push_group(group);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn denomination(&self) -> &str {
        denomination(&self.code).unwrap_or(self.code.as_str())
    }
}

impl Node for BusinessGroup {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

/// One occurrence of a Business Term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTerm {
    code: String,
    value: TermValue,
}

impl BusinessTerm {
    pub fn new(code: &str, value: impl Into<TermValue>) -> Self {
        Self {
            code: key(code).to_string(),
            value: value.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn value(&self) -> &TermValue {
        &self.value
    }

    /// Catalogue denomination, falling back to the code.
    pub fn denomination(&self) -> &str {
        denomination(&self.code).unwrap_or(self.code.as_str())
    }
}
