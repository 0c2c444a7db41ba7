use std::collections::HashMap;

use crate::model::{DefaultValue, Primitive, TypeDescriptor};
use crate::typing::TypeExpr;

/// The canonical, enriched description of a callable's parameters.
///
/// Created by [`extract_signature`](crate::extract_signature), enriched in
/// place by [`load_type_hints`](crate::load_type_hints) and
/// [`load_doc_hints`](crate::load_doc_hints), then treated as read-only
/// input to token matching and help rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSpec {
    pub(crate) positionals: Vec<String>,
    pub(crate) variadic: Option<String>,
    pub(crate) keyword_variadic: Option<String>,
    pub(crate) positional_defaults: Vec<DefaultValue>,
    pub(crate) keyword_only: Vec<String>,
    pub(crate) keyword_defaults: HashMap<String, DefaultValue>,
    pub(crate) annotations: HashMap<String, TypeExpr>,
    pub(crate) types: HashMap<String, TypeDescriptor>,
    pub(crate) descriptions: Vec<String>,
    pub(crate) docs: HashMap<String, String>,
    pub(crate) aliases: HashMap<String, String>,
    pub(crate) doc: Option<String>,
}

impl ParameterSpec {
    /// The positional parameter names, in declaration order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// The variadic-positional name, if declared.
    pub fn variadic(&self) -> Option<&str> {
        self.variadic.as_deref()
    }

    /// The variadic-keyword name, if declared.
    pub fn keyword_variadic(&self) -> Option<&str> {
        self.keyword_variadic.as_deref()
    }

    /// The positional default values, right-aligned against the tail of
    /// [`ParameterSpec::positionals`].
    pub fn positional_defaults(&self) -> &[DefaultValue] {
        &self.positional_defaults
    }

    /// The keyword-only parameter names, in declaration order.
    pub fn keyword_only(&self) -> &[String] {
        &self.keyword_only
    }

    /// The keyword-only default values.
    pub fn keyword_defaults(&self) -> &HashMap<String, DefaultValue> {
        &self.keyword_defaults
    }

    /// The raw per-parameter annotations.
    pub fn annotations(&self) -> &HashMap<String, TypeExpr> {
        &self.annotations
    }

    /// The resolved per-parameter type descriptors.
    pub fn types(&self) -> &HashMap<String, TypeDescriptor> {
        &self.types
    }

    /// The free-text description blocks, in documentation order.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// The per-parameter help text.
    pub fn docs(&self) -> &HashMap<String, String> {
        &self.docs
    }

    /// The alias map: alternate name to canonical parameter name.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// The raw documentation string the doc hints were loaded from.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Whether `name` refers to a declared parameter (positional, variadic,
    /// or keyword-only).
    pub fn is_parameter(&self, name: &str) -> bool {
        self.positionals.iter().any(|p| p == name)
            || self.variadic.as_deref() == Some(name)
            || self.keyword_variadic.as_deref() == Some(name)
            || self.keyword_only.iter().any(|p| p == name)
    }

    /// Whether the spec absorbs named values that match no declared
    /// parameter.
    pub fn accepts_arbitrary_keywords(&self) -> bool {
        self.keyword_variadic.is_some()
    }

    /// Resolve `name` through the alias map, in exactly one hop.
    pub fn resolve_alias<'n>(&'n self, name: &'n str) -> &'n str {
        match self.aliases.get(name) {
            Some(target) => target,
            None => name,
        }
    }

    /// The effective default for `name`: its keyword default, or its
    /// right-aligned positional default.
    pub fn default_of(&self, name: &str) -> Option<&DefaultValue> {
        if let Some(value) = self.keyword_defaults.get(name) {
            return Some(value);
        }

        let defaulted_tail = self
            .positionals
            .iter()
            .rev()
            .zip(self.positional_defaults.iter().rev());
        for (positional, value) in defaulted_tail {
            if positional == name {
                return Some(value);
            }
        }

        None
    }

    /// All effective defaults: keyword defaults overlaid with the
    /// right-aligned positional defaults.
    pub(crate) fn combined_defaults(&self) -> HashMap<String, DefaultValue> {
        let mut combined = self.keyword_defaults.clone();

        for (positional, value) in self
            .positionals
            .iter()
            .rev()
            .zip(self.positional_defaults.iter().rev())
        {
            combined.insert(positional.clone(), value.clone());
        }

        combined
    }

    /// Synthesize a documentation-declared boolean switch as a keyword-only
    /// parameter with default `false`.
    pub(crate) fn promote_keyword_flag(&mut self, name: &str) {
        self.keyword_only.push(name.to_string());
        self.keyword_defaults
            .insert(name.to_string(), DefaultValue::Bool(false));
        self.annotations
            .insert(name.to_string(), TypeExpr::Primitive(Primitive::Bool));
        self.types
            .insert(name.to_string(), TypeDescriptor::Primitive(Primitive::Bool));
    }
}
