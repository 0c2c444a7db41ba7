use thiserror::Error;

use crate::api::ParameterSpec;
use crate::doc::{parse_argument_entries, segment_docstring, AliasConflictError};

// Section headers whose contents are parsed as argument entries, compared
// case-insensitively.
const RECOGNIZED_HEADERS: [&str; 7] = [
    "args",
    "arguments",
    "keyword args",
    "keyword arguments",
    "parameters",
    "options",
    "flags",
];

/// The error when a documented name corresponds to no declared parameter
/// and the signature has no catch-all keyword slot to absorb it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{name}' is documented but not found in the signature.")]
pub struct UnknownArgumentError {
    /// The documented name.
    pub name: String,
}

/// The error when documentation hints cannot be merged into a spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocHintError {
    /// Documented names or aliases collide.
    #[error(transparent)]
    AliasConflict(#[from] AliasConflictError),

    /// A documented name matches no declared parameter.
    #[error(transparent)]
    UnknownArgument(#[from] UnknownArgumentError),
}

/// Merge a documentation string's descriptions, per-parameter help text,
/// and aliases into the spec, in place.
///
/// Sections with a recognized header (`Args`, `Arguments`, `Keyword Args`,
/// `Keyword Arguments`, `Parameters`, `Options`, `Flags`; case-insensitive)
/// are parsed as argument entries, later sections overriding earlier ones
/// on key collision.  Every other section is preserved in order as a
/// free-text description.
///
/// A documented name absent from the signature is promoted to a boolean
/// keyword-only parameter (default `false`) when the signature accepts
/// arbitrary keywords, and fails with
/// [`UnknownArgumentError`] otherwise.  An alias that collides with a
/// declared parameter, targets the catch-all keyword slot, or chains
/// through another alias fails with [`AliasConflictError`].
pub fn load_doc_hints(spec: &mut ParameterSpec, docstring: &str) -> Result<(), DocHintError> {
    let sections = segment_docstring(docstring);
    let mut docs = std::collections::HashMap::default();
    let mut aliases = std::collections::HashMap::default();
    let mut descriptions = Vec::default();

    for section in &sections {
        let recognized = section
            .header()
            .map_or(false, |h| RECOGNIZED_HEADERS.contains(&h.to_lowercase().as_str()));

        if recognized {
            let (section_docs, section_aliases) = parse_argument_entries(&section.contents())?;
            docs.extend(section_docs);
            aliases.extend(section_aliases);
        } else {
            descriptions.push(section.text());
        }
    }

    // One-hop resolution is a property of the alias map itself; check it
    // before names start moving into the spec.
    let mut alias_names: Vec<&String> = aliases.keys().collect();
    alias_names.sort();

    for alias in &alias_names {
        let target = &aliases[*alias];

        if *alias != target && aliases.contains_key(target) {
            return Err(AliasConflictError::Indirect {
                alias: (*alias).clone(),
                target: target.clone(),
            }
            .into());
        }
    }

    // Sorted for a stable choice of reported name and promotion order.
    let mut unknown: Vec<String> = docs
        .keys()
        .filter(|name| !spec.is_parameter(name))
        .cloned()
        .collect();
    unknown.sort();

    if let Some(name) = unknown.first() {
        if !spec.accepts_arbitrary_keywords() {
            return Err(UnknownArgumentError { name: name.clone() }.into());
        }
    }

    for name in unknown {
        spec.promote_keyword_flag(&name);
    }

    for alias in alias_names {
        let target = &aliases[alias];

        if spec.is_parameter(alias) {
            return Err(AliasConflictError::ShadowsParameter {
                alias: alias.clone(),
            }
            .into());
        }

        if spec.keyword_variadic.as_deref() == Some(target.as_str()) {
            return Err(AliasConflictError::TargetsCatchAll {
                alias: alias.clone(),
                target: target.clone(),
            }
            .into());
        }
    }

    spec.docs = docs;
    spec.aliases = aliases;
    spec.descriptions = descriptions;
    spec.doc.replace(docstring.to_string());
    Ok(())
}
