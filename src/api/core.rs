use thiserror::Error;

use crate::api::declaration::{Callable, ParamKind, Shape, Signature};
use crate::api::ParameterSpec;
use crate::doc::{load_doc_hints, DocHintError};
use crate::model::TypeDescriptor;
use crate::typing::{infer_default_type, resolve_type};

/// The error when a callable has no extractable calling shape, or its
/// parameter table is not one a host language could produce.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The input is a plain value with no callable form.
    #[error("could not determine the signature of '{subject}'.")]
    NotCallable {
        /// A rendering of the non-callable input.
        subject: String,
    },

    /// The calling shape implies a leading receiver parameter, but the
    /// parameter table declares none.
    #[error("the calling shape implies a receiver but the parameter table declares none.")]
    MissingReceiver,

    /// The same parameter name was declared twice.
    #[error("parameter '{name}' is declared twice.")]
    Duplicate {
        /// The repeated name.
        name: String,
    },

    /// Parameters must be declared positional, variadic-positional,
    /// keyword-only, variadic-keyword, with at most one of each variadic
    /// slot.
    #[error("parameter '{name}' is declared out of order.")]
    OutOfOrder {
        /// The out-of-order name.
        name: String,
    },

    /// A positional parameter without a default follows a defaulted one.
    #[error("positional parameter '{name}' without a default follows a defaulted parameter.")]
    NonTrailingDefault {
        /// The non-defaulted name.
        name: String,
    },

    /// Variadic slots cannot carry defaults.
    #[error("variadic parameter '{name}' cannot take a default.")]
    VariadicDefault {
        /// The offending name.
        name: String,
    },
}

/// Inspect a callable and produce its canonical [`ParameterSpec`].
///
/// Methods, classes, and callable objects have their leading receiver
/// parameter dropped; a class with only the trivial inherited initializer
/// extracts to an empty spec.  All sequence and map fields default to their
/// canonical empty values.
///
/// ### Example
/// ```
/// use declarg::{extract_signature, Callable, Param, Signature};
///
/// let callable = Callable::method(
///     Signature::new()
///         .param(Param::positional("self"))
///         .param(Param::positional("path")),
/// );
/// let spec = extract_signature(&callable).unwrap();
/// assert_eq!(spec.positionals(), &["path".to_string()]);
/// ```
pub fn extract_signature(callable: &Callable) -> Result<ParameterSpec, SignatureError> {
    let (signature, drop_receiver) = match &callable.shape {
        Shape::Function(signature) => (Some(signature), false),
        Shape::Method(signature) | Shape::Object(signature) => (Some(signature), true),
        Shape::Class(initializer) => (initializer.as_ref(), true),
        Shape::Opaque(subject) => {
            return Err(SignatureError::NotCallable {
                subject: subject.clone(),
            });
        }
    };

    let signature = match signature {
        Some(signature) => signature,
        // The trivial inherited initializer.
        None => return Ok(ParameterSpec::default()),
    };

    let mut params = signature.params.as_slice();

    if drop_receiver {
        match params.first() {
            Some(first) if first.kind == ParamKind::Positional => {
                params = &params[1..];
            }
            _ => return Err(SignatureError::MissingReceiver),
        }
    }

    build_spec(params, signature)
}

fn rank(kind: ParamKind) -> u8 {
    match kind {
        ParamKind::Positional => 0,
        ParamKind::Variadic => 1,
        ParamKind::KeywordOnly => 2,
        ParamKind::KeywordVariadic => 3,
    }
}

fn build_spec(
    params: &[crate::api::Param],
    signature: &Signature,
) -> Result<ParameterSpec, SignatureError> {
    let mut spec = ParameterSpec {
        doc: signature.doc.clone(),
        ..ParameterSpec::default()
    };
    let mut current_rank = 0;

    for param in params {
        if spec.is_parameter(&param.name) {
            return Err(SignatureError::Duplicate {
                name: param.name.clone(),
            });
        }

        let param_rank = rank(param.kind);
        let single_slot = matches!(param.kind, ParamKind::Variadic | ParamKind::KeywordVariadic);
        if param_rank < current_rank || (single_slot && param_rank == current_rank) {
            return Err(SignatureError::OutOfOrder {
                name: param.name.clone(),
            });
        }
        current_rank = param_rank;

        match param.kind {
            ParamKind::Positional => {
                match &param.default {
                    Some(value) => spec.positional_defaults.push(value.clone()),
                    None if !spec.positional_defaults.is_empty() => {
                        return Err(SignatureError::NonTrailingDefault {
                            name: param.name.clone(),
                        });
                    }
                    None => {}
                }
                spec.positionals.push(param.name.clone());
            }
            ParamKind::KeywordOnly => {
                if let Some(value) = &param.default {
                    spec.keyword_defaults
                        .insert(param.name.clone(), value.clone());
                }
                spec.keyword_only.push(param.name.clone());
            }
            ParamKind::Variadic | ParamKind::KeywordVariadic => {
                if param.default.is_some() {
                    return Err(SignatureError::VariadicDefault {
                        name: param.name.clone(),
                    });
                }
                if param.kind == ParamKind::Variadic {
                    spec.variadic.replace(param.name.clone());
                } else {
                    spec.keyword_variadic.replace(param.name.clone());
                }
            }
        }

        if let Some(annotation) = &param.annotation {
            spec.annotations
                .insert(param.name.clone(), annotation.clone());
        }
    }

    Ok(spec)
}

/// Resolve the spec's annotations and defaults into type descriptors, in
/// place.
///
/// Type hinting is best-effort: annotations that fail to resolve are
/// omitted, a parameter with a resolved type and a null default is wrapped
/// in the optional form, and a parameter with a default but no resolved
/// type gets a descriptor inferred from the default's shape when possible.
pub fn load_type_hints(spec: &mut ParameterSpec) {
    let mut types: std::collections::HashMap<String, TypeDescriptor> = spec
        .annotations
        .iter()
        .filter_map(|(name, raw)| resolve_type(raw).ok().map(|d| (name.clone(), d)))
        .collect();

    for (name, value) in spec.combined_defaults() {
        match types.get(&name) {
            Some(descriptor) => {
                if value.is_null() {
                    // An annotated parameter defaulting to null is
                    // implicitly nullable.
                    let wrapped = TypeDescriptor::optional(descriptor.clone());
                    types.insert(name, wrapped);
                }
            }
            None => {
                if let Some(inferred) = infer_default_type(&value) {
                    types.insert(name, inferred);
                }
            }
        }
    }

    spec.types = types;
}

/// Options for [`parse_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip type resolution and inference.
    pub skip_type_hints: bool,
    /// Skip documentation parsing.
    pub skip_doc_hints: bool,
}

/// The error when the full parse pipeline fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSpecError {
    /// Signature extraction failed; no partial spec is available.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Documentation hints failed to load.
    #[error(transparent)]
    DocHint(#[from] DocHintError),
}

/// Run the full pipeline: extract the signature, load type hints, and load
/// documentation hints when a documentation string is attached.
///
/// ### Example
/// ```
/// use declarg::{parse, Callable, Param, Primitive, Signature};
///
/// let callable = Callable::function(
///     Signature::new()
///         .doc("Greet someone.\n\nArgs:\n    name:  who to greet")
///         .param(Param::positional("name").annotation(Primitive::Str.into())),
/// );
/// let spec = parse(&callable).unwrap();
/// assert_eq!(spec.docs().get("name").unwrap(), "who to greet");
/// ```
pub fn parse(callable: &Callable) -> Result<ParameterSpec, ParseSpecError> {
    parse_with(callable, ParseOptions::default())
}

/// Run the pipeline with the given [`ParseOptions`].
pub fn parse_with(
    callable: &Callable,
    options: ParseOptions,
) -> Result<ParameterSpec, ParseSpecError> {
    let mut spec = extract_signature(callable)?;

    if !options.skip_type_hints {
        load_type_hints(&mut spec);
    }

    if !options.skip_doc_hints {
        if let Some(doc) = spec.doc.clone() {
            load_doc_hints(&mut spec, &doc)?;
        }
    }

    Ok(spec)
}
