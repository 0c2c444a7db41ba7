use crate::model::DefaultValue;
use crate::typing::TypeExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
    Positional,
    KeywordOnly,
    Variadic,
    KeywordVariadic,
}

/// A single declared parameter of a callable.
///
/// ### Example
/// ```
/// use declarg::{DefaultValue, Param, Primitive};
///
/// Param::positional("count")
///     .default(DefaultValue::Int(1))
///     .annotation(Primitive::Int.into());
/// ```
pub struct Param {
    pub(crate) name: String,
    pub(crate) kind: ParamKind,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) annotation: Option<TypeExpr>,
}

impl Param {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            annotation: None,
        }
    }

    /// Declare a positional parameter.
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Positional)
    }

    /// Declare a keyword-only parameter.
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordOnly)
    }

    /// Declare the variadic-positional slot, absorbing any number of unnamed
    /// surplus values.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Variadic)
    }

    /// Declare the variadic-keyword slot, absorbing named values that match
    /// no other parameter.
    pub fn keyword_variadic(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordVariadic)
    }

    /// Attach a default value.
    /// If repeated, only the final default applies.
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default.replace(value);
        self
    }

    /// Attach a raw type annotation.
    /// If repeated, only the final annotation applies.
    pub fn annotation(mut self, expr: TypeExpr) -> Self {
        self.annotation.replace(expr);
        self
    }
}

/// An ordered parameter table with an optional documentation string.
///
/// This is the declared stand-in for reflecting over a live callable: the
/// registration site lists the parameters in declaration order.
///
/// ### Example
/// ```
/// use declarg::{DefaultValue, Param, Signature};
///
/// Signature::new()
///     .doc("Add up the inputs.\n\n  values:  the numbers to sum")
///     .param(Param::positional("values"))
///     .param(Param::keyword("verbose").default(DefaultValue::Bool(false)));
/// ```
#[derive(Default)]
pub struct Signature {
    pub(crate) params: Vec<Param>,
    pub(crate) doc: Option<String>,
}

impl Signature {
    /// Create an empty parameter table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    /// The order of calls is the declaration order.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Attach the callable's documentation string.
    /// If repeated, only the final documentation string applies.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc.replace(text.into());
        self
    }
}

pub(crate) enum Shape {
    Function(Signature),
    Method(Signature),
    Class(Option<Signature>),
    Object(Signature),
    Opaque(String),
}

/// A callable in one of the recognized calling shapes.
///
/// Extraction is polymorphic over the shape: methods and callable objects
/// carry an implicit leading receiver slot which is dropped, and a class
/// with only the trivial inherited initializer has no extractable
/// parameters.
pub struct Callable {
    pub(crate) shape: Shape,
}

impl Callable {
    /// A plain function.
    pub fn function(signature: Signature) -> Self {
        Self {
            shape: Shape::Function(signature),
        }
    }

    /// A bound method; the leading receiver parameter is dropped during
    /// extraction.
    pub fn method(signature: Signature) -> Self {
        Self {
            shape: Shape::Method(signature),
        }
    }

    /// A class, called through its initializer; the initializer's leading
    /// receiver parameter is dropped during extraction.
    pub fn class(initializer: Signature) -> Self {
        Self {
            shape: Shape::Class(Some(initializer)),
        }
    }

    /// A class with only the trivial inherited initializer: no extractable
    /// parameters and no variadic slots.
    pub fn bare_class() -> Self {
        Self {
            shape: Shape::Class(None),
        }
    }

    /// A callable object, called through its call operator; the operator's
    /// leading receiver parameter is dropped during extraction.
    pub fn object(signature: Signature) -> Self {
        Self {
            shape: Shape::Object(signature),
        }
    }

    /// A plain value with no callable shape.  Extraction always fails.
    pub fn opaque(subject: impl Into<String>) -> Self {
        Self {
            shape: Shape::Opaque(subject.into()),
        }
    }

    /// The documentation string attached to the underlying signature, if
    /// any.
    pub fn doc(&self) -> Option<&str> {
        match &self.shape {
            Shape::Function(signature)
            | Shape::Method(signature)
            | Shape::Object(signature)
            | Shape::Class(Some(signature)) => signature.doc.as_deref(),
            Shape::Class(None) | Shape::Opaque(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Primitive;

    #[test]
    fn param_builder() {
        let param = Param::positional("count")
            .default(DefaultValue::Int(0))
            .default(DefaultValue::Int(1))
            .annotation(TypeExpr::text("--discarded--"))
            .annotation(Primitive::Int.into());

        assert_eq!(param.name, "count");
        assert_eq!(param.kind, ParamKind::Positional);
        assert_eq!(param.default, Some(DefaultValue::Int(1)));
        assert_eq!(param.annotation, Some(TypeExpr::Primitive(Primitive::Int)));
    }

    #[test]
    fn signature_order() {
        let signature = Signature::new()
            .param(Param::positional("a"))
            .param(Param::variadic("rest"))
            .param(Param::keyword("flag"));

        let names: Vec<&str> = signature.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "rest", "flag"]);
    }

    #[test]
    fn callable_doc() {
        let callable = Callable::function(Signature::new().doc("Does things."));
        assert_eq!(callable.doc(), Some("Does things."));

        assert_eq!(Callable::bare_class().doc(), None);
        assert_eq!(Callable::opaque("3").doc(), None);
    }
}
