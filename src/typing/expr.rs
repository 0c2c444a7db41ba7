use crate::model::Primitive;

/// The container/union constructors a parameterized type expression may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The canonical list constructor.
    List,
    /// The canonical set constructor.
    Set,
    /// The canonical tuple constructor.
    Tuple,
    /// The union constructor.
    Union,
    /// The optional constructor (shorthand for a union with the null type).
    Optional,
    /// A list origin tagged with the runtime list type rather than the
    /// canonical constructor.
    BuiltinList,
    /// A set origin tagged with the runtime set type.
    BuiltinSet,
    /// A tuple origin tagged with the runtime tuple type.
    BuiltinTuple,
}

impl Origin {
    /// Rewrite a runtime-type origin to its canonical constructor.
    ///
    /// The expression vocabulary changed its internal representation across
    /// versions; both forms must normalize identically.
    pub fn canonical(&self) -> Origin {
        match self {
            Origin::BuiltinList => Origin::List,
            Origin::BuiltinSet => Origin::Set,
            Origin::BuiltinTuple => Origin::Tuple,
            other => *other,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.canonical() {
            Origin::List => write!(f, "List"),
            Origin::Set => write!(f, "Set"),
            Origin::Tuple => write!(f, "Tuple"),
            Origin::Union => write!(f, "Union"),
            Origin::Optional => write!(f, "Optional"),
            _ => unreachable!("internal error - canonical() must erase builtin origins"),
        }
    }
}

/// A raw (unresolved) type expression, as attached to a declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A primitive type.
    Primitive(Primitive),
    /// The null literal used as an annotation.
    Null,
    /// A constructor applied to argument expressions, e.g. `Union[int, str]`.
    /// An empty argument list models a bare constructor name.
    Apply {
        /// The constructor being applied.
        origin: Origin,
        /// The ordered argument expressions.
        args: Vec<TypeExpr>,
    },
    /// A textual expression to be parsed against the recognized type names.
    Text(String),
}

impl TypeExpr {
    /// A list expression over one item expression.
    pub fn list(item: TypeExpr) -> Self {
        TypeExpr::Apply {
            origin: Origin::List,
            args: vec![item],
        }
    }

    /// A set expression over one item expression.
    pub fn set(item: TypeExpr) -> Self {
        TypeExpr::Apply {
            origin: Origin::Set,
            args: vec![item],
        }
    }

    /// A tuple expression over the positional item expressions.
    pub fn tuple(items: Vec<TypeExpr>) -> Self {
        TypeExpr::Apply {
            origin: Origin::Tuple,
            args: items,
        }
    }

    /// A union expression over the alternative expressions.
    pub fn union(alternatives: Vec<TypeExpr>) -> Self {
        TypeExpr::Apply {
            origin: Origin::Union,
            args: alternatives,
        }
    }

    /// An optional expression over one inner expression.
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Apply {
            origin: Origin::Optional,
            args: vec![inner],
        }
    }

    /// A textual expression.
    pub fn text(text: impl Into<String>) -> Self {
        TypeExpr::Text(text.into())
    }
}

impl From<Primitive> for TypeExpr {
    fn from(primitive: Primitive) -> Self {
        TypeExpr::Primitive(primitive)
    }
}
