/// The primitive types a parameter may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// A signed integer.
    Int,
    /// A floating point number.
    Float,
    /// A boolean switch value.
    Bool,
    /// A string.
    Str,
    /// The null type (the type of the null default value).
    Null,
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Int => write!(f, "int"),
            Primitive::Float => write!(f, "float"),
            Primitive::Bool => write!(f, "bool"),
            Primitive::Str => write!(f, "str"),
            Primitive::Null => write!(f, "NoneType"),
        }
    }
}

/// A resolved, immutable description of a parameter's expected type.
///
/// Descriptors are plain values: normalization produces new descriptors and
/// never mutates existing ones.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// One of the primitive types.
    Primitive(Primitive),
    /// A homogeneous sequence.
    List(Box<TypeDescriptor>),
    /// A homogeneous collection without duplicates.
    Set(Box<TypeDescriptor>),
    /// A fixed-arity ordered sequence; one descriptor per position.
    Tuple(Vec<TypeDescriptor>),
    /// Two or more alternatives.
    ///
    /// Holds no nested unions and no duplicates; construct via
    /// [`TypeDescriptor::union`] to maintain this.
    Union(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Build a union over `members`, flattening nested unions in place and
    /// de-duplicating by value equality while preserving first-seen order.
    ///
    /// A single distinct member collapses to that member.  Returns `None`
    /// when `members` is empty.
    ///
    /// ### Example
    /// ```
    /// use declarg::{Primitive, TypeDescriptor};
    ///
    /// let int = TypeDescriptor::Primitive(Primitive::Int);
    /// assert_eq!(
    ///     TypeDescriptor::union(vec![int.clone(), int.clone()]),
    ///     Some(int),
    /// );
    /// ```
    pub fn union(members: Vec<TypeDescriptor>) -> Option<TypeDescriptor> {
        let mut flattened: Vec<TypeDescriptor> = Vec::default();
        Self::flatten_into(members, &mut flattened);

        match flattened.len() {
            0 => None,
            1 => Some(flattened.remove(0)),
            _ => Some(TypeDescriptor::Union(flattened)),
        }
    }

    fn flatten_into(members: Vec<TypeDescriptor>, out: &mut Vec<TypeDescriptor>) {
        for member in members {
            match member {
                TypeDescriptor::Union(inner) => Self::flatten_into(inner, out),
                other => {
                    if !out.contains(&other) {
                        out.push(other);
                    }
                }
            }
        }
    }

    /// Build the optional form of `descriptor`: a union with the null type.
    pub fn optional(descriptor: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::union(vec![descriptor, TypeDescriptor::Primitive(Primitive::Null)])
            .expect("internal error - optional union cannot be empty")
    }

    /// Whether this descriptor admits the null value.
    pub fn admits_null(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(Primitive::Null) => true,
            TypeDescriptor::Union(members) => members.iter().any(TypeDescriptor::admits_null),
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(members: &[TypeDescriptor]) -> String {
            members
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        }

        match self {
            TypeDescriptor::Primitive(primitive) => write!(f, "{primitive}"),
            TypeDescriptor::List(item) => write!(f, "List[{item}]"),
            TypeDescriptor::Set(item) => write!(f, "Set[{item}]"),
            TypeDescriptor::Tuple(items) => write!(f, "Tuple[{}]", join(items)),
            TypeDescriptor::Union(members) => write!(f, "Union[{}]", join(members)),
        }
    }
}

/// A parameter's declared default value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// An integer default.
    Int(i64),
    /// A floating point default.
    Float(f64),
    /// A boolean default.
    Bool(bool),
    /// A string default.
    Str(String),
    /// The null value.
    Null,
    /// A fixed tuple of defaults.
    Tuple(Vec<DefaultValue>),
}

impl DefaultValue {
    /// Whether this default is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, DefaultValue::Null)
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Int(value) => write!(f, "{value}"),
            DefaultValue::Float(value) => write!(f, "{value}"),
            DefaultValue::Bool(value) => write!(f, "{value}"),
            DefaultValue::Str(value) => write!(f, "{value}"),
            DefaultValue::Null => write!(f, "null"),
            DefaultValue::Tuple(values) => {
                let rendered = values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "({rendered})")
            }
        }
    }
}
