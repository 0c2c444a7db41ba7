use thiserror::Error;

use crate::model::{Primitive, TypeDescriptor};
use crate::typing::{Origin, TypeExpr};

/// The error when a type expression cannot be resolved to any recognized
/// descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnsupportedTypeError {
    /// The expression names a type outside the recognized vocabulary.
    #[error("unrecognized type name '{name}'.")]
    UnknownName {
        /// The offending name.
        name: String,
    },

    /// The textual expression does not parse under the type grammar.
    #[error("malformed type expression '{text}'.")]
    MalformedExpression {
        /// The full textual expression.
        text: String,
    },

    /// A constructor was applied to the wrong number of arguments.
    #[error("wrong number of arguments for '{origin}' (provided={provided}, expected={expected}).")]
    WrongArity {
        /// The constructor name.
        origin: String,
        /// How many arguments were provided.
        provided: usize,
        /// How many arguments the constructor takes.
        expected: String,
    },

    /// A union was constructed with no alternatives.
    #[error("cannot build a union of no alternatives.")]
    EmptyUnion,
}

/// Resolve a raw type expression into a canonical [`TypeDescriptor`].
///
/// Textual expressions are parsed against the closed vocabulary of
/// recognized type names; nothing else is evaluated.  Runtime-type container
/// origins are rewritten to their canonical constructors before recursion,
/// and unions are flattened, de-duplicated, and collapsed per
/// [`TypeDescriptor::union`].
///
/// ### Example
/// ```
/// use declarg::{resolve_type, Primitive, TypeDescriptor, TypeExpr};
///
/// let descriptor = resolve_type(&TypeExpr::text("Optional[int]")).unwrap();
/// assert_eq!(
///     descriptor,
///     TypeDescriptor::Union(vec![
///         TypeDescriptor::Primitive(Primitive::Int),
///         TypeDescriptor::Primitive(Primitive::Null),
///     ]),
/// );
/// ```
pub fn resolve_type(expr: &TypeExpr) -> Result<TypeDescriptor, UnsupportedTypeError> {
    match expr {
        TypeExpr::Null => Ok(TypeDescriptor::Primitive(Primitive::Null)),
        TypeExpr::Primitive(primitive) => Ok(TypeDescriptor::Primitive(*primitive)),
        TypeExpr::Text(text) => resolve_type(&parse_text_expr(text)?),
        TypeExpr::Apply { origin, args } => resolve_apply(origin.canonical(), args),
    }
}

fn resolve_apply(origin: Origin, args: &[TypeExpr]) -> Result<TypeDescriptor, UnsupportedTypeError> {
    if args.is_empty() {
        return match origin {
            Origin::Union => Err(UnsupportedTypeError::EmptyUnion),
            _ => Err(wrong_arity(origin, 0)),
        };
    }

    let resolved = args
        .iter()
        .map(resolve_type)
        .collect::<Result<Vec<TypeDescriptor>, UnsupportedTypeError>>()?;

    match origin {
        Origin::List | Origin::Set | Origin::Optional => {
            let mut resolved = resolved;
            if resolved.len() != 1 {
                return Err(wrong_arity(origin, resolved.len()));
            }
            let item = resolved.remove(0);
            Ok(match origin {
                Origin::List => TypeDescriptor::List(Box::new(item)),
                Origin::Set => TypeDescriptor::Set(Box::new(item)),
                _ => TypeDescriptor::optional(item),
            })
        }
        Origin::Tuple => Ok(TypeDescriptor::Tuple(resolved)),
        Origin::Union => {
            TypeDescriptor::union(resolved).ok_or(UnsupportedTypeError::EmptyUnion)
        }
        _ => unreachable!("internal error - canonical() must erase builtin origins"),
    }
}

fn wrong_arity(origin: Origin, provided: usize) -> UnsupportedTypeError {
    let expected = match origin {
        Origin::Tuple | Origin::Union => "at least 1",
        _ => "1",
    };
    UnsupportedTypeError::WrongArity {
        origin: origin.to_string(),
        provided,
        expected: expected.to_string(),
    }
}

/// Parse a textual type expression into a raw [`TypeExpr`].
///
/// Grammar: `expr := name [ '[' expr (',' expr)* ']' ]`.  Names resolve
/// against the closed table of recognized types; constructor names also
/// accept a `typing.` prefix.
pub(crate) fn parse_text_expr(text: &str) -> Result<TypeExpr, UnsupportedTypeError> {
    let mut parser = TextParser {
        chars: text.chars().collect(),
        position: 0,
        text,
    };
    let expr = parser.expression()?;
    parser.skip_spaces();

    if parser.peek().is_some() {
        return Err(parser.malformed());
    }

    Ok(expr)
}

struct TextParser<'t> {
    chars: Vec<char>,
    position: usize,
    text: &'t str,
}

impl<'t> TextParser<'t> {
    fn malformed(&self) -> UnsupportedTypeError {
        UnsupportedTypeError::MalformedExpression {
            text: self.text.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn identifier(&mut self) -> Result<String, UnsupportedTypeError> {
        self.skip_spaces();
        let mut name = String::default();

        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.') {
            name.push(self.peek().expect("internal error - peek must follow matches"));
            self.advance();
        }

        if name.is_empty() {
            return Err(self.malformed());
        }

        Ok(name)
    }

    fn expression(&mut self) -> Result<TypeExpr, UnsupportedTypeError> {
        let name = self.identifier()?;

        if let Some(primitive) = match name.as_str() {
            "int" => Some(Primitive::Int),
            "float" => Some(Primitive::Float),
            "bool" => Some(Primitive::Bool),
            "str" => Some(Primitive::Str),
            _ => None,
        } {
            return Ok(TypeExpr::Primitive(primitive));
        }

        if name == "None" || name == "NoneType" {
            return Ok(TypeExpr::Null);
        }

        let bare = name.strip_prefix("typing.").unwrap_or(&name);
        let origin = match bare {
            "List" => Origin::List,
            "Set" => Origin::Set,
            "Tuple" => Origin::Tuple,
            "Union" => Origin::Union,
            "Optional" => Origin::Optional,
            _ => return Err(UnsupportedTypeError::UnknownName { name }),
        };

        self.skip_spaces();
        let mut args = Vec::default();

        if self.peek() == Some('[') {
            self.advance();

            loop {
                args.push(self.expression()?);
                self.skip_spaces();

                match self.peek() {
                    Some(',') => self.advance(),
                    Some(']') => {
                        self.advance();
                        break;
                    }
                    _ => return Err(self.malformed()),
                }
            }
        }

        Ok(TypeExpr::Apply { origin, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(Primitive::Int)
    }

    fn str_() -> TypeDescriptor {
        TypeDescriptor::Primitive(Primitive::Str)
    }

    fn null() -> TypeDescriptor {
        TypeDescriptor::Primitive(Primitive::Null)
    }

    #[test]
    fn resolve_null() {
        assert_eq!(resolve_type(&TypeExpr::Null).unwrap(), null());
    }

    #[rstest]
    #[case(Primitive::Int)]
    #[case(Primitive::Float)]
    #[case(Primitive::Bool)]
    #[case(Primitive::Str)]
    #[case(Primitive::Null)]
    fn resolve_primitive(#[case] primitive: Primitive) {
        assert_eq!(
            resolve_type(&TypeExpr::Primitive(primitive)).unwrap(),
            TypeDescriptor::Primitive(primitive)
        );
    }

    #[rstest]
    #[case(TypeExpr::union(vec![Primitive::Int.into()]), int())]
    #[case(TypeExpr::union(vec![TypeExpr::Null]), null())]
    #[case(
        TypeExpr::union(vec![Primitive::Int.into(), Primitive::Str.into(), Primitive::Int.into()]),
        TypeDescriptor::Union(vec![int(), str_()])
    )]
    #[case(TypeExpr::optional(TypeExpr::Null), null())]
    #[case(
        TypeExpr::optional(Primitive::Int.into()),
        TypeDescriptor::Union(vec![int(), null()])
    )]
    #[case(TypeExpr::list(Primitive::Int.into()), TypeDescriptor::List(Box::new(int())))]
    #[case(TypeExpr::set(Primitive::Int.into()), TypeDescriptor::Set(Box::new(int())))]
    #[case(
        TypeExpr::tuple(vec![Primitive::Int.into(), Primitive::Str.into()]),
        TypeDescriptor::Tuple(vec![int(), str_()])
    )]
    fn resolve_apply(#[case] expr: TypeExpr, #[case] expected: TypeDescriptor) {
        assert_eq!(resolve_type(&expr).unwrap(), expected);
    }

    #[test]
    fn resolve_builtin_origin() {
        // Runtime-type origins must normalize identically to the canonical
        // constructors.
        let legacy = TypeExpr::Apply {
            origin: Origin::BuiltinTuple,
            args: vec![Primitive::Int.into(), Primitive::Int.into()],
        };
        let canonical = TypeExpr::tuple(vec![Primitive::Int.into(), Primitive::Int.into()]);

        assert_eq!(
            resolve_type(&legacy).unwrap(),
            resolve_type(&canonical).unwrap()
        );

        let legacy_list = TypeExpr::Apply {
            origin: Origin::BuiltinList,
            args: vec![Primitive::Str.into()],
        };
        assert_eq!(
            resolve_type(&legacy_list).unwrap(),
            TypeDescriptor::List(Box::new(str_()))
        );
    }

    #[test]
    fn resolve_union_empty() {
        assert_eq!(
            resolve_type(&TypeExpr::union(vec![])).unwrap_err(),
            UnsupportedTypeError::EmptyUnion
        );
    }

    #[rstest]
    #[case(TypeExpr::list(TypeExpr::Null), TypeDescriptor::List(Box::new(null())))]
    #[case(
        TypeExpr::union(vec![TypeExpr::union(vec![Primitive::Int.into(), Primitive::Str.into()]), Primitive::Str.into()]),
        TypeDescriptor::Union(vec![int(), str_()])
    )]
    fn resolve_nested(#[case] expr: TypeExpr, #[case] expected: TypeDescriptor) {
        assert_eq!(resolve_type(&expr).unwrap(), expected);
    }

    #[rstest]
    #[case("int", int())]
    #[case("str", str_())]
    #[case("None", null())]
    #[case("NoneType", null())]
    #[case("Union[int]", int())]
    #[case("Union[None]", null())]
    #[case("Union[Union[None]]", null())]
    #[case("Union[Union[int, str], str]", TypeDescriptor::Union(vec![int(), str_()]))]
    #[case("Union[int, str]", TypeDescriptor::Union(vec![int(), str_()]))]
    #[case("Union[int, str, int]", TypeDescriptor::Union(vec![int(), str_()]))]
    #[case("Optional[None]", null())]
    #[case("Optional[int]", TypeDescriptor::Union(vec![int(), null()]))]
    #[case("List[int]", TypeDescriptor::List(Box::new(int())))]
    #[case("Set[int]", TypeDescriptor::Set(Box::new(int())))]
    #[case("Tuple[int]", TypeDescriptor::Tuple(vec![int()]))]
    #[case("Tuple[int, str]", TypeDescriptor::Tuple(vec![int(), str_()]))]
    #[case("typing.Union[int, str]", TypeDescriptor::Union(vec![int(), str_()]))]
    #[case(" Optional[ int ] ", TypeDescriptor::Union(vec![int(), null()]))]
    fn resolve_text(#[case] text: &str, #[case] expected: TypeDescriptor) {
        assert_eq!(resolve_type(&TypeExpr::text(text)).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Tuple[]")]
    #[case("List[int")]
    #[case("List[int]]")]
    #[case("int[str]")]
    #[case("Union[int;str]")]
    fn resolve_text_malformed(#[case] text: &str) {
        assert_matches!(
            resolve_type(&TypeExpr::text(text)).unwrap_err(),
            UnsupportedTypeError::MalformedExpression { .. }
        );
    }

    #[rstest]
    #[case("Foo")]
    #[case("List[Foo]")]
    #[case("string")]
    fn resolve_text_unknown(#[case] text: &str) {
        assert_matches!(
            resolve_type(&TypeExpr::text(text)).unwrap_err(),
            UnsupportedTypeError::UnknownName { .. }
        );
    }

    #[rstest]
    #[case("Tuple", "Tuple", 0)]
    #[case("List", "List", 0)]
    #[case("List[int, str]", "List", 2)]
    #[case("Set[int, str]", "Set", 2)]
    #[case("Optional[int, str]", "Optional", 2)]
    fn resolve_text_arity(#[case] text: &str, #[case] origin: &str, #[case] provided: usize) {
        assert_eq!(
            resolve_type(&TypeExpr::text(text)).unwrap_err(),
            UnsupportedTypeError::WrongArity {
                origin: origin.to_string(),
                provided,
                expected: if origin == "Tuple" {
                    "at least 1".to_string()
                } else {
                    "1".to_string()
                },
            }
        );
    }

    #[test]
    fn resolve_text_union_bare() {
        assert_eq!(
            resolve_type(&TypeExpr::text("Union")).unwrap_err(),
            UnsupportedTypeError::EmptyUnion
        );
    }
}
