use crate::model::{DefaultValue, Primitive, TypeDescriptor};

/// Infer a type descriptor from a default value's own shape.
///
/// Primitive values map to their matching primitive; a tuple maps to a
/// fixed-arity tuple of the per-element inferred types.  The null value and
/// any shape that cannot be inferred yield `None`.
///
/// ### Example
/// ```
/// use declarg::{infer_default_type, DefaultValue, Primitive, TypeDescriptor};
///
/// let default = DefaultValue::Tuple(vec![DefaultValue::Int(5), DefaultValue::Int(3)]);
/// assert_eq!(
///     infer_default_type(&default),
///     Some(TypeDescriptor::Tuple(vec![
///         TypeDescriptor::Primitive(Primitive::Int),
///         TypeDescriptor::Primitive(Primitive::Int),
///     ])),
/// );
/// ```
pub fn infer_default_type(value: &DefaultValue) -> Option<TypeDescriptor> {
    match value {
        DefaultValue::Int(_) => Some(TypeDescriptor::Primitive(Primitive::Int)),
        DefaultValue::Float(_) => Some(TypeDescriptor::Primitive(Primitive::Float)),
        DefaultValue::Bool(_) => Some(TypeDescriptor::Primitive(Primitive::Bool)),
        DefaultValue::Str(_) => Some(TypeDescriptor::Primitive(Primitive::Str)),
        DefaultValue::Null => None,
        DefaultValue::Tuple(values) => {
            let items = values
                .iter()
                .map(infer_default_type)
                .collect::<Option<Vec<TypeDescriptor>>>()?;
            Some(TypeDescriptor::Tuple(items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DefaultValue::Int(3), Some(TypeDescriptor::Primitive(Primitive::Int)))]
    #[case(DefaultValue::Float(3.0), Some(TypeDescriptor::Primitive(Primitive::Float)))]
    #[case(DefaultValue::Bool(true), Some(TypeDescriptor::Primitive(Primitive::Bool)))]
    #[case(
        DefaultValue::Str("asdf".to_string()),
        Some(TypeDescriptor::Primitive(Primitive::Str))
    )]
    #[case(DefaultValue::Null, None)]
    #[case(
        DefaultValue::Tuple(vec![DefaultValue::Int(5), DefaultValue::Int(3)]),
        Some(TypeDescriptor::Tuple(vec![
            TypeDescriptor::Primitive(Primitive::Int),
            TypeDescriptor::Primitive(Primitive::Int),
        ]))
    )]
    #[case(DefaultValue::Tuple(vec![DefaultValue::Int(5), DefaultValue::Null]), None)]
    fn infer(#[case] default: DefaultValue, #[case] expected: Option<TypeDescriptor>) {
        assert_eq!(infer_default_type(&default), expected);
    }
}
