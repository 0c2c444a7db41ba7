use declarg::{
    match_tokens, parse, render_help, Callable, DefaultValue, MatchedValue, Param, Primitive,
    Signature, TypeDescriptor, TypeExpr,
};

fn callable() -> Callable {
    Callable::function(
        Signature::new()
            .doc(concat!(
                "Copy a tree from one place to another.\n",
                "\n",
                "Args:\n",
                "    source:  the tree to copy\n",
                "    destination:  where the copy lands\n",
                "    force, -f:  overwrite the destination\n",
            ))
            .param(Param::positional("source").annotation(Primitive::Str.into()))
            .param(
                Param::positional("destination")
                    .annotation(TypeExpr::text("Optional[str]"))
                    .default(DefaultValue::Null),
            )
            .param(Param::keyword("force").default(DefaultValue::Bool(false))),
    )
}

#[test]
fn parse_match_and_render() {
    let spec = parse(&callable()).unwrap();

    assert_eq!(
        spec.types().get("destination").unwrap(),
        &TypeDescriptor::Union(vec![
            TypeDescriptor::Primitive(Primitive::Str),
            TypeDescriptor::Primitive(Primitive::Null),
        ])
    );
    assert_eq!(spec.docs().get("source").unwrap(), "the tree to copy");
    assert_eq!(spec.aliases().get("f").unwrap(), "force");

    let matched = match_tokens(&spec, &["a/b", "-f"]).unwrap();
    assert_eq!(
        matched.get("source"),
        Some(&MatchedValue::Value("a/b".to_string()))
    );
    assert_eq!(matched.flag("force"), Some(true));

    let help = render_help(&spec, "copier");
    assert!(help.contains("usage: copier"));
    assert!(help.contains("Copy a tree from one place to another."));
    assert!(help.contains("--force, -f"));
}
