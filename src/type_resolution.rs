//! Type annotation translation.
//!
//! A type expression is first classified into a `TypeShape` by a single
//! classifier, then rendered recursively. Translation is a pure function of
//! the expression text and the position it appears in.

use crate::error_msg::{Result, TranspileError};
use crate::helpers::{first_bracket_span, split_outside_brackets, BracketPair};

/// Where a type annotation appears. `None` renders as `void` in return
/// position and as `null` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    Return,
    Value,
}

/// Scalar names with a fixed target spelling
const PRIMITIVE_TABLE: &[(&str, &str)] = &[
    ("str", "string"),
    ("int", "number"),
    ("float", "number"),
    ("bool", "boolean"),
    ("Any", "any"),
    ("True", "true"),
    ("False", "false"),
];

/// The recognized vocabulary of type expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Primitive(&'static str),
    NoneType,
    Union(Vec<String>),
    Optional(String),
    Sequence(String),
    Map(String, String),
    Iterator(String),
    Iterable(String),
    Tuple(Vec<String>),
    /// `Tuple[T, ...]`
    VariadicTuple(String),
    /// `params` is `None` for `Callable[..., R]`
    Callable {
        params: Option<Vec<String>>,
        ret: String,
    },
    /// Any other `Name[Args]`, assumed to exist in the target
    Generic { name: String, args: Vec<String> },
    /// No brackets and not a known primitive; passed through
    Opaque(String),
}

fn expect_arity(construct: &'static str, args: &[String], expected: usize, text: &str) -> Result<()> {
    if args.len() != expected {
        return Err(TranspileError::ArityMismatch {
            construct,
            expected,
            found: args.len(),
            text: text.to_string(),
        });
    }
    Ok(())
}

fn single(construct: &'static str, mut args: Vec<String>, text: &str) -> Result<String> {
    expect_arity(construct, &args, 1, text)?;
    Ok(args.remove(0))
}

/// Classify a type expression by its outermost construct
pub fn classify_type(expr: &str) -> Result<TypeShape> {
    let text = expr.trim();

    if let Some(&(_, target)) = PRIMITIVE_TABLE.iter().find(|(source, _)| *source == text) {
        return Ok(TypeShape::Primitive(target));
    }
    if text == "None" {
        return Ok(TypeShape::NoneType);
    }

    let alternatives = split_outside_brackets(text, "|", BracketPair::SQUARE, true);
    if alternatives.len() > 1 {
        return Ok(TypeShape::Union(alternatives));
    }

    if !text.contains('[') {
        return Ok(TypeShape::Opaque(text.to_string()));
    }

    let span = first_bracket_span(text, true)?;
    let name = text[..span.open].trim();
    let args = split_outside_brackets(span.inner(text), ",", BracketPair::SQUARE, true);

    let shape = match name {
        "Union" => TypeShape::Union(args),
        "Optional" => TypeShape::Optional(single("Optional", args, text)?),
        "List" | "list" | "Sequence" => TypeShape::Sequence(single("List", args, text)?),
        "Mapping" | "Dict" | "dict" => {
            expect_arity("Mapping", &args, 2, text)?;
            TypeShape::Map(args[0].clone(), args[1].clone())
        }
        "Iterator" => TypeShape::Iterator(single("Iterator", args, text)?),
        "Iterable" => TypeShape::Iterable(single("Iterable", args, text)?),
        "Tuple" | "tuple" => {
            if args.len() == 2 && args[1] == "..." {
                TypeShape::VariadicTuple(args[0].clone())
            } else {
                TypeShape::Tuple(args)
            }
        }
        "Callable" => {
            expect_arity("Callable", &args, 2, text)?;
            let (params, ret) = (&args[0], &args[1]);
            let params = if params == "..." {
                None
            } else {
                let inner = params
                    .strip_prefix('[')
                    .and_then(|p| p.strip_suffix(']'))
                    .ok_or_else(|| TranspileError::NoBracketFound { text: params.clone() })?;
                Some(split_outside_brackets(inner, ",", BracketPair::SQUARE, true))
            };
            TypeShape::Callable {
                params,
                ret: ret.clone(),
            }
        }
        _ => TypeShape::Generic {
            name: name.to_string(),
            args,
        },
    };

    Ok(shape)
}

fn translate_all(items: &[String]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| translate_type(item, TypePosition::Value))
        .collect()
}

/// Translate a type expression into target type syntax
pub fn translate_type(expr: &str, position: TypePosition) -> Result<String> {
    let translated = match classify_type(expr)? {
        TypeShape::Primitive(target) => target.to_string(),
        TypeShape::NoneType => match position {
            TypePosition::Return => "void".to_string(),
            TypePosition::Value => "null".to_string(),
        },
        TypeShape::Union(members) => {
            let mut unique: Vec<String> = Vec::new();
            for member in translate_all(&members)? {
                if !unique.contains(&member) {
                    unique.push(member);
                }
            }
            unique.join(" | ")
        }
        TypeShape::Optional(inner) => {
            format!("{} | null", translate_type(&inner, TypePosition::Value)?)
        }
        TypeShape::Sequence(item) => format!("Array<{}>", translate_type(&item, TypePosition::Value)?),
        TypeShape::Map(key, value) => format!(
            "Map<{}, {}>",
            translate_type(&key, TypePosition::Value)?,
            translate_type(&value, TypePosition::Value)?
        ),
        TypeShape::Iterator(item) => format!("Iterator<{}>", translate_type(&item, TypePosition::Value)?),
        TypeShape::Iterable(item) => format!("Iterable<{}>", translate_type(&item, TypePosition::Value)?),
        TypeShape::Tuple(items) => format!("[{}]", translate_all(&items)?.join(", ")),
        TypeShape::VariadicTuple(item) => format!("Array<{}>", translate_type(&item, TypePosition::Value)?),
        TypeShape::Callable { params, ret } => {
            let ret = translate_type(&ret, TypePosition::Return)?;
            match params {
                None => format!("(...args: any[]) => {}", ret),
                Some(params) => {
                    let params: Vec<String> = translate_all(&params)?
                        .into_iter()
                        .enumerate()
                        .map(|(i, ty)| format!("p{}: {}", i + 1, ty))
                        .collect();
                    format!("({}) => {}", params.join(", "), ret)
                }
            }
        }
        TypeShape::Generic { name, args } => format!("{}<{}>", name, translate_all(&args)?.join(", ")),
        TypeShape::Opaque(text) => text,
    };

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value(expr: &str) -> String {
        translate_type(expr, TypePosition::Value).unwrap()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(value("str"), "string");
        assert_eq!(value("int"), "number");
        assert_eq!(value("float"), "number");
        assert_eq!(value("bool"), "boolean");
        assert_eq!(value("Any"), "any");
    }

    #[test]
    fn test_none_depends_on_position() {
        assert_eq!(translate_type("None", TypePosition::Return).unwrap(), "void");
        assert_eq!(value("None"), "null");
    }

    #[test]
    fn test_optional_list() {
        assert_eq!(value("Optional[List[int]]"), "Array<number> | null");
    }

    #[test]
    fn test_union_collapses_duplicates_in_first_seen_order() {
        assert_eq!(value("Union[int, str, float]"), "number | string");
        assert_eq!(value("Union[float, int]"), "number");
        assert_eq!(value("int | None"), "number | null");
    }

    #[test]
    fn test_mapping_and_aliases() {
        assert_eq!(value("Dict[str, List[float]]"), "Map<string, Array<number>>");
        assert_eq!(value("Mapping[str, bool]"), "Map<string, boolean>");
        assert_eq!(value("dict[int, str]"), "Map<number, string>");
    }

    #[test]
    fn test_mapping_arity_mismatch() {
        let err = translate_type("Dict[str, int, float]", TypePosition::Value).unwrap_err();
        assert!(matches!(
            err,
            TranspileError::ArityMismatch { expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn test_iterators_and_tuples() {
        assert_eq!(value("Iterator[str]"), "Iterator<string>");
        assert_eq!(value("Iterable[Tuple[int, str]]"), "Iterable<[number, string]>");
        assert_eq!(value("tuple[int, ...]"), "Array<number>");
    }

    #[test]
    fn test_callable() {
        assert_eq!(
            value("Callable[[int, str], None]"),
            "(p1: number, p2: string) => void"
        );
        assert_eq!(value("Callable[[], bool]"), "() => boolean");
        assert_eq!(value("Callable[..., int]"), "(...args: any[]) => number");
        assert!(matches!(
            translate_type("Callable[[int]]", TypePosition::Value),
            Err(TranspileError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_user_generic_and_opaque() {
        assert_eq!(value("Mainline[Optional[str]]"), "Mainline<string | null>");
        assert_eq!(value("Node"), "Node");
    }

    #[test]
    fn test_malformed_brackets() {
        assert!(matches!(
            translate_type("List[int", TypePosition::Value),
            Err(TranspileError::UnmatchedBracket { .. })
        ));
        assert!(matches!(
            translate_type("List[int]x", TypePosition::Value),
            Err(TranspileError::TrailingContent { .. })
        ));
    }

    #[test]
    fn test_classifier_shapes() {
        assert_eq!(classify_type("None").unwrap(), TypeShape::NoneType);
        assert_eq!(
            classify_type("Optional[int]").unwrap(),
            TypeShape::Optional("int".into())
        );
        assert_eq!(
            classify_type("Callable[..., int]").unwrap(),
            TypeShape::Callable { params: None, ret: "int".into() }
        );
    }

    proptest! {
        #[test]
        fn prop_translation_is_referentially_transparent(
            names in prop::collection::vec(prop::sample::select(vec!["int", "str", "None", "Node", "bool"]), 1..4),
            wrapper in prop::sample::select(vec!["Union", "Tuple", "Optional", "List"]),
        ) {
            let expr = match wrapper {
                "Optional" | "List" => format!("{}[{}]", wrapper, names[0]),
                _ => format!("{}[{}]", wrapper, names.join(", ")),
            };
            let first = translate_type(&expr, TypePosition::Value).unwrap();
            let second = translate_type(&expr, TypePosition::Value).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
