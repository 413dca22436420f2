//! Parameter List Translation
//!
//! Decomposes a source parameter list into positional and keyword-only
//! descriptors and renders them as a target parameter list.
//!
//! ```text
//! x: Optional[int] = None, *, strict: bool, depth: int = 3
//! ```
//!
//! becomes
//!
//! ```text
//! x: number | null = null, { strict, depth = 3 }: { strict: boolean, depth?: number } = {}
//! ```
//!
//! Everything after the bare `*` sentinel is keyword-only and collapses
//! into one destructured object parameter.

use crate::error_msg::{Result, TranspileError};
use crate::helpers::{camel_case_identifier, find_default_separator, split_top_level};
use crate::type_resolution::{translate_type, TypePosition};

/// Sentinel that starts the keyword-only section
const KEYWORD_ONLY_SENTINEL: &str = "*";
/// Sentinel that ends the positional-only section; no target equivalent
const POSITIONAL_ONLY_SENTINEL: &str = "/";

/// Literal values with a different target spelling
const VALUE_TABLE: &[(&str, &str)] = &[("None", "null"), ("True", "true"), ("False", "false")];

/// Translate a literal default value
pub fn translate_value(value: &str) -> String {
    VALUE_TABLE
        .iter()
        .find(|(source, _)| *source == value)
        .map(|(_, target)| target.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// One parameter: camel-cased name, raw type and default expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: String,
    pub type_expr: Option<String>,
    pub default: Option<String>,
}

impl ParamDescriptor {
    /// Parse a single `name[: type][ = default]` segment.
    ///
    /// The default separator is found first, so colons inside a default
    /// value never read as the type separator.
    pub fn parse(segment: &str) -> ParamDescriptor {
        let segment = segment.trim();

        let (head, default) = match find_default_separator(segment) {
            Some(eq) => (&segment[..eq], Some(segment[eq + 1..].trim().to_string())),
            None => (segment, None),
        };

        let (name, type_expr) = match head.find(':') {
            Some(colon) => {
                let ty = head[colon + 1..].trim();
                (&head[..colon], (!ty.is_empty()).then(|| ty.to_string()))
            }
            None => (head, None),
        };

        ParamDescriptor {
            name: camel_case_identifier(name.trim()),
            type_expr,
            default,
        }
    }

    fn translated_type(&self) -> Result<Option<String>> {
        self.type_expr
            .as_deref()
            .map(|ty| translate_type(ty, TypePosition::Value))
            .transpose()
    }

    fn translated_default(&self) -> Option<String> {
        self.default.as_deref().map(translate_value)
    }

    /// `name[: type][ = default]`
    pub fn render_positional(&self) -> Result<String> {
        let mut rendered = self.name.clone();
        if let Some(ty) = self.translated_type()? {
            rendered.push_str(": ");
            rendered.push_str(&ty);
        }
        if let Some(default) = self.translated_default() {
            rendered.push_str(" = ");
            rendered.push_str(&default);
        }
        Ok(rendered)
    }
}

/// A parameter list split at the keyword-only sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    pub positional: Vec<ParamDescriptor>,
    pub keyword_only: Vec<ParamDescriptor>,
}

impl ParamList {
    /// Parse the raw text between a signature's parentheses (owner
    /// parameter already removed).
    pub fn parse(text: &str) -> Result<ParamList> {
        let mut list = ParamList::default();
        let mut in_keyword_section = false;

        for segment in split_top_level(text, ',') {
            if segment.is_empty() || segment == POSITIONAL_ONLY_SENTINEL {
                continue;
            }
            if segment == KEYWORD_ONLY_SENTINEL {
                in_keyword_section = true;
                continue;
            }
            if segment.starts_with('*') {
                return Err(TranspileError::UnsupportedParameter { param: segment });
            }

            let param = ParamDescriptor::parse(&segment);
            if in_keyword_section {
                list.keyword_only.push(param);
            } else {
                list.positional.push(param);
            }
        }

        Ok(list)
    }

    /// Render the target parameter list
    pub fn render(&self) -> Result<String> {
        let mut rendered: Vec<String> = self
            .positional
            .iter()
            .map(ParamDescriptor::render_positional)
            .collect::<Result<_>>()?;

        if !self.keyword_only.is_empty() {
            rendered.push(self.render_keyword_object()?);
        }

        Ok(rendered.join(", "))
    }

    /// `{ a, b = 1 }: { a: T, b?: U }` with an optional `= {}` default
    fn render_keyword_object(&self) -> Result<String> {
        let mut bindings = Vec::with_capacity(self.keyword_only.len());
        let mut fields = Vec::with_capacity(self.keyword_only.len());
        let mut has_required = false;

        for param in &self.keyword_only {
            let ty = param.translated_type()?.ok_or_else(|| TranspileError::MissingKeywordType {
                name: param.name.clone(),
            })?;

            match param.translated_default() {
                Some(default) => {
                    bindings.push(format!("{} = {}", param.name, default));
                    fields.push(format!("{}?: {}", param.name, ty));
                }
                None => {
                    has_required = true;
                    bindings.push(param.name.clone());
                    fields.push(format!("{}: {}", param.name, ty));
                }
            }
        }

        let follows_optional = self.positional.iter().any(|p| p.default.is_some());
        let object_default = if !has_required {
            " = {}"
        } else if follows_optional {
            log::warn!(
                "keyword-only object {{ {} }} defaults to {{}} after an optional parameter; required fields may be omitted by callers",
                bindings.join(", ")
            );
            " = {}"
        } else {
            ""
        };

        Ok(format!(
            "{{ {} }}: {{ {} }}{}",
            bindings.join(", "),
            fields.join(", "),
            object_default
        ))
    }
}

/// Parse and render in one step
pub fn translate_param_list(text: &str) -> Result<String> {
    ParamList::parse(text)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_type_default() {
        assert_eq!(
            ParamDescriptor::parse("max_depth: int = 3"),
            ParamDescriptor {
                name: "maxDepth".into(),
                type_expr: Some("int".into()),
                default: Some("3".into()),
            }
        );
        assert_eq!(
            ParamDescriptor::parse("label='a: b'"),
            ParamDescriptor {
                name: "label".into(),
                type_expr: None,
                default: Some("'a: b'".into()),
            }
        );
        assert_eq!(
            ParamDescriptor::parse("_cache"),
            ParamDescriptor {
                name: "_cache".into(),
                type_expr: None,
                default: None,
            }
        );
    }

    #[test]
    fn test_keyword_sentinel_splits_sections() {
        let list = ParamList::parse("a, b: int, *, c: str, d: bool = False").unwrap();
        assert_eq!(list.positional.len(), 2);
        assert_eq!(list.keyword_only.len(), 2);
        assert_eq!(list.keyword_only[1].name, "d");
    }

    #[test]
    fn test_render_positional() {
        assert_eq!(
            translate_param_list("node: Optional[Node] = None, count: int = 0").unwrap(),
            "node: Node | null = null, count: number = 0"
        );
        assert_eq!(translate_param_list("raw_value").unwrap(), "rawValue");
        assert_eq!(translate_param_list("").unwrap(), "");
    }

    #[test]
    fn test_keyword_object_all_optional_gets_default() {
        assert_eq!(
            translate_param_list("*, depth: int = 2, strict: bool = True").unwrap(),
            "{ depth = 2, strict = true }: { depth?: number, strict?: boolean } = {}"
        );
    }

    #[test]
    fn test_keyword_object_with_required_field_has_no_default() {
        assert_eq!(
            translate_param_list("x: int, *, strict: bool").unwrap(),
            "x: number, { strict }: { strict: boolean }"
        );
    }

    #[test]
    fn test_keyword_object_after_optional_positional_keeps_default() {
        assert_eq!(
            translate_param_list("x: Optional[int] = None, *, strict: bool").unwrap(),
            "x: number | null = null, { strict }: { strict: boolean } = {}"
        );
    }

    #[test]
    fn test_untyped_keyword_only_is_an_error() {
        let err = translate_param_list("*, strict=True").unwrap_err();
        assert_eq!(err, TranspileError::MissingKeywordType { name: "strict".into() });
    }

    #[test]
    fn test_variadic_parameters_rejected() {
        assert!(matches!(
            translate_param_list("*args, **kwargs"),
            Err(TranspileError::UnsupportedParameter { .. })
        ));
    }

    #[test]
    fn test_bracketed_defaults_stay_whole() {
        assert_eq!(
            translate_param_list("origin: Tuple[int, int] = (0, 0), key: str = make_key(a, b)").unwrap(),
            "origin: [number, number] = (0, 0), key: string = make_key(a, b)"
        );
        assert_eq!(
            translate_param_list("opts: Dict[str, int] = {'a': 1, 'b': x[0]}").unwrap(),
            "opts: Map<string, number> = {'a': 1, 'b': x[0]}"
        );
        assert_eq!(
            translate_param_list("*, size: Tuple[int, int] = (0, 0), key: str = make_key(a, b)").unwrap(),
            "{ size = (0, 0), key = make_key(a, b) }: { size?: [number, number], key?: string } = {}"
        );
        assert_eq!(
            translate_param_list("*, opts: Dict[str, int] = {'a': 1, 'b': 2}").unwrap(),
            "{ opts = {'a': 1, 'b': 2} }: { opts?: Map<string, number> } = {}"
        );
    }

    #[test]
    fn test_positional_only_marker_dropped() {
        assert_eq!(translate_param_list("a: int, /, b: str").unwrap(), "a: number, b: string");
    }
}
