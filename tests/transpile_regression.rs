use pretty_assertions::assert_eq;
use pyts::{transpile, transpile_with_config, ErrorCategory, ErrorCode, TranspileConfig, TranspileError};

#[test]
fn case_a_generic_class_with_docstring() {
    let src = include_str!("fixtures/tree_walker.py");
    let out = transpile(src).unwrap();
    assert!(out.starts_with("/**\n * Depth-first walker.\n *\n * Keeps a visit count.\n */\nclass TreeWalker<T> {\n"));
    assert!(!out.contains("'''"));
}

#[test]
fn case_b_keyword_only_defaults_group_into_object() {
    let src = include_str!("fixtures/tree_walker.py");
    let out = transpile(src).unwrap();
    assert!(out.contains(
        "  constructor(root: T | null = null, { maxDepth = 10, strict = false }: { maxDepth?: number, strict?: boolean } = {}) {"
    ));
    assert!(out.contains("    this.visitCount = 0"));
}

#[test]
fn case_c_nested_loops_and_chains() {
    let src = include_str!("fixtures/tree_walker.py");
    let out = transpile(src).unwrap();
    assert!(out.contains("  walk(node: T, depth: number = 0): Iterator<T> {"));
    assert!(out.contains("    // Yield nodes in pre-order"));
    assert!(out.contains("    if (depth > this.maxDepth) {\n      return\n    }"));
    assert!(out.contains("    for (const child of node.children) {\n      yield from this.walk(child, depth + 1)\n    }"));
    assert!(out.contains("  countPairs(pairs: Array<[string, number]>): Map<string, number> {"));
    assert!(out.contains("    for (const [key, value] of pairs) {"));
    assert!(out.contains("      if (key in table) {\n        table[key] += value\n      } else {\n        table[key] = value\n      }"));
    assert!(!out.contains("def "));
    assert!(!out.contains("elif"));
}

#[test]
fn case_d_exception_class_and_free_function() {
    let src = include_str!("fixtures/parse_errors.py");
    let expected = include_str!("fixtures/parse_errors.ts");
    assert_eq!(transpile(src).unwrap(), expected);
}

#[test]
fn case_e_wider_target_indent() {
    let src = "def f(x: int) -> bool:\n    if x:\n        return True\n    return False\n";
    let out = transpile_with_config(src, &TranspileConfig::with_indent(4, 4)).unwrap();
    assert_eq!(
        out,
        "function f(x: number): boolean {\n    if (x) {\n        return true\n    }\n    return false\n}\n"
    );
}

#[test]
fn case_f_multiple_bases_rejected() {
    let src = include_str!("fixtures/multiple_bases.py");
    let err = transpile(src).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MultipleInheritance);
    assert_eq!(err.category(), ErrorCategory::AssumptionViolation);
    assert!(err.report().starts_with("error[PYTS103][assumption]: "));
}

#[test]
fn case_g_variadic_parameter_rejected() {
    let src = include_str!("fixtures/variadic_params.py");
    assert_eq!(
        transpile(src),
        Err(TranspileError::UnsupportedParameter { param: "*args".into() })
    );
}

#[test]
fn case_h_unbalanced_annotation_is_structural() {
    let src = "class A:\n    def f(self, x: List[int) -> None:\n        pass\n";
    let err = transpile(src).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Structural);
}
