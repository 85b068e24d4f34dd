//! Parser for **Enki scene markup** (`.ekml`), the declarative format the
//! scene layer loads item trees from.
//!
//! The crate has no dependencies, so editors and linters can parse scene
//! files without dragging in the engine or a GPU stack.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Prop`, `Value`, `Import` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token`, `Lexeme` |
//! | [`parser`] | the [`parse`] entry point |
//!
//! # Quick start
//!
//! ```rust
//! use enki_ekml::parse;
//!
//! let src = r#"
//!     Group {
//!         Label "Hello" { size: 14  color: #ffffffff }
//!     }
//! "#;
//!
//! let doc = parse(src).unwrap();
//! assert_eq!(doc.root.item, "Group");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Document, Import, Node, Prop, Value};
pub use error::ParseError;
pub use parser::parse;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse(src).unwrap() }
    fn err(src: &str) -> ParseError { parse(src).unwrap_err() }

    #[test] fn empty_item() { ok("Group { }"); }
    #[test] fn bare_item() { ok("Squircle"); }
    #[test] fn item_with_props() {
        ok(r#"Panel { padding: 10  Label "hello" { size: 14  color: #ffffffff } }"#);
    }
    #[test] fn nested_items() {
        ok("Group { Panel { radius: 10  Label \"hi\" { size: 12 } } }");
    }
    #[test] fn block_comment() {
        ok("/* header */ Group { /* body */ opacity: 1 /* tail */ }");
    }
    #[test] fn line_comment() {
        ok("// top\nGroup {\n    // inside\n    opacity: 1\n}");
    }
    #[test] fn color_6digit() {
        let doc = ok("Panel { bg: #aabbcc }");
        assert_eq!(doc.root.prop_color("bg"), Some([0xaa, 0xbb, 0xcc, 0xff]));
    }
    #[test] fn color_8digit() {
        let doc = ok("Panel { bg: #aabbccdd }");
        assert_eq!(doc.root.prop_color("bg"), Some([0xaa, 0xbb, 0xcc, 0xdd]));
    }
    #[test] fn negative_number() {
        let doc = ok("Group { x: -10  y: -0.5 }");
        assert_eq!(doc.root.prop_f32("x"), Some(-10.0));
        assert_eq!(doc.root.prop_f32("y"), Some(-0.5));
    }
    #[test] fn float_number() {
        assert_eq!(ok("Squircle { t: 0.75 }").root.prop_f32("t"), Some(0.75));
    }
    #[test] fn ident_value() {
        assert_eq!(ok("Label { font: body }").root.prop_str("font"), Some("body"));
    }
    #[test] fn string_content() {
        let doc = ok(r#"Label "hello world" { size: 12 }"#);
        assert_eq!(doc.root.content.as_deref(), Some("hello world"));
    }
    #[test] fn string_escape() {
        let doc = ok(r#"Label "say \"hi\"\n" { size: 12 }"#);
        assert_eq!(doc.root.content.as_deref(), Some("say \"hi\"\n"));
    }
    #[test] fn import_as() {
        let doc = ok(r#"import "hud.ekml" as Hud  Group { Hud }"#);
        assert_eq!(doc.imports.len(), 1);
        assert_eq!(doc.imports[0].alias, "Hud");
        assert_eq!(doc.root.children[0].item, "Hud");
    }
    #[test] fn anchors() {
        let doc = ok("Group { Panel { left: 20  right: 20  bottom: 20 } }");
        let panel = &doc.root.children[0];
        assert_eq!(panel.prop_f32("left"), Some(20.0));
        assert_eq!(panel.prop_f32("bottom"), Some(20.0));
    }
    #[test] fn props_and_children_mixed() {
        let doc = ok("Group { opacity: 1  Squircle { t: 0 }  Panel { } }");
        assert_eq!(doc.root.props.len(), 1);
        assert_eq!(doc.root.children.len(), 2);
    }
    #[test] fn missing_prop_is_none() {
        let doc = ok("Squircle { t: 0 }");
        assert_eq!(doc.root.prop_f32("radius"), None);
        assert_eq!(doc.root.prop_str("t"), None); // wrong type
    }

    #[test] fn err_bad_color() { err("Panel { bg: #xyz }"); }
    #[test] fn err_unclosed_string() { err(r#"Label "oops { }"#); }
    #[test] fn err_double_colon() { err("Group { gap: : 8 }"); }
    #[test] fn err_unclosed_block() { err("Group { Panel {"); }
    #[test] fn err_import_without_alias() { err(r#"import "hud.ekml" Group { }"#); }

    #[test] fn err_position_line_col() {
        let e = err("Group {\n    pad: 10\n    bg: @\n}");
        assert_eq!((e.line, e.col), (3, 9));
    }
    #[test] fn err_position_first_line() {
        let e = err("@Group { }");
        assert_eq!((e.line, e.col), (1, 1));
    }
    #[test] fn display_includes_position() {
        let e = err("Group {\n  x: }");
        let msg = e.to_string();
        assert!(msg.contains("2:"), "got: {msg}");
    }
}
