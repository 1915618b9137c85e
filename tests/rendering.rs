//! Integration tests for serialization, HTML helpers and file loading

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tagbind::html::{self, doc, Style};
use tagbind::renderer::write_to;
use tagbind::template::{format_context, from_context, from_nested_context, loop_};
use tagbind::{
    nodes, render, render_with_config, serialize, Context, Element, Error, LoadError,
    MarkupConfig, Node, RenderConfig, RenderError,
};

fn page() -> Node {
    doc([html::html().with_children(nodes![
        html::head().with_children(nodes![
            html::meta().attr("charset", "utf-8"),
            html::title().child(from_context("title")),
            Style::new().rule("li", [("color", "red")]),
        ]),
        html::body().child(
            html::ul().child(loop_(
                "fruit",
                "fruits",
                html::li().child(from_context("fruit")),
            )),
        ),
    ])])
    .into()
}

#[test]
fn test_html_page() {
    let ctx = Context::new()
        .with("title", "Fruit")
        .with("fruits", vec!["apple", "pear"]);
    assert_eq!(
        render(&page(), &ctx).unwrap(),
        "<!DOCTYPE html>\n\n<html><head><meta charset=\"utf-8\"/><title>Fruit</title>\n<style>\n  li {\n    color: red;\n  }\n</style>\n</head><body><ul><li>apple</li><li>pear</li></ul></body></html>"
    );
}

#[test]
fn test_unbound_template_cannot_be_serialized() {
    let err = serialize(&page()).unwrap_err();
    assert!(matches!(err, RenderError::UnboundDeferred { .. }));
    assert!(err.to_string().contains("from_context(\"title\")"));
}

#[test]
fn test_write_to_leaves_writer_untouched_on_error() {
    let mut out = Vec::new();
    assert!(write_to(&page(), &mut out, &MarkupConfig::default()).is_err());
    assert!(out.is_empty());

    let concrete = Node::from(html::p().child("ok"));
    write_to(&concrete, &mut out, &MarkupConfig::default()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "<p>ok</p>");
}

#[test]
fn test_attribute_keys_and_escaping() {
    let el = html::label()
        .attr("for_", "name")
        .attr("class_", "a\"b")
        .child("<tag> & text");
    assert_eq!(
        el.serialize().unwrap(),
        r#"<label for="name" class="a&quot;b">&lt;tag&gt; &amp; text</label>"#
    );
}

#[test]
fn test_underscored_key_replaces_plain_key() {
    let template = Node::from(
        html::a()
            .attr("class", "x")
            .attr("class_", from_context("cls")),
    );
    let ctx = Context::new().with("cls", "y");
    assert_eq!(render(&template, &ctx).unwrap(), r#"<a class="y"></a>"#);
}

#[test]
fn test_self_closing_with_children_renders_a_pair() {
    let el = Element::new("img/").child("alt");
    assert_eq!(el.serialize().unwrap(), "<img>alt</img>");
}

#[test]
fn test_wrapper_renders_only_children() {
    let el = Element::wrapper().with_children(nodes![html::b().child("x"), "y"]);
    assert_eq!(el.serialize().unwrap(), "<b>x</b>y");
}

#[test]
fn test_raw_is_emitted_verbatim() {
    let el = html::div().child(Node::raw("<hr/>&nbsp;"));
    assert_eq!(el.serialize().unwrap(), "<div><hr/>&nbsp;</div>");
}

#[test]
fn test_debug_repr() {
    let el = Element::new("a/").attr("class_", "foo");
    assert_eq!(format!("{:?}", el), r#"tag("a/", class_="foo")"#);
}

/// Write `content` to `name` inside `temp`
fn fixture(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

#[test]
fn test_context_from_toml_file() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = fixture(
        &temp,
        "context.toml",
        r#"
[user]
name = "Fred"
id = 7
"#,
    );
    let ctx = Context::from_file(&path).expect("Should load");

    let template = Node::from(
        html::a()
            .attr("href", format_context("/users/{user.id}"))
            .child(from_nested_context(["user", "name"])),
    );
    assert_eq!(
        render(&template, &ctx).unwrap(),
        r#"<a href="/users/7">Fred</a>"#
    );
}

#[test]
fn test_context_from_json_file() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = fixture(&temp, "context.json", r#"{"items": ["x", "y"]}"#);
    let ctx = Context::from_file(&path).expect("Should load");

    let template = Node::from(loop_("i", "items", from_context("i")));
    assert_eq!(render(&template, &ctx).unwrap(), "xy");
}

#[test]
fn test_context_unsupported_extension() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = fixture(&temp, "context.yaml", "items: []");
    let result = Context::from_file(&path);
    assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));
}

#[test]
fn test_render_config_from_file() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = fixture(
        &temp,
        "render.toml",
        r#"
[markup]
self_closing_style = "html"
escape_attributes = false
"#,
    );
    let config = RenderConfig::from_file(&path).expect("Should load");

    let template = Node::from(html::input().attr("value", from_context("v")));
    let ctx = Context::new().with("v", "a&b");
    assert_eq!(
        render_with_config(&template, &ctx, &config).unwrap(),
        r#"<input value="a&b">"#
    );
}

#[test]
fn test_pipeline_error_variants() {
    let template = Node::from(from_context("missing"));
    let err = render(&template, &Context::new()).unwrap_err();
    assert!(matches!(err, Error::Bind(_)));
    assert!(err.to_string().starts_with("bind error:"));
}
