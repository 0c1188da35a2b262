/*
 * render_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for stanza-template: node assembly, rendering and error locations.
 */

use pretty_assertions::assert_eq;
use serde_json::json;
use stanza_source_map::{FileId, SourceInfo};
use stanza_template::{
    Context, DefaultCompiler, Node, NodeList, RenderError, RenderValue, SimpleNode, Template,
    TextNode, Trim, TrimBehaviour, VariableNode, render_nodes, split_components,
};

/// Set `RUST_LOG=stanza_template=trace` to see pipeline events.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A tiny assembler for tests: splits `source` into text and `{{ ... }}`
/// variable nodes, recording where each node came from.
fn assemble(source: &str) -> NodeList {
    let mut nodes: NodeList = Vec::new();
    let mut rest = 0;
    while let Some(open) = source[rest..].find("{{").map(|i| i + rest) {
        if open > rest {
            nodes.push(Box::new(
                TextNode::new(&source[rest..open])
                    .with_source_info(SourceInfo::from_offsets(FileId(0), source, rest, open)),
            ));
        }
        let close = source[open..]
            .find("}}")
            .map(|i| i + open)
            .expect("unterminated tag");
        let location = SourceInfo::from_offsets(FileId(0), source, open, close + 2);
        nodes.push(Box::new(
            VariableNode::parse_tag(&source[open + 2..close], Some(location), &DefaultCompiler)
                .expect("tag should parse"),
        ));
        rest = close + 2;
    }
    if rest < source.len() {
        nodes.push(Box::new(TextNode::new(&source[rest..])));
    }
    nodes
}

fn context() -> Context {
    Context::from_json(json!({
        "user": {"name": "Ada", "admin": false},
        "items": [1, null, [2, 3]],
        "guest": "visitor"
    }))
    .unwrap()
}

#[test]
fn test_output_is_concatenation_of_nodes() {
    init_tracing();
    let nodes = assemble("Hi {{ user.name }}, items: {{ items }}.");
    let ctx = context();

    let expected: String = nodes.iter().map(|n| n.render(&ctx).unwrap()).collect();
    let rendered = render_nodes(&nodes, &ctx).unwrap();

    assert_eq!(rendered, expected);
    assert_eq!(rendered, "Hi Ada, items: [1, nil, [2, 3]].");
}

#[test]
fn test_inline_conditions() {
    let ctx = context();
    let rendered = render_nodes(
        &assemble("[{{ user.name if user.admin }}][{{ user.name if not user.admin else guest }}]"),
        &ctx,
    )
    .unwrap();
    assert_eq!(rendered, "[][Ada]");

    let rendered = render_nodes(&assemble("{{ user.name if user.admin else guest }}"), &ctx).unwrap();
    assert_eq!(rendered, "visitor");
}

#[test]
fn test_failing_node_reports_its_location() {
    init_tracing();
    let source = "ok {{ user.name }}\n{{ user.name if user.name > 3 }} never";
    let nodes = assemble(source);

    let error = render_nodes(&nodes, &context()).unwrap_err();
    assert_eq!(error.reason(), "'>' requires numeric operands");

    let location = error.location().expect("error should be located");
    assert_eq!(location.range.start.row, 1);
    assert_eq!(location.range.start.column, 0);
    assert_eq!(error.to_string(), "'>' requires numeric operands (at 2:1)");
}

#[test]
fn test_custom_block_keeps_innermost_location() {
    let source = "{% block %}{{ user.name if user.name < 1 }}{% endblock %}";
    let inner = SourceInfo::from_offsets(FileId(0), source, 11, 43);
    let body: NodeList = vec![Box::new(
        VariableNode::parse_tag("user.name if user.name < 1", Some(inner.clone()), &DefaultCompiler)
            .unwrap(),
    )];

    let block = SimpleNode::new(
        Some(SourceInfo::from_offsets(FileId(0), source, 0, source.len())),
        move |ctx| render_nodes(&body, ctx).map(|out| format!("<{}>", out)),
    );
    let template = Template::new(vec![Box::new(block)]);

    let error = match template.render(&context()) {
        Err(stanza_template::TemplateError::Render(error)) => error,
        other => panic!("expected a render error, got {:?}", other),
    };
    assert_eq!(error.location(), Some(&inner));
}

#[test]
fn test_custom_node_output() {
    let shout = SimpleNode::new(None, |ctx: &Context| {
        let name = ctx
            .lookup("user.name")
            .ok_or_else(|| RenderError::new("no user"))?;
        Ok(stanza_template::stringify(Some(&name)).to_uppercase())
    });
    let nodes: NodeList = vec![Box::new(TextNode::new("Hey ")), Box::new(shout)];

    assert_eq!(render_nodes(&nodes, &context()).unwrap(), "Hey ADA");
    assert_eq!(
        render_nodes(&nodes, &Context::new()).unwrap_err().reason(),
        "no user"
    );
}

#[test]
fn test_trim_behaviour_from_config() {
    let trim: TrimBehaviour = serde_json::from_value(json!({
        "leading": "whitespace_and_new_lines",
        "trailing": "whitespace_and_one_new_line"
    }))
    .unwrap();
    assert_eq!(trim.leading, Trim::WhitespaceAndNewLines);

    let node = TextNode::new("\n\n  body\n\n").with_trim(trim);
    assert_eq!(node.render(&Context::new()).unwrap(), "body\n");
}

#[test]
fn test_parse_error_for_empty_tag() {
    let location = SourceInfo::from_offsets(FileId(0), "{{   }}", 0, 7);
    let error =
        VariableNode::parse(&split_components("   "), Some(location), &DefaultCompiler).unwrap_err();
    assert_eq!(error.reason(), "Missing variable name");
    assert_eq!(error.to_string(), "Missing variable name (at 1:1)");
}

#[test]
fn test_context_scopes_during_render() {
    let nodes = assemble("{{ item }}");
    let mut ctx = context();

    let inside = ctx.with_scope(
        [("item".to_string(), RenderValue::from("scoped"))],
        |ctx| render_nodes(&nodes, ctx),
    );
    assert_eq!(inside.unwrap(), "scoped");
    assert_eq!(render_nodes(&nodes, &ctx).unwrap(), "");
}
