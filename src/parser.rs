//! Strict WaveJSON parsing. The document is treated purely as data: JSON5
//! text into a value tree into the typed IR. Shape errors at the root are
//! the only fatal ones; inside a signal, anything odd just loses meaning
//! (and later renders degraded) instead of failing the parse.

use crate::error::DocumentError;
use crate::ir::{
    AssignExpr, Body, Caption, DiagramConfig, Document, Group, Signal, SignalItem, TickSpec,
};
use serde_json::Value;

pub fn parse_document(input: &str) -> Result<Document, DocumentError> {
    let value: Value =
        json5::from_str(input).map_err(|err| DocumentError::Syntax(err.to_string()))?;
    let Value::Object(root) = value else {
        return Err(DocumentError::NotAnObject);
    };

    let body = if let Some(signal) = root.get("signal") {
        let Value::Array(items) = signal else {
            return Err(DocumentError::SignalNotArray);
        };
        Body::Signals(parse_items(items))
    } else if let Some(assign) = root.get("assign") {
        let Value::Array(trees) = assign else {
            return Err(DocumentError::AssignNotArray);
        };
        Body::Assigns(trees.iter().filter_map(parse_assign).collect())
    } else {
        return Err(DocumentError::MissingBody);
    };

    Ok(Document {
        body,
        config: parse_diagram_config(root.get("config")),
        head: root.get("head").map(parse_caption),
        foot: root.get("foot").map(parse_caption),
        edges: parse_edges(root.get("edge")),
    })
}

fn parse_items(items: &[Value]) -> Vec<SignalItem> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::Object(_) => out.push(SignalItem::Signal(parse_signal(item))),
            Value::Array(entries) => {
                let (name, rest) = match entries.split_first() {
                    Some((Value::String(name), rest)) => (Some(name.clone()), rest),
                    _ => (None, &entries[..]),
                };
                out.push(SignalItem::Group(Group {
                    name,
                    items: parse_items(rest),
                }));
            }
            // stray scalars inside a signal list carry no row
            _ => {}
        }
    }
    out
}

fn parse_signal(value: &Value) -> Signal {
    Signal {
        name: string_field(value, "name"),
        wave: string_field(value, "wave"),
        data: parse_data(value.get("data")),
        node: string_field(value, "node"),
        phase: value.get("phase").and_then(Value::as_f64).unwrap_or(0.0),
        period: value.get("period").and_then(Value::as_f64).unwrap_or(1.0),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(num)) => Some(num.to_string()),
        _ => None,
    }
}

fn parse_data(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(text)) => text.split_whitespace().map(str::to_string).collect(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn parse_assign(value: &Value) -> Option<AssignExpr> {
    match value {
        Value::String(name) => Some(AssignExpr::Wire(name.clone())),
        Value::Number(num) => Some(AssignExpr::Wire(num.to_string())),
        Value::Array(entries) => {
            let (op, inputs) = entries.split_first()?;
            let op = scalar_to_string(op)?;
            Some(AssignExpr::Gate {
                op,
                inputs: inputs.iter().filter_map(parse_assign).collect(),
            })
        }
        _ => None,
    }
}

fn parse_diagram_config(value: Option<&Value>) -> DiagramConfig {
    let Some(value) = value else {
        return DiagramConfig::default();
    };
    let hbounds = value.get("hbounds").and_then(Value::as_array).and_then(|b| {
        if b.len() == 2 {
            Some((b[0].as_f64()?, b[1].as_f64()?))
        } else {
            None
        }
    });
    DiagramConfig {
        hscale: value.get("hscale").and_then(numeric),
        hbounds,
        skin: string_field(value, "skin"),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(num) => num.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_caption(value: &Value) -> Caption {
    Caption {
        text: value.get("text").map(flatten_text).filter(|t| !t.is_empty()),
        tick: value.get("tick").and_then(parse_tick),
        tock: value.get("tock").and_then(parse_tick),
    }
}

/// Caption text may be plain or a rich inline-markup array
/// (`[tag, {attrs}, children...]`); only its text content survives.
fn flatten_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(idx, item)| !(*idx == 0 && item.is_string()) && !item.is_object())
            .map(|(_, item)| flatten_text(item))
            .collect(),
        _ => String::new(),
    }
}

fn parse_tick(value: &Value) -> Option<TickSpec> {
    match value {
        Value::Number(num) => num.as_f64().map(TickSpec::Offset),
        Value::Bool(flag) => Some(TickSpec::Offset(if *flag { 1.0 } else { 0.0 })),
        Value::String(text) => {
            let parts: Vec<&str> = text.split_whitespace().collect();
            Some(tick_from_parts(&parts))
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            Some(tick_from_parts(&refs))
        }
        _ => None,
    }
}

fn tick_from_parts(parts: &[&str]) -> TickSpec {
    match parts {
        [] => TickSpec::Labels(Vec::new()),
        [single] => match single.parse::<f64>() {
            Ok(offset) => TickSpec::Offset(offset),
            Err(_) => TickSpec::Labels(vec![single.to_string()]),
        },
        [start, step] => match (start.parse::<f64>(), step.parse::<f64>()) {
            (Ok(start), Ok(step)) => TickSpec::StartStep {
                start,
                step,
                // precision follows the step as written
                precision: decimal_places(parts[1]),
            },
            _ => TickSpec::Labels(parts.iter().map(|p| p.to_string()).collect()),
        },
        _ => TickSpec::Labels(parts.iter().map(|p| p.to_string()).collect()),
    }
}

fn decimal_places(literal: &str) -> usize {
    literal
        .split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0)
}

fn parse_edges(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_signal_document() {
        let doc = parse_document("{ signal: [{ name: 'clk', wave: 'p...' }] }").unwrap();
        let Body::Signals(items) = &doc.body else {
            panic!("expected signals");
        };
        assert_eq!(items.len(), 1);
        let SignalItem::Signal(sig) = &items[0] else {
            panic!("expected a signal row");
        };
        assert_eq!(sig.name.as_deref(), Some("clk"));
        assert_eq!(sig.wave.as_deref(), Some("p..."));
    }

    #[test]
    fn parses_nested_groups() {
        let doc = parse_document(
            "{ signal: [ ['bus', { name: 'addr', wave: '=.' }, ['inner', { wave: '0.' }]] ] }",
        )
        .unwrap();
        let Body::Signals(items) = &doc.body else {
            panic!("expected signals");
        };
        let SignalItem::Group(group) = &items[0] else {
            panic!("expected a group");
        };
        assert_eq!(group.name.as_deref(), Some("bus"));
        assert_eq!(group.items.len(), 2);
        assert!(matches!(&group.items[1], SignalItem::Group(inner) if inner.name.as_deref() == Some("inner")));
    }

    #[test]
    fn data_accepts_string_and_array_forms() {
        let doc =
            parse_document("{ signal: [{ wave: '==', data: 'a b' }, { wave: '==', data: ['c', 7] }] }")
                .unwrap();
        let Body::Signals(items) = &doc.body else {
            panic!("expected signals");
        };
        let SignalItem::Signal(first) = &items[0] else {
            panic!()
        };
        let SignalItem::Signal(second) = &items[1] else {
            panic!()
        };
        assert_eq!(first.data, vec!["a", "b"]);
        assert_eq!(second.data, vec!["c", "7"]);
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(DocumentError::NotAnObject)
        ));
    }

    #[test]
    fn rejects_missing_body() {
        assert!(matches!(
            parse_document("{ config: { hscale: 2 } }"),
            Err(DocumentError::MissingBody)
        ));
    }

    #[test]
    fn rejects_non_array_signal() {
        assert!(matches!(
            parse_document("{ signal: 'clk' }"),
            Err(DocumentError::SignalNotArray)
        ));
    }

    #[test]
    fn rejects_invalid_json5() {
        assert!(matches!(
            parse_document("{ signal: ["),
            Err(DocumentError::Syntax(_))
        ));
    }

    #[test]
    fn parses_config_head_and_edges() {
        let doc = parse_document(
            "{ signal: [{ node: '.a..b' }], config: { hscale: 2, hbounds: [1, 5], skin: 'default' },\
              head: { text: 'Title', tick: 0 }, foot: { tock: [1, '0.50'] },\
              edge: ['a~>b label'] }",
        )
        .unwrap();
        assert_eq!(doc.config.hscale, Some(2.0));
        assert_eq!(doc.config.hbounds, Some((1.0, 5.0)));
        assert_eq!(doc.config.skin.as_deref(), Some("default"));
        let head = doc.head.unwrap();
        assert_eq!(head.text.as_deref(), Some("Title"));
        assert_eq!(head.tick, Some(TickSpec::Offset(0.0)));
        let foot = doc.foot.unwrap();
        assert_eq!(
            foot.tock,
            Some(TickSpec::StartStep {
                start: 1.0,
                step: 0.5,
                precision: 2
            })
        );
        assert_eq!(doc.edges, vec!["a~>b label"]);
    }

    #[test]
    fn parses_assign_trees() {
        let doc = parse_document("{ assign: [ ['out', ['|', ['&', 'a', 'b'], 'c']] ] }").unwrap();
        let Body::Assigns(trees) = &doc.body else {
            panic!("expected assigns");
        };
        let AssignExpr::Gate { op, inputs } = &trees[0] else {
            panic!("expected a gate");
        };
        assert_eq!(op, "out");
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn rich_caption_text_is_flattened() {
        let doc = parse_document(
            "{ signal: [{}], head: { text: ['tspan', ['tspan', {class: 'h3'}, 'Big'], ' title'] } }",
        )
        .unwrap();
        assert_eq!(doc.head.unwrap().text.as_deref(), Some("Big title"));
    }
}
