//! DOT source generation
//!
//! Turns a [`Digraph`] into Graphviz DOT text. The output depends only on the
//! graph contents and insertion order, so it is byte-identical across runs.
//!
//! Every identifier and label is written as a double-quoted string. That keeps
//! IDs such as `User/Web Client` valid and means each edge label appears
//! exactly once in the source.

use std::fmt::Write as _;

use super::{Database, Digraph, EdgeData, NodeData};

/// Quote a string as a DOT double-quoted ID
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn node_statement(node: &NodeData) -> String {
    format!(
        "\t{} [label={} shape={}]\n",
        quote(&node.id),
        quote(&node.label),
        node.shape
    )
}

fn edge_statement(edge: &EdgeData) -> String {
    match &edge.label {
        Some(label) => format!(
            "\t{} -> {} [label={}]\n",
            quote(&edge.from),
            quote(&edge.to),
            quote(label)
        ),
        None => format!("\t{} -> {}\n", quote(&edge.from), quote(&edge.to)),
    }
}

/// Generate the DOT source for a graph
pub fn to_dot(graph: &Digraph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph {} {{", quote(graph.name()));

    let attributes = graph.attributes();
    let _ = writeln!(out, "\trankdir={}", attributes.direction);
    if let Some(size) = &attributes.size {
        let _ = writeln!(out, "\tsize={}", quote(size));
    }

    for node in graph.nodes() {
        out.push_str(&node_statement(node));
    }
    for edge in graph.edges() {
        out.push_str(&edge_statement(edge));
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, NodeShape};

    #[test]
    fn test_quote_escapes_specials() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("two\nlines"), "\"two\\nlines\"");
    }

    #[test]
    fn test_quote_keeps_non_ascii() {
        assert_eq!(quote("Lưu dữ liệu"), "\"Lưu dữ liệu\"");
    }

    #[test]
    fn test_empty_graph() {
        let graph = Digraph::new("empty");
        assert_eq!(to_dot(&graph), "digraph \"empty\" {\n\trankdir=TB\n}\n");
    }

    #[test]
    fn test_full_statement_layout() {
        let mut graph = Digraph::new("G");
        graph.set_direction(Direction::LeftRight);
        graph.set_size("8");
        graph.node("a", "Start", NodeShape::Circle).unwrap();
        graph.node("b", "End", NodeShape::DoubleCircle).unwrap();
        graph.labeled_edge("a", "b", "go").unwrap();
        graph.edge("b", "a").unwrap();

        let expected = "digraph \"G\" {\n\
                        \trankdir=LR\n\
                        \tsize=\"8\"\n\
                        \t\"a\" [label=\"Start\" shape=circle]\n\
                        \t\"b\" [label=\"End\" shape=doublecircle]\n\
                        \t\"a\" -> \"b\" [label=\"go\"]\n\
                        \t\"b\" -> \"a\"\n\
                        }\n";
        assert_eq!(to_dot(&graph), expected);
    }
}
