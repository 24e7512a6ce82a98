use std::fmt::{Display, Write};
use std::hash::Hash;

use crate::graph::DirectedSparseGraph;

/// One line per vertex: `key: [n1,n2]`, vertices in insertion order.
pub fn render_readable<K>(graph: &DirectedSparseGraph<K>) -> String
where
    K: Eq + Hash + Clone + Display,
{
    let mut out = String::new();
    for (vertex, bucket) in &graph.vertices {
        let adjacents = bucket
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{vertex}: [{adjacents}]");
    }
    out
}

pub fn render_tree<K>(graph: &DirectedSparseGraph<K>, roots: &[K]) -> String
where
    K: Eq + Hash + Clone + Display,
{
    let mut out = String::new();
    for (idx, root) in roots.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{root}");
        let mut path = vec![root.clone()];
        render_tree_children(graph, root, "", &mut path, &mut out);
    }
    out
}

pub fn render_dot<K>(graph: &DirectedSparseGraph<K>, name: &str) -> String
where
    K: Eq + Hash + Clone + Display,
{
    let mut out = format!("digraph {} {{\n", escape_dot_id(name));
    for vertex in graph.vertices() {
        let label = escape_dot_label(&vertex.to_string());
        let _ = writeln!(out, "  \"{label}\";");
    }
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            escape_dot_label(&edge.source().to_string()),
            escape_dot_label(&edge.destination().to_string())
        );
    }
    out.push_str("}\n");
    out
}

fn render_tree_children<K>(
    graph: &DirectedSparseGraph<K>,
    node: &K,
    prefix: &str,
    path: &mut Vec<K>,
    out: &mut String,
) where
    K: Eq + Hash + Clone + Display,
{
    let Some(children) = graph.neighbours(node) else {
        return;
    };
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { "`-- " } else { "|-- " });
        let _ = write!(out, "{child}");
        if path.contains(child) {
            out.push_str(" (cycle)\n");
            continue;
        }
        out.push('\n');
        path.push(child.clone());
        let mut next_prefix = prefix.to_string();
        next_prefix.push_str(if is_last { "    " } else { "|   " });
        render_tree_children(graph, child, &next_prefix, path, out);
        path.pop();
    }
}

fn escape_dot_id(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "graph".to_string()
    } else {
        cleaned
    }
}

fn escape_dot_label(label: &str) -> String {
    label.replace('"', "\\\"")
}
