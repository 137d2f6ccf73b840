//! Text export: DOT graph descriptions and construction scripts.
//!
//! DOT output is meant for an external renderer such as Graphviz:
//!
//! ```text
//! RadixGraph → export_dot() → digraph G { 0 -> 3 [label=digit] ... }
//!   → dot -Tpng, or any other DOT consumer
//! ```
//!
//! Script output spells a statement sequence in a neutral assignment syntax
//! (`id2={};`, `id0.v1=id2;`) that most dynamic languages can evaluate after
//! a light prelude.

use std::io::Write;
use crate::codegen::{Statement, VarExpr};
use crate::config::ScriptStyle;
use crate::model::RadixGraph;
use crate::Result;

/// Export a graph as a DOT digraph.
///
/// Writes one `<source> -> <target> [label=<relation>]` line per relation,
/// in arena order, digit before next.
pub fn export_dot(graph: &RadixGraph, writer: &mut dyn Write) -> Result<()> {
    // Header
    writeln!(writer, "// radix graph")?;
    writeln!(writer, "// Radix: {}", graph.radix())?;
    writeln!(writer, "// Nodes: {}", graph.node_count())?;
    writeln!(writer, "digraph G {{")?;

    for node in graph.nodes() {
        for (relation, target) in node.relations() {
            writeln!(writer, "{} -> {} [label={}]", node.id, target, relation)?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

/// [`export_dot`] into a `String`.
pub fn to_dot(graph: &RadixGraph) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = export_dot(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write a statement sequence as script text, one statement per line.
pub fn write_script(
    statements: &[Statement],
    style: &ScriptStyle,
    writer: &mut dyn Write,
) -> Result<()> {
    for stmt in statements {
        match stmt {
            Statement::CreateNode(id) => {
                writeln!(writer, "{}{}={{}};", style.variable_prefix, id)?;
            }
            Statement::Assign { dst, src } => {
                writeln!(writer, "{}={};", format_expr(dst, style), format_expr(src, style))?;
            }
        }
    }
    Ok(())
}

/// [`write_script`] into a `String`.
pub fn to_script(statements: &[Statement], style: &ScriptStyle) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_script(statements, style, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Format a variable expression, e.g. `id4.v1.v0`.
fn format_expr(expr: &VarExpr, style: &ScriptStyle) -> String {
    let mut out = format!("{}{}", style.variable_prefix, expr.root);
    for step in &expr.path {
        out.push('.');
        out.push_str(&style.field_prefix);
        out.push_str(&step.index().to_string());
    }
    out
}
