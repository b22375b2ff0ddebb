use crate::pipeline::parse_steps;
use std::fmt::Write;

/// Human-readable layout of the chain a step list builds
pub fn describe_steps(steps: &str) -> String {
    let list = parse_steps(steps);
    let mut out = String::new();

    if list.is_empty() {
        out.push_str("No steps: data is stored as-is\n");
    } else {
        let _ = writeln!(out, "Steps: {}", list);
        out.push_str("Write order (outermost first):\n");
        for (depth, step) in list.steps().iter().rev().enumerate() {
            let _ = writeln!(out, "  {}. {}", depth + 1, step);
        }
        out.push_str("  -> storage\n");
    }

    for token in list.skipped() {
        let _ = writeln!(out, "Skipped unknown step: '{}'", token);
    }
    out
}
