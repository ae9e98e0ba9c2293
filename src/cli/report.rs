// src/cli/report.rs
//! Terminal and JSON rendering of command results.

use crate::pipeline::{PlanReport, VertexWeight};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_ranking(ranking: &[VertexWeight]) {
    if ranking.is_empty() {
        println!("{}", "Graph is empty, nothing to rank.".yellow());
        return;
    }
    println!("{}", "Vertex ranking".bold());
    for (i, v) in ranking.iter().enumerate() {
        println!(
            "{:>4}. {} {:<24} {}",
            i + 1,
            format!("{:<12}", v.id).cyan(),
            v.meaning,
            format!("{:.4}", v.weight).yellow()
        );
    }
}

pub fn print_plan(plan: &PlanReport) {
    if plan.subgraphs.is_empty() {
        println!("{}", "No subgraphs extracted.".yellow());
        return;
    }
    for (i, sub) in plan.subgraphs.iter().enumerate() {
        let source = sub
            .source
            .as_deref()
            .map(|s| format!(" from {s}"))
            .unwrap_or_default();
        println!(
            "{} root {}{} value {}",
            format!("[{}]", i + 1).green().bold(),
            sub.root.cyan(),
            source.dimmed(),
            format!("{:.4}", sub.value).yellow()
        );
        for v in &sub.vertices {
            println!("    {} / {}", v.id.cyan(), v.meaning);
        }
        for e in &sub.edges {
            println!("    {} -{}-> {}", e.source, e.label.dimmed(), e.target);
        }
    }
    println!(
        "{}",
        format!("[OK] {} subgraph(s) kept.", plan.subgraphs.len()).green().bold()
    );
}
