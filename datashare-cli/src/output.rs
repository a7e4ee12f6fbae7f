//! Console rendering: the delta summary, per-operation lines, and tallies.

use std::collections::BTreeSet;
use std::fmt::{Display, Write};

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use datashare_core::ShareName;
use datashare_reconcile::{
    ExecutionResult, Operation, OperationOutcome, ReconciliationPlan, RunObserver, RunReport,
};

/// Streams the run to stdout as it happens.
pub struct ConsoleObserver {
    share_name: ShareName,
    dry_run: bool,
}

impl ConsoleObserver {
    pub fn new(share_name: ShareName, dry_run: bool) -> Self {
        Self {
            share_name,
            dry_run,
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn plan_ready(&mut self, plan: &ReconciliationPlan, operations: &[Operation]) {
        print_delta_summary(&self.share_name, plan);
        if !operations.is_empty() {
            let verb = if self.dry_run { "Previewing" } else { "Applying" };
            println!("{verb} {} operation(s):", operations.len());
        }
    }

    fn outcome(&mut self, outcome: &OperationOutcome) {
        println!("{}", outcome_line(outcome));
    }
}

/// The four sets, each listed or marked `(none)`.
pub fn print_delta_summary(share_name: &ShareName, plan: &ReconciliationPlan) {
    print!("{}", render_delta_summary(share_name, plan));
}

pub fn render_delta_summary(share_name: &ShareName, plan: &ReconciliationPlan) -> String {
    let mut out = format!("Datashare '{share_name}' delta:\n");
    render_section(&mut out, "Schemas to add", &plan.add_schemas);
    render_section(&mut out, "Tables to add", &plan.add_tables);
    render_section(&mut out, "Schemas to remove", &plan.drop_schemas);
    render_section(&mut out, "Tables to remove", &plan.drop_tables);
    out
}

fn render_section<T: Display>(out: &mut String, title: &str, items: &BTreeSet<T>) {
    let _ = writeln!(out, "  {title}:");
    if items.is_empty() {
        out.push_str("    (none)\n");
        return;
    }
    for item in items {
        let _ = writeln!(out, "    {item}");
    }
}

pub fn outcome_line(outcome: &OperationOutcome) -> String {
    match &outcome.result {
        ExecutionResult::Previewed(sql) => format!("  ➜ {sql}"),
        ExecutionResult::Applied => format!("  {} {}", "✓".green().bold(), outcome.operation),
        ExecutionResult::Skipped(reason) => format!(
            "  {} {}: {}",
            "⚠".yellow().bold(),
            outcome.operation,
            reason.yellow()
        ),
    }
}

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "operation")]
    operation: String,
}

/// Ordered operations as a table, for `datashare diff`.
pub fn print_operation_table(operations: &[Operation]) {
    let rows: Vec<OperationRow> = operations
        .iter()
        .enumerate()
        .map(|(i, op)| OperationRow {
            index: i + 1,
            operation: op.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn print_abort(operation: &Operation, message: &str, completed: &[OperationOutcome]) {
    println!(
        "  {} {operation}: {}",
        "✗".red().bold(),
        format!("connection lost: {message}").red()
    );
    println!(
        "Aborted after {} operation(s); the share may be partially updated. Re-run to continue.",
        completed.len()
    );
}

pub fn print_tally(report: &RunReport) {
    println!("{}", tally_line(report));
}

pub fn tally_line(report: &RunReport) -> String {
    let name = &report.share_name;
    if report.outcomes.is_empty() {
        return format!("✓ '{name}' — nothing to do");
    }
    if report.dry_run {
        let skipped = report.skipped();
        if skipped == 0 {
            return format!("[dry-run] ✓ '{name}' — {} previewed", report.previewed());
        }
        return format!(
            "[dry-run] ✓ '{name}' — {} previewed, {skipped} skipped",
            report.previewed()
        );
    }
    format!(
        "✓ '{name}' reconciled ({} applied, {} skipped)",
        report.applied(),
        report.skipped()
    )
}
