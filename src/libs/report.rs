// End-of-run summary table.

use colored::Colorize;
use prettytable::{Table, row};

use crate::libs::pipeline::{RunReport, StepStatus};
use crate::libs::utilities::misc_utils::format_elapsed;
use crate::{log_error, log_info, log_warn};

fn detail(status: &StepStatus) -> String {
    match status {
        StepStatus::Ok => String::new(),
        StepStatus::Warned(warnings) => warnings.join("\n"),
        StepStatus::Skipped(reason) | StepStatus::Failed(reason) => reason.clone(),
    }
}

/// Builds the summary table: one row per step.
pub fn render(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Step", "Status", "Detail", "Time"]);
    for step in &report.steps {
        table.add_row(row![
            step.name,
            step.status.label(),
            detail(&step.status),
            format_elapsed(&step.elapsed)
        ]);
    }
    table
}

/// Prints the table and a one-line verdict.
pub fn print_summary(report: &RunReport) {
    eprintln!();
    log_info!(
        "Summary of run started {}",
        report.started.format("%Y-%m-%d %H:%M:%S")
    );
    render(report).printstd();

    let failures = report.failures();
    let warned = report
        .steps
        .iter()
        .filter(|s| matches!(s.status, StepStatus::Warned(_)))
        .count();
    if failures > 0 {
        log_error!("{} step(s) failed", failures.to_string().red());
    } else if warned > 0 {
        log_warn!(
            "All steps completed; {} with warnings",
            warned.to_string().yellow()
        );
    } else {
        log_info!("{}", "Workstation is up to date".green());
    }
}
