// The fixed provisioning sequence.
//
// Steps run strictly in order, one at a time. Each step's warnings are
// collected into its report. A failed step either halts the run (bootstrap
// failures, or any failure under `on_failure: abort`) or is recorded while
// the next step starts.

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::errors::Result;
use crate::installers::{azure_cli, brew, clt, node, npm, powershell, python, terraform};
use crate::libs::context::Context;
use crate::schemas::workstation::FailurePolicy;
use crate::{log_debug, log_error, log_info};

/// How a step that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Done,
    /// The step decided there was nothing it could do (e.g. npm missing).
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Ok,
    Warned(Vec<String>),
    Skipped(String),
    Failed(String),
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Ok => "ok",
            StepStatus::Warned(_) => "warnings",
            StepStatus::Skipped(_) => "skipped",
            StepStatus::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub status: StepStatus,
    pub elapsed: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started: DateTime<Local>,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.status, StepStatus::Failed(_)))
            .count()
    }
}

pub type Ensurer = fn(&mut Context<'_>) -> Result<Completion>;

pub struct Step {
    pub name: &'static str,
    pub run: Ensurer,
}

/// The provisioning order. CLT and Homebrew come first because every
/// later step installs through them.
pub fn steps() -> Vec<Step> {
    vec![
        Step { name: "Command Line Tools", run: clt::ensure },
        Step { name: "Homebrew", run: brew::bootstrap },
        Step { name: "Python", run: python::ensure },
        Step { name: "Node", run: node::ensure },
        Step { name: "npm packages", run: npm::install_global_packages },
        Step { name: "PowerShell", run: powershell::ensure },
        Step { name: "Azure CLI", run: azure_cli::ensure },
        Step { name: "Terraform", run: terraform::ensure_terraform },
        Step { name: "terraform-docs", run: terraform::ensure_terraform_docs },
    ]
}

pub fn run_pipeline(ctx: &mut Context<'_>, steps: &[Step]) -> RunReport {
    let started = Local::now();
    let policy = ctx.config.on_failure;
    let mut reports = Vec::with_capacity(steps.len());
    let mut halted_by: Option<&'static str> = None;

    for step in steps {
        if let Some(previous) = halted_by {
            reports.push(StepReport {
                name: step.name,
                status: StepStatus::Skipped(format!("not run: {previous} failed")),
                elapsed: chrono::Duration::zero(),
            });
            continue;
        }

        eprintln!();
        log_info!("==> {}", step.name.bold());
        let step_started = Local::now();
        let result = (step.run)(ctx);
        let warnings = ctx.take_warnings();
        let elapsed = Local::now() - step_started;

        let status = match result {
            Ok(Completion::Done) if warnings.is_empty() => StepStatus::Ok,
            Ok(Completion::Done) => StepStatus::Warned(warnings),
            Ok(Completion::Skipped(reason)) => StepStatus::Skipped(reason),
            Err(e) => {
                log_error!("[{}] {}", step.name, e);
                if e.halts_pipeline() || policy == FailurePolicy::Abort {
                    halted_by = Some(step.name);
                }
                StepStatus::Failed(e.to_string())
            }
        };
        log_debug!("[Pipeline] {} finished: {}", step.name, status.label());
        reports.push(StepReport {
            name: step.name,
            status,
            elapsed,
        });
    }

    RunReport {
        started,
        steps: reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProvisionError;
    use crate::libs::host::fake::FakeHost;
    use crate::schemas::workstation::WorkstationConfig;

    const ORDER: [&str; 9] = [
        "Command Line Tools",
        "Homebrew",
        "Python",
        "Node",
        "npm packages",
        "PowerShell",
        "Azure CLI",
        "Terraform",
        "terraform-docs",
    ];

    fn happy_host() -> FakeHost {
        FakeHost::resolving_everything()
            .respond("xcode-select -p", 0, "/Library/Developer/CommandLineTools")
            .respond("python3 -c", 0, "/Users/dev/Library/Python/3.12/bin")
    }

    fn names(report: &RunReport) -> Vec<&'static str> {
        report.steps.iter().map(|s| s.name).collect()
    }

    #[test]
    fn full_run_touches_every_ensurer_once_in_order() {
        let host = happy_host();
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin:/bin", "/tmp/.zprofile");
        let report = run_pipeline(&mut ctx, &steps());

        assert_eq!(names(&report), ORDER);
        assert_eq!(report.failures(), 0);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Ok));

        // The first command of each ensurer appears in the same order.
        let markers = [
            "xcode-select -p",
            "brew shellenv",
            "brew list --formula python",
            "brew list --formula node",
            "npm ls -g",
            "brew list --cask powershell",
            "brew list --formula azure-cli",
            "brew tap hashicorp/tap",
            "brew tap terraform-docs/tap",
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| host.position(m).unwrap_or_else(|| panic!("{m} never ran")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!host.ran("brew install"));
    }

    #[test]
    fn continue_policy_runs_later_steps_after_a_failure() {
        let host = happy_host()
            .fail_on("brew list --formula node")
            .fail_on("brew install --formula node");
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin", "/tmp/.zprofile");
        let report = run_pipeline(&mut ctx, &steps());

        assert_eq!(report.failures(), 1);
        assert!(matches!(report.steps[3].status, StepStatus::Failed(_)));
        assert_eq!(report.steps[8].status, StepStatus::Ok);
        assert!(host.ran("brew tap terraform-docs/tap"));
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let host = happy_host()
            .fail_on("brew list --formula node")
            .fail_on("brew install --formula node");
        let mut config = WorkstationConfig::default();
        config.on_failure = FailurePolicy::Abort;
        let mut ctx = Context::new(&host, config, "/usr/bin", "/tmp/.zprofile");
        let report = run_pipeline(&mut ctx, &steps());

        assert_eq!(names(&report), ORDER);
        assert!(matches!(report.steps[4].status, StepStatus::Skipped(_)));
        assert!(!host.ran("npm ls"));
    }

    #[test]
    fn missing_clt_halts_regardless_of_policy() {
        let host = FakeHost::resolving_everything().respond("xcode-select -p", 2, "");
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin", "/tmp/.zprofile");
        let report = run_pipeline(&mut ctx, &steps());

        assert_eq!(report.failures(), 1);
        assert!(report.steps[1..]
            .iter()
            .all(|s| matches!(s.status, StepStatus::Skipped(_))));
        assert!(!host.ran("brew"));
    }

    #[test]
    fn failed_homebrew_installer_halts_under_continue_policy() {
        let host = FakeHost::new()
            .respond("xcode-select -p", 0, "/Library/Developer/CommandLineTools")
            .fail_on("install.sh");
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin", "/tmp/.zprofile");
        let report = run_pipeline(&mut ctx, &steps());

        assert_eq!(names(&report), ORDER);
        assert_eq!(report.steps[0].status, StepStatus::Ok);
        assert!(matches!(report.steps[1].status, StepStatus::Failed(_)));
        assert!(report.steps[2..]
            .iter()
            .all(|s| matches!(s.status, StepStatus::Skipped(_))));
        assert_eq!(report.failures(), 1);
        assert!(!host.ran("brew list"));
    }

    #[test]
    fn warnings_are_attributed_to_their_step() {
        fn noisy(ctx: &mut Context<'_>) -> Result<Completion> {
            ctx.warn("something optional failed");
            Ok(Completion::Done)
        }
        fn quiet(_: &mut Context<'_>) -> Result<Completion> {
            Ok(Completion::Done)
        }
        fn broken(_: &mut Context<'_>) -> Result<Completion> {
            Err(ProvisionError::ToolMissing("az".into()))
        }
        let host = FakeHost::new();
        let mut ctx = Context::new(&host, WorkstationConfig::default(), "/usr/bin", "/tmp/p");
        let steps = [
            Step { name: "noisy", run: noisy },
            Step { name: "quiet", run: quiet },
            Step { name: "broken", run: broken },
        ];
        let report = run_pipeline(&mut ctx, &steps);

        assert_eq!(
            report.steps[0].status,
            StepStatus::Warned(vec!["something optional failed".into()])
        );
        assert_eq!(report.steps[1].status, StepStatus::Ok);
        assert_eq!(report.steps[2].status.label(), "failed");
    }
}
