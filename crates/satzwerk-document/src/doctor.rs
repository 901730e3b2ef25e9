// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toolchain diagnostics.
//
// Probes every external binary the command templates reference and reports
// which are missing, with actionable install guidance. Run before a
// deployment goes live; the operations themselves do no pre-checks and
// surface a missing tool only as a failed subprocess.

use serde::Serialize;

use satzwerk_core::ToolPaths;
use tracing::{debug, warn};

/// Probe result for a single external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    /// Binary name (or path) as configured.
    pub name: String,
    /// Whether the shell can resolve it.
    pub available: bool,
    /// Human-readable detail of what was probed.
    pub detail: String,
    /// What to do if the tool is missing.
    pub fix: Option<String>,
}

/// Full toolchain report.
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainReport {
    /// One entry per probed binary, in template order.
    pub tools: Vec<ToolStatus>,
    /// Number of required tools that are missing.
    pub missing: usize,
    /// Overall summary.
    pub summary: String,
}

impl ToolchainReport {
    /// Whether every required tool resolved.
    pub fn all_available(&self) -> bool {
        self.missing == 0
    }
}

/// Probe every binary named by `tools`.
///
/// Each probe is a `command -v` through the shell, which honours PATH the
/// same way the real invocations will. The rotation helper script is probed
/// too but reported as optional rather than counted as missing.
pub async fn check(tools: &ToolPaths) -> ToolchainReport {
    let mut report = ToolchainReport {
        tools: Vec::new(),
        missing: 0,
        summary: String::new(),
    };

    for (name, package) in tools.required() {
        let available = resolves(name).await;
        if !available {
            report.missing += 1;
            warn!(tool = name, "required tool not found on PATH");
        }
        report.tools.push(ToolStatus {
            name: name.to_owned(),
            available,
            detail: if available {
                format!("`{name}` resolves on PATH")
            } else {
                format!("`{name}` not found on PATH")
            },
            fix: (!available).then(|| {
                format!("Install the {package} package (e.g. `apt install {package}`).")
            }),
        });
    }

    // The pdfrw helper only backs the degree-based rotation variant.
    let helper = tools.pdfrw_rotate.as_str();
    let helper_available = resolves(helper).await;
    report.tools.push(ToolStatus {
        name: helper.to_owned(),
        available: helper_available,
        detail: if helper_available {
            format!("`{helper}` resolves on PATH")
        } else {
            format!("`{helper}` not found on PATH (optional; only degree-based rotation needs it)")
        },
        fix: (!helper_available)
            .then(|| "Place the rotation helper script on PATH and mark it executable.".into()),
    });

    report.summary = if report.missing == 0 {
        "All required tools are available.".into()
    } else {
        format!(
            "{} of {} required tools are missing.",
            report.missing,
            report.tools.len() - 1
        )
    };
    report
}

/// Whether the shell can resolve `name` to something runnable.
async fn resolves(name: &str) -> bool {
    let found = satzwerk_exec::run(&format!("command -v {name}")).await.is_ok();
    debug!(tool = name, found, "probed");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_present_and_missing_tools() {
        // `sh` is always resolvable; the unlikely name never is.
        let tools = ToolPaths {
            pdftk: "sh".into(),
            qpdf: "satzwerk-definitely-not-installed".into(),
            ..Default::default()
        };
        let report = check(&tools).await;

        let pdftk = report.tools.iter().find(|t| t.name == "sh").unwrap();
        assert!(pdftk.available);
        assert!(pdftk.fix.is_none());

        let qpdf = report
            .tools
            .iter()
            .find(|t| t.name == "satzwerk-definitely-not-installed")
            .unwrap();
        assert!(!qpdf.available);
        assert!(qpdf.fix.as_deref().unwrap().contains("qpdf"));
        assert!(report.missing >= 1);
        assert!(!report.all_available());
    }

    #[tokio::test]
    async fn missing_helper_is_not_counted_as_missing() {
        let tools = ToolPaths {
            pdfrw_rotate: "satzwerk-no-such-helper.py".into(),
            ..Default::default()
        };
        let report = check(&tools).await;
        let helper = report
            .tools
            .iter()
            .find(|t| t.name == "satzwerk-no-such-helper.py")
            .unwrap();
        assert!(!helper.available);
        assert!(helper.detail.contains("optional"));
        // missing counts only required tools, whatever their state here.
        assert_eq!(report.missing, report.tools.iter().filter(|t| !t.available).count() - 1);
    }

    #[tokio::test]
    async fn report_serialises_to_json() {
        let report = check(&ToolPaths::default()).await;
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"summary\""));
    }
}
