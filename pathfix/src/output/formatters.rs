//! Output formatter implementations.

use std::fmt::Write as _;

use crate::classify::{PathStats, ViolationKinds};
use crate::copy::CopyReport;
use crate::operations::{Outcome, PlanAction, RemediationReport, TreeReport};
use crate::Result;

use super::OutputFormatter;

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_tree(&self, report: &TreeReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_remediation(&self, report: &RemediationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_tree(&self, report: &TreeReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "Tree:   {}", report.root.display());
        let _ = writeln!(out, "Limit:  {} characters", report.stats.limit);
        out.push('\n');
        write_stats_table(&mut out, &[("paths", &report.stats)]);

        if !report.violations.is_empty() {
            let _ = writeln!(out, "\nViolations ({}):", report.violations.len());
            for violation in &report.violations {
                let _ = writeln!(
                    out,
                    "  {:>5}  {:<12} {}",
                    violation.length,
                    flags(violation.kinds),
                    violation.path.display()
                );
            }
        }
        write_issues(&mut out, report.issues.iter().map(|i| (&i.path, &i.message)));
        Ok(out.trim_end().to_string())
    }

    fn format_remediation(&self, report: &RemediationReport) -> Result<String> {
        let mut out = String::new();
        let outcome = match report.outcome {
            Outcome::NothingToDo => "nothing to do",
            Outcome::DryRun => "dry run (nothing changed)",
            Outcome::Remediated => "remediated",
        };
        let _ = writeln!(out, "Source:       {}", report.source.display());
        let _ = writeln!(out, "Destination:  {}", report.destination.display());
        let _ = writeln!(out, "Outcome:      {outcome}");
        let _ = writeln!(
            out,
            "Budget:       {} characters",
            report.settings.max_path_length
        );
        out.push('\n');

        let mut columns: Vec<(&str, &PathStats)> = vec![("source", &report.before)];
        if let Some(ref copied) = report.copied {
            columns.push(("copy", copied));
        }
        if let Some(ref after) = report.after {
            columns.push(("result", after));
        }
        write_stats_table(&mut out, &columns);

        if report.outcome == Outcome::DryRun {
            let _ = writeln!(out, "\nPlanned actions ({}):", report.plan.len());
            for action in &report.plan.actions {
                let _ = writeln!(out, "  {}", action.description());
            }
        } else if report.outcome == Outcome::Remediated {
            let _ = writeln!(
                out,
                "\nRenamed {} entities, wrote {} namefiles.",
                report.plan.rename_count(),
                report.plan.namefiles().count()
            );
            let renames = report.plan.actions.iter().filter_map(|a| match a {
                PlanAction::Rename {
                    from,
                    to,
                    original_name,
                    ..
                } => Some((from, to, original_name)),
                PlanAction::WriteNamefile(_) => None,
            });
            for (from, to, original_name) in renames {
                let _ = writeln!(
                    out,
                    "  {:?} -> {}  ({})",
                    original_name,
                    to.file_name().map_or_else(
                        || to.display().to_string(),
                        |n| n.to_string_lossy().into_owned()
                    ),
                    from.parent().map_or_else(String::new, |p| p.display().to_string())
                );
            }
        }

        if let Some(ref copy) = report.copy {
            write_copy(&mut out, copy);
        }

        if !report.plan.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for warning in &report.plan.warnings {
                let _ = writeln!(out, "  {warning}");
            }
        }
        write_issues(
            &mut out,
            report.scan_issues.iter().map(|i| (&i.path, &i.message)),
        );
        Ok(out.trim_end().to_string())
    }
}

fn flags(kinds: ViolationKinds) -> String {
    let mut parts = Vec::new();
    if kinds.too_long {
        parts.push("long");
    }
    if kinds.symlink {
        parts.push("link");
    }
    if kinds.illegal_characters {
        parts.push("chars");
    }
    parts.join(",")
}

fn write_stats_table(out: &mut String, columns: &[(&str, &PathStats)]) {
    let _ = write!(out, "{:<20}", "");
    for (title, _) in columns {
        let _ = write!(out, "{title:>10}");
    }
    out.push('\n');

    let rows: [(&str, fn(&PathStats) -> usize); 6] = [
        ("paths", |s| s.total_paths),
        ("longest", |s| s.max_length),
        ("too long", |s| s.too_long),
        ("symlinks", |s| s.symlinks),
        ("illegal characters", |s| s.illegal_characters),
        ("needing fix", |s| s.needing_fix),
    ];
    for (label, value) in rows {
        let _ = write!(out, "{label:<20}");
        for (_, stats) in columns {
            let _ = write!(out, "{:>10}", value(stats));
        }
        out.push('\n');
    }

    if let Some((_, stats)) = columns.first() {
        if let Some(ref longest) = stats.longest_path {
            let _ = writeln!(out, "\nLongest path: {}", longest.display());
        }
    }
}

fn write_copy(out: &mut String, copy: &CopyReport) {
    if !copy.broken_symlinks.is_empty() {
        let _ = writeln!(
            out,
            "\nBroken symbolic links replaced by placeholders ({}):",
            copy.broken_symlinks.len()
        );
        for link in &copy.broken_symlinks {
            let _ = writeln!(
                out,
                "  {} -> {} ({})",
                link.source.display(),
                link.link_target
                    .as_ref()
                    .map_or_else(|| "?".to_string(), |t| t.display().to_string()),
                link.error_kind
            );
        }
    }
    if !copy.skipped.is_empty() {
        let _ = writeln!(out, "\nSpecial files not copied ({}):", copy.skipped.len());
        for path in &copy.skipped {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
}

fn write_issues<'a>(
    out: &mut String,
    issues: impl Iterator<Item = (&'a Option<std::path::PathBuf>, &'a String)>,
) {
    let issues: Vec<_> = issues.collect();
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nOmitted from scan ({}):", issues.len());
    for (path, message) in issues {
        match path {
            Some(path) => {
                let _ = writeln!(out, "  {}: {message}", path.display());
            }
            None => {
                let _ = writeln!(out, "  {message}");
            }
        }
    }
}
