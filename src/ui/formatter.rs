//! Pure formatting functions for UI output.
//!
//! Functions here only print; building the text is kept in `format_*` helpers
//! so it can be tested without capturing stdout.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::cli::orchestration::{PassKind, ReleaseReport};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// The two-line usage text.
pub fn format_usage(program: &str) -> String {
    format!(
        "Usage: {} <newVersion>\n  <newVersion> is the release number, e.g. 1.4.0",
        program
    )
}

/// Print usage on stdout. A usage error is not a failure.
pub fn display_usage(program: &str) {
    println!("{}", format_usage(program));
}

/// One line per file of a pass, e.g. `updated README.md (version)`.
pub fn format_pass_lines(report: &ReleaseReport) -> Vec<String> {
    let verb_changed = if report.dry_run { "would update" } else { "updated" };

    report
        .passes
        .iter()
        .flat_map(|pass| {
            let label = match pass.kind {
                PassKind::Version => "version",
                PassKind::Links => "links",
            };
            pass.files.iter().map(move |outcome| {
                let name = outcome
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| outcome.path.display().to_string());
                let verb = if outcome.changed {
                    verb_changed
                } else {
                    "unchanged"
                };
                format!("{} {} ({})", verb, name, label)
            })
        })
        .collect()
}

/// Display the outcome of a release run.
pub fn display_report(report: &ReleaseReport) {
    for warning in &report.warnings {
        display_warning(warning);
    }

    for line in format_pass_lines(report) {
        display_status(&line);
    }

    if report.dry_run {
        println!("\n{}", style("Dry run, nothing written:").bold());
        println!("  Would commit: {}", style(&report.commit_message).cyan());
        println!("  Would tag:    {}", style(&report.tag_name).cyan());
        return;
    }

    if let Some(commit_id) = &report.commit_id {
        let short = commit_id.get(..7).unwrap_or(commit_id.as_str());
        display_success(&format!("Committed {} \"{}\"", short, report.commit_message));
    }
    if report.tagged {
        display_success(&format!("Created tag {}", report.tag_name));
    }

    println!(
        "\n{} Released version {}\n",
        style("✓").green(),
        style(report.version.as_str()).bold()
    );
}
