//! Terminal output.

use crate::error::VnetError;
use crate::processing::{group_collisions, self_loops, Report};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Log collisions and overlaps as warnings.
pub fn log_findings(report: &Report) {
    let groups = group_collisions(&report.collisions);
    if groups.is_empty() {
        log::info!("No CIDR collisions found.");
    } else {
        log::warn!("Found {} colliding CIDR(s):", groups.len());
        for (cidr, members) in &groups {
            log::warn!("  CIDR {} is used {} times:", cidr, members.len());
            for a in members {
                log::warn!(
                    "    - VNet: '{}', ResourceGroup: '{}', Subscription: '{}'",
                    a.vnet_name,
                    a.resource_group,
                    a.subscription_id
                );
            }
        }
    }

    for o in &report.overlaps {
        log::warn!("Overlap: {o}");
    }

    for e in self_loops(&report.edges) {
        log::warn!("VNet peered with itself: {}", e.endpoint_a);
    }
}

/// Closing notes for the summary, one per kind of problem seen.
pub fn summary_notes(report: &Report) -> Vec<String> {
    let count = |f: fn(&VnetError) -> bool| report.diagnostics.iter().filter(|d| f(d)).count();
    let denied = count(|d| matches!(d, VnetError::AccessDenied { .. }));
    let failed = count(|d| matches!(d, VnetError::TransientApi { .. }));
    let skipped = count(|d| matches!(d, VnetError::MalformedRecord { .. }));
    let unwritten = count(|d| matches!(d, VnetError::SinkWrite { .. }));

    let mut notes = vec![];
    if !report.failed_subscriptions.is_empty() {
        notes.push(format!(
            "{} subscription(s) contributed nothing ({denied} access denied, {failed} api failure(s)): {}",
            report.failed_subscriptions.len(),
            report.failed_subscriptions.join(", ")
        ));
    }
    if skipped > 0 {
        notes.push(format!("{skipped} record(s) skipped, see log"));
    }
    if unwritten > 0 {
        notes.push(format!("{unwritten} output(s) not written, see log"));
    }
    notes
}

/// Print a short run summary to stdout.
pub fn print_summary(report: &Report) {
    println!(
        "{:>24} {}",
        "prefixes:",
        format_field(report.allocations.len(), 8)
    );
    println!(
        "{:>24} {}",
        "peering observations:",
        format_field(report.peerings.len(), 8)
    );
    println!("{:>24} {}", "peering edges:", format_field(report.edges.len(), 8));

    let collisions = format_field(report.collisions.len(), 8);
    let collisions = if report.collisions.is_empty() {
        collisions.green()
    } else {
        collisions.on_red()
    };
    println!("{:>24} {}", "colliding rows:", collisions);
    println!(
        "{:>24} {}",
        "range overlaps:",
        format_field(report.overlaps.len(), 8)
    );

    for note in summary_notes(report) {
        println!("{} {note}", "NOTE".on_yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_summary_notes_count_by_kind() {
        let report = Report {
            failed_subscriptions: vec!["s1".to_string(), "s2".to_string()],
            diagnostics: vec![
                VnetError::AccessDenied {
                    subscription_id: "s1".to_string(),
                    message: "AuthorizationFailed".to_string(),
                },
                VnetError::TransientApi {
                    subscription_id: "s2".to_string(),
                    message: "timeout".to_string(),
                },
                VnetError::malformed("vnet x", "bad id"),
                VnetError::sink("all_vnets.csv", "disk full"),
            ],
            ..Default::default()
        };
        assert_eq!(
            summary_notes(&report),
            vec![
                "2 subscription(s) contributed nothing (1 access denied, 1 api failure(s)): s1, s2",
                "1 record(s) skipped, see log",
                "1 output(s) not written, see log",
            ]
        );
    }

    #[test]
    fn test_summary_notes_clean_run() {
        assert!(summary_notes(&Report::default()).is_empty());
    }

    #[test]
    fn test_log_findings_with_self_loop() {
        let report = Report {
            edges: vec![crate::models::UndirectedPeeringEdge {
                endpoint_a: "A (10.0.0.0/16)".to_string(),
                endpoint_b: "A (10.0.0.0/16)".to_string(),
                state: None,
                color: "red",
            }],
            ..Default::default()
        };
        assert_eq!(self_loops(&report.edges).count(), 1);
        log_findings(&report);
    }
}
