//! Plain text rendering of projection reports.
//!
//! A report renders as groups of lines: identity, the next hour, the rest of
//! the current action (when determined), and completion progress (when
//! count-bounded). Groups are separated by a rule.

use overlay_core::{ProjectionReport, format_hms};

const GROUP_RULE: &str = "----------------------------------------";

/// Renders a report as newline-separated text.
pub fn render_text(report: &ProjectionReport) -> String {
    let separator = format!("\n{GROUP_RULE}\n");
    render_groups(report)
        .iter()
        .map(|group| group.join("\n"))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Renders a report as groups of lines.
pub fn render_groups(report: &ProjectionReport) -> Vec<Vec<String>> {
    let mut groups = vec![
        vec![
            format!(
                "Current action: [{}] -> [{}]",
                report.skill_name, report.action_name
            ),
            format!(
                "Current time per action: {:.2} seconds.",
                report.seconds_per_action
            ),
            format!(
                "Current skill boost: {}%.",
                group_thousands(report.efficiency_boost * 100.0)
            ),
        ],
        vec![
            "If you continue your current action for an hour you will be ...".to_owned(),
            format!(
                " ... completing about {} actions",
                group_thousands(report.hourly.actions as f64)
            ),
            format!(
                " ... skipping about {} actions",
                group_thousands(report.hourly.skipped_actions as f64)
            ),
            format!(
                " ... gaining about {} experience",
                group_thousands(report.hourly.experience)
            ),
            format!(
                "It will take you about {} for the next level.",
                format_hms(report.next_level.seconds)
            ),
        ],
    ];

    if let Some(exhaustion) = &report.exhaustion {
        groups.push(vec![
            format!(
                "Current actions should take {} (including skipped actions).",
                format_hms(exhaustion.remaining_seconds)
            ),
            "In total you will be ...".to_owned(),
            format!(
                " ... skipping about {} actions",
                group_thousands(exhaustion.skipped_actions as f64)
            ),
            format!(
                " ... gaining {} experience",
                group_thousands(exhaustion.experience_gained)
            ),
            format!(" ... reaching level {}", exhaustion.projected_level),
        ]);
    }

    if let Some(progress) = report.progress {
        groups.push(vec![format!(
            "Already executed {} out of {} actions",
            progress.current, progress.max
        )]);
    }

    groups
}

/// Formats a number with `,` thousands separators and at most three
/// fractional digits, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1_000.0).round() / 1_000.0;
    let digits = format!("{:.3}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
