use super::{AttendanceSummary, TierPolicy, format_percent};
use crate::domain_model::AttendanceRecord;
use std::fmt::Write as _;

/// Renders the terminal attendance report: the aggregate banner followed by
/// the subject table. Per-subject status uses the portal-supplied percentage;
/// the banner uses the recomputed aggregate.
pub fn render_report(records: &[AttendanceRecord], policy: &TierPolicy) -> String {
    let mut out = String::new();

    let summary = AttendanceSummary::from_records(records);
    let overall = summary.overall_percentage();
    let tier = policy.classify(overall);

    let _ = writeln!(out, "Average Attendance: {}%", format_percent(overall));
    let _ = writeln!(out, "{}", tier.standing());
    let _ = writeln!(out);

    if records.is_empty() {
        let _ = writeln!(out, "No attendance records available for this semester.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<10} {:<34} {:>9} {:>7} {:>6} {:>5} {:>7}  {}",
        "Code", "Subject", "Conducted", "Present", "Absent", "OD/ML", "Att%", "Status"
    );
    for record in records {
        let status = policy.classify(record.attendance_percentage);
        let _ = writeln!(
            out,
            "{:<10} {:<34} {:>9} {:>7} {:>6} {:>5} {:>7}  {}",
            record.subject_code,
            record.subject_name,
            record.classes_conducted,
            record.present,
            record.absent,
            record.od_ml_taken,
            format_percent(record.attendance_percentage),
            status.label(),
        );
    }

    out
}
