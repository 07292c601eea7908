use crate::domain_model::AttendanceRecord;

/// Aggregate over all subjects for the current session. Derived on demand,
/// never persisted. The per-subject portal percentages are left untouched;
/// this recomputes from the raw counts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total_present: u32,
    pub total_absent: u32,
    pub total_od_ml: u32,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut summary = AttendanceSummary {
            total_present: 0,
            total_absent: 0,
            total_od_ml: 0,
        };
        for record in records {
            summary.total_present += record.present;
            summary.total_absent += record.absent;
            summary.total_od_ml += record.od_ml_taken;
        }
        summary
    }

    /// `present / (present + absent + od_ml) * 100`; 0 for an empty
    /// denominator, never a division fault.
    pub fn overall_percentage(&self) -> f64 {
        let denominator = self.total_present + self.total_absent + self.total_od_ml;
        if denominator == 0 {
            return 0.0;
        }
        f64::from(self.total_present) / f64::from(denominator) * 100.0
    }
}

/// One decimal place, the portal's display convention.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(present: u32, absent: u32, od_ml: u32) -> AttendanceRecord {
        AttendanceRecord {
            subject_code: "CSE201".to_string(),
            subject_name: "Data Structures and Algorithms".to_string(),
            classes_conducted: present + absent + od_ml,
            present,
            absent,
            od_ml_taken: od_ml,
            attendance_percentage: 0.0,
        }
    }

    #[test]
    fn empty_input_aggregates_to_zero() {
        let summary = AttendanceSummary::from_records(&[]);
        assert_eq!(summary.overall_percentage(), 0.0);
    }

    #[test]
    fn zero_counts_do_not_divide_by_zero() {
        let summary = AttendanceSummary::from_records(&[record(0, 0, 0)]);
        assert_eq!(summary.overall_percentage(), 0.0);
    }

    #[test]
    fn known_aggregate() {
        let summary = AttendanceSummary::from_records(&[record(38, 2, 0)]);
        assert_eq!(summary.overall_percentage(), 95.0);
    }

    #[test]
    fn spans_subjects() {
        // (38 + 34) / (40 + 40) = 90.0
        let summary = AttendanceSummary::from_records(&[record(38, 2, 0), record(34, 4, 2)]);
        assert_eq!(summary.overall_percentage(), 90.0);
    }

    #[test]
    fn monotone_in_present_with_fixed_absences() {
        let mut last = -1.0;
        for present in 0..50 {
            let summary = AttendanceSummary::from_records(&[record(present, 5, 3)]);
            let overall = summary.overall_percentage();
            assert!(overall >= last);
            last = overall;
        }
    }

    #[test]
    fn formats_to_one_decimal() {
        assert_eq!(format_percent(95.0), "95.0");
        assert_eq!(format_percent(74.949), "74.9");
        assert_eq!(format_percent(0.0), "0.0");
    }
}
