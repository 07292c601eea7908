use serde::{Deserialize, Deserializer, Serialize};

/// One subject's attendance for the current semester, sourced verbatim from
/// the portal backend. The client aggregates these but never mutates them.
///
/// `attendance_percentage` is the portal-computed per-subject figure. It may
/// legitimately differ from a recomputation over the raw counts (the portal
/// weights OD/ML by its own policy), so both are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub subject_code: String,
    pub subject_name: String,
    #[serde(deserialize_with = "count_field")]
    pub classes_conducted: u32,
    #[serde(deserialize_with = "count_field")]
    pub present: u32,
    #[serde(deserialize_with = "count_field")]
    pub absent: u32,
    #[serde(deserialize_with = "count_field")]
    pub od_ml_taken: u32,
    #[serde(deserialize_with = "percent_field")]
    pub attendance_percentage: f64,
}

// The scraped portal emits counts sometimes as numbers, sometimes as strings.
// Unparseable text collapses to 0 rather than failing the whole payload.
fn count_field<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(value) => value,
        Raw::Text(text) => text.trim().parse().unwrap_or(0),
    })
}

fn percent_field<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(value) => value,
        Raw::Text(text) => text.trim().parse().unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_fields() {
        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "subject_code": "CSE201",
            "subject_name": "Data Structures and Algorithms",
            "classes_conducted": 42,
            "present": 38,
            "absent": 2,
            "od_ml_taken": 2,
            "attendance_percentage": 90.5,
        }))
        .unwrap();

        assert_eq!(record.present, 38);
        assert_eq!(record.attendance_percentage, 90.5);
    }

    #[test]
    fn parses_stringly_typed_fields() {
        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "subject_code": "MAT202",
            "subject_name": "Probability and Statistics",
            "classes_conducted": "40",
            "present": "34",
            "absent": "6",
            "od_ml_taken": "",
            "attendance_percentage": "85.0",
        }))
        .unwrap();

        assert_eq!(record.classes_conducted, 40);
        assert_eq!(record.od_ml_taken, 0);
        assert_eq!(record.attendance_percentage, 85.0);
    }

    #[test]
    fn rejects_malformed_shape() {
        let result: Result<AttendanceRecord, _> = serde_json::from_value(serde_json::json!({
            "subject_code": "CSE201",
        }));
        assert!(result.is_err());
    }
}
