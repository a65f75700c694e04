pub mod calendar;
pub mod category;
pub mod error;
pub mod metrics;
pub mod record;
pub mod transitions;
pub mod validation;

pub use calendar::{DayActivity, HolidayCalendar};
pub use category::{Category, CategoryKey, MainCategory, PatientType};
pub use error::{AnalyticsError, Result};
pub use metrics::{DailyMetrics, PatientRevenueEntry, PeriodMetrics};
pub use record::{
    AccountingEntry, CanonicalVisitRecord, ClassifiedVisit, PaymentLineItem, RawRecord,
};
pub use transitions::{CrossSellReport, TransitionMatrix};
pub use validation::{ErrorSeverity, RecordError, ValidationReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let report = ValidationReport {
            issues: vec![
                RecordError {
                    code: "CRA001".to_string(),
                    message: "Patient identifier is missing".to_string(),
                    severity: ErrorSeverity::Error,
                    field: Some("患者コード".to_string()),
                    patient_id: None,
                },
                RecordError {
                    code: "CRA004".to_string(),
                    message: "Consultation name has no mapping entry".to_string(),
                    severity: ErrorSeverity::Warning,
                    field: Some("施術名".to_string()),
                    patient_id: Some("P1".to_string()),
                },
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn category_key_serializes_as_string() {
        let key = CategoryKey {
            main: MainCategory::Beauty,
            sub: "外科".to_string(),
        };
        let json = serde_json::to_string(&key).expect("serialize key");
        assert_eq!(json, "\"美容/外科\"");
        let round: CategoryKey = serde_json::from_str(&json).expect("deserialize key");
        assert_eq!(round, key);
    }
}
