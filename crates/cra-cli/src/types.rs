use cra_model::{CrossSellReport, HolidayCalendar, PeriodMetrics, ValidationReport};

/// Everything one analytics request produces.
#[derive(Debug)]
pub struct AnalysisResult {
    /// Raw records read across all batch files.
    pub raw_count: usize,
    /// Records surviving normalization (dateable).
    pub visit_count: usize,
    /// Accounting entries resolved from the accounting stream.
    pub accounting_count: usize,
    /// None when no date range could be resolved (no dated records and no
    /// explicit bounds).
    pub period: Option<PeriodMetrics>,
    pub transitions: Option<CrossSellReport>,
    pub holidays: HolidayCalendar,
    pub validation: ValidationReport,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.validation.has_errors()
    }
}
