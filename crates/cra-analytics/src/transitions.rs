//! Cross-sell transition analysis.
//!
//! Per patient: sort visits chronologically (stable, so input order
//! decides ties), collapse same-calendar-day visits to the first one, and
//! count first→second and first→any-later category moves. Same-day
//! collapse keeps multiple line items booked on one day from inflating
//! the counts; which same-day visit survives depends on input order, the
//! aggregate counts do not.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use cra_model::{ClassifiedVisit, CrossSellReport, TransitionMatrix};

/// Axis label for a visit's category: the subcategory string. The main
/// category is derivable from it, and the matrices stay compact.
fn label(visit: &ClassifiedVisit) -> &str {
    &visit.category.sub
}

/// Build both transition matrices from a classified batch.
///
/// The axis is the union of categories observed across *all* visits, not
/// just transitioning ones, and not the full taxonomy. Visits without a
/// patient identifier cannot join a history and are left out of the
/// per-patient sequences (their category still shapes the axis).
pub fn build_transitions(visits: &[ClassifiedVisit]) -> CrossSellReport {
    let mut labels: BTreeSet<String> = BTreeSet::new();
    for visit in visits {
        labels.insert(label(visit).to_string());
    }
    let mut immediate_next = TransitionMatrix::from_labels(&labels);
    let mut any_later = TransitionMatrix::from_labels(&labels);

    let mut by_patient: BTreeMap<&str, Vec<&ClassifiedVisit>> = BTreeMap::new();
    for visit in visits {
        if visit.record.patient_id.is_empty() {
            continue;
        }
        by_patient
            .entry(visit.record.patient_id.as_str())
            .or_default()
            .push(visit);
    }

    let mut transitioning = 0usize;
    for sequence in by_patient.values_mut() {
        sequence.sort_by_key(|visit| visit.record.recorded_at);
        let deduped = collapse_same_day(sequence);
        if deduped.len() < 2 {
            continue;
        }
        transitioning += 1;
        let first = label(deduped[0]);
        immediate_next.increment(first, label(deduped[1]));
        for later in &deduped[1..] {
            any_later.increment(first, label(later));
        }
    }
    debug!(
        patients = by_patient.len(),
        transitioning,
        categories = immediate_next.labels.len(),
        "built cross-sell transition matrices"
    );
    CrossSellReport {
        immediate_next,
        any_later,
    }
}

/// Keep the first visit of each calendar day; input must be sorted.
fn collapse_same_day<'a>(sorted: &[&'a ClassifiedVisit]) -> Vec<&'a ClassifiedVisit> {
    let mut deduped: Vec<&ClassifiedVisit> = Vec::with_capacity(sorted.len());
    for visit in sorted {
        if deduped
            .last()
            .is_some_and(|kept| kept.record.record_date == visit.record.record_date)
        {
            continue;
        }
        deduped.push(visit);
    }
    deduped
}
