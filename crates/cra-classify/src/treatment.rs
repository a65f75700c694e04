//! Treatment classification.
//!
//! An explicit ordered rule table, evaluated as a total function:
//!
//! 1. consultation-mapping lookup (exact, then substring containment in
//!    both directions, in table order),
//! 2. taxonomy procedure membership (exact, case-sensitive, first node in
//!    declaration order wins),
//! 3. the `その他/その他` fallback.
//!
//! Every input resolves to exactly one category.

use tracing::debug;

use cra_model::Category;
use cra_taxonomy::{ConsultationMapping, TaxonomyRegistry};

/// Substring marking a consultation-style menu name.
pub const CONSULTATION_MARKER: &str = "ご相談";

/// Find the consultation mapping for a menu name: exact match first, then
/// substring containment in either direction, in table order. Empty names
/// never match (containment of the empty string is vacuous).
pub fn find_consultation<'a>(
    registry: &'a TaxonomyRegistry,
    name: &str,
) -> Option<&'a ConsultationMapping> {
    if name.is_empty() {
        return None;
    }
    if let Some(entry) = registry.consultation_exact(name) {
        return Some(entry);
    }
    registry
        .consultations
        .iter()
        .find(|entry| entry.name.contains(name) || name.contains(&entry.name))
}

/// Whether a menu name looks like a consultation booking.
pub fn is_consultation_name(name: &str) -> bool {
    name.contains(CONSULTATION_MARKER)
}

/// Classify a visit's treatment. Total: every `(category_raw, name_raw)`
/// pair produces exactly one category.
pub fn classify_treatment(
    registry: &TaxonomyRegistry,
    category_raw: &str,
    name_raw: &str,
) -> Category {
    if let Some(entry) = find_consultation(registry, name_raw) {
        return Category::new(
            entry.specialty.main_category(),
            entry.subcategory.clone(),
            name_raw,
        );
    }
    if let Some(node) = registry.node_for_procedure(name_raw) {
        return Category::new(node.specialty.main_category(), node.specialty.label(), name_raw);
    }
    debug!(name = name_raw, category = category_raw, "unmatched treatment name, using fallback");
    Category::fallback(name_raw)
}
