//! Built-in table shape and lookup behavior.

use cra_model::MainCategory;
use cra_taxonomy::{Specialty, TaxonomyRegistry};

#[test]
fn default_tables_are_populated() {
    let registry = TaxonomyRegistry::default();
    assert_eq!(registry.nodes.len(), 6);
    assert!(registry.consultations.len() >= 25);
    assert!(registry.procedure_count() > 30);
}

#[test]
fn node_order_is_tie_break_order() {
    let registry = TaxonomyRegistry::default();
    let specialties: Vec<Specialty> = registry.nodes.iter().map(|n| n.specialty).collect();
    assert_eq!(
        specialties,
        vec![
            Specialty::Surgery,
            Specialty::Dermatology,
            Specialty::HairRemoval,
            Specialty::Piercing,
            Specialty::Products,
            Specialty::Anesthesia,
        ]
    );
}

#[test]
fn procedure_lookup_is_exact() {
    let registry = TaxonomyRegistry::default();
    let node = registry.node_for_procedure("脱毛").expect("known procedure");
    assert_eq!(node.specialty, Specialty::HairRemoval);
    // Substrings of known procedures do not match.
    assert!(registry.node_for_procedure("全身脱毛コース").is_none());
}

#[test]
fn specialty_main_split() {
    assert_eq!(Specialty::Surgery.main_category(), MainCategory::Beauty);
    assert_eq!(Specialty::Dermatology.main_category(), MainCategory::Beauty);
    assert_eq!(Specialty::HairRemoval.main_category(), MainCategory::Beauty);
    assert_eq!(Specialty::Piercing.main_category(), MainCategory::Other);
    assert_eq!(Specialty::Products.main_category(), MainCategory::Other);
    assert_eq!(Specialty::Anesthesia.main_category(), MainCategory::Other);
}

#[test]
fn consultation_exact_lookup() {
    let registry = TaxonomyRegistry::default();
    let entry = registry
        .consultation_exact("ボトックスのご相談")
        .expect("known consultation");
    assert_eq!(entry.specialty, Specialty::Dermatology);
    assert_eq!(entry.subcategory, "注入");
    assert!(!entry.requires_manual_classification);

    // Flagged entries still resolve to their listed subcategory.
    let manual = registry
        .consultation_exact("肌質改善のご相談")
        .expect("manual entry");
    assert!(manual.requires_manual_classification);
    assert_eq!(manual.subcategory, "肌質改善");
}

#[test]
fn specialty_labels_round_trip() {
    for specialty in [
        Specialty::Surgery,
        Specialty::Dermatology,
        Specialty::HairRemoval,
        Specialty::Piercing,
        Specialty::Products,
        Specialty::Anesthesia,
        Specialty::Other,
    ] {
        assert_eq!(Specialty::from_label(specialty.label()), Some(specialty));
    }
    assert_eq!(Specialty::from_label("内科"), None);
}
