//! Treatment classifier rule-table tests.

use cra_classify::{classify_treatment, find_consultation, is_consultation_name};
use cra_model::MainCategory;
use cra_taxonomy::{Specialty, TaxonomyNode, TaxonomyRegistry};

use proptest::proptest;

#[test]
fn consultation_mapping_wins_over_everything() {
    let registry = TaxonomyRegistry::default();
    let category = classify_treatment(&registry, "", "ボトックスのご相談");
    assert_eq!(category.main, MainCategory::Beauty);
    assert_eq!(category.sub, "注入");
    assert_eq!(category.procedure, "ボトックスのご相談");
}

#[test]
fn consultation_substring_matches_both_directions() {
    let registry = TaxonomyRegistry::default();
    // Record name contains the table name.
    let longer = classify_treatment(&registry, "", "【初回】二重のご相談(無料)");
    assert_eq!(longer.sub, "二重");
    // Table name contains the record name.
    let shorter = classify_treatment(&registry, "", "二重のご相談");
    assert_eq!(shorter.sub, "二重");
}

#[test]
fn manual_flag_entries_still_resolve() {
    let registry = TaxonomyRegistry::default();
    let category = classify_treatment(&registry, "", "肌質改善のご相談");
    assert_eq!(category.main, MainCategory::Beauty);
    assert_eq!(category.sub, "肌質改善");
}

#[test]
fn taxonomy_membership_is_exact_and_ordered() {
    let registry = TaxonomyRegistry::default();
    let hair = classify_treatment(&registry, "", "脱毛");
    assert_eq!(hair.main, MainCategory::Beauty);
    assert_eq!(hair.sub, "脱毛");
    assert_eq!(hair.procedure, "脱毛");

    let piercing = classify_treatment(&registry, "", "ピアス");
    assert_eq!(piercing.main, MainCategory::Other);
    assert_eq!(piercing.sub, "ピアス");
}

#[test]
fn duplicate_membership_resolves_to_the_earlier_node() {
    // Should not happen with the shipped tables, but custom tables may
    // collide; the earlier-declared node wins.
    let registry = TaxonomyRegistry::new(
        vec![
            TaxonomyNode {
                specialty: Specialty::Dermatology,
                procedures: vec!["レーザー".to_string()],
            },
            TaxonomyNode {
                specialty: Specialty::HairRemoval,
                procedures: vec!["レーザー".to_string()],
            },
        ],
        Vec::new(),
    );
    let category = classify_treatment(&registry, "", "レーザー");
    assert_eq!(category.sub, "皮膚科");
}

#[test]
fn unmatched_names_fall_back() {
    let registry = TaxonomyRegistry::default();
    let category = classify_treatment(&registry, "外科", "謎の新メニュー");
    assert_eq!(category.main, MainCategory::Other);
    assert_eq!(category.sub, "その他");
    assert_eq!(category.procedure, "謎の新メニュー");
}

#[test]
fn empty_name_never_matches_a_consultation() {
    let registry = TaxonomyRegistry::default();
    assert!(find_consultation(&registry, "").is_none());
    let category = classify_treatment(&registry, "", "");
    assert_eq!(category.sub, "その他");
}

#[test]
fn consultation_marker_detection() {
    assert!(is_consultation_name("ボトックスのご相談"));
    assert!(!is_consultation_name("ボトックス注射"));
}

proptest! {
    // Classification is total: any input produces exactly one category,
    // and the fallback keeps the raw name as the procedure.
    #[test]
    fn classification_is_total(name in ".*", category_raw in ".*") {
        let registry = TaxonomyRegistry::default();
        let category = classify_treatment(&registry, &category_raw, &name);
        assert!(!category.sub.is_empty());
        if category.sub == "その他" {
            assert_eq!(category.procedure, name);
        }
    }
}
