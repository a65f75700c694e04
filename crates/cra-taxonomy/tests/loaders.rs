//! CSV override loader tests.

use std::io::Write;

use cra_taxonomy::{Specialty, load_consultations_csv, load_taxonomy_csv};
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

#[test]
fn load_taxonomy_groups_by_specialty_in_first_appearance_order() {
    let file = write_csv(
        "専門科,施術名\n\
         皮膚科,ダーマペン\n\
         外科,二重埋没\n\
         皮膚科,ハイフ\n\
         皮膚科,ダーマペン\n",
    );
    let nodes = load_taxonomy_csv(file.path()).expect("load taxonomy");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].specialty, Specialty::Dermatology);
    // Duplicate rows collapse.
    assert_eq!(nodes[0].procedures, vec!["ダーマペン", "ハイフ"]);
    assert_eq!(nodes[1].specialty, Specialty::Surgery);
}

#[test]
fn load_consultations_parses_manual_flag() {
    let file = write_csv(
        "相談メニュー名,専門科,サブカテゴリ,要手動分類\n\
         二重のご相談,外科,二重,\n\
         肌質改善のご相談,皮膚科,肌質改善,1\n",
    );
    let mappings = load_consultations_csv(file.path()).expect("load consultations");
    assert_eq!(mappings.len(), 2);
    assert!(!mappings[0].requires_manual_classification);
    assert!(mappings[1].requires_manual_classification);
    assert_eq!(mappings[1].specialty, Specialty::Dermatology);
}

#[test]
fn unknown_specialty_is_an_error() {
    let file = write_csv("専門科,施術名\n内科,点滴\n");
    let result = load_taxonomy_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn missing_column_is_an_error() {
    let file = write_csv("専門科\n外科\n");
    assert!(load_taxonomy_csv(file.path()).is_err());
}
