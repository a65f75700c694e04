//! Read-only registry bundling both lookup tables.
//!
//! The engine never computes these tables; it receives them as versioned
//! configuration. Deployments either use the built-in defaults or load
//! replacement tables from CSV files exported by the operations team.

use std::path::Path;

use crate::consultation::{ConsultationMapping, default_consultations};
use crate::error::TaxonomyError;
use crate::taxonomy::{Specialty, TaxonomyNode, default_nodes};

#[derive(Debug, Clone)]
pub struct TaxonomyRegistry {
    /// Taxonomy nodes in tie-break order.
    pub nodes: Vec<TaxonomyNode>,
    /// Consultation mappings in table order.
    pub consultations: Vec<ConsultationMapping>,
}

impl Default for TaxonomyRegistry {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            consultations: default_consultations(),
        }
    }
}

impl TaxonomyRegistry {
    /// Registry with custom tables (e.g. loaded from CSV).
    pub fn new(nodes: Vec<TaxonomyNode>, consultations: Vec<ConsultationMapping>) -> Self {
        Self {
            nodes,
            consultations,
        }
    }

    /// First node (in declaration order) whose procedure list contains the
    /// exact name.
    pub fn node_for_procedure(&self, name: &str) -> Option<&TaxonomyNode> {
        self.nodes.iter().find(|node| node.contains(name))
    }

    /// Exact-name consultation lookup, in table order.
    pub fn consultation_exact(&self, name: &str) -> Option<&ConsultationMapping> {
        self.consultations.iter().find(|entry| entry.name == name)
    }

    pub fn procedure_count(&self) -> usize {
        self.nodes.iter().map(|node| node.procedures.len()).sum()
    }
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().trim_matches('\u{feff}') == name)
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_specialty(label: &str) -> Result<Specialty, TaxonomyError> {
    Specialty::from_label(label).ok_or_else(|| TaxonomyError::UnknownSpecialty {
        label: label.to_string(),
    })
}

/// Load taxonomy nodes from a CSV with `専門科` and `施術名` columns, one
/// row per procedure. Node order follows first appearance of each
/// specialty in the file.
pub fn load_taxonomy_csv(path: &Path) -> Result<Vec<TaxonomyNode>, TaxonomyError> {
    let bytes = std::fs::read(path).map_err(|e| TaxonomyError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| TaxonomyError::csv(path, e.to_string()))?
        .clone();

    let idx_specialty = header_index(&headers, "専門科");
    let idx_procedure = header_index(&headers, "施術名");

    let mut nodes: Vec<TaxonomyNode> = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| TaxonomyError::csv(path, e.to_string()))?;
        let specialty_label = get_string(&row, idx_specialty)
            .ok_or_else(|| TaxonomyError::csv(path, "missing 専門科"))?;
        let procedure = get_string(&row, idx_procedure)
            .ok_or_else(|| TaxonomyError::csv(path, "missing 施術名"))?;
        let specialty = parse_specialty(&specialty_label)?;

        match nodes.iter_mut().find(|node| node.specialty == specialty) {
            Some(node) => {
                if !node.contains(&procedure) {
                    node.procedures.push(procedure);
                }
            }
            None => nodes.push(TaxonomyNode {
                specialty,
                procedures: vec![procedure],
            }),
        }
    }
    Ok(nodes)
}

/// Load consultation mappings from a CSV with `相談メニュー名`, `専門科`,
/// `サブカテゴリ`, and optional `要手動分類` columns.
pub fn load_consultations_csv(path: &Path) -> Result<Vec<ConsultationMapping>, TaxonomyError> {
    let bytes = std::fs::read(path).map_err(|e| TaxonomyError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| TaxonomyError::csv(path, e.to_string()))?
        .clone();

    let idx_name = header_index(&headers, "相談メニュー名");
    let idx_specialty = header_index(&headers, "専門科");
    let idx_subcategory = header_index(&headers, "サブカテゴリ");
    let idx_manual = header_index(&headers, "要手動分類");

    let mut results = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| TaxonomyError::csv(path, e.to_string()))?;
        let name = get_string(&row, idx_name)
            .ok_or_else(|| TaxonomyError::csv(path, "missing 相談メニュー名"))?;
        let specialty_label = get_string(&row, idx_specialty)
            .ok_or_else(|| TaxonomyError::csv(path, "missing 専門科"))?;
        let subcategory = get_string(&row, idx_subcategory)
            .ok_or_else(|| TaxonomyError::csv(path, "missing サブカテゴリ"))?;
        let manual = get_string(&row, idx_manual)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        results.push(ConsultationMapping {
            name,
            specialty: parse_specialty(&specialty_label)?,
            subcategory,
            requires_manual_classification: manual,
        });
    }
    Ok(results)
}
