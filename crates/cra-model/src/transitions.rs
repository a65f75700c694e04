//! Cross-sell transition matrices.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Square matrix of patient category transitions.
///
/// The axis is the set of category labels actually observed in the data,
/// sorted for determinism — two runs over different date windows may
/// produce differently-shaped matrices, which is expected. Cell `[i][j]`
/// counts patients whose first-visit category was `labels[i]` and whose
/// next (or any later) visit category was `labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl TransitionMatrix {
    /// Build a zeroed matrix over the observed label set.
    pub fn from_labels(labels: &BTreeSet<String>) -> Self {
        let labels: Vec<String> = labels.iter().cloned().collect();
        let size = labels.len();
        Self {
            labels,
            counts: vec![vec![0; size]; size],
        }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn increment(&mut self, from: &str, to: &str) {
        if let (Some(i), Some(j)) = (self.index_of(from), self.index_of(to)) {
            self.counts[i][j] += 1;
        }
    }

    pub fn get(&self, from: &str, to: &str) -> u64 {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// Sum of one origin row.
    pub fn row_total(&self, from: &str) -> u64 {
        self.index_of(from)
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The pair of matrices the cross-sell analyzer produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossSellReport {
    /// First visit → immediately-next distinct-day visit.
    pub immediate_next: TransitionMatrix,
    /// First visit → every later distinct-day visit.
    pub any_later: TransitionMatrix,
}
