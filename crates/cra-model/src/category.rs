//! Treatment category model.
//!
//! Every visit resolves to exactly one `(main, sub, procedure)` triple.
//! The main split is binary: `美容` (beauty treatments, countable toward
//! new/existing cohorts) vs `その他` (piercing, product sales, anesthesia —
//! never countable). Classification is total: unmatched names fall back to
//! `その他/その他` with the raw name preserved as the procedure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level treatment grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MainCategory {
    /// 美容 — beauty treatments (surgery, dermatology, hair removal).
    #[serde(rename = "美容")]
    Beauty,
    /// その他 — non-treatment revenue (piercing, products, anesthesia).
    #[serde(rename = "その他")]
    Other,
}

impl MainCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            MainCategory::Beauty => "美容",
            MainCategory::Other => "その他",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved treatment category for a single visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub main: MainCategory,
    /// Second-level grouping (e.g. `外科`, `注入`, `脱毛`).
    pub sub: String,
    /// The concrete procedure or menu name.
    pub procedure: String,
}

impl Category {
    pub fn new(main: MainCategory, sub: impl Into<String>, procedure: impl Into<String>) -> Self {
        Self {
            main,
            sub: sub.into(),
            procedure: procedure.into(),
        }
    }

    /// The total fallback: `その他/その他`, raw name kept as procedure.
    pub fn fallback(procedure: impl Into<String>) -> Self {
        Self::new(MainCategory::Other, "その他", procedure)
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey {
            main: self.main,
            sub: self.sub.clone(),
        }
    }
}

/// Structured aggregation key for category breakdowns.
///
/// Serialized as the string `"{main}/{sub}"` (e.g. `美容/外科`) so category
/// totals stay a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub main: MainCategory,
    pub sub: String,
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let (main, sub) = raw
            .split_once('/')
            .ok_or_else(|| serde::de::Error::custom("expected \"main/sub\" category key"))?;
        let main = match main {
            "美容" => MainCategory::Beauty,
            "その他" => MainCategory::Other,
            other => return Err(serde::de::Error::custom(format!("unknown main category: {other}"))),
        };
        Ok(CategoryKey {
            main,
            sub: sub.to_string(),
        })
    }
}

/// Patient cohort assignment for a single visit.
///
/// `Other` is terminal: visits in the `その他` main category never count
/// toward the new/existing cohorts regardless of the patient's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientType {
    New,
    Existing,
    Other,
}
