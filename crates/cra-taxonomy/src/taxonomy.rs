//! The fixed treatment taxonomy.
//!
//! Six specialties, each with a fixed procedure list. Declaration order is
//! significant: when a name appears in more than one list (should not
//! happen with the shipped tables, but custom tables may collide), the
//! earlier-declared node wins.

use serde::{Deserialize, Serialize};

use cra_model::MainCategory;

/// Clinical specialty a taxonomy node or consultation maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Surgery,
    Dermatology,
    HairRemoval,
    Piercing,
    Products,
    Anesthesia,
    Other,
}

impl Specialty {
    pub fn label(self) -> &'static str {
        match self {
            Specialty::Surgery => "外科",
            Specialty::Dermatology => "皮膚科",
            Specialty::HairRemoval => "脱毛",
            Specialty::Piercing => "ピアス",
            Specialty::Products => "物販",
            Specialty::Anesthesia => "麻酔",
            Specialty::Other => "その他",
        }
    }

    /// Parse a specialty from its Japanese table label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "外科" => Some(Specialty::Surgery),
            "皮膚科" => Some(Specialty::Dermatology),
            "脱毛" => Some(Specialty::HairRemoval),
            "ピアス" => Some(Specialty::Piercing),
            "物販" => Some(Specialty::Products),
            "麻酔" => Some(Specialty::Anesthesia),
            "その他" => Some(Specialty::Other),
            _ => None,
        }
    }

    /// Which side of the binary main split this specialty belongs to.
    pub fn main_category(self) -> MainCategory {
        match self {
            Specialty::Surgery | Specialty::Dermatology | Specialty::HairRemoval => {
                MainCategory::Beauty
            }
            Specialty::Piercing
            | Specialty::Products
            | Specialty::Anesthesia
            | Specialty::Other => MainCategory::Other,
        }
    }
}

/// One taxonomy node: a specialty and its known procedure names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub specialty: Specialty,
    pub procedures: Vec<String>,
}

impl TaxonomyNode {
    pub fn contains(&self, name: &str) -> bool {
        self.procedures.iter().any(|p| p == name)
    }
}

/// Built-in taxonomy, in tie-break order: the three beauty specialties
/// first, then the non-treatment nodes.
pub(crate) const DEFAULT_TAXONOMY: &[(Specialty, &[&str])] = &[
    (
        Specialty::Surgery,
        &[
            "二重埋没",
            "二重切開",
            "目頭切開",
            "眼瞼下垂",
            "クマ取り",
            "脂肪吸引",
            "糸リフト",
            "フェイスリフト",
            "鼻形成",
            "小顔形成",
            "豊胸",
        ],
    ),
    (
        Specialty::Dermatology,
        &[
            "シミ取りレーザー",
            "フォトフェイシャル",
            "ピーリング",
            "イオン導入",
            "ダーマペン",
            "ハイフ",
            "ポテンツァ",
            "ボトックス注射",
            "ヒアルロン酸注入",
            "水光注射",
        ],
    ),
    (
        Specialty::HairRemoval,
        &[
            "脱毛",
            "全身脱毛",
            "顔脱毛",
            "VIO脱毛",
            "脇脱毛",
            "医療脱毛",
            "メンズ脱毛",
        ],
    ),
    (
        Specialty::Piercing,
        &["ピアス", "耳ピアス", "軟骨ピアス", "ボディピアス"],
    ),
    (
        Specialty::Products,
        &["化粧品", "スキンケア用品", "サプリメント", "日焼け止め", "美容液"],
    ),
    (
        Specialty::Anesthesia,
        &["麻酔", "笑気麻酔", "麻酔クリーム", "局所麻酔"],
    ),
];

pub(crate) fn default_nodes() -> Vec<TaxonomyNode> {
    DEFAULT_TAXONOMY
        .iter()
        .map(|(specialty, procedures)| TaxonomyNode {
            specialty: *specialty,
            procedures: procedures.iter().map(|p| (*p).to_string()).collect(),
        })
        .collect()
}
