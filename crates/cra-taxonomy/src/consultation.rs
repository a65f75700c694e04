//! The consultation-menu mapping table.
//!
//! Counseling visits are booked under menu names like `二重のご相談`; the
//! table maps each known name to the specialty the consultation is about
//! and the subcategory it should report under. Entries flagged
//! `requires_manual_classification` are ones the clinic staff re-check by
//! hand — the flag is informational, the entry still resolves
//! deterministically to its listed subcategory.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Specialty;

/// One known consultation-menu name and its mapping target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationMapping {
    pub name: String,
    pub specialty: Specialty,
    pub subcategory: String,
    pub requires_manual_classification: bool,
}

pub(crate) const DEFAULT_CONSULTATIONS: &[(&str, Specialty, &str, bool)] = &[
    ("二重のご相談", Specialty::Surgery, "二重", false),
    ("目元のご相談", Specialty::Surgery, "目元", false),
    ("クマ取りのご相談", Specialty::Surgery, "クマ取り", false),
    ("眼瞼下垂のご相談", Specialty::Surgery, "目元", false),
    ("鼻のご相談", Specialty::Surgery, "鼻", false),
    ("小顔のご相談", Specialty::Surgery, "小顔", false),
    ("脂肪吸引のご相談", Specialty::Surgery, "痩身", false),
    ("豊胸のご相談", Specialty::Surgery, "豊胸", false),
    ("糸リフトのご相談", Specialty::Surgery, "リフト", false),
    ("フェイスリフトのご相談", Specialty::Surgery, "リフト", false),
    ("ボトックスのご相談", Specialty::Dermatology, "注入", false),
    ("ヒアルロン酸のご相談", Specialty::Dermatology, "注入", false),
    ("水光注射のご相談", Specialty::Dermatology, "注入", false),
    ("シミのご相談", Specialty::Dermatology, "シミ", false),
    ("肝斑のご相談", Specialty::Dermatology, "シミ", false),
    ("ニキビのご相談", Specialty::Dermatology, "ニキビ", false),
    ("ほくろのご相談", Specialty::Dermatology, "ほくろ", false),
    ("毛穴のご相談", Specialty::Dermatology, "毛穴", false),
    ("たるみのご相談", Specialty::Dermatology, "たるみ", false),
    ("肌質改善のご相談", Specialty::Dermatology, "肌質改善", true),
    ("アートメイクのご相談", Specialty::Dermatology, "アートメイク", true),
    ("医療脱毛のご相談", Specialty::HairRemoval, "脱毛", false),
    ("全身脱毛のご相談", Specialty::HairRemoval, "脱毛", false),
    ("VIO脱毛のご相談", Specialty::HairRemoval, "脱毛", false),
    ("メンズ脱毛のご相談", Specialty::HairRemoval, "脱毛", false),
    ("ピアスのご相談", Specialty::Piercing, "ピアス", false),
    ("その他のご相談", Specialty::Other, "その他", true),
];

pub(crate) fn default_consultations() -> Vec<ConsultationMapping> {
    DEFAULT_CONSULTATIONS
        .iter()
        .map(
            |(name, specialty, subcategory, manual)| ConsultationMapping {
                name: (*name).to_string(),
                specialty: *specialty,
                subcategory: (*subcategory).to_string(),
                requires_manual_classification: *manual,
            },
        )
        .collect()
}
