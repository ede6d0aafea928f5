//! Value cards for the card-sorting exercise and the fixed default catalog.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardCategory {
    #[serde(rename = "重要")]
    Important,
    #[serde(rename = "普通")]
    Neutral,
    #[serde(rename = "不重要")]
    Unimportant,
    #[default]
    #[serde(rename = "未分類")]
    Unassigned,
    #[serde(rename = "核心價值觀")]
    Core,
}

impl CardCategory {
    pub const ALL: [CardCategory; 5] = [
        Self::Important,
        Self::Neutral,
        Self::Unimportant,
        Self::Unassigned,
        Self::Core,
    ];

    /// Display color name used by the sorting board.
    pub fn color(self) -> &'static str {
        match self {
            Self::Important => "red",
            Self::Neutral => "yellow",
            Self::Unimportant => "gray",
            Self::Unassigned => "blue",
            Self::Core => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub category: CardCategory,
}

/// Seed catalog: (name, description).
const CATALOG: [(&str, &str); 20] = [
    ("誠信", "做自己說過的事，對他人誠實"),
    ("責任", "願意為自己的行為負責，信守承諾"),
    ("自由", "能夠自主做出選擇，不受他人控制"),
    ("創新", "勇於嘗試新事物，追求創意與改變"),
    ("正義", "追求公平公正，維護他人權益"),
    ("智慧", "追求知識與理解，明智決策"),
    ("勇氣", "面對困難時保持堅強，敢於冒險"),
    ("同理心", "能夠理解並體會他人感受"),
    ("獨立", "能夠獨立思考和行動，不依賴他人"),
    ("和諧", "追求人際關係的和睦與平衡"),
    ("成長", "持續學習與進步，追求自我提升"),
    ("謙遜", "保持謙虛的態度，願意學習"),
    ("寬容", "能夠包容他人的不同與缺點"),
    ("感恩", "懂得感謝他人的幫助與付出"),
    ("堅持", "面對困難時不輕易放棄"),
    ("樂觀", "保持積極正向的生活態度"),
    ("友善", "善待他人，樂於助人"),
    ("專注", "能夠專心致志完成目標"),
    ("效率", "追求高效率的工作方式"),
    ("平衡", "在生活各方面保持平衡"),
];

/// Catalog ids are fixed so a reset restores identical cards.
const CATALOG_ID_BASE: u128 = 0x7661_6c75_6563_6172_6400_0000_0000_0000;

pub const CATALOG_SIZE: usize = CATALOG.len();

/// The default catalog, every card unassigned.
pub fn default_catalog() -> Vec<ValueCard> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, (name, description))| ValueCard {
            id: Uuid::from_u128(CATALOG_ID_BASE + i as u128 + 1),
            name: (*name).to_string(),
            description: (*description).to_string(),
            category: CardCategory::Unassigned,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_stable_and_unassigned() {
        let a = default_catalog();
        let b = default_catalog();
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
        assert!(a.iter().all(|c| c.category == CardCategory::Unassigned));
        let ids: HashSet<Uuid> = a.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn category_serializes_as_label() {
        let mut card = default_catalog().remove(0);
        card.category = CardCategory::Core;
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["category"], "核心價值觀");
    }

    #[test]
    fn missing_category_defaults_to_unassigned() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "name": "誠信",
            "description": "",
        });
        let card: ValueCard = serde_json::from_value(json).unwrap();
        assert_eq!(card.category, CardCategory::Unassigned);
    }
}
