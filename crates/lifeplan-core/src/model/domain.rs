//! The eight fixed life domains shared by goals and the life wheel.

use serde::{Deserialize, Serialize};

/// Life domain tag. Serialized with its display label so stored data keeps
/// the labels used by earlier exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifeDomain {
    #[serde(rename = "健康")]
    Health,
    #[serde(rename = "事業")]
    Career,
    #[serde(rename = "家庭")]
    Family,
    #[serde(rename = "財務")]
    Finance,
    #[serde(rename = "學習")]
    Learning,
    #[serde(rename = "社交")]
    Social,
    #[serde(rename = "休閒")]
    Leisure,
    #[serde(rename = "心靈")]
    Spiritual,
}

/// (tag, stable key, display label). Order is wheel order.
const DOMAIN_TABLE: [(LifeDomain, &str, &str); 8] = [
    (LifeDomain::Health, "health", "健康"),
    (LifeDomain::Career, "career", "事業"),
    (LifeDomain::Family, "family", "家庭"),
    (LifeDomain::Finance, "finance", "財務"),
    (LifeDomain::Learning, "learning", "學習"),
    (LifeDomain::Social, "social", "社交"),
    (LifeDomain::Leisure, "leisure", "休閒"),
    (LifeDomain::Spiritual, "spiritual", "心靈"),
];

impl LifeDomain {
    pub const ALL: [LifeDomain; 8] = [
        Self::Health,
        Self::Career,
        Self::Family,
        Self::Finance,
        Self::Learning,
        Self::Social,
        Self::Leisure,
        Self::Spiritual,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Stable ASCII key (`"health"`, `"career"`, ...).
    pub fn key(self) -> &'static str {
        DOMAIN_TABLE[self.index()].1
    }

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        DOMAIN_TABLE[self.index()].2
    }

    /// Accepts either the ASCII key or the display label.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        DOMAIN_TABLE
            .iter()
            .find(|(_, key, label)| key.eq_ignore_ascii_case(s) || *label == s)
            .map(|(domain, _, _)| *domain)
    }
}

impl std::fmt::Display for LifeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_declaration_order() {
        for (i, domain) in LifeDomain::ALL.iter().enumerate() {
            assert_eq!(DOMAIN_TABLE[i].0, *domain);
        }
    }

    #[test]
    fn parse_accepts_key_and_label() {
        assert_eq!(LifeDomain::parse("Finance"), Some(LifeDomain::Finance));
        assert_eq!(LifeDomain::parse("心靈"), Some(LifeDomain::Spiritual));
        assert_eq!(LifeDomain::parse("hobbies"), None);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&LifeDomain::Learning).unwrap();
        assert_eq!(json, "\"學習\"");
        let back: LifeDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LifeDomain::Learning);
    }
}
