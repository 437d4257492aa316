//! The "ideal owner" classification attached to every analysis.
//!
//! Each field is a closed enumeration whose serialized form is the Dutch label
//! the analysis service is instructed to emit. The wire labels are also used
//! when validating raw service output, see `vision::response`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Housing {
    #[serde(rename = "Appartement")]
    Apartment,
    #[serde(rename = "Rijtjeshuis")]
    TerracedHouse,
    #[serde(rename = "Vrijstaand")]
    Detached,
}

impl Housing {
    pub const LEGAL: &'static [&'static str] = &["Appartement", "Rijtjeshuis", "Vrijstaand"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Housing::Apartment => "Appartement",
            Housing::TerracedHouse => "Rijtjeshuis",
            Housing::Detached => "Vrijstaand",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Experience {
    Beginner,
    #[serde(rename = "Gemiddeld")]
    Intermediate,
    Expert,
}

impl Experience {
    pub const LEGAL: &'static [&'static str] = &["Beginner", "Gemiddeld", "Expert"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "Beginner",
            Experience::Intermediate => "Gemiddeld",
            Experience::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Activity {
    #[serde(rename = "Niet echt actief")]
    Low,
    #[serde(rename = "Gemiddeld")]
    Moderate,
    #[serde(rename = "Actief")]
    Active,
    #[serde(rename = "Topsport")]
    Athletic,
}

impl Activity {
    pub const LEGAL: &'static [&'static str] = &["Niet echt actief", "Gemiddeld", "Actief", "Topsport"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Low => "Niet echt actief",
            Activity::Moderate => "Gemiddeld",
            Activity::Active => "Actief",
            Activity::Athletic => "Topsport",
        }
    }
}

/// Two-valued answer used for both the children and the allergy question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Suitability {
    #[serde(rename = "Nee")]
    No,
    #[serde(rename = "Ja")]
    Yes,
}

impl Suitability {
    pub const LEGAL: &'static [&'static str] = &["Nee", "Ja"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::No => "Nee",
            Suitability::Yes => "Ja",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Suitability::Yes)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerProfile {
    #[serde(rename = "livingSituation")]
    pub housing: Housing,
    #[serde(rename = "experienceLevel")]
    pub experience: Experience,
    #[serde(rename = "activityLevel")]
    pub activity: Activity,
    #[serde(rename = "childrenCompatible")]
    pub children: Suitability,
    #[serde(rename = "allergyFriendly")]
    pub allergy: Suitability,
}

impl OwnerProfile {
    /// Wire field name paired with its legal values, in display order.
    pub const FIELDS: &'static [(&'static str, &'static [&'static str])] = &[
        ("livingSituation", Housing::LEGAL),
        ("experienceLevel", Experience::LEGAL),
        ("activityLevel", Activity::LEGAL),
        ("childrenCompatible", Suitability::LEGAL),
        ("allergyFriendly", Suitability::LEGAL),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_dutch_labels() {
        let profile: OwnerProfile = serde_json::from_str(
            r#"{
                "livingSituation": "Vrijstaand",
                "experienceLevel": "Beginner",
                "activityLevel": "Niet echt actief",
                "childrenCompatible": "Ja",
                "allergyFriendly": "Nee"
            }"#,
        )
        .unwrap();

        assert_eq!(profile.housing, Housing::Detached);
        assert_eq!(profile.experience, Experience::Beginner);
        assert_eq!(profile.activity, Activity::Low);
        assert!(profile.children.is_yes());
        assert!(!profile.allergy.is_yes());
    }

    #[test]
    fn as_str_matches_legal_values() {
        for value in [Housing::Apartment, Housing::TerracedHouse, Housing::Detached] {
            assert!(Housing::LEGAL.contains(&value.as_str()));
        }
        for value in [Activity::Low, Activity::Moderate, Activity::Active, Activity::Athletic] {
            assert!(Activity::LEGAL.contains(&value.as_str()));
        }
        assert_eq!(Experience::Intermediate.as_str(), "Gemiddeld");
    }

    #[test]
    fn rejects_unknown_label() {
        let result = serde_json::from_str::<Housing>(r#""Kasteel""#);
        assert!(result.is_err());
    }
}
