use crate::models::{
    Activity, AlternateBreed, AnalysisResult, Experience, Housing, OwnerProfile, ScanRecord,
    Suitability,
};

pub(crate) const LABRADOR_JSON: &str = r#"{
    "breed": "Labrador Retriever",
    "certainty": 95,
    "estimatedWeight": "25-32 kg",
    "estimatedAge": "Adult",
    "description": "Short dense coat, otter tail, broad head.",
    "characteristics": {
        "livingSituation": "Vrijstaand",
        "experienceLevel": "Beginner",
        "activityLevel": "Actief",
        "childrenCompatible": "Ja",
        "allergyFriendly": "Nee"
    },
    "possibleBreeds": [
        { "breed": "Golden Retriever", "percentage": 3 },
        { "breed": "Flat-Coated Retriever", "percentage": 2 }
    ]
}"#;

pub(crate) fn labrador() -> AnalysisResult {
    AnalysisResult {
        breed_label: "Labrador Retriever".into(),
        certainty: 95.0,
        estimated_weight_range: "25-32 kg".into(),
        estimated_age_category: "Adult".into(),
        description: "Short dense coat, otter tail, broad head.".into(),
        owner_profile: OwnerProfile {
            housing: Housing::Detached,
            experience: Experience::Beginner,
            activity: Activity::Active,
            children: Suitability::Yes,
            allergy: Suitability::No,
        },
        alternate_breeds: vec![
            AlternateBreed {
                breed_label: Some("Golden Retriever".into()),
                percentage: Some(3.0),
            },
            AlternateBreed {
                breed_label: Some("Flat-Coated Retriever".into()),
                percentage: Some(2.0),
            },
        ],
    }
}

pub(crate) fn record(id: &str) -> ScanRecord {
    ScanRecord {
        id: id.into(),
        timestamp: 1_760_000_000_000,
        image_data: "data:image/jpeg;base64,/9j/4AAQ".into(),
        analysis: labrador(),
    }
}

/// Valid data URL with a tiny fake JPEG payload.
pub(crate) const JPEG_DATA_URL: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
