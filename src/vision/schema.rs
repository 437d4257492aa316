//! Fixed instruction and output schema sent with every analysis request.

use serde_json::{json, Value};

use crate::models::OwnerProfile;

pub const USER_PROMPT: &str = "Analyze this image and identify the dog breed.";

pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert cynologist (dog expert) and AI vision assistant.
Your task is to analyze images of dogs and identify their breed with high precision.

In addition to identification, you must infer the "Ideal Owner Profile" (Honden Keuzehulp) for this breed based on the following specific logic:

1. **Housing (Hoe woon je?)**:
   - 'Appartement': Small/low energy dogs suitable for apartments.
   - 'Rijtjeshuis': Medium dogs needing a small garden.
   - 'Vrijstaand': Large/active dogs needing space/large garden.

2. **Experience (Wat is je ervaring?)**:
   - 'Beginner': Easy going, trainable dogs.
   - 'Gemiddeld': Dogs needing some structure.
   - 'Expert': Difficult, dominant, or working breeds.

3. **Activity (Hoe actief ben je?)**:
   - 'Niet echt actief': <1h exercise/day.
   - 'Gemiddeld': 1-1.5h exercise/day.
   - 'Actief': >2h exercise/day.
   - 'Topsport': Needs intensive running/cycling.

4. **Children (Heb je kinderen?)**:
   - 'Ja': Child-friendly breeds.
   - 'Nee': Breeds not recommended for families with children.

5. **Allergies (Allergieën?)**:
   - 'Ja': Hypoallergenic breeds (suitable for allergic owners).
   - 'Nee': Shedding breeds (requires owner with NO allergies).

You must return the data in a strict JSON format.
If the image is NOT a dog, return a low certainty score and indicate it in the description.
"#;

/// Response schema in the service's OpenAPI subset. The enumerations come
/// from [`OwnerProfile::FIELDS`] so the schema and local validation agree.
pub fn response_schema() -> Value {
    let mut characteristics = serde_json::Map::new();
    for (field, legal) in OwnerProfile::FIELDS {
        characteristics.insert(
            (*field).to_string(),
            json!({ "type": "STRING", "enum": legal }),
        );
    }
    let required: Vec<&str> = OwnerProfile::FIELDS.iter().map(|(field, _)| *field).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "breed": { "type": "STRING", "description": "The primary identified breed name." },
            "certainty": { "type": "NUMBER", "description": "Confidence score between 0 and 100." },
            "estimatedWeight": { "type": "STRING", "description": "Estimated weight range in kg (e.g. '25-30 kg')." },
            "estimatedAge": { "type": "STRING", "description": "Estimated age category (e.g. 'Puppy', 'Adult', 'Senior')." },
            "description": { "type": "STRING", "description": "A brief professional description of the visual characteristics observed." },
            "characteristics": {
                "type": "OBJECT",
                "properties": characteristics,
                "required": required,
            },
            "possibleBreeds": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "breed": { "type": "STRING" },
                        "percentage": { "type": "NUMBER" },
                    },
                },
            },
        },
        "required": ["breed", "certainty", "estimatedWeight", "estimatedAge", "description", "possibleBreeds", "characteristics"],
    })
}
