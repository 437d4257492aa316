use std::fmt::Write;

use crate::models::{Activity, Experience, Housing, OwnerProfile, ScanRecord};

const HIGH_CERTAINTY: f64 = 80.0;

fn housing_hint(housing: Housing) -> &'static str {
    match housing {
        Housing::Apartment => "Geen tuin",
        Housing::TerracedHouse => "Kleine tuin",
        Housing::Detached => "Grote tuin",
    }
}

fn experience_hint(experience: Experience) -> &'static str {
    match experience {
        Experience::Beginner => "Eerste hond",
        Experience::Intermediate => "Enige ervaring",
        Experience::Expert => "Ervaren trainer",
    }
}

fn activity_hint(activity: Activity) -> &'static str {
    match activity {
        Activity::Low => "<1u wandelen",
        Activity::Moderate => "1-1.5u wandelen",
        Activity::Active => ">2u wandelen",
        Activity::Athletic => "Intensief sporten",
    }
}

/// (question, value, hint) rows in display order.
fn profile_rows(profile: &OwnerProfile) -> [(&'static str, &'static str, &'static str); 5] {
    let (children, children_hint) = if profile.children.is_yes() {
        ("Kindvriendelijk", "Kinderen in huis")
    } else {
        ("Minder geschikt", "Geen kinderen")
    };
    let (allergy, allergy_hint) = if profile.allergy.is_yes() {
        ("Hypoallergeen", "Geschikt bij allergie")
    } else {
        ("Verhaart", "Niet bij allergie")
    };

    [
        ("Hoe woon je?", profile.housing.as_str(), housing_hint(profile.housing)),
        ("Ervaring", profile.experience.as_str(), experience_hint(profile.experience)),
        ("Activiteit", profile.activity.as_str(), activity_hint(profile.activity)),
        ("Kinderen?", children, children_hint),
        ("Allergieën?", allergy, allergy_hint),
    ]
}

pub fn render(scan: &ScanRecord) -> String {
    let analysis = &scan.analysis;
    let mut out = String::new();

    let _ = writeln!(out, "Scan Details  #{}", scan.id);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", analysis.breed_label);
    let marker = if analysis.certainty > HIGH_CERTAINTY { "" } else { " (uncertain)" };
    let _ = writeln!(out, "{}% Certainty{}", analysis.certainty, marker);
    if let Some(created) = scan.created_at() {
        let _ = writeln!(out, "Scanned {}", created.format("%Y-%m-%d %H:%M UTC"));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Ideal Match Profile");
    for (question, value, hint) in profile_rows(&analysis.owner_profile) {
        let _ = writeln!(out, "  {question:<13} {value:<17} {hint}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Fysieke Kenmerken");
    let _ = writeln!(out, "  Gewicht   {}", analysis.estimated_weight_range);
    let _ = writeln!(out, "  Leeftijd  {}", analysis.estimated_age_category);

    let _ = writeln!(out);
    let _ = writeln!(out, "Expert Analyse");
    let _ = writeln!(out, "  {}", analysis.description);

    if !analysis.alternate_breeds.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Andere mogelijkheden");
        for alternate in &analysis.alternate_breeds {
            let label = alternate.breed_label.as_deref().unwrap_or("");
            let percentage = alternate
                .percentage
                .map(|p| format!("{p}%"))
                .unwrap_or_default();
            let _ = writeln!(out, "  {label:<28} {percentage}");
        }
    }

    out
}
