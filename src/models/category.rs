use serde::{Deserialize, Serialize};

/// Every service category the platform lists. Closed set so the bio
/// suggestion lookup below is total.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, FromFormField)]
pub enum ServiceCategory {
    #[field(value = "Plumbing")]
    #[serde(rename = "Plumbing")]
    Plumbing,
    #[field(value = "Electrical")]
    #[serde(rename = "Electrical")]
    Electrical,
    #[field(value = "Cleaning")]
    #[serde(rename = "Cleaning")]
    Cleaning,
    #[field(value = "Carpentry")]
    #[serde(rename = "Carpentry")]
    Carpentry,
    #[field(value = "Painting")]
    #[serde(rename = "Painting")]
    Painting,
    #[field(value = "AC Repair")]
    #[serde(rename = "AC Repair")]
    AcRepair,
    #[field(value = "Pest Control")]
    #[serde(rename = "Pest Control")]
    PestControl,
    #[field(value = "Appliance Repair")]
    #[serde(rename = "Appliance Repair")]
    ApplianceRepair,
}

impl ServiceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Electrical => "Electrical",
            ServiceCategory::Cleaning => "Cleaning",
            ServiceCategory::Carpentry => "Carpentry",
            ServiceCategory::Painting => "Painting",
            ServiceCategory::AcRepair => "AC Repair",
            ServiceCategory::PestControl => "Pest Control",
            ServiceCategory::ApplianceRepair => "Appliance Repair",
        }
    }

    /// Categories offered in the profile form's profession dropdown.
    pub const PROFESSIONS: [ServiceCategory; 4] = [
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Carpentry,
        ServiceCategory::AcRepair,
    ];

    /// Bio templates for the category, with `{name}` placeholders. Total:
    /// categories without curated copy get an empty slice, never a miss.
    pub fn suggestion_templates(&self) -> &'static [&'static str] {
        match self {
            ServiceCategory::Plumbing => &[
                "Hi, I am {name}, a skilled plumber with experience in leak repairs and fittings.",
                "{name} here! I specialize in bathroom, kitchen, and pipeline plumbing services.",
                "Reliable and quick plumbing service by {name} for homes and offices.",
            ],
            ServiceCategory::Electrical => &[
                "Hello, I’m {name}, an experienced electrician for home wiring and repairs.",
                "{name} provides safe and efficient electrical services at affordable prices.",
                "Expert in electrical installation, maintenance, and fault fixing – {name}.",
            ],
            ServiceCategory::Carpentry => &[
                "I’m {name}, a professional carpenter specializing in furniture and fittings.",
                "{name} offers quality woodwork, repairs, and custom carpentry solutions.",
                "Trusted carpentry services for homes and offices by {name}.",
            ],
            ServiceCategory::AcRepair => &[
                "Hi, I’m {name}, providing AC repair, servicing, and installation.",
                "{name} ensures fast and reliable AC maintenance and cooling solutions.",
                "Expert AC technician {name} for all cooling needs.",
            ],
            ServiceCategory::Cleaning
            | ServiceCategory::Painting
            | ServiceCategory::PestControl
            | ServiceCategory::ApplianceRepair => &[],
        }
    }

    /// Suggestions with the provider's name substituted in. Falls back to
    /// "I" when the name field is still empty, as the form does.
    pub fn suggestions(&self, name: &str) -> Vec<String> {
        let name = if name.trim().is_empty() { "I" } else { name.trim() };
        self.suggestion_templates()
            .iter()
            .map(|t| t.replace("{name}", name))
            .collect()
    }
}

/// Appends a suggestion to the bio unless the exact text is already
/// present, so repeated chip clicks never duplicate.
pub fn append_suggestion(bio: &str, suggestion: &str) -> String {
    if bio.contains(suggestion) {
        return bio.to_string();
    }
    if bio.trim().is_empty() {
        suggestion.to_string()
    } else {
        format!("{} {}", bio.trim(), suggestion)
    }
}

/// Suggestions for the category that the current bio doesn't already
/// contain — what the form offers as one-click chips.
pub fn insertable_suggestions(category: ServiceCategory, name: &str, bio: &str) -> Vec<String> {
    category
        .suggestions(name)
        .into_iter()
        .filter(|s| !bio.contains(s.as_str()))
        .collect()
}

/// Service areas offered in the profile form.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, FromFormField)]
pub enum ServiceArea {
    Wakad,
    Hinjewadi,
    Baner,
    Hadapsar,
}

impl ServiceArea {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceArea::Wakad => "Wakad",
            ServiceArea::Hinjewadi => "Hinjewadi",
            ServiceArea::Baner => "Baner",
            ServiceArea::Hadapsar => "Hadapsar",
        }
    }

    pub const ALL: [ServiceArea; 4] = [
        ServiceArea::Wakad,
        ServiceArea::Hinjewadi,
        ServiceArea::Baner,
        ServiceArea::Hadapsar,
    ];
}
