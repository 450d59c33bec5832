//! Legal category taxonomy, the tag parser for generated answers, and the
//! keyword classifier used on raw questions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FamilyLaw,
    CriminalLaw,
    PropertyRentLaw,
    LabourEmploymentLaw,
    CyberLaw,
    MotorVehicleLaw,
    WomensRights,
    MentalHealthLaw,
    Other,
}

impl Category {
    /// Keyword classifier order: the first category with a matching
    /// keyword wins.
    pub const ALL: [Category; 9] = [
        Category::FamilyLaw,
        Category::CriminalLaw,
        Category::PropertyRentLaw,
        Category::LabourEmploymentLaw,
        Category::CyberLaw,
        Category::MotorVehicleLaw,
        Category::WomensRights,
        Category::MentalHealthLaw,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FamilyLaw => "Family Law",
            Category::CriminalLaw => "Criminal Law",
            Category::PropertyRentLaw => "Property / Rent Law",
            Category::LabourEmploymentLaw => "Labour / Employment Law",
            Category::CyberLaw => "Cyber Law",
            Category::MotorVehicleLaw => "Motor Vehicle Law",
            Category::WomensRights => "Women's Rights",
            Category::MentalHealthLaw => "Mental Health Law",
            Category::Other => "Other",
        }
    }

    /// Lower-case keywords matched as substrings of a question. Also used by
    /// callers to match lawyer specialisations. Empty for `Other`.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::FamilyLaw => &["divorce", "family", "marriage", "custody", "alimony"],
            Category::CriminalLaw => &["criminal", "bail", "fir", "ipc", "crime"],
            Category::PropertyRentLaw => &["property", "rent", "real estate", "tenant", "lease"],
            Category::LabourEmploymentLaw => {
                &["labour", "employment", "termination", "wages", "pf"]
            }
            Category::CyberLaw => &["cyber", "online", "digital", "it act", "phishing"],
            Category::MotorVehicleLaw => &["motor", "vehicle", "accident", "mv act", "traffic"],
            Category::WomensRights => &["women", "sexual", "harassment", "dowry"],
            Category::MentalHealthLaw => &["mental", "health", "disability"],
            Category::Other => &[],
        }
    }

    /// Case-insensitive lookup by display name or a known synonym.
    pub fn from_label(label: &str) -> Option<Category> {
        let folded = label.trim().to_lowercase();
        match folded.as_str() {
            "property law" => return Some(Category::PropertyRentLaw),
            "employment law" => return Some(Category::LabourEmploymentLaw),
            _ => {}
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == folded)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category tag as read from a generated answer. Values outside the
/// taxonomy are kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLabel {
    Known(Category),
    Unlisted(String),
}

impl CategoryLabel {
    pub fn is_other(&self) -> bool {
        matches!(self, CategoryLabel::Known(Category::Other))
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Known(c) => f.write_str(c.as_str()),
            CategoryLabel::Unlisted(s) => f.write_str(s),
        }
    }
}

impl Serialize for CategoryLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    /// Parsed from the generated answer's tag line.
    Generated,
    /// Inferred from the question by keyword lists.
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCategory {
    pub label: CategoryLabel,
    pub source: CategorySource,
}

static CATEGORY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Detected Legal Category:[*_\s]*([A-Za-z /'&-]+)")
        .expect("category tag pattern is valid")
});

/// Reads the `Detected Legal Category: <value>` line from an answer.
/// Emphasis markers around the value are skipped. No tag gives `Other`.
pub fn extract_category(answer: &str) -> CategoryLabel {
    let Some(raw) = CATEGORY_TAG
        .captures(answer)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
    else {
        return CategoryLabel::Known(Category::Other);
    };
    match Category::from_label(raw) {
        Some(category) => CategoryLabel::Known(category),
        None if raw.trim().is_empty() => CategoryLabel::Known(Category::Other),
        None => CategoryLabel::Unlisted(raw.trim().to_string()),
    }
}

/// Keyword classifier over the user's question.
pub fn infer_category(question: &str) -> Category {
    let text = question.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|c| c.keywords().iter().any(|k| text.contains(k)))
        .unwrap_or(Category::Other)
}

/// Generated tag first; the keyword classifier runs when there was no
/// generated answer or its tag resolved to `Other`.
pub fn resolve(generated: Option<&str>, question: &str) -> ResolvedCategory {
    if let Some(label) = generated.map(extract_category) {
        if !label.is_other() {
            return ResolvedCategory {
                label,
                source: CategorySource::Generated,
            };
        }
    }
    ResolvedCategory {
        label: CategoryLabel::Known(infer_category(question)),
        source: CategorySource::Keyword,
    }
}
