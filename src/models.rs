use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Technique {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueCategory {
    Sweep,
    Pass,
    Submission,
}

impl TechniqueCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sweep => "SWEEP",
            Self::Pass => "PASS",
            Self::Submission => "SUBMISSION",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Guard {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub execution: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub athletes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweeps: Option<Vec<Technique>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<Vec<Technique>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<Technique>>,
}

impl Guard {
    /// Sweeps, then passes, then submissions, in catalog order.
    pub fn techniques(&self) -> impl Iterator<Item = (TechniqueCategory, &Technique)> {
        tagged(TechniqueCategory::Sweep, &self.sweeps)
            .chain(tagged(TechniqueCategory::Pass, &self.passes))
            .chain(tagged(TechniqueCategory::Submission, &self.submissions))
    }

    pub fn technique_id(&self, technique: &Technique) -> String {
        technique_id(self.id, &technique.name)
    }
}

fn tagged(
    category: TechniqueCategory,
    list: &Option<Vec<Technique>>,
) -> impl Iterator<Item = (TechniqueCategory, &Technique)> {
    list.iter().flatten().map(move |technique| (category, technique))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Signatures {
    #[serde(default)]
    pub guard: String,
    #[serde(default)]
    pub sweep: String,
    #[serde(default)]
    pub pass: String,
    #[serde(default)]
    pub submission: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Athlete {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub signatures: Signatures,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub guards: Vec<Guard>,
    #[serde(default)]
    pub athletes: Vec<Athlete>,
}

impl Catalog {
    pub fn guard(&self, id: u32) -> Option<&Guard> {
        self.guards.iter().find(|guard| guard.id == id)
    }
}

/// Composite progress key for a technique under a guard.
pub fn technique_id(guard_id: u32, technique_name: &str) -> String {
    format!("{guard_id}-{technique_name}")
}

/// Skill level assigned to a technique. `None` is the absence of an entry and
/// is never written to a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MasteryStatus {
    #[default]
    None,
    Bad,
    Learning,
    Average,
    Mastered,
}

impl MasteryStatus {
    pub const ASSIGNABLE: [MasteryStatus; 4] = [
        MasteryStatus::Bad,
        MasteryStatus::Learning,
        MasteryStatus::Average,
        MasteryStatus::Mastered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bad => "bad",
            Self::Learning => "learning",
            Self::Average => "average",
            Self::Mastered => "mastered",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Not set",
            Self::Bad => "Bad",
            Self::Learning => "Learning",
            Self::Average => "Average",
            Self::Mastered => "Mastered",
        }
    }

    /// Status to store when the user clicks `clicked` while `self` is active:
    /// clicking the active status clears it.
    pub fn toggled(self, clicked: MasteryStatus) -> MasteryStatus {
        if self == clicked {
            MasteryStatus::None
        } else {
            clicked
        }
    }
}

impl fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status '{}': expected none, bad, learning, average or mastered",
            self.0
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for MasteryStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "bad" => Ok(Self::Bad),
            "learning" => Ok(Self::Learning),
            "average" => Ok(Self::Average),
            "mastered" => Ok(Self::Mastered),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// The persisted progress blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressRecord {
    #[serde(default)]
    pub techniques: BTreeMap<String, MasteryStatus>,
    #[serde(rename = "lastVisit", default)]
    pub last_visit: String,
}

impl ProgressRecord {
    pub fn new(last_visit: impl Into<String>) -> Self {
        Self {
            techniques: BTreeMap::new(),
            last_visit: last_visit.into(),
        }
    }

    pub fn status(&self, technique_id: &str) -> MasteryStatus {
        self.techniques
            .get(technique_id)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub learning: u64,
    pub average: u64,
    pub mastered: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Highlight {
    pub technique: Technique,
    pub category: TechniqueCategory,
    pub guard_name: String,
    pub guard_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub technique_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub technique_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub technique_id: String,
    pub status: MasteryStatus,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub guard_id: u32,
    pub technique: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    pub confirm: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub section: Option<String>,
    pub guard: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchLinkQuery {
    pub technique: String,
    pub guard: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchLinkResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuardCompletion {
    pub guard_id: u32,
    pub guard_name: String,
    pub completion: u32,
}

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub last_visit: String,
    pub counts: StatusCounts,
    pub guards: Vec<GuardCompletion>,
    pub highlights: Vec<Highlight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn techniques_are_ordered_sweeps_passes_submissions() {
        let guard = Guard {
            id: 3,
            name: "Spider".into(),
            submissions: Some(vec![Technique {
                name: "Triangle".into(),
                ..Default::default()
            }]),
            sweeps: Some(vec![Technique {
                name: "Lasso Sweep".into(),
                ..Default::default()
            }]),
            passes: Some(vec![Technique {
                name: "Knee Cut".into(),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let names: Vec<_> = guard
            .techniques()
            .map(|(category, technique)| (category, technique.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                (TechniqueCategory::Sweep, "Lasso Sweep"),
                (TechniqueCategory::Pass, "Knee Cut"),
                (TechniqueCategory::Submission, "Triangle"),
            ]
        );
        let (_, first) = guard.techniques().next().unwrap();
        assert_eq!(guard.technique_id(first), "3-Lasso Sweep");
    }

    #[test]
    fn clicking_active_status_clears_it() {
        assert_eq!(
            MasteryStatus::Learning.toggled(MasteryStatus::Learning),
            MasteryStatus::None
        );
        assert_eq!(
            MasteryStatus::Learning.toggled(MasteryStatus::Mastered),
            MasteryStatus::Mastered
        );
        assert_eq!(
            MasteryStatus::None.toggled(MasteryStatus::Bad),
            MasteryStatus::Bad
        );
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Mastered".parse::<MasteryStatus>(), Ok(MasteryStatus::Mastered));
        assert_eq!(" none ".parse::<MasteryStatus>(), Ok(MasteryStatus::None));
        assert!("expert".parse::<MasteryStatus>().is_err());
    }

    #[test]
    fn record_uses_camel_case_last_visit() {
        let mut record = ProgressRecord::new("2026-01-05");
        record
            .techniques
            .insert("1-Armbar".into(), MasteryStatus::Learning);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["lastVisit"], "2026-01-05");
        assert_eq!(json["techniques"]["1-Armbar"], "learning");
    }

    #[test]
    fn catalog_defaults_missing_lists() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"guards":[{"id":1,"name":"Closed Guard"}]}"#).unwrap();
        assert!(catalog.athletes.is_empty());
        let guard = catalog.guard(1).unwrap();
        assert!(guard.sweeps.is_none());
        assert_eq!(guard.techniques().count(), 0);
        assert!(catalog.guard(2).is_none());
    }
}
