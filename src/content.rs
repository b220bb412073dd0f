use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Embed)]
#[folder = "content"]
struct Assets;

static CASE_STUDIES: LazyLock<Result<Vec<CaseStudy>, ContentError>> =
    LazyLock::new(|| load("case_studies.json"));
static SHOWCASE: LazyLock<Result<Vec<ShowcaseCard>, ContentError>> =
    LazyLock::new(|| load("showcase.json"));
static HISTORY: LazyLock<Result<History, ContentError>> = LazyLock::new(|| load("timeline.json"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("Case study not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse {file}: {reason}")]
    Parse { file: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub stage: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub tagline: String,
    pub client: String,
    pub problem: String,
    pub role: String,
    pub tech: Vec<String>,
    pub process: Vec<ProcessStep>,
    pub images: Vec<ProjectImage>,
    pub metrics: Vec<Metric>,
    pub testimonial: Testimonial,
}

impl CaseStudy {
    pub fn hero_image(&self) -> Option<&ProjectImage> {
        self.images.first()
    }

    pub fn gallery(&self) -> &[ProjectImage] {
        self.images.get(1..).unwrap_or_default()
    }

    /// Distinct metric units, in the order they first appear.
    pub fn metric_groups(&self) -> Vec<&str> {
        let mut units: Vec<&str> = Vec::new();
        for metric in &self.metrics {
            if !units.contains(&metric.unit.as_str()) {
                units.push(&metric.unit);
            }
        }
        units
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Live,
    Source,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseLink {
    pub kind: LinkKind,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseCard {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub link: ShowcaseLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Internship,
    Volunteer,
    Education,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Internship => "Internship",
            EntryKind::Volunteer => "Volunteer",
            EntryKind::Education => "Education",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub role: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct History {
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
}

fn parse<T: DeserializeOwned>(file: &str, data: &[u8]) -> Result<T, ContentError> {
    serde_json::from_slice(data).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn load<T: DeserializeOwned>(file: &str) -> Result<T, ContentError> {
    let asset = Assets::get(file).ok_or_else(|| ContentError::Parse {
        file: file.to_string(),
        reason: "missing from the bundle".to_string(),
    })?;
    let parsed = parse(file, &asset.data);
    if let Err(e) = &parsed {
        log::error!("{e}");
    }
    parsed
}

pub fn case_studies() -> Result<&'static [CaseStudy], ContentError> {
    CASE_STUDIES.as_deref().map_err(Clone::clone)
}

pub fn case_study(slug: &str) -> Result<CaseStudy, ContentError> {
    case_studies()?
        .iter()
        .find(|c| c.slug == slug)
        .cloned()
        .ok_or_else(|| ContentError::NotFound(slug.to_string()))
}

pub fn showcase() -> Result<&'static [ShowcaseCard], ContentError> {
    SHOWCASE.as_deref().map_err(Clone::clone)
}

pub fn history() -> Result<&'static History, ContentError> {
    HISTORY.as_ref().map_err(Clone::clone)
}

/// A metric counter ticking from zero to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub target: f64,
    pub steps: u32,
    pub duration_ms: u32,
}

impl CountUp {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            steps: 60,
            duration_ms: 2000,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.duration_ms / self.steps.max(1)
    }

    pub fn is_done(&self, step: u32) -> bool {
        step >= self.steps
    }

    /// Value shown after `step` ticks. Intermediate values are whole numbers;
    /// the last tick shows the target itself.
    pub fn value_at(&self, step: u32) -> f64 {
        if self.is_done(step) {
            return self.target;
        }
        (self.target / self.steps as f64 * step as f64).round()
    }
}

/// Drop a trailing `.0` so whole values read as integers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_study_lookup() {
        let study = case_study("sleepara").unwrap();
        assert_eq!(study.title, "Sleepara");
        assert!(!study.process.is_empty());
        assert_eq!(study.hero_image(), study.images.first());
        assert_eq!(study.gallery().len(), study.images.len() - 1);
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        assert_eq!(
            case_study("does-not-exist"),
            Err(ContentError::NotFound("does-not-exist".to_string()))
        );
    }

    #[test]
    fn test_slugs_are_unique_and_linked() {
        let studies = case_studies().unwrap();
        let mut slugs = studies.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), studies.len());
        for card in showcase().unwrap() {
            assert!(case_study(&card.slug).is_ok(), "{} has no case study", card.slug);
        }
    }

    #[test]
    fn test_history_loads() {
        let history = history().unwrap();
        assert!(!history.experience.is_empty());
        assert!(history
            .education
            .iter()
            .all(|e| e.kind == EntryKind::Education));
    }

    #[test]
    fn test_parse_error() {
        let err = parse::<Vec<CaseStudy>>("case_studies.json", b"{ not json").unwrap_err();
        assert!(matches!(err, ContentError::Parse { ref file, .. } if file == "case_studies.json"));
    }

    #[test]
    fn test_metric_groups_first_seen_order() {
        let mut study = case_study("arcadia-design").unwrap();
        study.metrics = ["%", "minutes", "%", "monthly"]
            .iter()
            .map(|unit| Metric {
                label: "m".to_string(),
                value: 1.0,
                unit: unit.to_string(),
            })
            .collect();
        assert_eq!(study.metric_groups(), vec!["%", "minutes", "monthly"]);
    }

    #[test]
    fn test_count_up() {
        let counter = CountUp::new(165.0);
        assert_eq!(counter.interval_ms(), 33);
        assert_eq!(counter.value_at(0), 0.0);
        assert_eq!(counter.value_at(30), 83.0);
        assert_eq!(counter.value_at(60), 165.0);

        let fractional = CountUp::new(4.2);
        assert_eq!(fractional.value_at(59), 4.0);
        assert_eq!(fractional.value_at(60), 4.2);
        assert_eq!(format_value(fractional.value_at(60)), "4.2");
        assert_eq!(format_value(165.0), "165");
    }
}
