//! Static catalog of every calculator and dispatch by score id.

use api_shared::{ScoreInfo, ScoreResponse};

use crate::calculators::{
    cardiology, emergency, gastroenterology, geriatrics, hematology, nephrology, neurology,
    oncology, pulmonology,
};
use crate::error::{ScoreError, ScoreResult};

/// Medical specialty a calculator is filed under, used as the `category`
/// filter on the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialty {
    Cardiology,
    Emergency,
    Gastroenterology,
    Geriatrics,
    Hematology,
    Nephrology,
    Neurology,
    Oncology,
    Pulmonology,
}

impl Specialty {
    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Cardiology => "cardiology",
            Specialty::Emergency => "emergency",
            Specialty::Gastroenterology => "gastroenterology",
            Specialty::Geriatrics => "geriatrics",
            Specialty::Hematology => "hematology",
            Specialty::Nephrology => "nephrology",
            Specialty::Neurology => "neurology",
            Specialty::Oncology => "oncology",
            Specialty::Pulmonology => "pulmonology",
        }
    }
}

/// Identity and descriptive text of one calculator.
#[derive(Debug, Clone, Copy)]
pub struct ScoreMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub specialty: Specialty,
    pub description: &'static str,
}

/// Catalog row: metadata plus the JSON-in, response-out entry point.
pub struct CalculatorEntry {
    pub meta: ScoreMeta,
    pub apply: fn(serde_json::Value) -> ScoreResult<ScoreResponse>,
}

macro_rules! entry {
    ($module:path) => {{
        use $module as m;
        CalculatorEntry {
            meta: m::META,
            apply: m::apply,
        }
    }};
}

pub static CATALOG: &[CalculatorEntry] = &[
    entry!(cardiology::cha2ds2_va),
    entry!(cardiology::chads2),
    entry!(cardiology::killip),
    entry!(cardiology::ldl_calculated),
    entry!(cardiology::maggic),
    entry!(emergency::covid_gram),
    entry!(emergency::lrinec),
    entry!(emergency::mess),
    entry!(emergency::rule_of_nines),
    entry!(gastroenterology::child_pugh),
    entry!(gastroenterology::maddrey),
    entry!(geriatrics::charlson),
    entry!(geriatrics::gds15),
    entry!(hematology::rpi),
    entry!(hematology::wpss),
    entry!(nephrology::free_water_deficit),
    entry!(neurology::cpp),
    entry!(neurology::trunk_impairment),
    entry!(oncology::gail),
    entry!(oncology::leibovich),
    entry!(pulmonology::decaf),
    entry!(pulmonology::winters),
];

pub fn find(score_id: &str) -> Option<&'static CalculatorEntry> {
    CATALOG.iter().find(|entry| entry.meta.id == score_id)
}

/// Runs the calculator registered under `score_id` against a raw JSON body.
pub fn calculate(score_id: &str, input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    let entry = find(score_id).ok_or_else(|| ScoreError::UnknownScore(score_id.to_string()))?;
    tracing::debug!("dispatching {}", score_id);
    (entry.apply)(input)
}

/// Lists catalog entries, optionally filtered by specialty and by a keyword
/// matched against id, title, and description. Both filters are
/// case-insensitive.
pub fn list(category: Option<&str>, search: Option<&str>) -> Vec<ScoreInfo> {
    let category = category.map(str::to_lowercase);
    let search = search.map(str::to_lowercase);

    CATALOG
        .iter()
        .filter(|entry| match &category {
            Some(c) => entry.meta.specialty.as_str() == c,
            None => true,
        })
        .filter(|entry| match &search {
            Some(needle) => {
                entry.meta.id.contains(needle.as_str())
                    || entry.meta.title.to_lowercase().contains(needle.as_str())
                    || entry
                        .meta
                        .description
                        .to_lowercase()
                        .contains(needle.as_str())
            }
            None => true,
        })
        .map(|entry| ScoreInfo {
            id: entry.meta.id.to_string(),
            title: entry.meta.title.to_string(),
            category: entry.meta.specialty.as_str().to_string(),
            description: entry.meta.description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_calculators() {
        assert_eq!(CATALOG.len(), 22);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = CATALOG.iter().map(|e| e.meta.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_calculate_dispatches_by_id() {
        let res = calculate(
            "maddrey_discriminant_function",
            serde_json::json!({
                "patient_pt": 18.0,
                "control_pt": 12.0,
                "total_bilirubin": 10.5,
            }),
        )
        .unwrap();
        assert_eq!(res.unit, "points");
    }

    #[test]
    fn test_calculate_unknown_id() {
        let err = calculate("no_such_score", serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ScoreError::UnknownScore(ref id) if id == "no_such_score"));
    }

    #[test]
    fn test_list_unfiltered_returns_everything() {
        assert_eq!(list(None, None).len(), CATALOG.len());
    }

    #[test]
    fn test_list_filters_by_category_case_insensitively() {
        let scores = list(Some("Cardiology"), None);
        assert_eq!(scores.len(), 5);
        assert!(scores.iter().all(|s| s.category == "cardiology"));
    }

    #[test]
    fn test_list_searches_titles() {
        let scores = list(None, Some("depression"));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].id, "gds_15");
    }

    #[test]
    fn test_list_combines_filters() {
        let scores = list(Some("oncology"), Some("breast"));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].id, "gail_model_breast_cancer_risk");
    }
}
