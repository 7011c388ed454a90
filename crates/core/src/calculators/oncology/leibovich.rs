//! Leibovich 2018 prognostic model for clear cell renal cell carcinoma.
//!
//! Produces two sums over shared clinicopathologic features: a
//! progression-free survival (PFS) score and a cancer-specific survival
//! (CSS) score. The overall stage is driven by the worse of the two.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::{require_int_range, require_range};

pub const META: ScoreMeta = ScoreMeta {
    id: "leibovich_2018_rcc",
    title: "Leibovich 2018 Model for Renal Cell Carcinoma",
    specialty: Specialty::Oncology,
    description: "Post-nephrectomy prognostic scores for progression-free and \
                  cancer-specific survival in clear cell RCC.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EcogStatus {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "≥1")]
    OneOrMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurgicalMargins {
    Negative,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TumorGrade {
    #[serde(rename = "1")]
    G1,
    #[serde(rename = "2")]
    G2,
    #[serde(rename = "3")]
    G3,
    #[serde(rename = "4")]
    G4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TumorThrombus {
    None,
    Level0,
    #[serde(rename = "level_1_4")]
    Level14,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeibovichRequest {
    pub age: i64,
    pub ecog_status: EcogStatus,
    pub constitutional_symptoms: bool,
    pub adrenalectomy: bool,
    pub surgical_margins: SurgicalMargins,
    pub tumor_grade: TumorGrade,
    pub coagulative_necrosis: bool,
    pub sarcomatoid_differentiation: bool,
    pub tumor_size: f64,
    pub perinephric_invasion: bool,
    pub tumor_thrombus: TumorThrombus,
    pub extension_beyond_kidney: bool,
}

fn grade_points(grade: TumorGrade) -> i32 {
    match grade {
        TumorGrade::G1 => 0,
        TumorGrade::G2 => 2,
        TumorGrade::G3 => 3,
        TumorGrade::G4 => 4,
    }
}

fn thrombus_points(thrombus: TumorThrombus) -> i32 {
    match thrombus {
        TumorThrombus::None => 0,
        TumorThrombus::Level0 => 1,
        TumorThrombus::Level14 => 2,
    }
}

fn size_points(size_cm: f64, css: bool) -> i32 {
    if size_cm <= 4.0 {
        0
    } else if size_cm <= 7.0 {
        3
    } else if size_cm <= 10.0 {
        4
    } else if css {
        // the CSS table tops out at 4 points
        4
    } else {
        5
    }
}

fn flag(present: bool, points: i32) -> i32 {
    if present {
        points
    } else {
        0
    }
}

fn risk_category(score: i32) -> &'static str {
    match score {
        s if s <= 4 => "Low Risk",
        s if s <= 9 => "Intermediate Risk",
        s if s <= 14 => "High Risk",
        _ => "Very High Risk",
    }
}

fn interpretation(score: i32, outcome: &str) -> String {
    match score {
        s if s <= 4 => format!("Low risk of {outcome}. Standard surveillance recommended."),
        s if s <= 9 => format!(
            "Intermediate risk of {outcome}. Enhanced surveillance may be considered."
        ),
        s if s <= 14 => format!(
            "High risk of {outcome}. Intensive surveillance and adjuvant therapy \
             consideration recommended."
        ),
        _ => format!("Very high risk of {outcome}. Aggressive management warranted."),
    }
}

pub fn evaluate(req: &LeibovichRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 18, 100, "years")?;
    require_range("tumor_size", req.tumor_size, 0.5, 25.0, "cm")?;

    let pfs_score = flag(req.constitutional_symptoms, 1)
        + grade_points(req.tumor_grade)
        + flag(req.coagulative_necrosis, 2)
        + size_points(req.tumor_size, false)
        + flag(req.perinephric_invasion, 1)
        + thrombus_points(req.tumor_thrombus)
        + flag(req.extension_beyond_kidney, 2);

    let css_score = flag(req.age >= 60, 1)
        + if matches!(req.ecog_status, EcogStatus::OneOrMore) { 2 } else { 0 }
        + flag(req.constitutional_symptoms, 1)
        + flag(req.adrenalectomy, 1)
        + if matches!(req.surgical_margins, SurgicalMargins::Positive) { 1 } else { 0 }
        + grade_points(req.tumor_grade)
        + flag(req.coagulative_necrosis, 2)
        + flag(req.sarcomatoid_differentiation, 1)
        + size_points(req.tumor_size, true)
        + flag(req.perinephric_invasion, 2)
        + thrombus_points(req.tumor_thrombus);

    let overall = risk_category(pfs_score.max(css_score));

    Ok(ScoreResponse {
        result: json!({
            "pfs_score": pfs_score,
            "css_score": css_score,
            "overall_risk_category": overall,
        }),
        unit: "points".into(),
        interpretation: format!(
            "PFS: {} CSS: {}",
            interpretation(pfs_score, "progression"),
            interpretation(css_score, "cancer-specific death")
        ),
        stage: overall.into(),
        stage_description: format!("PFS Score: {pfs_score}, CSS Score: {css_score}"),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LeibovichRequest {
        LeibovichRequest {
            age: 50,
            ecog_status: EcogStatus::Zero,
            constitutional_symptoms: false,
            adrenalectomy: false,
            surgical_margins: SurgicalMargins::Negative,
            tumor_grade: TumorGrade::G1,
            coagulative_necrosis: false,
            sarcomatoid_differentiation: false,
            tumor_size: 3.0,
            perinephric_invasion: false,
            tumor_thrombus: TumorThrombus::None,
            extension_beyond_kidney: false,
        }
    }

    #[test]
    fn test_minimal_tumor_scores_zero() {
        let res = evaluate(&base()).unwrap();
        assert_eq!(res.result["pfs_score"], 0);
        assert_eq!(res.result["css_score"], 0);
        assert_eq!(res.stage, "Low Risk");
    }

    #[test]
    fn test_size_tables_diverge_above_10cm() {
        let mut req = base();
        req.tumor_size = 12.0;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["pfs_score"], 5);
        assert_eq!(res.result["css_score"], 4);
    }

    #[test]
    fn test_overall_category_uses_worse_score() {
        let mut req = base();
        req.age = 65;
        req.ecog_status = EcogStatus::OneOrMore;
        req.tumor_grade = TumorGrade::G2;
        // PFS = 2, CSS = 1 + 2 + 2 = 5 → Intermediate overall
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["pfs_score"], 2);
        assert_eq!(res.result["css_score"], 5);
        assert_eq!(res.stage, "Intermediate Risk");
    }

    #[test]
    fn test_aggressive_tumor_is_very_high_risk() {
        let req = LeibovichRequest {
            age: 70,
            ecog_status: EcogStatus::OneOrMore,
            constitutional_symptoms: true,
            adrenalectomy: true,
            surgical_margins: SurgicalMargins::Positive,
            tumor_grade: TumorGrade::G4,
            coagulative_necrosis: true,
            sarcomatoid_differentiation: true,
            tumor_size: 12.0,
            perinephric_invasion: true,
            tumor_thrombus: TumorThrombus::Level14,
            extension_beyond_kidney: true,
        };
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["pfs_score"], 17);
        assert_eq!(res.result["css_score"], 21);
        assert_eq!(res.stage, "Very High Risk");
    }

    #[test]
    fn test_ecog_wire_literal() {
        let mut body = serde_json::json!({
            "age": 50,
            "ecog_status": "≥1",
            "constitutional_symptoms": false,
            "adrenalectomy": false,
            "surgical_margins": "negative",
            "tumor_grade": "1",
            "coagulative_necrosis": false,
            "sarcomatoid_differentiation": false,
            "tumor_size": 3.0,
            "perinephric_invasion": false,
            "tumor_thrombus": "none",
            "extension_beyond_kidney": false,
        });
        let res = apply(body.take()).unwrap();
        assert_eq!(res.result["css_score"], 2);
    }
}
