//! Child-Pugh score for cirrhosis severity and operative risk.
//!
//! Five components each scored 1-3; total 5-15 maps to grades A/B/C with the
//! classic survival and operative-risk figures.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{le, lt, pick, rest, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "child_pugh_score",
    title: "Child-Pugh Score for Cirrhosis Mortality",
    specialty: Specialty::Gastroenterology,
    description: "Grades cirrhosis severity from bilirubin, albumin, INR, ascites, and \
                  encephalopathy; grades A-C carry survival and operative-risk estimates.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ascites {
    Absent,
    Slight,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encephalopathy {
    None,
    #[serde(rename = "grade_1_2")]
    Grade12,
    #[serde(rename = "grade_3_4")]
    Grade34,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildPughRequest {
    pub total_bilirubin: f64,
    pub serum_albumin: f64,
    pub inr: f64,
    pub ascites: Ascites,
    pub encephalopathy: Encephalopathy,
}

const BILIRUBIN_POINTS: [Band<i32>; 3] = [lt(2.0, 1), le(3.0, 2), rest(3)];
const ALBUMIN_POINTS: [Band<i32>; 3] = [lt(2.8, 3), le(3.5, 2), rest(1)];
const INR_POINTS: [Band<i32>; 3] = [lt(1.7, 1), le(2.3, 2), rest(3)];

pub fn evaluate(req: &ChildPughRequest) -> ScoreResult<ScoreResponse> {
    require_range("total_bilirubin", req.total_bilirubin, 0.1, 50.0, "mg/dL")?;
    require_range("serum_albumin", req.serum_albumin, 1.0, 5.0, "g/dL")?;
    require_range("inr", req.inr, 0.8, 10.0, "")?;

    let ascites_points = match req.ascites {
        Ascites::Absent => 1,
        Ascites::Slight => 2,
        Ascites::Moderate => 3,
    };
    let encephalopathy_points = match req.encephalopathy {
        Encephalopathy::None => 1,
        Encephalopathy::Grade12 => 2,
        Encephalopathy::Grade34 => 3,
    };

    let total = *pick(req.total_bilirubin, &BILIRUBIN_POINTS)
        + *pick(req.serum_albumin, &ALBUMIN_POINTS)
        + *pick(req.inr, &INR_POINTS)
        + ascites_points
        + encephalopathy_points;

    let (grade, description, one_year, two_year, interpretation) = match total {
        5..=6 => (
            "A",
            "Well-compensated disease",
            100,
            85,
            format!(
                "Child-Pugh Grade A (Score {total}): Well-compensated cirrhosis. Excellent \
                 operative risk with one-year survival ~100% and two-year survival ~85%. \
                 Suitable for major surgery and liver resection."
            ),
        ),
        7..=9 => (
            "B",
            "Significant functional compromise",
            80,
            60,
            format!(
                "Child-Pugh Grade B (Score {total}): Significant functional compromise. Good \
                 operative risk with one-year survival ~80% and two-year survival ~60%. \
                 Consider surgery with caution; may require liver transplant evaluation."
            ),
        ),
        _ => (
            "C",
            "Decompensated disease",
            45,
            35,
            format!(
                "Child-Pugh Grade C (Score {total}): Decompensated cirrhosis. Poor operative \
                 risk with one-year survival ~45% and two-year survival ~35%. High surgical \
                 mortality; priority candidate for liver transplantation."
            ),
        ),
    };

    Ok(ScoreResponse {
        result: json!({
            "total_score": total,
            "grade": grade,
            "one_year_survival": one_year,
            "two_year_survival": two_year,
        }),
        unit: "points".into(),
        interpretation,
        stage: format!("Child-Pugh {grade}"),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
