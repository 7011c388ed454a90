//! Gail model 5-year breast cancer risk estimate.
//!
//! This is an approximation using simplified representative relative risks
//! from the literature, NOT the exact NCI Gail algorithm (which uses
//! proprietary race-specific coefficients and competing-hazards math). The
//! response interpretation repeats that disclaimer.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{le, pick, rest, round_to, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_int_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "gail_model_breast_cancer_risk",
    title: "Gail Model for Breast Cancer Risk (Approximate)",
    specialty: Specialty::Oncology,
    description: "Estimates 5-year breast cancer risk from reproductive and family history \
                  using simplified representative coefficients; not the exact NCI algorithm.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeAtMenarche {
    #[serde(rename = "7_to_11")]
    SevenToEleven,
    #[serde(rename = "12_to_13")]
    TwelveToThirteen,
    #[serde(rename = "over_13")]
    Over13,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeAtFirstBirth {
    NoBirths,
    #[serde(rename = "under_20")]
    Under20,
    #[serde(rename = "20_to_24")]
    TwentyToTwentyFour,
    #[serde(rename = "25_to_29")]
    TwentyFiveToTwentyNine,
    #[serde(rename = "30_or_over")]
    ThirtyOrOver,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CountCategory {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "more_than_1")]
    MoreThanOne,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtypicalHyperplasia {
    Yes,
    No,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceEthnicity {
    White,
    AfricanAmerican,
    Hispanic,
    AsianAmerican,
    AmericanIndianAlaskanNative,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsianSubrace {
    Chinese,
    Japanese,
    Filipino,
    Hawaiian,
    PacificIslander,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GailRequest {
    pub age: i64,
    pub age_at_menarche: AgeAtMenarche,
    pub age_at_first_birth: AgeAtFirstBirth,
    pub relatives_with_breast_cancer: CountCategory,
    pub previous_biopsies: CountCategory,
    pub atypical_hyperplasia: AtypicalHyperplasia,
    pub race_ethnicity: RaceEthnicity,
    #[serde(default)]
    pub asian_subrace: Option<AsianSubrace>,
}

/// Annual baseline incidence by age band (fraction per woman-year).
const BASELINE_RISKS: [Band<f64>; 10] = [
    le(39.0, 0.00088),
    le(44.0, 0.00152),
    le(49.0, 0.00231),
    le(54.0, 0.00262),
    le(59.0, 0.00346),
    le(64.0, 0.00412),
    le(69.0, 0.00453),
    le(74.0, 0.00455),
    le(79.0, 0.00433),
    rest(0.00386),
];

fn menarche_rr(v: AgeAtMenarche) -> f64 {
    match v {
        AgeAtMenarche::SevenToEleven => 1.21,
        AgeAtMenarche::TwelveToThirteen => 1.10,
        AgeAtMenarche::Over13 | AgeAtMenarche::Unknown => 1.00,
    }
}

fn first_birth_rr(v: AgeAtFirstBirth) -> f64 {
    match v {
        AgeAtFirstBirth::NoBirths => 1.24,
        AgeAtFirstBirth::Under20 => 1.00,
        AgeAtFirstBirth::TwentyToTwentyFour => 1.10,
        AgeAtFirstBirth::TwentyFiveToTwentyNine => 1.25,
        AgeAtFirstBirth::ThirtyOrOver => 1.62,
        AgeAtFirstBirth::Unknown => 1.13,
    }
}

fn family_history_rr(v: CountCategory) -> f64 {
    match v {
        CountCategory::Zero => 1.00,
        CountCategory::One => 2.30,
        CountCategory::MoreThanOne => 4.30,
        CountCategory::Unknown => 1.15,
    }
}

fn biopsies_rr(v: CountCategory) -> f64 {
    match v {
        CountCategory::Zero | CountCategory::Unknown => 1.00,
        CountCategory::One => 1.70,
        CountCategory::MoreThanOne => 2.88,
    }
}

fn race_adjustment(v: RaceEthnicity) -> f64 {
    match v {
        RaceEthnicity::White | RaceEthnicity::Unknown => 1.00,
        RaceEthnicity::AfricanAmerican => 0.78,
        RaceEthnicity::Hispanic => 0.73,
        RaceEthnicity::AsianAmerican => 0.50,
        RaceEthnicity::AmericanIndianAlaskanNative => 0.85,
    }
}

fn asian_subrace_adjustment(v: AsianSubrace) -> f64 {
    match v {
        AsianSubrace::Chinese => 0.9,
        AsianSubrace::Japanese => 1.1,
        AsianSubrace::Filipino => 1.2,
        AsianSubrace::Hawaiian => 1.3,
        AsianSubrace::PacificIslander => 1.1,
    }
}

pub fn evaluate(req: &GailRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 35, 85, "years")?;

    let mut rr = menarche_rr(req.age_at_menarche)
        * first_birth_rr(req.age_at_first_birth)
        * family_history_rr(req.relatives_with_breast_cancer)
        * biopsies_rr(req.previous_biopsies)
        * race_adjustment(req.race_ethnicity);

    // atypical hyperplasia only multiplies when there were biopsies
    if matches!(
        req.previous_biopsies,
        CountCategory::One | CountCategory::MoreThanOne
    ) && matches!(req.atypical_hyperplasia, AtypicalHyperplasia::Yes)
    {
        rr *= 4.17;
    }

    if matches!(req.race_ethnicity, RaceEthnicity::AsianAmerican) {
        if let Some(subrace) = req.asian_subrace {
            rr *= asian_subrace_adjustment(subrace);
        }
    }

    let baseline = *pick(req.age as f64, &BASELINE_RISKS);
    // 5-year cumulative risk without competing hazards, capped at 50%
    let five_year_risk = round_to((5.0 * baseline * rr * 100.0).min(50.0), 2);

    let approximation_note = " Note: this estimate uses simplified representative \
                              coefficients, not the exact NCI Gail algorithm; use the NCI \
                              tool for clinical decision-making.";

    let (stage, description, interpretation) = if five_year_risk < 1.67 {
        (
            "Low Risk",
            "Low risk for breast cancer",
            format!(
                "5-year breast cancer risk of {five_year_risk}% is below the 1.67% threshold \
                 for chemoprevention consideration. Continue routine screening mammography \
                 according to guidelines and discuss general risk reduction \
                 strategies.{approximation_note}"
            ),
        )
    } else {
        (
            "High Risk",
            "High risk for breast cancer",
            format!(
                "5-year breast cancer risk of {five_year_risk}% meets or exceeds the 1.67% \
                 threshold. Consider discussing chemoprevention options (tamoxifen, \
                 raloxifene, or aromatase inhibitors) and enhanced screening strategies; \
                 genetic counseling may be considered if family history is \
                 significant.{approximation_note}"
            ),
        )
    };

    Ok(ScoreResponse {
        result: json!(five_year_risk),
        unit: "percentage".into(),
        interpretation,
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GailRequest {
        GailRequest {
            age: 45,
            age_at_menarche: AgeAtMenarche::Over13,
            age_at_first_birth: AgeAtFirstBirth::Under20,
            relatives_with_breast_cancer: CountCategory::Zero,
            previous_biopsies: CountCategory::Zero,
            atypical_hyperplasia: AtypicalHyperplasia::No,
            race_ethnicity: RaceEthnicity::White,
            asian_subrace: None,
        }
    }

    #[test]
    fn test_baseline_profile_is_low_risk() {
        // RR 1.0 at age 45: 5 * 0.00231 * 100 = 1.155%
        let res = evaluate(&base()).unwrap();
        assert_eq!(res.result, json!(1.16));
        assert_eq!(res.stage, "Low Risk");
    }

    #[test]
    fn test_family_history_crosses_threshold() {
        let mut req = base();
        req.relatives_with_breast_cancer = CountCategory::One;
        // 1.155 * 2.3 = 2.6565 → 2.66%
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(2.66));
        assert_eq!(res.stage, "High Risk");
    }

    #[test]
    fn test_hyperplasia_requires_biopsies() {
        let mut req = base();
        req.atypical_hyperplasia = AtypicalHyperplasia::Yes;
        // no biopsies, so the multiplier must not apply
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(1.16));
    }

    #[test]
    fn test_interpretation_carries_disclaimer() {
        let res = evaluate(&base()).unwrap();
        assert!(res.interpretation.contains("not the exact NCI Gail algorithm"));
    }

    #[test]
    fn test_risk_capped_at_50_percent() {
        let req = GailRequest {
            age: 75,
            age_at_menarche: AgeAtMenarche::SevenToEleven,
            age_at_first_birth: AgeAtFirstBirth::ThirtyOrOver,
            relatives_with_breast_cancer: CountCategory::MoreThanOne,
            previous_biopsies: CountCategory::MoreThanOne,
            atypical_hyperplasia: AtypicalHyperplasia::Yes,
            race_ethnicity: RaceEthnicity::White,
            asian_subrace: None,
        };
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(50.0));
    }

    #[test]
    fn test_rejects_age_below_35() {
        let mut req = base();
        req.age = 30;
        assert!(evaluate(&req).is_err());
    }

    #[test]
    fn test_numeric_wire_literals() {
        let res = apply(serde_json::json!({
            "age": 45,
            "age_at_menarche": "12_to_13",
            "age_at_first_birth": "25_to_29",
            "relatives_with_breast_cancer": "0",
            "previous_biopsies": "1",
            "atypical_hyperplasia": "no",
            "race_ethnicity": "white",
        }))
        .unwrap();
        assert_eq!(res.stage, "High Risk");
    }
}
