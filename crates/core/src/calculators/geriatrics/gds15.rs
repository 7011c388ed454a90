//! Geriatric Depression Scale, 15-item short form (Sheikh & Yesavage 1986).
//!
//! Fifteen yes/no questions about the past week. Ten questions score a point
//! on "yes"; the five positively-phrased ones (satisfaction, spirits,
//! happiness, being alive, energy) score on "no".

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};

pub const META: ScoreMeta = ScoreMeta {
    id: "gds_15",
    title: "Geriatric Depression Scale (GDS-15)",
    specialty: Specialty::Geriatrics,
    description: "Screens for depression in older adults with 15 yes/no questions about \
                  mood over the past week.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gds15Request {
    pub q1_satisfied_with_life: YesNo,
    pub q2_dropped_activities: YesNo,
    pub q3_life_empty: YesNo,
    pub q4_often_bored: YesNo,
    pub q5_good_spirits: YesNo,
    pub q6_afraid_bad_happen: YesNo,
    pub q7_happy_most_time: YesNo,
    pub q8_feel_helpless: YesNo,
    pub q9_prefer_stay_home: YesNo,
    pub q10_memory_problems: YesNo,
    pub q11_wonderful_to_be_alive: YesNo,
    pub q12_feel_worthless: YesNo,
    pub q13_full_of_energy: YesNo,
    pub q14_situation_hopeless: YesNo,
    pub q15_others_better_off: YesNo,
}

/// Answers that indicate a depressive symptom, with the summary phrase used
/// when listing concerning responses.
fn concerning_items(req: &Gds15Request) -> Vec<&'static str> {
    let scores_on_yes: [(YesNo, &'static str); 10] = [
        (req.q2_dropped_activities, "dropped activities/interests"),
        (req.q3_life_empty, "life feels empty"),
        (req.q4_often_bored, "often bored"),
        (req.q6_afraid_bad_happen, "afraid something bad will happen"),
        (req.q8_feel_helpless, "often feels helpless"),
        (req.q9_prefer_stay_home, "prefers staying home"),
        (req.q10_memory_problems, "memory problems"),
        (req.q12_feel_worthless, "feels worthless"),
        (req.q14_situation_hopeless, "situation feels hopeless"),
        (req.q15_others_better_off, "others are better off"),
    ];
    let scores_on_no: [(YesNo, &'static str); 5] = [
        (req.q1_satisfied_with_life, "not satisfied with life"),
        (req.q5_good_spirits, "not in good spirits"),
        (req.q7_happy_most_time, "not happy most of the time"),
        (
            req.q11_wonderful_to_be_alive,
            "does not think it is wonderful to be alive",
        ),
        (req.q13_full_of_energy, "not full of energy"),
    ];

    let mut items = Vec::new();
    for (answer, phrase) in scores_on_yes {
        if answer.is_yes() {
            items.push(phrase);
        }
    }
    for (answer, phrase) in scores_on_no {
        if !answer.is_yes() {
            items.push(phrase);
        }
    }
    items
}

fn severity(score: usize) -> (&'static str, &'static str, &'static str) {
    match score {
        0..=4 => (
            "Normal",
            "Absence of clinically significant depressive symptoms",
            "Normal range - absence of clinically significant depressive symptoms. Continue \
             routine screening at regular intervals and monitor for changes in mood, \
             function, or social engagement.",
        ),
        5..=7 => (
            "Mild Depression",
            "Suggests mild depression",
            "Mild depression indicated. Consider formal diagnostic evaluation by a \
             qualified mental health professional, monitor symptoms closely, and consider \
             counseling or supportive interventions. Follow up in 2-4 weeks.",
        ),
        8..=9 => (
            "Moderate Depression",
            "Suggests moderate depression",
            "Moderate depression indicated. Formal psychiatric evaluation recommended. \
             Consider pharmacological and/or psychotherapeutic interventions and assess \
             suicide risk and functional impairment.",
        ),
        _ => (
            "Severe Depression",
            "Suggests severe depression",
            "Severe depression indicated. Urgent psychiatric evaluation required. Assess \
             suicide risk immediately using standardized tools and safety planning. May \
             require close monitoring or hospitalization if safety concerns.",
        ),
    }
}

pub fn evaluate(req: &Gds15Request) -> ScoreResult<ScoreResponse> {
    let items = concerning_items(req);
    let score = items.len();

    let concern_summary = if items.is_empty() {
        "No concerning responses identified.".to_string()
    } else if items.len() <= 3 {
        format!("Concerning responses: {}.", items.join(", "))
    } else {
        format!(
            "Multiple concerning responses identified ({} items).",
            items.len()
        )
    };

    let (stage, description, guidance) = severity(score);

    Ok(ScoreResponse {
        result: json!(score),
        unit: "points".into(),
        interpretation: format!("GDS-15 Score: {score}/15 points. {concern_summary} {guidance}"),
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
