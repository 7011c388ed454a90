//! Trunk Impairment Scale (Verheyden 2004).
//!
//! Seventeen categorical motor tasks across static sitting balance, dynamic
//! sitting balance, and coordination subscales. Two gating rules apply: if
//! the patient cannot hold the basic sitting position the total is exactly 0
//! and no other item is scored, and within the dynamic and coordination
//! subscales later tasks only count when their gating task earned points.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::engine::{gated_sum, GatedItem};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};

pub const META: ScoreMeta = ScoreMeta {
    id: "trunk_impairment_scale",
    title: "Trunk Impairment Scale",
    specialty: Specialty::Neurology,
    description: "Quantifies trunk motor impairment after stroke through 17 tasks covering \
                  static sitting balance, dynamic sitting balance, and coordination.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintainsPosition {
    FallsOrCannotMaintain,
    MaintainsPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossesLegs {
    Falls,
    CannotCrossWithoutArmSupport,
    CrossesWithDisplacementOrAssistance,
    CrossesWithoutDisplacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElbowTouch {
    FallsNeedsSupportOrNoTouch,
    MovesActivelyAndTouches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrunkShortening {
    NoOrOppositeShortening,
    AppropriateShortening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compensation {
    CompensationPresent,
    MovesWithoutCompensation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrunkRotation {
    HemiplegicNotMoved3x,
    AsymmetricalRotation,
    SymmetricalRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationRepeat {
    AsymmetricalRotation,
    SymmetricalRotation,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrunkImpairmentRequest {
    pub static_item_1: YesNo,
    pub static_item_2: MaintainsPosition,
    pub static_item_3: CrossesLegs,
    pub dynamic_item_1: ElbowTouch,
    pub dynamic_item_2: TrunkShortening,
    pub dynamic_item_3: Compensation,
    pub dynamic_item_4: ElbowTouch,
    pub dynamic_item_5: TrunkShortening,
    pub dynamic_item_6: Compensation,
    pub dynamic_item_7: TrunkShortening,
    pub dynamic_item_8: Compensation,
    pub dynamic_item_9: TrunkShortening,
    pub dynamic_item_10: Compensation,
    pub coordination_item_1: TrunkRotation,
    pub coordination_item_2: RotationRepeat,
    pub coordination_item_3: TrunkRotation,
    pub coordination_item_4: RotationRepeat,
}

fn maintains_points(v: MaintainsPosition) -> i32 {
    match v {
        MaintainsPosition::FallsOrCannotMaintain => 0,
        MaintainsPosition::MaintainsPosition => 2,
    }
}

fn crosses_points(v: CrossesLegs) -> i32 {
    match v {
        CrossesLegs::Falls => 0,
        CrossesLegs::CannotCrossWithoutArmSupport => 1,
        CrossesLegs::CrossesWithDisplacementOrAssistance => 2,
        CrossesLegs::CrossesWithoutDisplacement => 3,
    }
}

fn touch_points(v: ElbowTouch) -> i32 {
    match v {
        ElbowTouch::FallsNeedsSupportOrNoTouch => 0,
        ElbowTouch::MovesActivelyAndTouches => 1,
    }
}

fn shortening_points(v: TrunkShortening) -> i32 {
    match v {
        TrunkShortening::NoOrOppositeShortening => 0,
        TrunkShortening::AppropriateShortening => 1,
    }
}

fn compensation_points(v: Compensation) -> i32 {
    match v {
        Compensation::CompensationPresent => 0,
        Compensation::MovesWithoutCompensation => 1,
    }
}

fn rotation_points(v: TrunkRotation) -> i32 {
    match v {
        TrunkRotation::HemiplegicNotMoved3x => 0,
        TrunkRotation::AsymmetricalRotation => 1,
        TrunkRotation::SymmetricalRotation => 2,
    }
}

fn repeat_points(v: RotationRepeat) -> i32 {
    match v {
        RotationRepeat::AsymmetricalRotation => 0,
        RotationRepeat::SymmetricalRotation => 1,
    }
}

fn interpret(total: i32) -> (&'static str, &'static str, &'static str) {
    match total {
        0 => (
            "Severe Impairment",
            "Unable to maintain starting position",
            "Patient cannot maintain the basic sitting position without support for 10 \
             seconds. This indicates severe trunk impairment requiring intensive \
             rehabilitation and support. Complete assessment cannot be performed due to \
             inability to maintain starting position.",
        ),
        1..=7 => (
            "Severe Impairment",
            "Severe trunk motor impairment",
            "Significant trunk motor impairment with limited static and dynamic sitting \
             balance. Requires intensive rehabilitation focusing on basic trunk control and \
             sitting balance. High risk for falls and functional limitations in daily \
             activities.",
        ),
        8..=15 => (
            "Moderate Impairment",
            "Moderate trunk motor impairment",
            "Moderate trunk impairment with some preserved sitting balance but difficulties \
             with dynamic movements and coordination. May benefit from targeted trunk \
             rehabilitation exercises. Some functional activities may be compromised.",
        ),
        16..=19 => (
            "Mild Impairment",
            "Mild trunk motor impairment",
            "Mild trunk impairment with generally good sitting balance but some deficits in \
             coordination or dynamic movements. Rehabilitation should focus on fine-tuning \
             trunk control and coordination.",
        ),
        _ => (
            "Normal/Near Normal",
            "Normal or near-normal trunk function",
            "Excellent trunk function with minimal or no impairment. Good sitting balance, \
             dynamic control, and coordination. May require minimal intervention or \
             maintenance therapy.",
        ),
    }
}

pub fn evaluate(req: &TrunkImpairmentRequest) -> ScoreResult<ScoreResponse> {
    // a patient who cannot sit unsupported scores 0 overall, nothing else
    // is assessed
    if !req.static_item_1.is_yes() {
        let (stage, description, interpretation) = interpret(0);
        return Ok(ScoreResponse {
            result: json!(0),
            unit: "points".into(),
            interpretation: interpretation.into(),
            stage: stage.into(),
            stage_description: description.into(),
        });
    }

    let static_score =
        2 + maintains_points(req.static_item_2) + crosses_points(req.static_item_3);

    // items 2/3, 5/6, 8 and 10 only count when their gating item earned
    let dynamic_items = [
        GatedItem::free(touch_points(req.dynamic_item_1)),
        GatedItem::gated(shortening_points(req.dynamic_item_2), 0),
        GatedItem::gated(compensation_points(req.dynamic_item_3), 1),
        GatedItem::free(touch_points(req.dynamic_item_4)),
        GatedItem::gated(shortening_points(req.dynamic_item_5), 3),
        GatedItem::gated(compensation_points(req.dynamic_item_6), 4),
        GatedItem::free(shortening_points(req.dynamic_item_7)),
        GatedItem::gated(compensation_points(req.dynamic_item_8), 6),
        GatedItem::free(shortening_points(req.dynamic_item_9)),
        GatedItem::gated(compensation_points(req.dynamic_item_10), 8),
    ];
    let dynamic_score = gated_sum(&dynamic_items);

    let coordination_items = [
        GatedItem::free(rotation_points(req.coordination_item_1)),
        GatedItem::gated(repeat_points(req.coordination_item_2), 0),
        GatedItem::free(rotation_points(req.coordination_item_3)),
        GatedItem::gated(repeat_points(req.coordination_item_4), 2),
    ];
    let coordination_score = gated_sum(&coordination_items);

    let total = static_score + dynamic_score + coordination_score;
    let (stage, description, interpretation) = interpret(total);

    Ok(ScoreResponse {
        result: json!(total),
        unit: "points".into(),
        interpretation: interpretation.into(),
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
