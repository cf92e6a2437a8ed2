//! Goal → guideline lookup.
//!
//! The table is fixed at compile time. Goals are free-form strings and are
//! never rejected: anything not in the table gets [`DEFAULT_GUIDELINE`].

/// Guideline used for every goal not present in [`GUIDELINES`].
pub const DEFAULT_GUIDELINE: &str = "건강한 식단을 추천해줘.";

/// Known goals and the instruction appended to the prompt for each.
pub const GUIDELINES: &[(&str, &str)] = &[
    (
        "다이어트",
        "칼로리 조절과 균형 잡힌 영양을 고려한 식단을 추천해줘.",
    ),
    (
        "당 줄이기",
        "혈당을 안정적으로 유지할 수 있는 저당 식단을 추천해줘.",
    ),
    ("근육량 증가", "근육 성장을 위한 고단백 식단을 추천해줘."),
    ("나트륨 줄이기", "저염식을 고려한 건강한 식단을 추천해줘."),
];

/// Resolve the guideline for a goal. Matching is exact.
pub fn guideline_for(goal: &str) -> &'static str {
    GUIDELINES
        .iter()
        .find(|(key, _)| *key == goal)
        .map_or(DEFAULT_GUIDELINE, |(_, guideline)| *guideline)
}

/// Whether `goal` has a dedicated guideline.
pub fn is_known_goal(goal: &str) -> bool {
    GUIDELINES.iter().any(|(key, _)| *key == goal)
}

/// Recognized goals, in table order.
pub fn known_goals() -> impl Iterator<Item = &'static str> {
    GUIDELINES.iter().map(|(key, _)| *key)
}
