//! Prompt assembly for the recommendation call.
//!
//! Every request sends the same three messages: a fixed system role, the
//! user's goal with its guideline, and the output template. The template
//! lives in `meal_plan_template.md` next to this file; its `### 식단 N:`
//! headers are the markers [`crate::segment`] splits on, so the two must
//! stay in sync.

use crate::Message;

/// System role: an expert in healthy nutrition.
pub const SYSTEM_PROMPT: &str = "당신은 건강한 식단 전문가입니다.";

/// Fixed output format: three plans, each with breakfast/lunch/dinner,
/// itemized foods with weight and calories, and per-meal totals and tips.
pub const MEAL_PLAN_TEMPLATE: &str = include_str!("meal_plan_template.md");

/// The user message stating the goal and its guideline.
pub fn goal_message(goal: &str, guideline: &str) -> String {
    format!("나는 {goal}을 목표로 하고 있어. {guideline} 3가지 식단을 추천해줘.")
}

/// Build the ordered message list for one recommendation.
pub fn build_messages(goal: &str, guideline: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(goal_message(goal, guideline)),
        Message::user(MEAL_PLAN_TEMPLATE),
    ]
}
