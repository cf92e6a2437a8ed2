//! One recommendation, end to end.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::RecommendConfig;
use crate::guideline::{guideline_for, is_known_goal};
use crate::prompt::build_messages;
use crate::segment::{MealOptions, split_meal_plans};
use crate::{Completion, CompletionError};

/// Success body of a recommendation: the goal as given, plus three plans.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub goal: String,
    pub meal_options: MealOptions,
}

/// Resolve the guideline, prompt the model once, and split its answer.
///
/// Any completion failure is returned as-is; there are no retries and no
/// partial results. A completion that ignores the template is not an error,
/// it comes back as a single plan (see [`split_meal_plans`]).
pub async fn recommend(
    client: &dyn Completion,
    config: &RecommendConfig,
    goal: &str,
) -> Result<Recommendation, CompletionError> {
    let guideline = guideline_for(goal);
    debug!(goal, known = is_known_goal(goal), "resolved guideline");

    let request = config.build_request(build_messages(goal, guideline));
    let completion = client.complete(&request).await?;
    let raw = completion.content.ok_or(CompletionError::EmptyResponse)?;

    let meal_options = split_meal_plans(&raw);
    info!(
        goal,
        chars = raw.chars().count(),
        split = !meal_options.is_whole(),
        "recommendation ready"
    );

    Ok(Recommendation {
        goal: goal.to_string(),
        meal_options,
    })
}
