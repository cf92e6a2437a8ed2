//! Convenience re-exports for common `mealplan` types.
//!
//! ```ignore
//! use mealplan::prelude::*;
//! ```

// ── Client ──────────────────────────────────────────────────────────
pub use crate::{
    ChatClient, ChatCompletion, ChatRequest, Completion, CompletionError, CompletionFuture,
    Message, MessageRole,
};

// ── Pipeline ────────────────────────────────────────────────────────
pub use crate::config::{ClientArgs, RecommendConfig};
pub use crate::guideline::guideline_for;
pub use crate::prompt::build_messages;
pub use crate::recommend::{Recommendation, recommend};
pub use crate::segment::{MealOptions, split_meal_plans};
