//! Splitting one completion into three meal plans.
//!
//! The model is asked to head its plans `### 식단 1:`, `### 식단 2:` and
//! `### 식단 3:`. We cut the text immediately *before* every plan-2 or
//! plan-3 header, so each header stays at the top of the plan it introduces.
//! No header is needed for plan 1: whatever precedes the first cut is plan 1.
//!
//! The completion is untrusted. When fewer than three chunks come out, the
//! whole text is returned as the first option and the other two are empty.
//! Splitting never fails.

use serde::Serialize;
use tracing::warn;

/// Headers that start a new chunk.
pub const PLAN_MARKERS: [&str; 2] = ["### 식단 2:", "### 식단 3:"];

/// Exactly three meal-plan texts, in order.
///
/// Serializes as a three-element JSON array.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct MealOptions([String; 3]);

impl MealOptions {
    pub fn new(first: String, second: String, third: String) -> Self {
        Self([first, second, third])
    }

    /// The degenerate split: `text` as plan 1, plans 2 and 3 empty.
    pub fn whole(text: impl Into<String>) -> Self {
        Self([text.into(), String::new(), String::new()])
    }

    /// Whether this is the `[text, "", ""]` fallback shape.
    pub fn is_whole(&self) -> bool {
        self.0[1].is_empty() && self.0[2].is_empty()
    }

    pub fn as_array(&self) -> &[String; 3] {
        &self.0
    }

    pub fn into_array(self) -> [String; 3] {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

/// Byte offsets where a chunk starts, one per marker occurrence, ascending.
fn boundaries(text: &str) -> Vec<usize> {
    let mut starts: Vec<usize> = PLAN_MARKERS
        .iter()
        .flat_map(|marker| text.match_indices(marker).map(|(i, _)| i))
        .collect();
    starts.sort_unstable();
    starts.dedup();
    starts
}

/// Cut `text` before every marker. Chunk 0 is everything before the first
/// marker and is empty when the text opens with one.
pub fn split_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for cut in boundaries(text) {
        chunks.push(text.get(start..cut).unwrap_or_default());
        start = cut;
    }
    chunks.push(text.get(start..).unwrap_or_default());
    chunks
}

/// Partition a raw completion into three trimmed meal plans.
pub fn split_meal_plans(raw: &str) -> MealOptions {
    let chunks = split_chunks(raw);
    if chunks.len() < 3 {
        warn!(
            chunks = chunks.len(),
            "completion did not contain three plan sections; returning it whole"
        );
        return MealOptions::whole(raw);
    }
    MealOptions::new(
        chunks[0].trim().to_string(),
        chunks[1].trim().to_string(),
        chunks[2].trim().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
### 식단 1:
**아침**:
- 현미밥 - [150g, 220kcal]

### 식단 2:
**아침**:
- 오트밀 - [80g, 300kcal]

### 식단 3:
**아침**:
- 두부 - [100g, 80kcal]
";

    #[test]
    fn well_formed_completion_yields_three_plans() {
        let plans = split_meal_plans(WELL_FORMED);
        let [one, two, three] = plans.as_array();
        assert!(one.starts_with("### 식단 1:"));
        assert!(one.ends_with("220kcal]"));
        assert!(two.starts_with("### 식단 2:"));
        assert!(two.contains("오트밀"));
        assert!(three.starts_with("### 식단 3:"));
        assert!(three.ends_with("80kcal]"));
        assert!(!plans.is_whole());
    }

    #[test]
    fn chunks_reconstruct_the_input() {
        let chunks = split_chunks(WELL_FORMED);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), WELL_FORMED);
    }

    #[test]
    fn marker_belongs_to_the_chunk_it_introduces() {
        let chunks = split_chunks("a### 식단 2:b### 식단 3:c");
        assert_eq!(chunks, ["a", "### 식단 2:b", "### 식단 3:c"]);
    }

    #[test]
    fn no_markers_returns_whole_text() {
        let raw = "\n오늘은 식단을 만들 수 없습니다.\n";
        let plans = split_meal_plans(raw);
        assert_eq!(plans, MealOptions::whole(raw));
        // Fallback keeps the text untrimmed.
        assert_eq!(plans.as_array()[0], raw);
        assert!(plans.is_whole());
    }

    #[test]
    fn only_plan_two_marker_falls_back() {
        let raw = "### 식단 1:\n밥\n### 식단 2:\n국수\n";
        assert_eq!(split_chunks(raw).len(), 2);
        assert_eq!(split_meal_plans(raw), MealOptions::whole(raw));
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(split_meal_plans(""), MealOptions::whole(""));
    }

    #[test]
    fn extra_chunks_are_discarded() {
        let raw = "one ### 식단 2: two ### 식단 3: three ### 식단 3: again";
        let plans = split_meal_plans(raw);
        assert_eq!(
            plans.into_array(),
            [
                "one".to_string(),
                "### 식단 2: two".to_string(),
                "### 식단 3: three".to_string()
            ]
        );
    }

    #[test]
    fn leading_marker_produces_empty_first_plan() {
        let raw = "### 식단 2: b ### 식단 3: c";
        let plans = split_meal_plans(raw);
        assert_eq!(plans.as_array()[0], "");
        assert_eq!(plans.as_array()[1], "### 식단 2: b");
        assert_eq!(plans.as_array()[2], "### 식단 3: c");
    }

    #[test]
    fn markers_out_of_order_still_split_positionally() {
        let raw = "one\n### 식단 3:\nthree\n### 식단 2:\ntwo";
        let plans = split_meal_plans(raw);
        assert_eq!(plans.as_array()[1], "### 식단 3:\nthree");
        assert_eq!(plans.as_array()[2], "### 식단 2:\ntwo");
    }

    #[test]
    fn trims_edges_but_keeps_inner_whitespace() {
        let raw = "\n\n  plan one\n\n  line two  \n\n### 식단 2:\n a  b \n\n### 식단 3:\tc\n\n";
        let plans = split_meal_plans(raw);
        assert_eq!(plans.as_array()[0], "plan one\n\n  line two");
        assert_eq!(plans.as_array()[1], "### 식단 2:\n a  b");
        assert_eq!(plans.as_array()[2], "### 식단 3:\tc");
    }

    #[test]
    fn splitting_is_idempotent() {
        for raw in [WELL_FORMED, "no markers", "", "x ### 식단 2: y"] {
            assert_eq!(split_meal_plans(raw), split_meal_plans(raw));
        }
    }

    #[test]
    fn serializes_as_three_element_array() {
        let json = serde_json::to_value(MealOptions::whole("all")).unwrap();
        assert_eq!(json, serde_json::json!(["all", "", ""]));
    }
}
