/// Number of items requested per category
pub const ITEMS_PER_CATEGORY: usize = 5;

/// Builds the instruction sent to the language model for a mood
///
/// The mood is embedded as-is; empty and unusual moods are passed through.
pub fn build_prompt(mood: &str) -> String {
    format!(
        "Given the mood \"{mood}\", recommend {n} movies, {n} books, and {n} songs that match this mood. \
         Format the response as a JSON object with three arrays: \"movies\", \"books\", and \"songs\". \
         Each item in these arrays should be an object with a \"title\" field and any other relevant fields. \
         For songs, include separate \"title\" and \"artist\" fields.",
        mood = mood,
        n = ITEMS_PER_CATEGORY,
    )
}
