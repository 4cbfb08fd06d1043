/// Tunables for answering queries. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Scores strictly below this percentage count as failing.
    pub passing_threshold: f64,
    /// Bulleted assignments shown before the "and N more" note.
    pub list_limit: usize,
    /// Grade lookups in flight at once; 1 fetches sequentially.
    pub grade_fetch_concurrency: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            passing_threshold: 60.0,
            list_limit: 5,
            grade_fetch_concurrency: 1,
        }
    }
}
