use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InspectorConfig {
    /// Mark answers resolving into reserved address space.
    #[serde(default = "default_true")]
    pub flag_reserved_answers: bool,

    /// Log a one-line summary of every rejected packet at debug level.
    #[serde(default = "default_true")]
    pub summarize_rejected: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            flag_reserved_answers: true,
            summarize_rejected: true,
        }
    }
}

fn default_true() -> bool {
    true
}
