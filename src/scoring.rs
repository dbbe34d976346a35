//! Response scoring against trial records.
//!
//! The runtime presents a trial, waits for one key, and reports it back. The
//! response is correct when the key maps to the record's required side.

use serde::{Deserialize, Serialize};

use crate::config::KeyMapping;
use crate::data::{ResponseSide, TrialRecord};
use crate::types::{BlockId, KeyName};

/// Scored response for one trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredResponse {
    /// Block of the scored trial.
    pub block: BlockId,
    /// Position of the trial within its block.
    pub index: usize,
    /// Key as reported by the runtime.
    pub key: KeyName,
    /// Side the key maps to; `None` for an unmapped key.
    pub side: Option<ResponseSide>,
    /// Whether the key matched the required side.
    pub correct: bool,
    /// Response time reported by the runtime.
    pub rt_ms: Option<f64>,
}

/// Score a reported key for `trial`.
pub fn score(
    keys: &KeyMapping,
    trial: &TrialRecord,
    key: &str,
    rt_ms: Option<f64>,
) -> ScoredResponse {
    let side = keys.side_for_key(key);
    ScoredResponse {
        block: trial.block.clone(),
        index: trial.index,
        key: key.to_string(),
        side,
        correct: side == Some(trial.correct_side),
        rt_ms,
    }
}

/// Whether the error flash follows the last recorded response.
pub fn needs_error_feedback(last: Option<&ScoredResponse>) -> bool {
    last.is_some_and(|response| !response.correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PoolEntry;

    fn trial(side: ResponseSide) -> TrialRecord {
        TrialRecord::from_entry(
            "B1_gender_practice",
            0,
            &PoolEntry::new("남자", side, "male"),
            None,
        )
    }

    #[test]
    fn matching_key_is_correct() {
        let keys = KeyMapping::default();
        let scored = score(&keys, &trial(ResponseSide::Left), "E", Some(512.0));
        assert!(scored.correct);
        assert_eq!(scored.side, Some(ResponseSide::Left));
        assert!(!needs_error_feedback(Some(&scored)));
    }

    #[test]
    fn wrong_or_unmapped_key_triggers_feedback() {
        let keys = KeyMapping::default();
        let wrong = score(&keys, &trial(ResponseSide::Left), "i", None);
        assert!(!wrong.correct);
        assert!(needs_error_feedback(Some(&wrong)));

        let unmapped = score(&keys, &trial(ResponseSide::Right), "q", None);
        assert_eq!(unmapped.side, None);
        assert!(!unmapped.correct);
        assert!(!needs_error_feedback(None));
    }
}
