use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::types::{BlockId, ClassTag, ConditionTag, StimulusText};

/// Concept category a stimulus word belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Target category.
    Male,
    /// Target category.
    Female,
    /// Attribute category.
    Talent,
    /// Attribute category.
    Effort,
}

/// Immutable stimulus word with its category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stimulus {
    /// Word shown on screen.
    pub text: StimulusText,
    /// Category the word belongs to.
    pub category: Category,
}

impl Stimulus {
    /// Pair a word with its category.
    pub fn new(text: impl Into<StimulusText>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Side a participant must respond with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSide {
    /// Left response key.
    Left,
    /// Right response key.
    Right,
}

impl ResponseSide {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            ResponseSide::Left => ResponseSide::Right,
            ResponseSide::Right => ResponseSide::Left,
        }
    }
}

impl fmt::Display for ResponseSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSide::Left => f.write_str("left"),
            ResponseSide::Right => f.write_str("right"),
        }
    }
}

/// A stimulus bound to its required response side and analysis tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Stimulus word.
    pub text: StimulusText,
    /// Side the participant must press.
    pub side: ResponseSide,
    /// Analysis tag, e.g. `target_left`.
    pub class_tag: ClassTag,
}

impl PoolEntry {
    /// Build an entry.
    pub fn new(
        text: impl Into<StimulusText>,
        side: ResponseSide,
        class_tag: impl Into<ClassTag>,
    ) -> Self {
        Self {
            text: text.into(),
            side,
            class_tag: class_tag.into(),
        }
    }
}

/// One presented categorization trial, as handed to the runtime.
///
/// Records are created once during timeline assembly and never mutated;
/// `index` is the position within the owning block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Owning block id.
    pub block: BlockId,
    /// Zero-based position within the block.
    pub index: usize,
    /// Stimulus word.
    pub stimulus: StimulusText,
    /// Side a correct response maps to.
    pub correct_side: ResponseSide,
    /// Analysis tag copied from the pool entry.
    pub class_tag: ClassTag,
    /// Counterbalancing condition, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionTag>,
}

impl TrialRecord {
    /// Bind a generated pool entry to its block position.
    pub fn from_entry(
        block: impl Into<BlockId>,
        index: usize,
        entry: &PoolEntry,
        condition: Option<ConditionTag>,
    ) -> Self {
        Self {
            block: block.into(),
            index,
            stimulus: entry.text.clone(),
            correct_side: entry.side,
            class_tag: entry.class_tag.clone(),
            condition,
        }
    }
}
