use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{keys, rng as rng_constants, stimuli, timeline, trial_counts};
use crate::data::{Category, ResponseSide, Stimulus};
use crate::errors::IatError;
use crate::rng::DeterministicRng;
use crate::types::{BlockId, ConditionTag, KeyName, ScreenName, StimulusText};

/// How a block's trial sequence is drawn from its pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalancingPolicy {
    /// Draw one entry uniformly at random per trial. No balance guarantee over short runs.
    WithReplacement,
    /// Replicate the pool enough times to cover the count, shuffle, and truncate.
    #[default]
    BalancedRepeat,
}

/// Response keys for the two sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapping {
    /// Key for left-side responses.
    pub left: KeyName,
    /// Key for right-side responses.
    pub right: KeyName,
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self {
            left: keys::LEFT.to_string(),
            right: keys::RIGHT.to_string(),
        }
    }
}

impl KeyMapping {
    /// Key bound to `side`.
    pub fn key_for(&self, side: ResponseSide) -> &str {
        match side {
            ResponseSide::Left => &self.left,
            ResponseSide::Right => &self.right,
        }
    }

    /// Side bound to a reported key (ASCII case-insensitive), if any.
    pub fn side_for_key(&self, key: &str) -> Option<ResponseSide> {
        if key.eq_ignore_ascii_case(&self.left) {
            Some(ResponseSide::Left)
        } else if key.eq_ignore_ascii_case(&self.right) {
            Some(ResponseSide::Right)
        } else {
            None
        }
    }

    /// Upper-cased key letter as shown in side labels ("E", "I").
    pub fn display_letter(&self, side: ResponseSide) -> String {
        self.key_for(side).to_uppercase()
    }

    fn validate(&self) -> Result<(), IatError> {
        if self.left.trim().is_empty() || self.right.trim().is_empty() {
            return Err(IatError::InvalidConfiguration(
                "response keys must not be empty".to_string(),
            ));
        }
        if self.left.eq_ignore_ascii_case(&self.right) {
            return Err(IatError::InvalidConfiguration(format!(
                "left and right response keys must differ (both '{}')",
                self.left
            )));
        }
        Ok(())
    }
}

/// Order in which the congruent and incongruent halves are presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counterbalancing {
    /// 남성+재능 pairing first, then the reversed pairing.
    #[default]
    #[serde(rename = "A_first")]
    AFirst,
    /// Reversed pairing first. No block sequence is defined for this order.
    #[serde(rename = "B_first")]
    BFirst,
}

impl Counterbalancing {
    /// Seeded coin flip for callers that assign the order randomly.
    pub fn choose(seed: u64) -> Self {
        let mut rng = DeterministicRng::for_label(
            seed,
            rng_constants::COUNTERBALANCE_SEED_OFFSET,
            "counterbalancing",
        );
        if rng.random_bool(0.5) {
            Counterbalancing::AFirst
        } else {
            Counterbalancing::BFirst
        }
    }

    /// Tag recorded on every trial of a timeline built in this order.
    pub fn condition_tag(self) -> ConditionTag {
        match self {
            Counterbalancing::AFirst => timeline::CONDITION_A_FIRST.to_string(),
            Counterbalancing::BFirst => timeline::CONDITION_B_FIRST.to_string(),
        }
    }
}

/// Stimulus words per category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusSet {
    /// Male target words.
    pub male: Vec<StimulusText>,
    /// Female target words.
    pub female: Vec<StimulusText>,
    /// Talent attribute words.
    pub talent: Vec<StimulusText>,
    /// Effort attribute words.
    pub effort: Vec<StimulusText>,
}

impl Default for StimulusSet {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<StimulusText> {
            words.iter().map(|word| word.to_string()).collect()
        }
        Self {
            male: owned(&stimuli::MALE),
            female: owned(&stimuli::FEMALE),
            talent: owned(&stimuli::TALENT),
            effort: owned(&stimuli::EFFORT),
        }
    }
}

impl StimulusSet {
    /// Words of one category.
    pub fn words(&self, category: Category) -> &[StimulusText] {
        match category {
            Category::Male => &self.male,
            Category::Female => &self.female,
            Category::Talent => &self.talent,
            Category::Effort => &self.effort,
        }
    }

    /// Stimuli of one category, in configured order.
    pub fn stimuli(&self, category: Category) -> Vec<Stimulus> {
        self.words(category)
            .iter()
            .map(|text| Stimulus::new(text.clone(), category))
            .collect()
    }

    fn validate(&self) -> Result<(), IatError> {
        for category in [
            Category::Male,
            Category::Female,
            Category::Talent,
            Category::Effort,
        ] {
            let words = self.words(category);
            if words.is_empty() {
                return Err(IatError::InvalidConfiguration(format!(
                    "stimulus list for {category:?} is empty"
                )));
            }
            if words.iter().any(|word| word.trim().is_empty()) {
                return Err(IatError::InvalidConfiguration(format!(
                    "stimulus list for {category:?} contains a blank word"
                )));
            }
        }
        Ok(())
    }
}

/// Trial counts for the seven blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialCounts {
    /// B1: male vs. female.
    pub gender_practice: usize,
    /// B2: talent vs. effort.
    pub attribute_practice: usize,
    /// B3: male+talent vs. female+effort.
    pub combined_practice: usize,
    /// B4: same pairing as B3.
    pub combined_test: usize,
    /// B5: female vs. male.
    pub gender_switch: usize,
    /// B6: female+talent vs. male+effort.
    pub reversed_practice: usize,
    /// B7: same pairing as B6.
    pub reversed_test: usize,
}

impl Default for TrialCounts {
    fn default() -> Self {
        Self {
            gender_practice: trial_counts::B1,
            attribute_practice: trial_counts::B2,
            combined_practice: trial_counts::B3,
            combined_test: trial_counts::B4,
            gender_switch: trial_counts::B5,
            reversed_practice: trial_counts::B6,
            reversed_test: trial_counts::B7,
        }
    }
}

impl TrialCounts {
    /// Counts paired with their field names, in block order.
    pub fn per_block(&self) -> [(&'static str, usize); 7] {
        [
            ("gender_practice", self.gender_practice),
            ("attribute_practice", self.attribute_practice),
            ("combined_practice", self.combined_practice),
            ("combined_test", self.combined_test),
            ("gender_switch", self.gender_switch),
            ("reversed_practice", self.reversed_practice),
            ("reversed_test", self.reversed_test),
        ]
    }

    /// Sum of all block counts, saturating at `usize::MAX`.
    ///
    /// Validated counts never come close to saturating.
    pub fn total(&self) -> usize {
        self.per_block()
            .iter()
            .fold(0usize, |acc, (_, count)| acc.saturating_add(*count))
    }

    fn validate(&self) -> Result<(), IatError> {
        let mut total = 0usize;
        for (name, count) in self.per_block() {
            if count > trial_counts::MAX_PER_BLOCK {
                return Err(IatError::InvalidConfiguration(format!(
                    "trial count {name}={count} exceeds the per-block limit of {}",
                    trial_counts::MAX_PER_BLOCK
                )));
            }
            total = total.checked_add(count).ok_or_else(|| {
                IatError::InvalidConfiguration("total trial count overflows".to_string())
            })?;
        }
        Ok(())
    }
}

/// Side mapping for a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// One category per side.
    Simple {
        /// Category answered with the left key.
        left: Category,
        /// Category answered with the right key.
        right: Category,
    },
    /// One target and one attribute category per side.
    Combined {
        /// Gender category on the left.
        left_target: Category,
        /// Trait category on the left.
        left_attribute: Category,
        /// Gender category on the right.
        right_target: Category,
        /// Trait category on the right.
        right_attribute: Category,
    },
}

impl BlockKind {
    /// Categories shown on `side`, target first.
    pub fn categories(&self, side: ResponseSide) -> Vec<Category> {
        match (self, side) {
            (BlockKind::Simple { left, .. }, ResponseSide::Left) => vec![*left],
            (BlockKind::Simple { right, .. }, ResponseSide::Right) => vec![*right],
            (
                BlockKind::Combined {
                    left_target,
                    left_attribute,
                    ..
                },
                ResponseSide::Left,
            ) => vec![*left_target, *left_attribute],
            (
                BlockKind::Combined {
                    right_target,
                    right_attribute,
                    ..
                },
                ResponseSide::Right,
            ) => vec![*right_target, *right_attribute],
        }
    }
}

/// One block of the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Block id recorded on each trial.
    pub id: BlockId,
    /// Side mapping.
    pub kind: BlockKind,
    /// Number of trials to generate.
    pub trials: usize,
    /// Instruction screen shown before the block. Test blocks follow their
    /// practice block without a screen of their own.
    pub instruction: Option<BlockInstruction>,
}

/// Instruction screen preceding a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInstruction {
    /// Screen name, e.g. `B1_inst`.
    pub screen: ScreenName,
    /// Heading text above the side labels.
    pub heading: String,
}

/// Top-level experiment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// RNG seed that controls every trial sequence in the timeline.
    pub seed: u64,
    /// Balancing policy applied to every block.
    pub policy: BalancingPolicy,
    /// Response keys.
    pub keys: KeyMapping,
    /// Block order.
    pub counterbalancing: Counterbalancing,
    /// Stimulus words per category.
    pub stimuli: StimulusSet,
    /// Trials per block.
    pub trials: TrialCounts,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: rng_constants::DEFAULT_SEED,
            policy: BalancingPolicy::default(),
            keys: KeyMapping::default(),
            counterbalancing: Counterbalancing::default(),
            stimuli: StimulusSet::default(),
            trials: TrialCounts::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parse a JSON config; absent fields fall back to the standard design.
    pub fn from_json_str(raw: &str) -> Result<Self, IatError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, IatError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations that could not produce a valid timeline.
    pub fn validate(&self) -> Result<(), IatError> {
        self.keys.validate()?;
        self.stimuli.validate()?;
        self.trials.validate()?;
        Ok(())
    }
}
