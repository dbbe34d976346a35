//! Timeline assembly for the standard 7-block design.
//!
//! The timeline is built eagerly and returned as a value. Every trial sequence
//! is generated before the first node is handed to the presentation runtime, so
//! configuration errors surface before any trial is shown.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{
    BalancingPolicy, BlockInstruction, BlockKind, BlockSpec, Counterbalancing, ExperimentConfig,
};
use crate::constants::{blocks, keys, rng as rng_constants, timeline};
use crate::data::{Category, ResponseSide, TrialRecord};
use crate::errors::IatError;
use crate::metrics::side_counts;
use crate::pool::pool_for_block;
use crate::render;
use crate::rng::DeterministicRng;
use crate::sequence::generate;
use crate::types::{ConditionTag, Html, KeyName, ScreenName};

/// A node in the presentation timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TimelineNode {
    /// Instruction screen dismissed with the space bar.
    Instructions {
        /// Screen name, e.g. `intro` or `B3_inst`.
        name: ScreenName,
        /// Runtime task tag.
        task: String,
        /// Rendered screen.
        html: Html,
        /// Keys that dismiss the screen.
        choices: Vec<KeyName>,
    },
    /// Categorization trial followed by conditional error feedback.
    Trial(TrialScreen),
}

/// A trial screen together with the record the runtime logs for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialScreen {
    /// Runtime task tag.
    pub task: String,
    /// Stimulus with both side labels.
    pub html: Html,
    /// Accepted response keys.
    pub choices: Vec<KeyName>,
    /// Data logged with the response.
    pub record: TrialRecord,
    /// Flash shown after an incorrect response.
    pub feedback: ErrorFeedback,
}

/// Flash shown after the trial only when the response was incorrect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFeedback {
    /// Runtime task tag.
    pub task: String,
    /// Rendered flash.
    pub html: Html,
    /// Accepted keys; empty, so the flash only ends on its timer.
    pub choices: Vec<KeyName>,
    /// Display time.
    pub duration_ms: u32,
}

impl Default for ErrorFeedback {
    fn default() -> Self {
        Self {
            task: timeline::TASK_ERROR_FEEDBACK.to_string(),
            html: render::error_flash(),
            choices: Vec::new(),
            duration_ms: timeline::ERROR_FEEDBACK_MS,
        }
    }
}

/// The assembled experiment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Order the blocks were planned in.
    pub counterbalancing: Counterbalancing,
    /// Policy used for every block.
    pub policy: BalancingPolicy,
    /// Planned blocks in presentation order.
    pub blocks: Vec<BlockSpec>,
    /// Screens in presentation order.
    pub nodes: Vec<TimelineNode>,
}

impl Timeline {
    /// All trial records in presentation order.
    pub fn trials(&self) -> impl Iterator<Item = &TrialRecord> {
        self.nodes.iter().filter_map(|node| match node {
            TimelineNode::Trial(screen) => Some(&screen.record),
            TimelineNode::Instructions { .. } => None,
        })
    }

    /// Trial records of one block in presentation order.
    pub fn block_trials<'a>(
        &'a self,
        block: &'a str,
    ) -> impl Iterator<Item = &'a TrialRecord> + 'a {
        self.trials().filter(move |record| record.block == block)
    }

    /// Number of trial screens.
    pub fn trial_count(&self) -> usize {
        self.trials().count()
    }

    /// Names of instruction screens in presentation order.
    pub fn screen_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TimelineNode::Instructions { name, .. } => Some(name.as_str()),
                TimelineNode::Trial(_) => None,
            })
            .collect()
    }
}

/// Block sequence for a counterbalancing order.
///
/// Only the A-first order has a defined sequence. B-first is rejected rather
/// than guessed.
pub fn block_plan(config: &ExperimentConfig) -> Result<Vec<BlockSpec>, IatError> {
    match config.counterbalancing {
        Counterbalancing::AFirst => Ok(a_first_plan(config)),
        Counterbalancing::BFirst => Err(IatError::UnsupportedCounterbalancing(
            Counterbalancing::BFirst,
        )),
    }
}

fn a_first_plan(config: &ExperimentConfig) -> Vec<BlockSpec> {
    let trials = &config.trials;
    let gender = BlockKind::Simple {
        left: Category::Male,
        right: Category::Female,
    };
    let attribute = BlockKind::Simple {
        left: Category::Talent,
        right: Category::Effort,
    };
    let congruent = BlockKind::Combined {
        left_target: Category::Male,
        left_attribute: Category::Talent,
        right_target: Category::Female,
        right_attribute: Category::Effort,
    };
    let switched = BlockKind::Simple {
        left: Category::Female,
        right: Category::Male,
    };
    let reversed = BlockKind::Combined {
        left_target: Category::Female,
        left_attribute: Category::Talent,
        right_target: Category::Male,
        right_attribute: Category::Effort,
    };

    vec![
        block(blocks::B1, gender, trials.gender_practice, Some(("B1_inst", "연습 1"))),
        block(blocks::B2, attribute, trials.attribute_practice, Some(("B2_inst", "연습 2"))),
        block(blocks::B3, congruent, trials.combined_practice, Some(("B3_inst", "결합 과제"))),
        block(blocks::B4, congruent, trials.combined_test, None),
        block(blocks::B5, switched, trials.gender_switch, Some(("B5_inst", "전환 연습"))),
        block(blocks::B6, reversed, trials.reversed_practice, Some(("B6_inst", "결합 과제"))),
        block(blocks::B7, reversed, trials.reversed_test, None),
    ]
}

fn block(
    id: &str,
    kind: BlockKind,
    trials: usize,
    instruction: Option<(&str, &str)>,
) -> BlockSpec {
    BlockSpec {
        id: id.to_string(),
        kind,
        trials,
        instruction: instruction.map(|(screen, heading)| BlockInstruction {
            screen: screen.to_string(),
            heading: heading.to_string(),
        }),
    }
}

/// Build the full timeline for `config`.
pub fn build_timeline(config: &ExperimentConfig) -> Result<Timeline, IatError> {
    config.validate()?;
    let plan = block_plan(config)?;
    let condition = config.counterbalancing.condition_tag();

    let mut nodes = Vec::with_capacity(config.trials.total() + plan.len() + 2);
    nodes.push(instruction_node(
        timeline::INTRO_SCREEN,
        render::intro(&config.keys),
    ));

    for spec in &plan {
        let left_label = render::side_label(&config.keys, &spec.kind, ResponseSide::Left);
        let right_label = render::side_label(&config.keys, &spec.kind, ResponseSide::Right);

        if let Some(instruction) = &spec.instruction {
            nodes.push(instruction_node(
                &instruction.screen,
                render::block_instructions(&instruction.heading, &left_label, &right_label),
            ));
        }

        let trials = block_trials(config, spec, &condition)?;
        nodes.extend(trials.into_iter().map(|record| {
            TimelineNode::Trial(TrialScreen {
                task: timeline::TASK_IAT.to_string(),
                html: render::trial_screen(&record.stimulus, &left_label, &right_label),
                choices: vec![config.keys.left.clone(), config.keys.right.clone()],
                record,
                feedback: ErrorFeedback::default(),
            })
        }));
    }

    nodes.push(instruction_node(timeline::END_SCREEN, render::end_screen()));

    let timeline = Timeline {
        counterbalancing: config.counterbalancing,
        policy: config.policy,
        blocks: plan,
        nodes,
    };
    info!(
        seed = config.seed,
        policy = ?config.policy,
        condition = %condition,
        trials = timeline.trial_count(),
        nodes = timeline.nodes.len(),
        "built IAT timeline"
    );
    Ok(timeline)
}

/// Generate the trial records of one block from its own seeded stream.
pub fn block_trials(
    config: &ExperimentConfig,
    spec: &BlockSpec,
    condition: &ConditionTag,
) -> Result<Vec<TrialRecord>, IatError> {
    let pool = pool_for_block(&spec.kind, &config.stimuli);
    let pool_split = side_counts(&pool);
    if config.policy == BalancingPolicy::BalancedRepeat && pool_split.left != pool_split.right {
        warn!(
            block = %spec.id,
            left = pool_split.left,
            right = pool_split.right,
            "pool is not left/right balanced; balanced policy will not equalize sides"
        );
    }

    let mut rng =
        DeterministicRng::for_label(config.seed, rng_constants::BLOCK_SEED_OFFSET, &spec.id);
    let sequence = generate(&pool, spec.trials, config.policy, &mut rng).map_err(|err| match err {
        IatError::InvalidConfiguration(reason) => {
            IatError::InvalidConfiguration(format!("block '{}': {reason}", spec.id))
        }
        other => other,
    })?;

    let split = side_counts(&sequence);
    debug!(
        block = %spec.id,
        trials = sequence.len(),
        pool = pool.len(),
        left = split.left,
        right = split.right,
        "generated block sequence"
    );

    Ok(sequence
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            TrialRecord::from_entry(&spec.id, index, entry, Some(condition.clone()))
        })
        .collect())
}

fn instruction_node(name: &str, body: Html) -> TimelineNode {
    TimelineNode::Instructions {
        name: name.to_string(),
        task: timeline::TASK_INSTRUCTIONS.to_string(),
        html: render::instructions(&body),
        choices: vec![keys::CONTINUE.to_string()],
    }
}
