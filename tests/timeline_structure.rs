use iat_sequencer::constants::blocks;
use iat_sequencer::metrics::{entry_counts, side_counts};
use iat_sequencer::scoring::{needs_error_feedback, score};
use iat_sequencer::{
    BalancingPolicy, ExperimentConfig, ResponseSide, TimelineNode, TrialCounts, build_timeline,
};

#[test]
fn same_seed_same_timeline() {
    let config = ExperimentConfig {
        seed: 1234,
        ..ExperimentConfig::default()
    };
    let first = build_timeline(&config).unwrap();
    let second = build_timeline(&config).unwrap();
    assert_eq!(first, second);

    let other = build_timeline(&ExperimentConfig {
        seed: 4321,
        ..ExperimentConfig::default()
    })
    .unwrap();
    let first_order: Vec<_> = first.trials().map(|record| record.stimulus.clone()).collect();
    let other_order: Vec<_> = other.trials().map(|record| record.stimulus.clone()).collect();
    assert_ne!(first_order, other_order);
}

#[test]
fn node_order_follows_block_plan() {
    let timeline = build_timeline(&ExperimentConfig::default()).unwrap();
    let mut sequence: Vec<String> = Vec::new();
    for node in &timeline.nodes {
        let label = match node {
            TimelineNode::Instructions { name, .. } => name.clone(),
            TimelineNode::Trial(screen) => screen.record.block.clone(),
        };
        if sequence.last() != Some(&label) {
            sequence.push(label);
        }
    }
    assert_eq!(
        sequence,
        vec![
            "intro",
            "B1_inst",
            blocks::B1,
            "B2_inst",
            blocks::B2,
            "B3_inst",
            blocks::B3,
            blocks::B4,
            "B5_inst",
            blocks::B5,
            "B6_inst",
            blocks::B6,
            blocks::B7,
            "end",
        ]
    );
}

#[test]
fn balanced_blocks_split_sides_evenly() {
    let timeline = build_timeline(&ExperimentConfig::default()).unwrap();
    for block in &timeline.blocks {
        let records: Vec<_> = timeline.block_trials(&block.id).collect();
        let sides = side_counts(records.iter().copied());
        assert_eq!(sides.total(), block.trials);
        if block.trials % 4 == 0 && block.id.contains("gender") {
            assert_eq!(sides.left, sides.right, "{} should split evenly", block.id);
        }
        let counts = entry_counts(records.iter().copied());
        let min = counts.values().copied().min().unwrap();
        let max = counts.values().copied().max().unwrap();
        assert!(max - min <= 1, "{} per-entry spread {min}..{max}", block.id);
    }
}

#[test]
fn combined_test_block_covers_every_word() {
    let timeline = build_timeline(&ExperimentConfig::default()).unwrap();
    let records: Vec<_> = timeline.block_trials(blocks::B4).collect();
    assert_eq!(records.len(), 56);
    // 14 words, 56 trials: four each.
    let counts = entry_counts(records.iter().copied());
    assert_eq!(counts.len(), 14);
    assert!(counts.values().all(|count| *count == 4));
    let sides = side_counts(records.iter().copied());
    assert_eq!((sides.left, sides.right), (28, 28));
}

#[test]
fn trial_screens_carry_labels_and_keys() {
    let timeline = build_timeline(&ExperimentConfig::default()).unwrap();
    let screen = timeline
        .nodes
        .iter()
        .find_map(|node| match node {
            TimelineNode::Trial(screen) if screen.record.block == blocks::B6 => Some(screen),
            _ => None,
        })
        .unwrap();
    assert!(screen.html.contains("<b>E: 여성 + 재능</b>"));
    assert!(screen.html.contains("<b>I: 남성 + 노력</b>"));
    assert!(screen.html.contains(&screen.record.stimulus));
    assert_eq!(screen.choices, vec!["e".to_string(), "i".to_string()]);
    assert_eq!(screen.task, "IAT");
    assert_eq!(screen.feedback.duration_ms, 250);
    assert!(screen.feedback.choices.is_empty());
}

#[test]
fn scoring_follows_record_side() {
    let config = ExperimentConfig::default();
    let timeline = build_timeline(&config).unwrap();
    for record in timeline.trials().take(40) {
        let right_key = config.keys.key_for(record.correct_side);
        let wrong_key = config.keys.key_for(record.correct_side.opposite());
        let hit = score(&config.keys, record, right_key, Some(600.0));
        let miss = score(&config.keys, record, wrong_key, Some(600.0));
        assert!(hit.correct);
        assert!(!needs_error_feedback(Some(&hit)));
        assert!(!miss.correct);
        assert!(needs_error_feedback(Some(&miss)));
    }
}

#[test]
fn with_replacement_timeline_keeps_counts() {
    let config = ExperimentConfig {
        policy: BalancingPolicy::WithReplacement,
        trials: TrialCounts {
            combined_test: 10,
            reversed_test: 10,
            ..TrialCounts::default()
        },
        ..ExperimentConfig::default()
    };
    let timeline = build_timeline(&config).unwrap();
    assert_eq!(timeline.trial_count(), config.trials.total());
    assert_eq!(timeline.block_trials(blocks::B7).count(), 10);
    assert!(
        timeline
            .block_trials(blocks::B1)
            .all(|record| record.class_tag == "male" || record.class_tag == "female")
    );
    let left_male = timeline
        .block_trials(blocks::B1)
        .filter(|record| record.class_tag == "male")
        .all(|record| record.correct_side == ResponseSide::Left);
    assert!(left_male);
}
