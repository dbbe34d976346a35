/// Stimulus word lists for the gender and trait-attribution categories.
pub mod stimuli {
    /// Target words for the male category.
    pub const MALE: [&str; 2] = ["남자", "남성"];
    /// Target words for the female category.
    pub const FEMALE: [&str; 2] = ["여자", "여성"];
    /// Attribute words for the talent category.
    pub const TALENT: [&str; 5] = ["재능", "타고난", "천부적", "선천적", "소질"];
    /// Attribute words for the effort category.
    pub const EFFORT: [&str; 5] = ["노력", "연습", "훈련", "학습", "연마"];
}

/// Default response keys.
pub mod keys {
    /// Key for left-side responses.
    pub const LEFT: &str = "e";
    /// Key for right-side responses.
    pub const RIGHT: &str = "i";
    /// Key used to advance instruction screens.
    pub const CONTINUE: &str = " ";
}

/// Trial counts for the standard 7-block design.
pub mod trial_counts {
    /// Gender practice.
    pub const B1: usize = 20;
    /// Attribute practice.
    pub const B2: usize = 20;
    /// Combined practice.
    pub const B3: usize = 20;
    /// Combined test.
    pub const B4: usize = 56;
    /// Gender switch practice.
    pub const B5: usize = 20;
    /// Combined practice (reversed).
    pub const B6: usize = 20;
    /// Combined test (reversed).
    pub const B7: usize = 56;
    /// Upper bound on trials in a single block.
    pub const MAX_PER_BLOCK: usize = 10_000;
}

/// Block identifiers recorded on every trial.
pub mod blocks {
    /// Gender practice.
    pub const B1: &str = "B1_gender_practice";
    /// Attribute practice.
    pub const B2: &str = "B2_attribute_practice";
    /// Combined practice.
    pub const B3: &str = "B3_combined_practice";
    /// Combined test.
    pub const B4: &str = "B4_combined_test";
    /// Gender switch practice.
    pub const B5: &str = "B5_gender_switch";
    /// Combined practice (reversed).
    pub const B6: &str = "B6_combined_practice";
    /// Combined test (reversed).
    pub const B7: &str = "B7_combined_test";
}

/// Class tags attached to pool entries.
pub mod class_tags {
    /// Simple-block tag for male words.
    pub const MALE: &str = "male";
    /// Simple-block tag for female words.
    pub const FEMALE: &str = "female";
    /// Simple-block tag for talent words.
    pub const TALENT: &str = "talent";
    /// Simple-block tag for effort words.
    pub const EFFORT: &str = "effort";
    /// Target word assigned to the left side of a combined block.
    pub const TARGET_LEFT: &str = "target_left";
    /// Target word assigned to the right side of a combined block.
    pub const TARGET_RIGHT: &str = "target_right";
    /// Attribute word assigned to the left side of a combined block.
    pub const ATTR_LEFT: &str = "attr_left";
    /// Attribute word assigned to the right side of a combined block.
    pub const ATTR_RIGHT: &str = "attr_right";
}

/// Category display labels used in side labels and instructions.
pub mod labels {
    /// Label for the male category.
    pub const MALE: &str = "남성";
    /// Label for the female category.
    pub const FEMALE: &str = "여성";
    /// Label for the talent category.
    pub const TALENT: &str = "재능";
    /// Label for the effort category.
    pub const EFFORT: &str = "노력";
}

/// Constants used by timeline assembly and the runtime handoff.
pub mod timeline {
    /// Task tag for instruction screens.
    pub const TASK_INSTRUCTIONS: &str = "instructions";
    /// Task tag for categorization trials.
    pub const TASK_IAT: &str = "IAT";
    /// Task tag for the error flash.
    pub const TASK_ERROR_FEEDBACK: &str = "error_feedback";
    /// Screen name of the opening instructions.
    pub const INTRO_SCREEN: &str = "intro";
    /// Screen name of the closing screen.
    pub const END_SCREEN: &str = "end";
    /// How long the error flash stays up, in milliseconds.
    pub const ERROR_FEEDBACK_MS: u32 = 250;
    /// Condition tag for the A-first counterbalancing order.
    pub const CONDITION_A_FIRST: &str = "A_first";
    /// Condition tag for the B-first counterbalancing order.
    pub const CONDITION_B_FIRST: &str = "B_first";
}

/// Constants used by seeded random streams.
pub mod rng {
    /// Default experiment seed.
    pub const DEFAULT_SEED: u64 = 42;
    /// Offset mixed into per-block seed derivation.
    pub const BLOCK_SEED_OFFSET: u64 = 0x1A7_B10C;
    /// Offset mixed into the counterbalancing coin flip.
    pub const COUNTERBALANCE_SEED_OFFSET: u64 = 0xC0_1F11;
}
