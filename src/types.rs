/// Stimulus word shown in the center of a trial screen.
/// Examples: `남자`, `재능`, `연습`
pub type StimulusText = String;
/// Analysis tag attached to every pool entry and trial record.
/// Examples: `male`, `talent`, `target_left`, `attr_right`
pub type ClassTag = String;
/// Identifier for a block of trials.
/// Examples: `B1_gender_practice`, `B7_combined_test`
pub type BlockId = String;
/// Name of a non-trial screen (instructions, end screen).
/// Examples: `intro`, `B3_inst`, `end`
pub type ScreenName = String;
/// Pre-rendered HTML handed to the presentation runtime.
/// Example: `<b>E: 남성 + 재능</b>`
pub type Html = String;
/// Single keyboard key as reported by the presentation runtime.
/// Examples: `e`, `i`, ` `
pub type KeyName = String;
/// Condition tag recorded on each trial for later analysis.
/// Example: `A_first`
pub type ConditionTag = String;
