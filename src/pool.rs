//! Pool construction: binding stimuli to response sides for one block.

use crate::config::{BlockKind, StimulusSet};
use crate::constants::class_tags;
use crate::data::{Category, PoolEntry, ResponseSide, Stimulus};

/// Pool for a single-category-per-side block.
///
/// Left stimuli come first, then right stimuli, each in input order.
pub fn simple_pool(
    left: &[Stimulus],
    right: &[Stimulus],
    left_class: &str,
    right_class: &str,
) -> Vec<PoolEntry> {
    let mut pool = Vec::with_capacity(left.len() + right.len());
    extend_side(&mut pool, left, ResponseSide::Left, left_class);
    extend_side(&mut pool, right, ResponseSide::Right, right_class);
    pool
}

/// Pool for a target+attribute-per-side block.
///
/// Order: left targets, left attributes, right targets, right attributes.
pub fn combined_pool(
    left_targets: &[Stimulus],
    right_targets: &[Stimulus],
    left_attributes: &[Stimulus],
    right_attributes: &[Stimulus],
) -> Vec<PoolEntry> {
    let mut pool = Vec::with_capacity(
        left_targets.len() + right_targets.len() + left_attributes.len() + right_attributes.len(),
    );
    extend_side(&mut pool, left_targets, ResponseSide::Left, class_tags::TARGET_LEFT);
    extend_side(&mut pool, left_attributes, ResponseSide::Left, class_tags::ATTR_LEFT);
    extend_side(&mut pool, right_targets, ResponseSide::Right, class_tags::TARGET_RIGHT);
    extend_side(&mut pool, right_attributes, ResponseSide::Right, class_tags::ATTR_RIGHT);
    pool
}

/// Pool for a block kind, drawing words from `stimuli`.
pub fn pool_for_block(kind: &BlockKind, stimuli: &StimulusSet) -> Vec<PoolEntry> {
    match *kind {
        BlockKind::Simple { left, right } => simple_pool(
            &stimuli.stimuli(left),
            &stimuli.stimuli(right),
            category_class(left),
            category_class(right),
        ),
        BlockKind::Combined {
            left_target,
            left_attribute,
            right_target,
            right_attribute,
        } => combined_pool(
            &stimuli.stimuli(left_target),
            &stimuli.stimuli(right_target),
            &stimuli.stimuli(left_attribute),
            &stimuli.stimuli(right_attribute),
        ),
    }
}

/// Class tag used for a category in simple blocks.
pub fn category_class(category: Category) -> &'static str {
    match category {
        Category::Male => class_tags::MALE,
        Category::Female => class_tags::FEMALE,
        Category::Talent => class_tags::TALENT,
        Category::Effort => class_tags::EFFORT,
    }
}

fn extend_side(pool: &mut Vec<PoolEntry>, stimuli: &[Stimulus], side: ResponseSide, class: &str) {
    pool.extend(
        stimuli
            .iter()
            .map(|stimulus| PoolEntry::new(stimulus.text.clone(), side, class)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str], category: Category) -> Vec<Stimulus> {
        texts
            .iter()
            .map(|text| Stimulus::new(*text, category))
            .collect()
    }

    #[test]
    fn simple_pool_assigns_sides_in_order() {
        let pool = simple_pool(
            &words(&["남자", "남성"], Category::Male),
            &words(&["여자", "여성"], Category::Female),
            "male",
            "female",
        );
        let summary: Vec<_> = pool
            .iter()
            .map(|entry| (entry.text.as_str(), entry.side, entry.class_tag.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("남자", ResponseSide::Left, "male"),
                ("남성", ResponseSide::Left, "male"),
                ("여자", ResponseSide::Right, "female"),
                ("여성", ResponseSide::Right, "female"),
            ]
        );
    }

    #[test]
    fn combined_pool_orders_left_before_right() {
        let pool = combined_pool(
            &words(&["남자"], Category::Male),
            &words(&["여자"], Category::Female),
            &words(&["재능", "소질"], Category::Talent),
            &words(&["노력"], Category::Effort),
        );
        let tags: Vec<_> = pool.iter().map(|entry| entry.class_tag.as_str()).collect();
        assert_eq!(
            tags,
            vec![
                "target_left",
                "attr_left",
                "attr_left",
                "target_right",
                "attr_right"
            ]
        );
        assert_eq!(pool[3].side, ResponseSide::Right);
    }

    #[test]
    fn block_pool_uses_configured_words() {
        let stimuli = StimulusSet::default();
        let kind = BlockKind::Combined {
            left_target: Category::Female,
            left_attribute: Category::Talent,
            right_target: Category::Male,
            right_attribute: Category::Effort,
        };
        let pool = pool_for_block(&kind, &stimuli);
        assert_eq!(pool.len(), 14);
        assert_eq!(pool[0].text, "여자");
        assert_eq!(pool[0].side, ResponseSide::Left);
        let left = pool
            .iter()
            .filter(|entry| entry.side == ResponseSide::Left)
            .count();
        assert_eq!(left, 7);
    }
}
