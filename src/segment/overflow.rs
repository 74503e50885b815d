//! Splitting sections that are too long for one slide.

use super::options::{OverflowStrategy, SegmentOptions};
use super::weight::{section_weight, WeightEstimator};
use crate::model::{BlockRecord, Section};

/// Split a heading group into slide-sized runs.
///
/// Every returned run is non-empty and the concatenation of all runs is the
/// input, in order.
pub fn split_overflow<'a>(
    section: Section<'a>,
    options: &SegmentOptions,
    estimator: &dyn WeightEstimator,
) -> Vec<Section<'a>> {
    match options.overflow {
        OverflowStrategy::Weight => {
            split_by_weight(section, options.max_weight_per_slide, estimator)
        }
        OverflowStrategy::BlockCount => {
            split_by_block_count(section, options.max_blocks_per_slide)
        }
    }
}

/// Greedy packing by estimated weight.
///
/// A block heavier than the whole budget is emitted alone. Before a level 3+
/// heading the current run is flushed early when the heading's first content
/// block would push it over budget, so sub-sections start on a fresh slide.
pub fn split_by_weight<'a>(
    section: Section<'a>,
    budget: f64,
    estimator: &dyn WeightEstimator,
) -> Vec<Section<'a>> {
    if section.is_empty() || section_weight(&section, estimator) <= budget {
        return vec![section];
    }

    let mut runs = Vec::new();
    let mut current: Section<'a> = Vec::new();
    let mut current_weight = 0.0;
    let mut blocks = section.into_iter().peekable();

    while let Some(block) = blocks.next() {
        if is_subheading(&block) && !current.is_empty() {
            if let Some(next) = blocks.peek() {
                if current_weight + estimator.weight_of(next) > budget {
                    runs.push(std::mem::take(&mut current));
                    current_weight = 0.0;
                }
            }
        }

        let weight = estimator.weight_of(&block);
        if weight > budget {
            log::debug!("Block of weight {:.2} exceeds budget {:.2}", weight, budget);
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
                current_weight = 0.0;
            }
            runs.push(vec![block]);
            continue;
        }

        if !current.is_empty() && current_weight + weight > budget {
            runs.push(std::mem::take(&mut current));
            current_weight = 0.0;
        }
        current_weight += weight;
        current.push(block);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Fixed block-count packing with heading-aware breaks.
///
/// Once a run holds `cap - 3` blocks an H3 starts the next run. At the cap the
/// run is closed only at a good break: at the end of input, before a heading,
/// or after anything but a list item, so lists are not cut mid-way.
pub fn split_by_block_count(section: Section<'_>, cap: usize) -> Vec<Section<'_>> {
    let cap = cap.max(1);
    if section.len() <= cap {
        return vec![section];
    }

    let soft_cap = cap.saturating_sub(3);
    let mut runs = Vec::new();
    let mut current = Vec::new();
    let mut blocks = section.into_iter().peekable();

    while let Some(block) = blocks.next() {
        if block.heading_level() == Some(3) && !current.is_empty() && current.len() >= soft_cap {
            runs.push(std::mem::take(&mut current));
        }
        let after_list_item = block.kind.is_list_item();
        current.push(block);

        if current.len() >= cap {
            let good_break = match blocks.peek() {
                None => true,
                Some(next) => next.kind.is_heading() || !after_list_item,
            };
            if good_break {
                runs.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn is_subheading(block: &BlockRecord<'_>) -> bool {
    block.heading_level().is_some_and(|level| level >= 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::segment::{collect_blocks, StaticWeight};

    fn lens(runs: &[Section<'_>]) -> Vec<usize> {
        runs.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_within_budget_is_one_run() {
        let nodes: Vec<_> = (0..5).map(|i| Node::paragraph(format!("p{i}"))).collect();
        let runs = split_by_weight(collect_blocks(&nodes), 20.0, &StaticWeight::default());
        assert_eq!(lens(&runs), [5]);
    }

    #[test]
    fn test_greedy_packing() {
        let nodes: Vec<_> = (0..30).map(|_| Node::paragraph("")).collect();
        let runs = split_by_weight(collect_blocks(&nodes), 20.0, &StaticWeight::default());
        assert_eq!(lens(&runs), [20, 10]);
    }

    #[test]
    fn test_oversized_block_stands_alone() {
        let nodes = vec![
            Node::paragraph("a"),
            Node::code("text", "x".repeat(4000)),
            Node::paragraph("b"),
        ];
        let runs = split_by_weight(collect_blocks(&nodes), 20.0, &StaticWeight::default());
        assert_eq!(lens(&runs), [1, 1, 1]);
        assert_eq!(runs[1][0].text.len(), 4000);
    }

    #[test]
    fn test_flush_before_subheading() {
        let weights = |b: &BlockRecord<'_>| if b.kind.is_heading() { 0.0 } else { 6.0 };
        let nodes = vec![
            Node::paragraph("a"),
            Node::paragraph("b"),
            Node::heading(3, "Sub"),
            Node::paragraph("c"),
            Node::paragraph("d"),
        ];
        // Without the early flush the heading would be stranded at the
        // bottom of the first slide.
        let runs = split_by_weight(collect_blocks(&nodes), 15.0, &weights);
        let texts: Vec<Vec<&str>> = runs
            .iter()
            .map(|r| r.iter().map(|b| b.text.as_str()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["a", "b"], vec!["Sub", "c", "d"]]);
    }

    #[test]
    fn test_weight_split_is_idempotent() {
        let nodes: Vec<_> = (0..40)
            .map(|i| Node::paragraph("y".repeat(i * 17 % 300)))
            .collect();
        let estimator = StaticWeight::default();
        let runs = split_by_weight(collect_blocks(&nodes), 20.0, &estimator);
        for run in runs {
            let len = run.len();
            let again = split_by_weight(run, 20.0, &estimator);
            assert_eq!(lens(&again), [len]);
        }
    }

    #[test]
    fn test_block_count_short_section() {
        let nodes: Vec<_> = (0..15).map(|i| Node::paragraph(format!("p{i}"))).collect();
        let runs = split_by_block_count(collect_blocks(&nodes), 15);
        assert_eq!(lens(&runs), [15]);
    }

    #[test]
    fn test_block_count_cap() {
        let nodes: Vec<_> = (0..32).map(|i| Node::paragraph(format!("p{i}"))).collect();
        let runs = split_by_block_count(collect_blocks(&nodes), 15);
        assert_eq!(lens(&runs), [15, 15, 2]);
    }

    #[test]
    fn test_block_count_keeps_lists_together() {
        let mut nodes: Vec<_> = (0..14).map(|i| Node::paragraph(format!("p{i}"))).collect();
        nodes.extend((0..4).map(|i| Node::bullet(format!("item {i}"))));
        nodes.push(Node::paragraph("after"));
        nodes.push(Node::paragraph("tail"));
        let runs = split_by_block_count(collect_blocks(&nodes), 15);
        // No break may follow a list item, so the run closes after "after".
        assert_eq!(lens(&runs), [19, 1]);
    }

    #[test]
    fn test_block_count_h3_break() {
        let mut nodes: Vec<_> = (0..13).map(|i| Node::paragraph(format!("p{i}"))).collect();
        nodes.push(Node::heading(3, "Sub"));
        nodes.extend((0..4).map(|i| Node::paragraph(format!("q{i}"))));
        let runs = split_by_block_count(collect_blocks(&nodes), 15);
        assert_eq!(lens(&runs), [13, 5]);
        assert_eq!(runs[1][0].text, "Sub");
    }

    #[test]
    fn test_strategy_dispatch() {
        let nodes: Vec<_> = (0..16).map(|_| Node::paragraph("")).collect();
        let options = SegmentOptions::new().by_block_count();
        let runs = split_overflow(collect_blocks(&nodes), &options, &StaticWeight::default());
        assert_eq!(lens(&runs), [15, 1]);

        let runs = split_overflow(
            collect_blocks(&nodes),
            &SegmentOptions::default(),
            &StaticWeight::default(),
        );
        assert_eq!(lens(&runs), [16]);
    }
}
