//! Splitting sections at top-level heading boundaries.
//!
//! Only level 1 and level 2 headings split. When the section has any H1 the
//! split level is 1, otherwise 2. If H2s only ever appear after an H1 they
//! are treated as sub-sections: the first H2 under each H1 stays on the H1's
//! slide as a subtitle and every further H2 opens its own slide.

use crate::model::{BlockRecord, Section};

/// Split a section (without atomic blocks) into heading groups.
pub fn split_by_headings(section: Section<'_>) -> Vec<Section<'_>> {
    let has_h1 = section.iter().any(|b| b.heading_level() == Some(1));
    let has_h2 = section.iter().any(|b| b.heading_level() == Some(2));
    if !has_h1 && !has_h2 {
        return vec![section];
    }

    let nested = has_nested_structure(&section);
    let split_level = if has_h1 { 1 } else { 2 };
    log::trace!(
        "Heading split: level {}, nested {}, {} blocks",
        split_level,
        nested,
        section.len()
    );

    let mut groups = Vec::new();
    let mut current: Section<'_> = Vec::new();
    let mut first_h2_under_h1 = true;

    for (i, block) in section.into_iter().enumerate() {
        let level = block.heading_level();
        let starts_group = if nested {
            match level {
                Some(1) => {
                    first_h2_under_h1 = true;
                    true
                }
                Some(2) if first_h2_under_h1 => {
                    first_h2_under_h1 = false;
                    false
                }
                Some(2) => true,
                _ => false,
            }
        } else {
            i > 0 && level == Some(split_level)
        };

        // A group holding nothing but headings is folded into the next one.
        if starts_group && has_content(&current) {
            groups.push(std::mem::take(&mut current));
        }
        current.push(block);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// True when an H1 precedes every H2 and at least one H2 exists.
pub fn has_nested_structure(blocks: &[BlockRecord<'_>]) -> bool {
    let mut found_h1 = false;
    let mut found_h2 = false;
    for block in blocks {
        match block.heading_level() {
            Some(1) => found_h1 = true,
            Some(2) if !found_h1 => return false,
            Some(2) => found_h2 = true,
            _ => {}
        }
    }
    found_h1 && found_h2
}

fn has_content(group: &[BlockRecord<'_>]) -> bool {
    group.iter().any(|b| !b.kind.is_heading())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::segment::collect_blocks;

    fn split(nodes: &[Node]) -> Vec<Vec<String>> {
        split_by_headings(collect_blocks(nodes))
            .iter()
            .map(|g| g.iter().map(|b| b.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_no_top_level_headings() {
        let nodes = vec![
            Node::heading(3, "h3"),
            Node::paragraph("a"),
            Node::heading(3, "h3b"),
            Node::paragraph("b"),
        ];
        assert_eq!(split(&nodes), vec![vec!["h3", "a", "h3b", "b"]]);
    }

    #[test]
    fn test_flat_h1_split() {
        let nodes = vec![
            Node::heading(1, "Intro"),
            Node::paragraph("hello"),
            Node::heading(1, "Next"),
            Node::paragraph("world"),
        ];
        assert_eq!(
            split(&nodes),
            vec![vec!["Intro", "hello"], vec!["Next", "world"]]
        );
    }

    #[test]
    fn test_flat_h2_split_level() {
        let nodes = vec![
            Node::paragraph("lead"),
            Node::heading(2, "A"),
            Node::paragraph("a"),
            Node::heading(3, "A.x"),
            Node::paragraph("ax"),
            Node::heading(2, "B"),
            Node::paragraph("b"),
        ];
        assert_eq!(
            split(&nodes),
            vec![vec!["lead"], vec!["A", "a", "A.x", "ax"], vec!["B", "b"]]
        );
    }

    #[test]
    fn test_h2_before_h1_is_flat() {
        let nodes = vec![
            Node::heading(2, "Sub"),
            Node::paragraph("s"),
            Node::heading(1, "Top"),
            Node::paragraph("t"),
            Node::heading(2, "Sub2"),
            Node::paragraph("u"),
        ];
        let records = collect_blocks(&nodes);
        assert!(!has_nested_structure(&records));
        assert_eq!(
            split(&nodes),
            vec![vec!["Sub", "s"], vec!["Top", "t", "Sub2", "u"]]
        );
    }

    #[test]
    fn test_nested_first_h2_stays() {
        let nodes = vec![
            Node::heading(1, "A"),
            Node::heading(2, "A.1"),
            Node::paragraph("p1"),
            Node::heading(2, "A.2"),
            Node::paragraph("p2"),
        ];
        assert_eq!(
            split(&nodes),
            vec![vec!["A", "A.1", "p1"], vec!["A.2", "p2"]]
        );
    }

    #[test]
    fn test_nested_resets_per_h1() {
        let nodes = vec![
            Node::heading(1, "A"),
            Node::paragraph("a"),
            Node::heading(2, "A.1"),
            Node::paragraph("a1"),
            Node::heading(1, "B"),
            Node::heading(2, "B.1"),
            Node::paragraph("b1"),
            Node::heading(2, "B.2"),
            Node::paragraph("b2"),
        ];
        assert_eq!(
            split(&nodes),
            vec![
                vec!["A", "a", "A.1", "a1"],
                vec!["B", "B.1", "b1"],
                vec!["B.2", "b2"],
            ]
        );
    }

    #[test]
    fn test_heading_only_group_folds_forward() {
        let nodes = vec![
            Node::heading(1, "Part"),
            Node::heading(1, "Chapter"),
            Node::paragraph("body"),
            Node::heading(1, "End"),
        ];
        assert_eq!(
            split(&nodes),
            vec![vec!["Part", "Chapter", "body"], vec!["End"]]
        );
    }

    #[test]
    fn test_nested_detection() {
        let nodes = vec![Node::heading(1, "A"), Node::paragraph("x")];
        assert!(!has_nested_structure(&collect_blocks(&nodes)));

        let nodes = vec![Node::heading(1, "A"), Node::heading(2, "B")];
        assert!(has_nested_structure(&collect_blocks(&nodes)));
    }
}
