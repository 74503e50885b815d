//! Flattening the host block tree into block records.

use crate::model::{is_slide_container, is_wrapper, BlockRecord, Node, MAX_NESTING_DEPTH};

/// Collect the top-level content blocks of a host tree, in document order.
///
/// Wrapper nodes (columns, block groups) are transparent: their children are
/// collected as if they were top-level. Slide containers are skipped together
/// with everything inside them. Children of content blocks stay attached to
/// their parent record. Wrappers nested deeper than [`MAX_NESTING_DEPTH`]
/// are skipped.
pub fn collect_blocks(nodes: &[Node]) -> Vec<BlockRecord<'_>> {
    let mut records = Vec::with_capacity(nodes.len());
    collect_into(nodes, &mut records, 0);
    records
}

fn collect_into<'a>(nodes: &'a [Node], records: &mut Vec<BlockRecord<'a>>, depth: usize) {
    if depth >= MAX_NESTING_DEPTH {
        log::warn!("Wrappers nested deeper than {} levels skipped", MAX_NESTING_DEPTH);
        return;
    }
    for node in nodes {
        if is_slide_container(&node.kind) {
            log::debug!("Skipping {} container", node.kind);
            continue;
        }
        if is_wrapper(&node.kind) {
            collect_into(&node.children, records, depth + 1);
            continue;
        }
        if let Some(record) = BlockRecord::from_node(node) {
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_collect_empty() {
        assert!(collect_blocks(&[]).is_empty());
    }

    #[test]
    fn test_collect_preserves_order() {
        let nodes = vec![
            Node::heading(1, "Title"),
            Node::paragraph("one"),
            Node::bullet("two"),
        ];
        let records = collect_blocks(&nodes);
        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["Title", "one", "two"]);
    }

    #[test]
    fn test_wrappers_are_transparent() {
        let nodes = vec![Node::new("columnList")
            .with_child(Node::new("column").with_child(Node::paragraph("left")))
            .with_child(Node::new("column").with_child(Node::paragraph("right")))];
        let records = collect_blocks(&nodes);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "left");
        assert_eq!(records[1].text, "right");
    }

    #[test]
    fn test_slide_containers_are_excluded() {
        let nodes = vec![
            Node::paragraph("keep"),
            Node::new("slideshow").with_prop("theme", "white"),
            Node::new("slide").with_child(Node::paragraph("old slide")),
        ];
        let records = collect_blocks(&nodes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "keep");
    }

    #[test]
    fn test_deeply_nested_wrappers_skipped() {
        let wrap = |depth: usize| {
            let mut node = Node::paragraph("inner");
            for _ in 0..depth {
                node = Node::new("blockGroup").with_child(node);
            }
            vec![node, Node::paragraph("outer")]
        };

        let shallow = wrap(3);
        assert_eq!(collect_blocks(&shallow).len(), 2);

        let deep = wrap(MAX_NESTING_DEPTH + 5);
        let records = collect_blocks(&deep);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "outer");
    }

    #[test]
    fn test_content_children_are_absorbed() {
        let nodes = vec![Node::bullet("parent")
            .with_child(Node::bullet("child"))
            .with_child(Node::bullet("sibling"))];
        let records = collect_blocks(&nodes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, BlockKind::ListItem(crate::model::ListKind::Bullet));
        assert_eq!(records[0].nested, 2);
    }
}
