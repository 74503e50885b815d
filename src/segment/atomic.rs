//! Isolating atomic media blocks.

use crate::model::Section;

/// Split a section so every atomic media block stands alone.
///
/// The run before each atomic block is flushed as its own section, the atomic
/// block becomes a singleton section, and accumulation resumes after it.
pub fn isolate_atomic(section: Section<'_>) -> Vec<Section<'_>> {
    if !section.iter().any(|b| b.is_atomic()) {
        return vec![section];
    }

    let mut sections = Vec::new();
    let mut current = Vec::new();
    for block in section {
        if block.is_atomic() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
            sections.push(vec![block]);
        } else {
            current.push(block);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, MediaKind, Node};
    use crate::segment::collect_blocks;

    #[test]
    fn test_no_atomic_blocks() {
        let nodes = vec![Node::paragraph("a"), Node::paragraph("b")];
        let sections = isolate_atomic(collect_blocks(&nodes));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 2);
    }

    #[test]
    fn test_atomic_in_the_middle() {
        let nodes = vec![
            Node::paragraph("before"),
            Node::whiteboard("Board", "{}"),
            Node::paragraph("after"),
        ];
        let sections = isolate_atomic(collect_blocks(&nodes));
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0][0].text, "before");
        assert_eq!(
            sections[1][0].kind,
            BlockKind::AtomicMedia(MediaKind::Whiteboard)
        );
        assert_eq!(sections[1].len(), 1);
        assert_eq!(sections[2][0].text, "after");
    }

    #[test]
    fn test_adjacent_atomic_blocks() {
        let nodes = vec![
            Node::new("spreadsheet"),
            Node::new("diagram"),
            Node::paragraph("tail"),
        ];
        let sections = isolate_atomic(collect_blocks(&nodes));
        let lens: Vec<_> = sections.iter().map(Vec::len).collect();
        assert_eq!(lens, [1, 1, 1]);
    }
}
