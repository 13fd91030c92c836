use crate::domain::blocks::{ContentBlock, ListKind};

/// Render-only view over the input: either one block, or a maximal run of
/// adjacent list items of the same kind that share one list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedBlock<'a> {
    Single(&'a ContentBlock),
    List {
        kind: ListKind,
        items: Vec<&'a ContentBlock>,
    },
}

impl GroupedBlock<'_> {
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            GroupedBlock::Single(_) => None,
            GroupedBlock::List { kind, .. } => Some(*kind),
        }
    }
}

/// Collapse adjacent same-kind list items into list groups in one pass.
///
/// Only the most recent group can be extended. Once any other block (or the
/// other list kind) has been emitted the earlier group stays closed, so two
/// bulleted runs separated by a paragraph become two lists.
pub fn group_blocks<'a>(
    blocks: impl IntoIterator<Item = &'a ContentBlock>,
) -> Vec<GroupedBlock<'a>> {
    let mut groups: Vec<GroupedBlock<'a>> = Vec::new();

    for block in blocks {
        let Some(kind) = block.list_kind() else {
            groups.push(GroupedBlock::Single(block));
            continue;
        };

        match groups.last_mut() {
            Some(GroupedBlock::List {
                kind: open_kind,
                items,
            }) if *open_kind == kind => items.push(block),
            _ => groups.push(GroupedBlock::List {
                kind,
                items: vec![block],
            }),
        }
    }

    groups
}
