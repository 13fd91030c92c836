use serde::Serialize;
use tracing::trace;

use crate::domain::blocks::{BlockKind, ContentBlock, ListKind};

use super::blocks::render_block;
use super::grouping::{GroupedBlock, group_blocks};
use super::options::RenderOptions;
use super::tree::{Element, RenderNode};

pub const CONTAINER_CLASS: &str = "notion-content";

/// Summary of one rendered document, for page shells that want to know what
/// they are wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub html: String,
    pub contains_code: bool,
    pub image_count: usize,
    /// Blocks that produced markup.
    pub rendered_blocks: usize,
    /// Blocks dropped because their kind is unsupported.
    pub skipped_blocks: usize,
}

/// Turns a document's full block sequence into one render tree.
///
/// Rendering is pure: the same blocks always give the same tree, nothing is
/// cached, and the result holds no borrows of the input.
#[derive(Debug, Clone, Default)]
pub struct BlockRenderer {
    options: RenderOptions,
}

impl BlockRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every block into a single container element. An empty sequence
    /// gives an empty container.
    pub fn render(&self, blocks: &[ContentBlock]) -> RenderNode {
        // Dropped up front so an unsupported block never splits a list run.
        let supported = blocks.iter().filter(|block| block.is_supported());
        let groups = group_blocks(supported);
        trace!(
            target = "application::render::document",
            blocks = blocks.len(),
            groups = groups.len(),
            "grouped document blocks"
        );

        let children = groups
            .iter()
            .filter_map(|group| self.render_group(group))
            .collect::<Vec<_>>();

        Element::new("div")
            .class(CONTAINER_CLASS)
            .children(children)
            .into()
    }

    pub fn render_html(&self, blocks: &[ContentBlock]) -> RenderOutput {
        let html = self.render(blocks).to_html();
        let skipped_blocks = blocks.iter().filter(|block| !block.is_supported()).count();

        RenderOutput {
            html,
            contains_code: blocks
                .iter()
                .any(|block| matches!(block.kind, BlockKind::Code { .. })),
            image_count: blocks
                .iter()
                .filter(|block| matches!(block.kind, BlockKind::Image { .. }))
                .count(),
            rendered_blocks: blocks.len() - skipped_blocks,
            skipped_blocks,
        }
    }

    fn render_group(&self, group: &GroupedBlock<'_>) -> Option<RenderNode> {
        match group {
            GroupedBlock::Single(block) => render_block(block, &self.options),
            GroupedBlock::List { kind, items } => {
                let (tag, class) = match kind {
                    ListKind::Numbered => ("ol", "block-list block-list-numbered"),
                    ListKind::Bulleted => ("ul", "block-list block-list-bulleted"),
                };
                let entries = items
                    .iter()
                    .filter_map(|item| render_block(item, &self.options));
                Some(Element::new(tag).class(class).children(entries).into())
            }
        }
    }
}

/// Render with default options.
pub fn render_blocks(blocks: &[ContentBlock]) -> RenderNode {
    BlockRenderer::default().render(blocks)
}
