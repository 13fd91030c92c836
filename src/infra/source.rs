//! Reading JSON dumps from disk or standard input.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::domain::{blocks::ContentBlock, posts::Post};

use super::error::InfraError;
use super::notion::{decode_blocks, decode_posts};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

pub fn read_source(path: &Path) -> Result<String, InfraError> {
    if path.as_os_str() == STDIN_PATH {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| InfraError::read(path, err))?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).map_err(|err| InfraError::read(path, err))
}

/// Load one document's block sequence.
pub fn load_blocks(path: &Path) -> Result<Vec<ContentBlock>, InfraError> {
    let json = read_source(path)?;
    let blocks = decode_blocks(&json).map_err(|err| InfraError::decode(path, err))?;
    debug!(
        target = "infra::source",
        path = %path.display(),
        blocks = blocks.len(),
        "loaded block dump"
    );
    Ok(blocks)
}

/// Load a posts-database query dump.
pub fn load_posts(path: &Path) -> Result<Vec<Post>, InfraError> {
    let json = read_source(path)?;
    let posts = decode_posts(&json).map_err(|err| InfraError::decode(path, err))?;
    debug!(
        target = "infra::source",
        path = %path.display(),
        posts = posts.len(),
        "loaded posts dump"
    );
    Ok(posts)
}
