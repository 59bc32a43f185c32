//! Reference table loader for saved client info dumps.

use std::path::Path;

use overlay_core::ReferenceTables;
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};
use crate::wire::ClientInfoMessage;

/// Loads [`ReferenceTables`] from a JSON file holding one client info message.
///
/// The `type` field is optional, so both raw captures and hand-trimmed files
/// load the same way.
pub struct ReferenceLoader;

impl ReferenceLoader {
    pub fn load(path: &Path) -> LoadResult<ReferenceTables> {
        let content = read_file(path)?;
        let tables = Self::parse(&content)?;

        debug!(
            path = %path.display(),
            skills = tables.skill_count(),
            actions = tables.action_count(),
            items = tables.item_count(),
            "reference tables loaded from file"
        );

        Ok(tables)
    }

    pub fn parse(content: &str) -> LoadResult<ReferenceTables> {
        let message: ClientInfoMessage = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse client info JSON: {}", e))?;
        let tables = ReferenceTables::try_from(message)?;

        let dangling = tables.dangling_inputs().len();
        if dangling > 0 {
            warn!(dangling, "client info dump references items missing from the item table");
        }

        Ok(tables)
    }
}
