//! Extraction configuration.
//!
//! Loaded once, either built in code or parsed from TOML:
//!
//! ```toml
//! chunk_size = 16
//! parallel = false
//! cull_hidden_faces = true
//! merge_faces = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

/// Settings for the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Chunk edge length in voxels for partitioned collection.
    pub chunk_size: i32,
    /// Collect chunks on the rayon thread pool.
    pub parallel: bool,
    /// Narrow each voxel's visible mask against its neighbors first.
    pub cull_hidden_faces: bool,
    /// Greedily coalesce adjacent equal faces into larger areas.
    pub merge_faces: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            chunk_size: 32,
            parallel: true,
            cull_hidden_faces: true,
            merge_faces: true,
        }
    }
}

impl ExtractConfig {
    /// Single-threaded settings with otherwise default values.
    #[must_use]
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    /// [`ExtractError::InvalidConfig`] on malformed TOML, unknown keys or
    /// invalid values.
    pub fn from_toml_str(text: &str) -> ExtractResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ExtractError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// [`ExtractError::InvalidConfig`] if `chunk_size` is not positive.
    pub fn validate(&self) -> ExtractResult<()> {
        if self.chunk_size <= 0 {
            return Err(ExtractError::InvalidConfig(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }
}
