//! Marker-delimited regions of a markdown document.
//!
//! A region is owned by this tool: everything strictly between the start and
//! end marker is regenerated, everything else (markers included) is kept
//! byte-for-byte.

use crate::error::{DocsError, Result};
use std::ops::Range;

/// Two literal sentinel comments delimiting a generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

/// Aggregated docs for every action, in the repository's root README.
pub const ACTION_DOCS: MarkerPair = MarkerPair {
    start: "<!-- start action docs -->",
    end: "<!-- end action docs -->",
};

/// Inputs table inside a unit's own README.
pub const INPUTS: MarkerPair = MarkerPair {
    start: "<!-- start inputs -->",
    end: "<!-- end inputs -->",
};

/// Outputs table inside a unit's own README.
pub const OUTPUTS: MarkerPair = MarkerPair {
    start: "<!-- start outputs -->",
    end: "<!-- end outputs -->",
};

impl MarkerPair {
    /// Byte range strictly between the end of the first start marker and the
    /// first end marker.
    pub fn locate(&self, document: &str) -> Result<Range<usize>> {
        let start = document
            .find(self.start)
            .ok_or_else(|| DocsError::MissingStartMarker(self.start.to_string()))?;
        let end = document
            .find(self.end)
            .ok_or_else(|| DocsError::MissingEndMarker(self.end.to_string()))?;

        let inner_start = start + self.start.len();
        if end < inner_start {
            return Err(DocsError::MarkerOrder {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(inner_start..end)
    }
}

/// Replace the text between `pair` with `replacement`, framed by one newline
/// on each side.
///
/// Splicing the same replacement twice yields the same document as splicing
/// it once.
pub fn splice(document: &str, pair: MarkerPair, replacement: &str) -> Result<String> {
    let inner = pair.locate(document)?;

    let mut updated = String::with_capacity(document.len() + replacement.len() + 2);
    updated.push_str(&document[..inner.start]);
    updated.push('\n');
    updated.push_str(replacement);
    updated.push('\n');
    updated.push_str(&document[inner.end..]);
    Ok(updated)
}
