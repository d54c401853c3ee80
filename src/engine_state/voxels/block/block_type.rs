//! # Block Type Module
//!
//! The rendering classification of a block definition. The walker never looks
//! at this; only the meshing side decides what a visible cell turns into.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

/// How a block is turned into geometry.
///
/// The `FromPrimitive` derive allows conversion from the compact integer form
/// used in configuration dumps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Occupies space but produces no faces.
    Invisible,

    /// Every face uses the same atlas sprite.
    Opaque,

    /// Each face uses its own sprite: `tx_index + face`, in [`BlockSide`] order.
    ///
    /// [`BlockSide`]: super::block_side::BlockSide
    OpaqueSeparateTx,
}

impl BlockType {
    /// Converts the compact integer form, returning `None` for unknown values.
    pub fn from_int(value: u8) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(value)
    }

    /// True if blocks of this type emit any geometry.
    pub fn is_visible(self) -> bool {
        self != BlockType::Invisible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_form_round_trips() {
        for t in [
            BlockType::Invisible,
            BlockType::Opaque,
            BlockType::OpaqueSeparateTx,
        ] {
            assert_eq!(BlockType::from_int(t as u8), Some(t));
        }
        assert_eq!(BlockType::from_int(3), None);
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&BlockType::OpaqueSeparateTx).unwrap();
        assert_eq!(json, "\"opaque_separate_tx\"");
    }
}
