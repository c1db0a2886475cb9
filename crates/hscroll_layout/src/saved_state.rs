//! Persisted scroll state
//!
//! The scroll offset is stored relative to the content start so it survives a
//! change of layout direction. The view's own opaque state travels with it.
//!
//! Two encodings are provided:
//!
//! - JSON: `{"superState": [..], "offsetFromStart": 150}`
//! - parcel: `u32` LE blob length, blob bytes, `i32` LE offset

use serde::{Deserialize, Serialize};

use hscroll_core::LayoutDirection;

use crate::error::{Error, Result};

const LEN_BYTES: usize = 4;
const OFFSET_BYTES: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSavedState {
    #[serde(default)]
    pub super_state: Vec<u8>,
    pub offset_from_start: i32,
}

impl ScrollSavedState {
    pub fn new(super_state: Vec<u8>, offset_from_start: i32) -> Self {
        Self {
            super_state,
            offset_from_start,
        }
    }

    /// State for a view scrolled to `scroll_x` under `direction`
    pub fn capture(scroll_x: i32, direction: LayoutDirection, super_state: Vec<u8>) -> Self {
        let offset_from_start = if direction.is_rtl() { -scroll_x } else { scroll_x };
        Self::new(super_state, offset_from_start)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_parcel(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LEN_BYTES + self.super_state.len() + OFFSET_BYTES);
        out.extend_from_slice(&(self.super_state.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.super_state);
        out.extend_from_slice(&self.offset_from_start.to_le_bytes());
        out
    }

    pub fn from_parcel(bytes: &[u8]) -> Result<Self> {
        let (len, rest) = split_array::<LEN_BYTES>(bytes, LEN_BYTES + OFFSET_BYTES)?;
        let len = u32::from_le_bytes(len) as usize;

        let needed = LEN_BYTES + len + OFFSET_BYTES;
        if rest.len() < len + OFFSET_BYTES {
            return Err(Error::TruncatedParcel {
                needed,
                found: bytes.len(),
            });
        }
        let (super_state, rest) = rest.split_at(len);
        let (offset, rest) = split_array::<OFFSET_BYTES>(rest, needed)?;

        if !rest.is_empty() {
            return Err(Error::TrailingParcelBytes(rest.len()));
        }

        Ok(Self {
            super_state: super_state.to_vec(),
            offset_from_start: i32::from_le_bytes(offset),
        })
    }
}

fn split_array<const N: usize>(bytes: &[u8], needed: usize) -> Result<([u8; N], &[u8])> {
    if bytes.len() < N {
        return Err(Error::TruncatedParcel {
            needed,
            found: bytes.len(),
        });
    }
    let (head, rest) = bytes.split_at(N);
    let mut array = [0u8; N];
    array.copy_from_slice(head);
    Ok((array, rest))
}
