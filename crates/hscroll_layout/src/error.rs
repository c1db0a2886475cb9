use thiserror::Error;

use crate::tree::ViewId;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Taffy(#[from] taffy::TaffyError),

    #[error("unknown view: {0:?}")]
    UnknownView(ViewId),

    #[error("view {0:?} is not a content view")]
    NotContent(ViewId),

    #[error("invalid saved state json: {0}")]
    SavedStateJson(#[from] serde_json::Error),

    #[error("saved state parcel truncated: needed {needed} bytes, found {found}")]
    TruncatedParcel { needed: usize, found: usize },

    #[error("saved state parcel has {0} trailing bytes")]
    TrailingParcelBytes(usize),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
