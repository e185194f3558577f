use holonet_model::ResourceKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("No {0} view is mounted")]
    NoSuchView(ResourceKind),

    #[error("Item {index} is out of range ({len} items listed)")]
    ItemOutOfRange { index: usize, len: usize },
}
