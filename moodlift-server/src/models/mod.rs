//! Validated request-side domain types

mod asset_name;
mod listing;
mod page_path;
mod validation;

pub use asset_name::AssetName;
pub use listing::{ListPage, ListQuery};
pub use page_path::PagePath;
pub use validation::{require_text, ValidationError};
