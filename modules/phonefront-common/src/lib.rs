pub mod config;
pub mod dates;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod pipeline;
pub mod taxonomy;
pub mod types;
pub mod variant;

pub use config::Config;
pub use error::{PhoneFrontError, Result};
pub use taxonomy::TaxonomyLabels;
pub use types::*;
pub use variant::{resolve_variant, VariantSelection};
