//! # Saorsa Logo Core
//!
//! Pure logic for turning a logo request into upstream prompts and turning
//! upstream output back into a uniform result.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  logo-core                   │
//! ├──────────────────────────────────────────────┤
//! │  Request          │  Prompt compositor       │
//! │  - Validation     │  - Image prompt          │
//! │  - Tag defaults   │  - Vector instructions   │
//! │  - Catalog        │  - Concept instructions  │
//! ├──────────────────────────────────────────────┤
//! │  Normalizer       │  Markup extraction       │
//! │  - Result union   │  - Fence stripping       │
//! │  - Data URIs      │  - <svg> span matching   │
//! └──────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod data_uri;
pub mod error;
pub mod markup;
pub mod prompt;
pub mod request;
pub mod result;

pub use catalog::{CatalogEntry, ColorScheme, StyleTag};
pub use error::{LogoError, LogoResult};
pub use prompt::compose_prompt;
pub use request::{GenerationRequest, DEFAULT_COLOR_SCHEME, DEFAULT_STYLE};
pub use result::GenerationResult;

/// Logo core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
