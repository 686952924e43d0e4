//! Output generation for a fetched digest.
//!
//! # Submodules
//!
//! - [`json`]: Writes a [`Digest`](crate::models::Digest) to JSON for other tools
//! - [`markdown`]: Renders a digest as Markdown for reading
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── kim-minji.json
//!
//! markdown_output_dir/
//! └── 2025-05-06_kim-minji.md
//! ```

pub mod json;
pub mod markdown;
