//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes the ordered match list to the lineup JSON document
//!
//! # Output Structure
//!
//! ```text
//! <directory of the executable>/
//! └── ligainsider_lineups.json
//! ```

pub mod json;
