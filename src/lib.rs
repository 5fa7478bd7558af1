#![forbid(unsafe_code)]
//! Apple `.strings` localization tables for Rust.
//!
//! Parses the classic `"source" = "translation";` text format (with optional
//! `/* … */` block comments) into an insertion-ordered table, lets you edit
//! translations and comments in place, reconciles two tables with a
//! configurable merge, and writes the result back out — round-trip faithful,
//! in UTF-16 (the format's historical default) or UTF-8.
//!
//! # Quick Start
//!
//! ```rust
//! use localizable::{MergeOptions, StringsTable};
//!
//! let mut table = StringsTable::from_content(
//!     "/* Title of the main screen */\n\"Home\" = \"Accueil\";\n",
//! )?;
//!
//! table.get_mut("Home")?.set_translation("Maison");
//!
//! // Pull in new keys from another table; existing values win by default.
//! let incoming = StringsTable::from_content("\"Settings\" = \"Réglages\";\n")?;
//! table.merge(&incoming, &MergeOptions::default());
//!
//! assert_eq!(
//!     table.to_content(),
//!     "/* Title of the main screen */\n\"Home\" = \"Maison\";\n\n\"Settings\" = \"Réglages\";\n"
//! );
//! # Ok::<(), localizable::Error>(())
//! ```
//!
//! File I/O goes through [`StringsTable::from_path`] and
//! [`StringsTable::write_to`], with the [`Encoding`] chosen per call.

pub mod encoding;
pub mod error;
pub mod parser;
pub mod table;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    encoding::Encoding,
    error::Error,
    table::{MergeOptions, StringsTable},
    types::LocalizedString,
};
