//! linguist-ts
//!
//! Toolkit for Qt Linguist `.ts` translation catalogs: parsing and
//! canonical writing, `QTranslator`-style lookup with plural rules,
//! linting, and coverage statistics.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod indexer;
pub mod input;
pub mod lint;
pub mod plural;
pub mod report;
pub mod syntax;
pub mod types;

pub use catalog::Catalog;
