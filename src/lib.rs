//! Smartlink - multi-platform music link pages.
//!
//! Paste one streaming link, get every platform's link for the same song:
//! the resolver asks song.link for the equivalents, the merge logic folds
//! them into the page being edited, and the store keeps the finished pages
//! along with their view and click counters.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod merge;
pub mod model;
pub mod resolver;
pub mod service;
pub mod store;
#[cfg(test)]
pub mod test_utils;
