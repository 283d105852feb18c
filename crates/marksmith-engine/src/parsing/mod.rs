//! # Parsing
//!
//! Two grammar levels run on the same [`crate::scanner`]: the block grammar
//! over the document, and the inline grammar over the text inside blocks.

pub mod blocks;
pub mod inline;

#[cfg(test)]
mod tests;
