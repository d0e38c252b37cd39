pub mod config;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod lexer;
pub mod report;
pub mod similarity;
pub mod trie;
pub mod types;
