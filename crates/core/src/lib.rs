pub mod ast;
pub mod cache;
pub mod config;
pub mod detector;
pub mod finding;
pub mod forge;
pub mod report;
pub mod solc;
pub mod synonyms;
pub mod task;
