// ============================================================================
// Python Code Smell Detector - Library Interface
// ============================================================================
//
// This module exposes the internal modules for integration testing.
// The main binary (main.rs) drives them through `cli`.

pub mod ast_engine;
pub mod cli;
pub mod config;
pub mod report;
pub mod rules;
pub mod scanner;
