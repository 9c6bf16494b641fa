//! CLI infrastructure for the gridpilot toolkit
//!
//! This module provides the command-line interface for training the hybrid
//! agent and for inspecting generated mazes.

pub mod commands;
pub mod output;
