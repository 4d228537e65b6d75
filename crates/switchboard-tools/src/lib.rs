// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared tool catalog for Switchboard specialists.
//!
//! Every specialist sees the same catalog; specialization lives entirely in
//! the bound instruction text. Executing tools is the engine's business, so a
//! [`Tool`] here is only a descriptor.

pub mod tool;

pub use tool::{StaticTool, Tool, ToolRegistry};
