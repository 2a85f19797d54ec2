// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - edge loading and code emission

mod format;
mod loader;
mod sweep;

pub use format::{format_runs, Command, CommandList};
pub use loader::{load_wires, parse_document, EdgeDef, EdgeDocument, WireDef, SUPPORTED_FORMATS};
pub use sweep::{dedup_picks, format_sweep, PathMode};
