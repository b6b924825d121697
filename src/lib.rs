// Copyright 2026 Pagevault Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pagevault library — archive URLs as rendered HTML, PDF, screenshot,
//! or raw-file snapshots under content-addressed storage.
//!
//! This library crate exposes the core modules for integration testing.

pub mod address;
pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod renderer;
pub mod rest;
pub mod saver;
