// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: register users, log exercises, query exercise logs.
//!
//! This crate provides the HTTP API and its document store backends.

pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::Store;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
}
