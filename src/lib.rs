// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Moves-GeoJSON: cached Moves API access and storyline maps
//!
//! This crate memoizes Moves API calls in a shared key-value store
//! (never caching data that is still changing today) and converts daily
//! storylines into styled GeoJSON feature collections.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;
pub mod store;
pub mod time_utils;
