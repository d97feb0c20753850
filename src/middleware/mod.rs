// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request guards.

pub mod auth;

pub use auth::{require_credential, with_credential, Credential};
