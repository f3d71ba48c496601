// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque document identifiers.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};

const ID_BYTES: usize = 12;

/// Generate a new document id: 24 lowercase hex characters.
pub fn new_id() -> Result<String, AppError> {
    let mut bytes = [0u8; ID_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}

/// Whether `raw` has the shape of an id produced by [`new_id`].
pub fn is_valid_id(raw: &str) -> bool {
    raw.len() == ID_BYTES * 2 && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
