// Zone Sync - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Data models for zone state.

mod property;
mod target;
mod zone;

pub use property::{Ordering, SetProperty};
pub use target::{TargetPolicy, SENTINEL};
pub use zone::{Ensure, LiveSnapshot, ZoneSpec};
