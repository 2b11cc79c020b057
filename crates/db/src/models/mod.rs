//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates
//!
//! Create and update DTOs derive [`validator::Validate`] so handlers can
//! reject malformed input before it reaches a repository.
//!
//! Update fields that can be cleared are `Option<Option<T>>`: absent keeps
//! the stored value, `null` clears it. They need [`deserialize_present`].

use serde::{Deserialize, Deserializer};

pub mod announcement;
pub mod brand;
pub mod charging;
pub mod media;
pub mod page;
pub mod partnership;
pub mod user;

/// `deserialize_with` helper turning any present value, `null` included,
/// into `Some`. Pair it with `#[serde(default)]` so an absent key stays `None`.
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
