mod chapter;
mod manga;
mod user;

pub use chapter::{Chapter, PageRef, sort_chapters};
pub use manga::Manga;
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accept `true`/`false`, `0`/`1`, or their string forms. `null` is false.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseFlag>::deserialize(deserializer)? {
        None => false,
        Some(LooseFlag::Bool(value)) => value,
        Some(LooseFlag::Int(value)) => value != 0,
        Some(LooseFlag::Text(value)) => matches!(value.trim(), "true" | "1"),
    })
}
