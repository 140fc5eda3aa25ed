//! サーバーレコードからドメインエンティティへの変換。
//!
//! どの関数も失敗しない。欠けた値は固定の既定値で埋める。

pub mod collections;
pub mod events;
pub mod feeds;
pub mod media;
pub mod members;
pub mod relief_funds;

pub use collections::map_collection;
pub use events::map_event;
pub use feeds::{map_comment, map_feed_to_post};
pub use media::map_media;
pub use members::{map_member, normalize_member_status};
pub use relief_funds::map_relief_fund;

use crate::domain::value_objects::generate_local_id;
use chrono::{DateTime, NaiveDateTime, Utc};

pub(crate) fn id_or_generate(id: Option<&str>) -> String {
    id.map(str::to_string).unwrap_or_else(generate_local_id)
}

pub(crate) fn text_or(value: Option<&String>, fallback: &str) -> String {
    value.cloned().unwrap_or_else(|| fallback.to_string())
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
