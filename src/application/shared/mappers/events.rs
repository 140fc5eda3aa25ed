use super::{id_or_generate, text_or};
use crate::application::ports::records::EventRecord;
use crate::domain::entities::CommunityEvent;
use chrono::{SecondsFormat, Utc};

pub const UNTITLED_EVENT: &str = "Untitled";
pub const UNKNOWN_LOCATION: &str = "TBD";

pub fn map_event(event: &EventRecord) -> CommunityEvent {
    let starts_at = event
        .date
        .clone()
        .or_else(|| event.starts_at.clone())
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    let cover_image = event
        .cover
        .clone()
        .or_else(|| event.cover_image.clone())
        .or_else(|| event.media.clone());

    CommunityEvent {
        id: id_or_generate(event.record_id()),
        title: text_or(event.title.as_ref(), UNTITLED_EVENT),
        description: text_or(event.description.as_ref(), ""),
        starts_at,
        location: text_or(event.location.as_ref(), UNKNOWN_LOCATION),
        cover_image,
    }
}
