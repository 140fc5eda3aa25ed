use super::{id_or_generate, text_or};
use crate::application::ports::records::MediaRecord;
use crate::domain::entities::MediaItem;
use crate::domain::value_objects::MediaKind;

pub const DEFAULT_MEDIA_TITLE: &str = "Media";

pub fn map_media(item: &MediaRecord) -> MediaItem {
    let url = item
        .media
        .clone()
        .or_else(|| item.url.clone())
        .unwrap_or_default();
    let kind = if url.is_empty() {
        MediaKind::Image
    } else {
        MediaKind::infer_from_url(&url)
    };

    MediaItem {
        id: id_or_generate(item.record_id()),
        kind,
        title: text_or(item.title.as_ref(), DEFAULT_MEDIA_TITLE),
        url,
        description: Some(text_or(item.description.as_ref(), "")),
    }
}
