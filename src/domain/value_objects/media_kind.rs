use serde::{Deserialize, Serialize};
use std::fmt;

const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "mov", "m4v", "webm", "mkv", "avi", "3gp"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// URL の拡張子から種別を推定する（クエリ・フラグメントは無視）
    pub fn infer_from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let Some((_, extension)) = path.rsplit_once('.') else {
            return MediaKind::Image;
        };
        if extension.contains('/') {
            return MediaKind::Image;
        }
        let extension = extension.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions_map_to_video() {
        for url in [
            "https://cdn.example.org/uploads/clip.mp4",
            "https://cdn.example.org/uploads/CLIP.MOV",
            "https://cdn.example.org/uploads/clip.webm?token=abc",
        ] {
            assert_eq!(MediaKind::infer_from_url(url), MediaKind::Video, "{url}");
        }
    }

    #[test]
    fn everything_else_maps_to_image() {
        for url in [
            "https://cdn.example.org/uploads/photo.jpg",
            "https://cdn.example.org/uploads/mp4/photo",
            "https://cdn.example.org/uploads/photo.mp4.png",
            "https://cdn.example.org.mp4/",
        ] {
            assert_eq!(MediaKind::infer_from_url(url), MediaKind::Image, "{url}");
        }
    }
}
