use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 本地曲目元数据，加载后不可变
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artists: Vec<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_art: Option<PathBuf>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl Track {
    pub fn artists_label(&self) -> String {
        if self.artists.is_empty() {
            "未知艺人".to_owned()
        } else {
            self.artists.join(", ")
        }
    }

    /// 形如 `标题 - 艺人A, 艺人B`
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.artists_label())
    }
}
