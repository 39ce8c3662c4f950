use lofty::prelude::*;
use lofty::probe::Probe;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::model::Track;
use crate::error::LibraryError;

static AUDIO_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mp3", "flac", "ogg", "oga", "opus", "wav", "m4a", "aac", "aiff", "aif", "alac", "mka",
    ]
    .into_iter()
    .collect()
});

const COVER_STEMS: [&str; 3] = ["cover", "folder", "front"];
const COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.contains(e.to_ascii_lowercase().as_str()))
}

/// 把命令行给出的文件/目录展开为曲目列表
///
/// 目录会递归遍历并按文件名排序；不支持的扩展名静默忽略。
/// 不存在的路径直接报错，遍历中途的 IO 错误和打不开的文件只记日志并跳过。
pub fn scan_paths(paths: &[PathBuf]) -> Result<Vec<Track>, LibraryError> {
    let mut tracks = Vec::new();
    let mut covers: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();

    for root in paths {
        if !root.exists() {
            return Err(LibraryError::NotFound(root.clone()));
        }

        if root.is_file() {
            if !is_supported_audio(root) {
                return Err(LibraryError::Unsupported(root.clone()));
            }
            tracks.extend(load_with_fallback(root, &mut covers));
            continue;
        }

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(root = %root.display(), err = %e, "遍历目录时跳过条目");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_supported_audio(entry.path()) {
                continue;
            }
            tracks.extend(load_with_fallback(entry.path(), &mut covers));
        }
    }

    tracing::info!(count = tracks.len(), "曲库扫描完成");
    Ok(tracks)
}

/// 打不开的文件返回 None；标签解析失败时退回文件名
fn load_with_fallback(
    path: &Path,
    covers: &mut HashMap<PathBuf, Option<PathBuf>>,
) -> Option<Track> {
    let mut track = match read_track(path) {
        Ok(t) => t,
        Err(e @ LibraryError::Open { .. }) => {
            tracing::warn!(path = %path.display(), err = %e, "无法打开文件，跳过");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), err = %e, "标签读取失败，使用文件名");
            fallback_track(path)
        }
    };

    if let Some(dir) = path.parent() {
        track.album_art = covers
            .entry(dir.to_path_buf())
            .or_insert_with(|| find_cover(dir))
            .clone();
    }
    Some(track)
}

/// 读取单个文件的标签与时长
pub fn read_track(path: &Path) -> Result<Track, LibraryError> {
    File::open(path).map_err(|source| LibraryError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let tagged = Probe::open(path)
        .and_then(|p| p.read())
        .map_err(|e| LibraryError::Tag {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let duration = tagged.properties().duration();
    let duration_ms = (!duration.is_zero()).then(|| duration.as_millis() as u64);

    let mut track = fallback_track(path);
    track.duration_ms = duration_ms;

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = tag.title().filter(|t| !t.trim().is_empty()) {
            track.title = title.trim().to_owned();
        }
        if let Some(artist) = tag.artist() {
            track.artists = split_artists(&artist);
        }
        track.album = tag
            .album()
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());
    }

    Ok(track)
}

fn fallback_track(path: &Path) -> Track {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Track {
        path: path.to_path_buf(),
        title,
        ..Default::default()
    }
}

fn split_artists(raw: &str) -> Vec<String> {
    raw.split([';', '/'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn find_cover(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let stem = p
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_ascii_lowercase);
            let ext = p
                .extension()
                .and_then(|s| s.to_str())
                .map(str::to_ascii_lowercase);
            matches!(
                (stem.as_deref(), ext.as_deref()),
                (Some(s), Some(e)) if COVER_STEMS.contains(&s) && COVER_EXTENSIONS.contains(&e)
            )
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
