//! 本地曲库扫描相关错误

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// 路径不存在
    #[error("路径不存在: {0}")]
    NotFound(PathBuf),

    /// 文件无法打开
    #[error("无法打开文件({path}): {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 标签读取失败
    #[error("读取标签失败({path}): {message}")]
    Tag { path: PathBuf, message: String },

    /// 不支持的文件类型
    #[error("不支持的音频格式: {0}")]
    Unsupported(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = LibraryError::NotFound(PathBuf::from("/nope"));
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_tag_error_display() {
        let err = LibraryError::Tag {
            path: PathBuf::from("a.mp3"),
            message: "bad header".to_owned(),
        };
        assert_eq!(err.to_string(), "读取标签失败(a.mp3): bad header");
    }
}
