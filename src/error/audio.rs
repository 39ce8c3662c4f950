//! 音频播放相关错误

use std::path::PathBuf;

/// 音频引擎命令失败的原因
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// 打开音频文件失败
    #[error("打开音频文件失败({title}): {source}")]
    OpenFile {
        title: String,
        #[source]
        source: std::io::Error,
    },

    /// 解码音频失败
    #[error("解码音频失败({title}): {source}")]
    Decode {
        title: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 音频输出流创建失败
    #[error("创建音频输出流失败: {0}")]
    OutputStream(String),

    /// 音量超出 0..=100
    #[error("音量无效: {0}")]
    InvalidVolume(u8),

    /// 当前没有加载任何音频
    #[error("当前没有加载音频")]
    NothingLoaded,

    /// 文件不存在
    #[error("音频文件不存在: {0}")]
    FileNotFound(PathBuf),
}
