//! 应用通用错误

use super::LibraryError;

/// 应用通用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 曲库错误
    #[error("曲库错误: {0}")]
    Library(#[from] LibraryError),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 设置相关错误
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// 保存设置失败
    #[error("保存设置失败: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    /// 序列化设置失败
    #[error("序列化设置失败: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
