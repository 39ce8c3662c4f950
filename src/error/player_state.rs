//! 播放器状态持久化相关错误

/// 播放器状态持久化错误类型
#[derive(Debug, thiserror::Error)]
pub enum PlayerStateError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),

    /// 版本不兼容
    #[error("版本不兼容: 预期 {expected}, 找到 {found}")]
    IncompatibleVersion { expected: u8, found: u8 },

    /// 后台保存任务异常退出
    #[error("保存任务失败: {0}")]
    Join(String),
}
