use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "jukebox-ratui",
    version,
    about = "本地音乐终端播放器（Rust + ratatui）"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 要播放的文件或目录（目录递归扫描）；留空则恢复上次的队列
    pub paths: Vec<PathBuf>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "JUKEBOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "JUKEBOX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 不打开音频设备，用模拟时钟播放（也可设置 JUKEBOX_NO_AUDIO=1）
    #[arg(long)]
    pub no_audio: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 运行 TUI（默认）
    Tui,

    /// 扫描并打印曲库后退出
    Scan {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

/// 读取布尔型环境变量，未设置或无法识别时为 false
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .is_some_and(|v| parse_flag(&v))
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
