use std::path::PathBuf;

#[derive(Debug)]
pub enum AudioCommand {
    /// 加载并（默认）开始播放一个本地文件
    Load {
        /// 播放队列中的下标，原样回报在 MediaChanged 里
        queue_index: usize,
        path: PathBuf,
        title: String,
        /// 标签里读到的时长，解码器拿不到时长时使用
        duration_hint_ms: Option<u64>,
        start_paused: bool,
    },
    TogglePause,
    Stop,
    SeekToMs(u64),
    /// 0..=100，超出范围以 CommandFailed 拒绝
    SetVolume(u8),
}

#[derive(Debug)]
pub enum AudioEvent {
    MediaChanged {
        play_id: u64,
        queue_index: usize,
        title: String,
        duration_ms: Option<u64>,
    },
    Playing,
    Paused,
    Stopped,
    TimeChanged {
        play_id: u64,
        position_ms: u64,
    },
    /// 由播放结束监视线程发出
    Ended {
        play_id: u64,
    },
    VolumeChanged(u8),
    /// 没有可用的 sink，需要 core 重新加载当前曲目
    NeedsReload,
    CommandFailed {
        command: &'static str,
        message: String,
    },
}
