use crate::app::{AppSnapshot, Toast};

#[derive(Debug)]
pub enum AppCommand {
    Bootstrap,
    Quit,
    TabNext,
    TabTo { index: usize },
    ToggleHelp,
    QueueMoveUp,
    QueueMoveDown,
    QueuePlaySelected,
    HistoryMoveUp,
    HistoryMoveDown,
    PlayerTogglePause,
    PlayerStop,
    PlayerNext,
    PlayerRewind,
    PlayerToggleShuffle,
    PlayerCycleRepeat,
    PlayerSeekBackwardMs { ms: u64 },
    PlayerSeekForwardMs { ms: u64 },
    VolumeUp,
    VolumeDown,
    ToggleMute,
    /// 拖动进度条，`percent` 为 0..=100
    ScrubberDrag { percent: u8 },
    ScrubberRelease,
}

#[derive(Debug)]
pub enum AppEvent {
    State(Box<AppSnapshot>),
    Toast(Toast),
}
