use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{History, PlayQueue};
use crate::features::player::scrubber::Scrubber;
use crate::features::player::volume::{VolumeControl, VolumeIcon};

pub use crate::domain::model::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Queue,
    History,
}

/// 标签页配置：统一管理标题与对应的 View
#[derive(Debug, Clone, Copy)]
pub struct TabConfig {
    pub title: &'static str,
    pub view: View,
}

pub const TABS: &[TabConfig] = &[
    TabConfig {
        title: "队列",
        view: View::Queue,
    },
    TabConfig {
        title: "历史",
        view: View::History,
    },
];

pub fn tab_index_for_view(view: View) -> usize {
    TABS.iter().position(|c| c.view == view).unwrap_or(0)
}

/// 循环模式：按固定顺序 None → LoopQueue → LoopOne → None 切换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    #[default]
    None,
    LoopQueue,
    LoopOne,
}

impl RepeatMode {
    pub fn next(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::LoopQueue,
            RepeatMode::LoopQueue => RepeatMode::LoopOne,
            RepeatMode::LoopOne => RepeatMode::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::None => "不循环",
            RepeatMode::LoopQueue => "列表循环",
            RepeatMode::LoopOne => "单曲循环",
        }
    }
}

/// 引擎上报的播放状态；只在收到引擎事件时改写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    /// None 表示需要手动关闭
    pub fn duration_ms(self) -> Option<u64> {
        match self {
            ToastLevel::Info => Some(3000),
            ToastLevel::Warning => Some(5000),
            ToastLevel::Error => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    pub fn is_expired(&self) -> bool {
        self.level
            .duration_ms()
            .is_some_and(|ms| self.created_at.elapsed().as_millis() >= u128::from(ms))
    }
}

/// 等对应曲目加载后才下发的 seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSeek {
    pub queue_index: usize,
    pub position_ms: u64,
}

#[derive(Debug, Clone)]
pub struct App {
    pub view: View,
    pub help_visible: bool,
    pub queue_selected: usize,
    pub history_selected: usize,

    pub play_queue: PlayQueue,
    pub history: History,

    /// 引擎当前加载的曲目
    pub now_playing: Option<Track>,
    /// 最近一次请求加载、尚未收到 MediaChanged 的曲目下标
    pub pending_load: Option<usize>,
    pub play_id: Option<u64>,
    pub play_status: String,
    pub transport: TransportState,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    /// 恢复上次进度，或未加载时拖动/快进记下的目标
    pub pending_seek: Option<PendingSeek>,

    pub scrubber: Scrubber,
    pub volume: VolumeControl,
    /// 引擎最后确认的音量，SetVolume 被拒绝时回退到这里
    pub engine_volume: Option<u8>,

    pub rewind_threshold_ms: u64,
    pub seek_step_ms: u64,
    pub volume_step: u8,
}

impl Default for App {
    fn default() -> Self {
        Self {
            view: View::Queue,
            help_visible: false,
            queue_selected: 0,
            history_selected: 0,
            play_queue: PlayQueue::new(RepeatMode::None),
            history: History::default(),
            now_playing: None,
            pending_load: None,
            play_id: None,
            play_status: "未播放".to_owned(),
            transport: TransportState::Stopped,
            position_ms: 0,
            duration_ms: None,
            pending_seek: None,
            scrubber: Scrubber::default(),
            volume: VolumeControl::default(),
            engine_volume: None,
            rewind_threshold_ms: 3_000,
            seek_step_ms: 5_000,
            volume_step: 5,
        }
    }
}

impl App {
    pub fn paused(&self) -> bool {
        !matches!(self.transport, TransportState::Playing)
    }

    /// 引擎里有可操作的 sink
    pub fn media_loaded(&self) -> bool {
        self.now_playing.is_some() && self.transport != TransportState::Stopped
    }

    pub fn shown_position_ms(&self) -> u64 {
        if self.media_loaded() {
            return self.position_ms;
        }
        self.pending_seek
            .filter(|p| Some(p.queue_index) == self.play_queue.current_index())
            .map_or(0, |p| p.position_ms)
    }

    pub fn shown_duration_ms(&self) -> Option<u64> {
        if self.media_loaded() {
            self.duration_ms
        } else {
            self.play_queue.current().and_then(|t| t.duration_ms)
        }
    }

    /// 队列缩短后把选中行收回到最后一行
    pub fn clamp_queue_selection(&mut self) {
        let len = self.play_queue.upcoming_indices().len();
        self.queue_selected = self.queue_selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub view: View,
    pub help_visible: bool,
    pub player: PlayerSnapshot,
    pub queue: Vec<Track>,
    pub queue_selected: usize,
    pub history: Vec<Track>,
    pub history_selected: usize,
}

#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub now_playing: Option<Track>,
    pub play_status: String,
    pub transport: TransportState,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub scrubber_percent: u8,
    pub scrubbing: bool,
    pub volume_level: u8,
    pub muted: bool,
    pub volume_icon: VolumeIcon,
    pub repeat: RepeatMode,
    pub shuffled: bool,
    pub seek_step_ms: u64,
}

impl AppSnapshot {
    /// 从 App 创建 UI 渲染快照
    ///
    /// Core 与 UI 运行在不同线程，通过 `tokio::sync::mpsc` 传递拥有所有权的快照，
    /// UI 只读快照，不持有任何播放状态。
    pub fn from_app(app: &App) -> Self {
        let position_ms = app.shown_position_ms();
        let duration_ms = app.shown_duration_ms();
        let player = PlayerSnapshot {
            now_playing: app.now_playing.clone(),
            play_status: app.play_status.clone(),
            transport: app.transport,
            position_ms,
            duration_ms,
            scrubber_percent: app.scrubber.displayed_percent(position_ms, duration_ms),
            scrubbing: app.scrubber.is_dragging(),
            volume_level: app.volume.level(),
            muted: app.volume.muted(),
            volume_icon: app.volume.icon(),
            repeat: app.play_queue.repeat(),
            shuffled: app.play_queue.is_shuffled(),
            seek_step_ms: app.seek_step_ms,
        };

        Self {
            view: app.view,
            help_visible: app.help_visible,
            player,
            queue: app.play_queue.upcoming(),
            queue_selected: app.queue_selected,
            history: app.history.entries().cloned().collect(),
            history_selected: app.history_selected,
        }
    }
}
