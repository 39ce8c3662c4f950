#![allow(unused_imports)]
//! Shared imports for core and features.

pub mod app {
    pub use crate::app::{App, PlayQueue, RepeatMode, Toast, TransportState, View};
}

pub mod audio {
    pub use crate::audio_worker::{AudioCommand, AudioEvent};
}

pub mod effects {
    pub use crate::core::effects::{CoreDispatch, CoreEffect, CoreEffects};
}

pub mod messages {
    pub use crate::messages::app::{AppCommand, AppEvent};
}

pub use app::{App, RepeatMode, View};
pub use audio::{AudioCommand, AudioEvent};
pub use effects::{CoreDispatch, CoreEffects};
pub use messages::{AppCommand, AppEvent};
