mod store;

pub use crate::error::PlayerStateError;
pub use store::{
    AppStateSnapshot, apply_snapshot_to_app, load_player_state_async, save_player_state_async,
};

// 同步版本用于测试与非 async 场景
pub use store::{load_player_state, save_player_state};
