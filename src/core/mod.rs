pub mod effects;
mod reducer;

pub mod prelude;

pub use effects::{CoreDispatch, CoreEffect, CoreEffects};
pub use reducer::spawn_app_actor;
