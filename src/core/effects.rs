use crate::app::{App, AppSnapshot, Toast};
use crate::audio_worker::AudioCommand;
use crate::messages::app::AppEvent;
use crate::settings::{self, AppSettings};
use std::path::Path;
use tokio::sync::mpsc;

/// 一次 reduce 产生的副作用，reduce 结束后由 `run_effects` 依次执行
#[derive(Default)]
pub struct CoreEffects {
    pub(crate) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<AppSnapshot>),
    EmitToast(Toast),
    SendAudio {
        cmd: AudioCommand,
        warn: Option<&'static str>,
    },
    PersistSettings(AppSettings),
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions
            .push(CoreEffect::EmitState(Box::new(AppSnapshot::from_app(app))));
    }

    pub fn send_audio_warn(&mut self, cmd: AudioCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendAudio {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(Toast::info(message)));
    }

    pub fn toast_warning(&mut self, message: impl Into<String>) {
        self.actions
            .push(CoreEffect::EmitToast(Toast::warning(message)));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(Toast::error(message)));
    }

    pub fn persist_settings(&mut self, s: AppSettings) {
        self.actions.push(CoreEffect::PersistSettings(s));
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_audio: &'a mpsc::Sender<AudioCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
    pub(super) data_dir: &'a Path,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitToast(toast) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(toast)).await;
            }
            CoreEffect::SendAudio { cmd, warn } => {
                if let Err(e) = dispatch.tx_audio.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::PersistSettings(s) => {
                let data_dir = dispatch.data_dir.to_path_buf();
                let res =
                    tokio::task::spawn_blocking(move || settings::save_settings(&data_dir, &s))
                        .await;
                match res {
                    Ok(Ok(())) => tracing::debug!("设置已保存"),
                    Ok(Err(e)) => {
                        tracing::warn!(err = %e, "保存设置失败");
                        let _ = dispatch
                            .tx_evt
                            .send(AppEvent::Toast(Toast::warning(e.to_string())))
                            .await;
                    }
                    Err(e) => tracing::warn!(err = %e, "保存设置任务失败"),
                }
            }
        }
    }
}
