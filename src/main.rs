use clap::Parser;
use directories::ProjectDirs;
use jukebox_ratui::app::{App, AppSnapshot, Track};
use jukebox_ratui::audio_worker::AudioBackend;
use jukebox_ratui::error::AppError;
use jukebox_ratui::ui::cli::env_flag;
use jukebox_ratui::ui::{Cli, Command, run_tui};
use jukebox_ratui::{core, library, logging, settings};
use std::path::PathBuf;
use std::time::Duration;

/// 退出时等待 core 落盘的上限
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir.clone());
    let audio_backend = if cli.no_audio || env_flag("JUKEBOX_NO_AUDIO") {
        AudioBackend::Null
    } else {
        AudioBackend::Real
    };

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), backend = ?audio_backend, "jukebox-ratui 启动");

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let tracks = if cli.paths.is_empty() {
                Vec::new()
            } else {
                let tracks = library::scan_paths(&cli.paths)?;
                if tracks.is_empty() {
                    return Err(AppError::Other("没有找到可播放的音频文件".to_owned()));
                }
                tracks
            };

            let settings = settings::load_settings(&data_dir);
            let (tx, rx, core_task) =
                core::spawn_app_actor(tracks, audio_backend, settings, data_dir);
            let res = run_tui(AppSnapshot::from_app(&App::default()), tx, rx).await;

            if tokio::time::timeout(SHUTDOWN_TIMEOUT, core_task).await.is_err() {
                tracing::warn!("等待 core 退出超时，部分状态可能未保存");
            }
            res?;
            Ok(())
        }
        Command::Scan { paths } => {
            tracing::info!("启动模式: Scan");
            let tracks = library::scan_paths(&paths)?;
            for t in &tracks {
                println!("{}", scan_line(t));
            }
            println!("共 {} 首", tracks.len());
            Ok(())
        }
    }
}

fn resolve_data_dir(cli_dir: Option<PathBuf>) -> PathBuf {
    cli_dir.unwrap_or_else(|| {
        ProjectDirs::from("dev", "jukebox", "jukebox-ratui")
            .map(|d| d.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".jukebox-ratui"))
    })
}

fn scan_line(t: &Track) -> String {
    let duration = t
        .duration_ms
        .map(|ms| format!("{:02}:{:02}", ms / 60_000, (ms / 1000) % 60))
        .unwrap_or_else(|| "--:--".to_owned());
    let album = t.album.as_deref().unwrap_or("-");
    format!(
        "{duration}\t{}\t{album}\t{}",
        t.display_title(),
        t.path.display()
    )
}
