mod app;
mod cli;
mod config;
mod desktop;
mod effects;
mod logging;
mod progress;
mod render;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Confirm;
use panel_core::{ContextAction, FormState};
use panel_engine::ReqwestBackend;
use panel_logging::panel_info;

use app::App;
use cli::{Cli, Command};
use effects::EffectRunner;
use render::Renderer;

/// Slack on top of the request timeout before a reply counts as lost.
const STALL_GRACE: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let (mut config, warning) = config::load_config(&cli.config);
    if let Some(backend) = cli.backend {
        config.backend_url = backend;
    }

    logging::initialize(config.log_destination);
    config::report_config(&cli.config, warning.as_deref());
    panel_info!("Using backend {}", config.backend_url);

    let settings = config.client_settings();
    let backend = ReqwestBackend::new(&config.backend_url, &settings)
        .with_context(|| format!("invalid backend url {}", config.backend_url))?;
    let runner = EffectRunner::new(
        Arc::new(backend),
        config.poll_interval(),
        Box::new(desktop::SystemDesktop),
    )
    .context("starting engine")?;
    let stall_limit = settings.request_timeout + STALL_GRACE;
    let mut app = App::new(runner, Renderer::new(std::io::stdout(), true), stall_limit);

    let ok = match cli.command {
        Command::Submit {
            url,
            platform,
            format,
            mp3_bitrate,
            mp4_quality,
            codec,
        } => {
            let form = FormState {
                url,
                platform: platform.into(),
                yt_format: format.into(),
                mp3_bitrate,
                mp4_quality,
                codec_preference: codec,
            };
            app.submit(form, config.history_enabled)?
        }
        Command::History { open, copy, column } => {
            if !config.history_enabled {
                bail!("history is disabled in {:?}", cli.config);
            }
            app.show_history(true)?;
            if let Some(row) = open {
                app.link_action(row, column.into(), ContextAction::OpenInNewTab)?;
            } else if let Some(row) = copy {
                app.link_action(row, column.into(), ContextAction::CopyToClipboard)?;
            }
            true
        }
        Command::Stats => {
            app.show_stats()?;
            true
        }
        Command::ClearHistory { yes } => {
            if !config.history_enabled {
                bail!("history is disabled in {:?}", cli.config);
            }
            app.clear_history(|| {
                if yes {
                    return Ok(true);
                }
                Confirm::new()
                    .with_prompt("Möchtest du wirklich den gesamten Verlauf löschen?")
                    .default(false)
                    .interact()
                    .context("reading confirmation")
            })?
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
