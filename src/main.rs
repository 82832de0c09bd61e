use anyhow::Result;
use platform_agent::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = config::AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_config.logging.level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let transport = HttpTransport::new(
        &app_config.collector.url,
        &app_config.collector.license_key,
        Duration::from_secs(app_config.collector.timeout_secs),
    )?
    .with_verbose(app_config.collector.verbose);

    let agent = models::AgentIdentity::discover(version::VERSION);
    let mut session = ReportingSession::new(&app_config.agent.name, agent, Arc::new(transport))
        .with_poll_interval(Duration::from_secs(app_config.agent.poll_interval_secs))
        .with_guid_namespace(&app_config.agent.guid_namespace);

    if app_config.system.enabled {
        session.add_component(system_metrics::system_component(
            &app_config.system.component_name,
        ));
    }
    anyhow::ensure!(
        !session.components().is_empty(),
        "no components configured; enable [system] to report host metrics"
    );

    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        plugin = %app_config.agent.name,
        collector = %app_config.collector.url,
        "Starting platform agent"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let mut worker_handle = worker::spawn(session, shutdown_rx);

    tokio::select! {
        joined = &mut worker_handle => {
            let (_session, reason) = joined?;
            anyhow::bail!("reporting worker exited: {:?}", reason);
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = worker_handle.await;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
