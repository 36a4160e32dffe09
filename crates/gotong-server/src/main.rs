// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use gotong_contract::{ContractConfig, JsonRpcContract};
use gotong_core::{ConfigLayers, Locale, SystemClock, ENV_GOTONG_LOCALE};
use gotong_server::{build_router, AppState};
use gotong_service::CampaignService;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("GOTONG_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let layers = ConfigLayers::discover();
    let bind_addr = layers
        .get("GOTONG_BIND")
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let locale = match layers.get(ENV_GOTONG_LOCALE) {
        Some(raw) => raw.parse::<Locale>().unwrap_or_else(|e| {
            warn!(error = %e, "unknown locale, using default");
            Locale::default()
        }),
        None => Locale::default(),
    };
    let config = ContractConfig::from_layers(&layers);
    let chain_id = config.chain_id;
    let preferred = config
        .preferred_account()
        .map_err(|e| format!("invalid configuration: {e}"))?;
    let contract =
        JsonRpcContract::new(config).map_err(|e| format!("invalid configuration: {e}"))?;

    let service = Arc::new(
        CampaignService::new(Arc::new(contract), Arc::new(SystemClock), locale)
            .with_expected_chain_id(chain_id)
            .with_preferred_account(preferred)
            .with_max_age_secs(env_u64("GOTONG_CACHE_MAX_AGE_SECS", 30)),
    );

    let initial = Arc::clone(&service);
    tokio::spawn(async move {
        if let Err(e) = initial.refetch().await {
            error!(error = %e, "initial campaign fetch failed");
        }
    });

    let app = build_router(AppState::new(Arc::clone(&service)));
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!(bind = %bind_addr, backend = service.backend_tag(), chain_id, "gotong server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            wait_for_shutdown_signal().await;
            let drain_ms = env_u64("GOTONG_SHUTDOWN_DRAIN_MS", 500);
            info!(drain_ms, "shutdown requested");
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
