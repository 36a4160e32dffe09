// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Server-rendered pages over a shared [`CampaignService`].

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use gotong_service::CampaignService;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod http;
mod render;

pub use render::escape_html;

pub const CRATE_NAME: &str = "gotong-server";

const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CampaignService>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<CampaignService>) -> Self {
        Self {
            service,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::pages::home_handler))
        .route("/about", get(http::pages::about_handler))
        .route(
            "/campaigns",
            get(http::pages::campaigns_handler).post(http::actions::refresh_handler),
        )
        .route("/campaigns/:id", get(http::pages::campaign_detail_handler))
        .route("/campaigns/:id/donate", post(http::actions::donate_handler))
        .route(
            "/create",
            get(http::pages::create_handler).post(http::actions::create_handler),
        )
        .route("/wallet/connect", post(http::actions::connect_wallet_handler))
        .route(
            "/wallet/disconnect",
            post(http::actions::disconnect_wallet_handler),
        )
        .route("/healthz", get(http::pages::healthz_handler))
        .fallback(http::pages::not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}
