// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use gotong_core::Message;
use gotong_model::{Alert, CampaignId, CreateCampaignForm, Route};
use tracing::{info, warn};

use super::{html_response, make_request_id, propagated_request_id};
use crate::render::{self, escape_html, Chrome, Refresh};
use crate::AppState;

const PENDING_RELOAD_SECS: u32 = 2;
const FEATURED_ON_HOME: usize = 3;

pub(crate) struct Rendered {
    pub status: StatusCode,
    pub html: String,
}

impl Rendered {
    fn ok(html: String) -> Self {
        Self {
            status: StatusCode::OK,
            html,
        }
    }
}

async fn chrome_page(
    state: &AppState,
    route: Route,
    alert: Option<&Alert>,
    refresh: Option<Refresh>,
    title: &str,
    body: &str,
) -> String {
    let account = state.service.account().await;
    let chrome = Chrome {
        locale: state.service.locale(),
        route,
        account: account.as_ref(),
        alert,
        refresh,
    };
    render::page(&chrome, title, body)
}

fn retry_form(text: &str, retry_label: &str) -> String {
    format!(
        "<div class=\"failed\"><p>{}</p><form method=\"post\" action=\"/campaigns\">\
<button type=\"submit\">{}</button></form></div>",
        escape_html(text),
        escape_html(retry_label)
    )
}

pub(crate) async fn home_page(state: &AppState, alert: Option<&Alert>) -> Rendered {
    let locale = state.service.locale();
    state.service.refresh_if_stale().await;
    let snapshot = state.service.campaigns().await;
    let title = Message::NavHome.text(locale);
    let hero = format!(
        "<section class=\"hero\"><h1>{}</h1><p>{}</p><a class=\"button\" href=\"/create\">{}</a> \
<a class=\"button\" href=\"/campaigns\">{}</a></section>",
        escape_html(Message::HomeHeadline.text(locale)),
        escape_html(Message::HomeTagline.text(locale)),
        escape_html(Message::NavCreate.text(locale)),
        escape_html(Message::CampaignsHeadline.text(locale)),
    );
    if snapshot.pending {
        let body = format!(
            "{hero}{}",
            render::spinner(Message::LoadingCampaigns.text(locale))
        );
        let html = chrome_page(
            state,
            Route::Home,
            alert,
            Some(Refresh::Reload(PENDING_RELOAD_SECS)),
            title,
            &body,
        )
        .await;
        return Rendered::ok(html);
    }
    let stats = render::stats_panel(&state.service.stats().await, locale);
    let now = state.service.now_secs();
    let featured: String = snapshot
        .campaigns
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_ended(now))
        .take(FEATURED_ON_HOME)
        .map(|(i, c)| render::campaign_card(CampaignId::new(i as u64), c, now, locale))
        .collect();
    let featured = if featured.is_empty() {
        String::new()
    } else {
        format!("<section class=\"grid\">{featured}</section>")
    };
    let failure = snapshot
        .failure
        .as_deref()
        .map(|f| retry_form(f, Message::RetryLoad.text(locale)))
        .unwrap_or_default();
    let body = format!("{hero}{failure}{stats}{featured}");
    Rendered::ok(chrome_page(state, Route::Home, alert, None, title, &body).await)
}

pub(crate) async fn about_page(state: &AppState, alert: Option<&Alert>) -> Rendered {
    let locale = state.service.locale();
    let body = format!(
        "<section class=\"about\"><h1>{}</h1><p>{}</p></section>",
        escape_html(Message::AboutHeadline.text(locale)),
        escape_html(Message::AboutBody.text(locale)),
    );
    let title = Message::NavAbout.text(locale);
    Rendered::ok(chrome_page(state, Route::About, alert, None, title, &body).await)
}

pub(crate) async fn campaigns_page(state: &AppState, alert: Option<&Alert>) -> Rendered {
    let locale = state.service.locale();
    state.service.refresh_if_stale().await;
    let snapshot = state.service.campaigns().await;
    let title = Message::NavCampaigns.text(locale);
    let heading = format!(
        "<h1>{}</h1>",
        escape_html(Message::CampaignsHeadline.text(locale))
    );
    if snapshot.pending {
        let body = format!(
            "{heading}{}",
            render::spinner(Message::LoadingCampaigns.text(locale))
        );
        let html = chrome_page(
            state,
            Route::Campaigns,
            alert,
            Some(Refresh::Reload(PENDING_RELOAD_SECS)),
            title,
            &body,
        )
        .await;
        return Rendered::ok(html);
    }
    let failure = snapshot
        .failure
        .as_deref()
        .map(|f| retry_form(f, Message::RetryLoad.text(locale)))
        .unwrap_or_default();
    let now = state.service.now_secs();
    let list = if snapshot.campaigns.is_empty() {
        if failure.is_empty() {
            format!(
                "<p class=\"empty\">{}</p>",
                escape_html(Message::NoCampaigns.text(locale))
            )
        } else {
            String::new()
        }
    } else {
        let cards: String = snapshot
            .campaigns
            .iter()
            .enumerate()
            .map(|(i, c)| render::campaign_card(CampaignId::new(i as u64), c, now, locale))
            .collect();
        format!("<section class=\"grid\">{cards}</section>")
    };
    let body = format!("{heading}{failure}{list}");
    Rendered::ok(chrome_page(state, Route::Campaigns, alert, None, title, &body).await)
}

pub(crate) async fn detail_page(
    state: &AppState,
    id: CampaignId,
    alert: Option<&Alert>,
    amount: &str,
) -> Rendered {
    let locale = state.service.locale();
    let route = Route::CampaignDetail(id);
    match state.service.campaign_detail(id).await {
        Ok(Some(detail)) => {
            let form = render::donate_form(id, amount, locale, state.service.write_in_flight());
            let body = render::campaign_detail(&detail, state.service.now_secs(), locale, &form);
            Rendered::ok(chrome_page(state, route, alert, None, &detail.campaign.title, &body).await)
        }
        Ok(None) => {
            let text = Message::CampaignNotFound.text(locale);
            let body = format!(
                "<section class=\"not-found\"><h1>{}</h1><a href=\"/campaigns\">{}</a></section>",
                escape_html(text),
                escape_html(Message::CampaignsHeadline.text(locale)),
            );
            Rendered {
                status: StatusCode::NOT_FOUND,
                html: chrome_page(state, route, alert, None, text, &body).await,
            }
        }
        Err(err) => {
            warn!(campaign_id = id.get(), kind = %err.kind, error = %err, "campaign detail read failed");
            let text = Message::CampaignsLoadFailed.text(locale);
            let body = format!("<p class=\"failed\">{}</p>", escape_html(text));
            Rendered {
                status: StatusCode::BAD_GATEWAY,
                html: chrome_page(state, route, alert, None, text, &body).await,
            }
        }
    }
}

pub(crate) async fn create_page(
    state: &AppState,
    alert: Option<&Alert>,
    form: &CreateCampaignForm,
    redirect: bool,
) -> Rendered {
    let locale = state.service.locale();
    let title = Message::NavCreate.text(locale);
    let mut body = format!("<h1>{}</h1>", escape_html(title));
    let refresh = if redirect {
        body.push_str(&format!(
            "<p class=\"redirect\"><a href=\"/campaigns\">{}</a></p>",
            escape_html(Message::RedirectingToCampaigns.text(locale))
        ));
        Some(Refresh::RedirectTo(2, Route::Campaigns.href()))
    } else {
        body.push_str(&render::create_form(form, locale, state.service.write_in_flight()));
        None
    };
    Rendered::ok(chrome_page(state, Route::Create, alert, refresh, title, &body).await)
}

pub(crate) async fn not_found_page(state: &AppState, alert: Option<&Alert>) -> Rendered {
    let locale = state.service.locale();
    let text = Message::PageNotFound.text(locale);
    let body = format!(
        "<section class=\"not-found\"><h1>404</h1><p>{}</p><a href=\"/\">{}</a></section>",
        escape_html(text),
        escape_html(Message::NavHome.text(locale)),
    );
    Rendered {
        status: StatusCode::NOT_FOUND,
        html: chrome_page(state, Route::NotFound, alert, None, text, &body).await,
    }
}

/// Renders any page of the routing surface, used after wallet actions to
/// return the user to where they were.
pub(crate) async fn render_route(state: &AppState, route: Route, alert: Option<&Alert>) -> Rendered {
    match route {
        Route::Home => home_page(state, alert).await,
        Route::About => about_page(state, alert).await,
        Route::Campaigns => campaigns_page(state, alert).await,
        Route::CampaignDetail(id) => detail_page(state, id, alert, "").await,
        Route::Create => create_page(state, alert, &CreateCampaignForm::default(), false).await,
        Route::NotFound => not_found_page(state, alert).await,
    }
}

pub(crate) async fn home_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let page = home_page(&state, None).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn about_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let page = about_page(&state, None).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn campaigns_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let page = campaigns_page(&state, None).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn campaign_detail_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let page = match raw_id.parse::<CampaignId>() {
        Ok(id) => detail_page(&state, id, None, "").await,
        Err(_) => not_found_page(&state, None).await,
    };
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn create_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let page = create_page(&state, None, &CreateCampaignForm::default(), false).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let mut resp = (StatusCode::OK, "ok").into_response();
    if let Ok(v) = axum::http::HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert("x-request-id", v);
    }
    resp
}

pub(crate) async fn not_found_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    info!(path = uri.path(), "route not found");
    let page = not_found_page(&state, None).await;
    html_response(page.status, page.html, &request_id)
}
