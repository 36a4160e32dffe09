// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Form;
use gotong_model::{Alert, CampaignId, CreateCampaignForm, DonationForm, Route};
use serde::Deserialize;

use super::html_response;
use super::pages::{self, Rendered};
use super::propagated_request_id;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReturnTo {
    #[serde(default)]
    return_to: String,
}

impl ReturnTo {
    fn route(&self) -> Route {
        match Route::parse(&self.return_to) {
            Route::NotFound => Route::Home,
            route => route,
        }
    }
}

fn rejected(mut page: Rendered) -> Rendered {
    if page.status == StatusCode::OK {
        page.status = StatusCode::UNPROCESSABLE_ENTITY;
    }
    page
}

pub(crate) async fn connect_wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ReturnTo>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let alert = state.service.connect_wallet().await.alert();
    let page = pages::render_route(&state, form.route(), Some(&alert)).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn disconnect_wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ReturnTo>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let alert = state.service.disconnect_wallet().await.alert();
    let page = pages::render_route(&state, form.route(), Some(&alert)).await;
    html_response(page.status, page.html, &request_id)
}

/// Manual retry for a failed campaign list read.
pub(crate) async fn refresh_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let _ = state.service.refetch().await;
    let page = pages::campaigns_page(&state, None).await;
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn donate_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<DonationForm>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let Ok(id) = raw_id.parse::<CampaignId>() else {
        let page = pages::not_found_page(&state, None).await;
        return html_response(page.status, page.html, &request_id);
    };
    let locale = state.service.locale();
    let page = match form.validate() {
        Err(err) => {
            let alert = Alert::from_validation(err, locale);
            rejected(pages::detail_page(&state, id, Some(&alert), &form.amount).await)
        }
        Ok(_) => {
            let result = state.service.donate_to_campaign(id, &form.amount).await;
            let amount = if result.success { "" } else { form.amount.as_str() };
            pages::detail_page(&state, id, Some(&result.alert()), amount).await
        }
    };
    html_response(page.status, page.html, &request_id)
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CreateCampaignForm>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let locale = state.service.locale();
    let page = match form.validate(state.service.now_secs()) {
        Err(err) => {
            let alert = Alert::from_validation(err, locale);
            rejected(pages::create_page(&state, Some(&alert), &form, false).await)
        }
        Ok(_) => {
            let result = state.service.create_campaign(&form).await;
            if result.success {
                pages::create_page(
                    &state,
                    Some(&result.alert()),
                    &CreateCampaignForm::default(),
                    true,
                )
                .await
            } else {
                pages::create_page(&state, Some(&result.alert()), &form, false).await
            }
        }
    };
    html_response(page.status, page.html, &request_id)
}
