// SPDX-License-Identifier: Apache-2.0

use gotong_contract::{ContractConfig, JsonRpcContract};
use gotong_core::{
    to_ether, ClockPort, ConfigLayers, Locale, Message, ResultExt, SystemClock,
    ENV_GOTONG_LOCALE, ENV_GOTONG_LOG_LEVEL,
};
use gotong_model::{
    Campaign, CampaignId, CreateCampaignForm, DonationForm, Route, ValidationError, WalletAddress,
};
use gotong_service::{ActionResult, CampaignService};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{emit_ok, CliError, OutputMode};
use crate::LogFlags;

pub(crate) struct Context {
    pub output: OutputMode,
    pub log: LogFlags,
    pub locale: Option<Locale>,
    pub account: Option<String>,
}

impl Context {
    /// `--locale` wins over `GOTONG_LOCALE`; an unknown configured locale falls
    /// back to Indonesian.
    fn locale(&self, layers: &ConfigLayers) -> Locale {
        self.locale
            .or_else(|| {
                layers
                    .get(ENV_GOTONG_LOCALE)
                    .and_then(|raw| raw.parse::<Locale>().ok())
            })
            .unwrap_or_default()
    }
}

fn init_tracing(flags: LogFlags) {
    let level = if flags.trace || flags.verbose > 1 {
        "trace".to_string()
    } else if flags.verbose == 1 {
        "debug".to_string()
    } else if flags.quiet {
        "error".to_string()
    } else {
        std::env::var(ENV_GOTONG_LOG_LEVEL).unwrap_or_else(|_| "warn".to_string())
    };
    let filter = if flags.trace || flags.verbose > 0 || flags.quiet {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("tokio runtime init failed: {e}")))
}

/// Builds the network-backed service. Configuration problems surface here,
/// before any request leaves the process.
fn connect(
    ctx: &Context,
    layers: &ConfigLayers,
    locale: Locale,
) -> Result<CampaignService, CliError> {
    init_tracing(ctx.log);
    let config = ContractConfig::from_layers(layers);
    config
        .validate()
        .with_context("contract configuration")
        .map_err(|e| CliError::dependency(e.to_string()))?;
    let preferred = config
        .preferred_account()
        .with_context("contract configuration")
        .map_err(|e| CliError::dependency(e.to_string()))?;
    let chain_id = config.chain_id;
    let contract = JsonRpcContract::new(config)
        .with_context("json-rpc backend")
        .map_err(|e| CliError::dependency(e.to_string()))?;
    debug!(chain_id, "contract backend ready");
    Ok(
        CampaignService::new(Arc::new(contract), Arc::new(SystemClock), locale)
            .with_expected_chain_id(chain_id)
            .with_preferred_account(preferred),
    )
}

/// Selects the signing account: `--account` when given, otherwise whatever
/// the wallet provider offers.
async fn attach_wallet(ctx: &Context, service: &CampaignService) -> Result<(), CliError> {
    if let Some(raw) = ctx.account.as_deref() {
        let account = WalletAddress::parse(raw).map_err(|e| {
            CliError::usage("invalid --account").with_detail("error", &e.to_string())
        })?;
        service.set_account(Some(account)).await;
        return Ok(());
    }
    let connected = service.connect_wallet().await;
    if connected.success {
        Ok(())
    } else {
        Err(CliError::action_failed(&connected.message))
    }
}

fn validation_error(err: ValidationError, locale: Locale) -> CliError {
    CliError::validation(err.code(), err.message().text(locale))
}

fn campaign_row(id: u64, campaign: &Campaign, now: u64, locale: Locale) -> Value {
    json!({
        "id": id,
        "campaign": campaign,
        "progress": campaign.progress_percent(),
        "ended": campaign.is_ended(now),
        "remaining": campaign.remaining_time(now, locale),
        "targetEther": campaign.target_ether(),
        "collectedEther": campaign.collected_ether(),
        "image": campaign.display_image(),
    })
}

fn finish_action(ctx: &Context, result: &ActionResult) -> Result<(), CliError> {
    if !result.success {
        return Err(CliError::action_failed(&result.message));
    }
    emit_ok(
        ctx.output,
        &json!({ "success": true, "message": result.message }),
        &result.message,
    )
}

async fn load_campaigns(service: &CampaignService) -> Result<(), CliError> {
    service.refetch().await.map(|_| ()).map_err(|err| {
        CliError::dependency(Message::CampaignsLoadFailed.text(service.locale()).to_string())
            .with_detail("kind", err.kind.as_str())
            .with_detail("error", &err.to_string())
    })
}

pub(crate) fn list_campaigns(ctx: &Context) -> Result<(), CliError> {
    let layers = ConfigLayers::discover();
    let locale = ctx.locale(&layers);
    let service = connect(ctx, &layers, locale)?;
    runtime()?.block_on(async {
        load_campaigns(&service).await?;
        let snapshot = service.campaigns().await;
        let now = service.now_secs();
        let rows: Vec<Value> = snapshot
            .campaigns
            .iter()
            .enumerate()
            .map(|(id, c)| campaign_row(id as u64, c, now, locale))
            .collect();
        let human = if snapshot.campaigns.is_empty() {
            Message::NoCampaigns.text(locale).to_string()
        } else {
            snapshot
                .campaigns
                .iter()
                .enumerate()
                .map(|(id, c)| {
                    format!(
                        "#{id} {} | {}/{} ETH ({:.0}%) | {}",
                        c.title,
                        c.collected_ether(),
                        c.target_ether(),
                        c.progress_percent(),
                        c.remaining_time(now, locale)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        emit_ok(ctx.output, &json!({ "campaigns": rows }), &human)
    })
}

pub(crate) fn show_campaign(ctx: &Context, id: CampaignId) -> Result<(), CliError> {
    let layers = ConfigLayers::discover();
    let locale = ctx.locale(&layers);
    let service = connect(ctx, &layers, locale)?;
    runtime()?.block_on(async {
        let detail = service.campaign_detail(id).await.map_err(|err| {
            CliError::dependency(err.to_string()).with_detail("kind", err.kind.as_str())
        })?;
        let Some(detail) = detail else {
            return Err(CliError::validation(
                "campaign_not_found",
                Message::CampaignNotFound.text(locale),
            )
            .with_detail("id", &id.to_string()));
        };
        let now = service.now_secs();
        let c = &detail.campaign;
        let mut payload = campaign_row(id.get(), c, now, locale);
        payload["donators"] = json!(detail.donators);
        let mut lines = vec![
            format!("#{id} {}", c.title),
            c.description.clone(),
            format!("{}: {}", Message::LabelOwner.text(locale), c.owner),
            format!(
                "{}: {} / {} ETH ({:.0}%)",
                Message::LabelCollected.text(locale),
                c.collected_ether(),
                c.target_ether(),
                c.progress_percent()
            ),
            format!(
                "{}: {}",
                Message::LabelRemaining.text(locale),
                c.remaining_time(now, locale)
            ),
            format!("{}:", Message::LabelDonators.text(locale)),
        ];
        if detail.donators.is_empty() {
            lines.push(format!("  {}", Message::NoDonators.text(locale)));
        }
        for d in &detail.donators {
            lines.push(format!("  {} {} ETH", d.address, d.amount));
        }
        emit_ok(ctx.output, &payload, &lines.join("\n"))
    })
}

pub(crate) fn create_campaign(ctx: &Context, form: CreateCampaignForm) -> Result<(), CliError> {
    let layers = ConfigLayers::discover();
    let locale = ctx.locale(&layers);
    form.validate(SystemClock.now_unix_secs())
        .map_err(|err| validation_error(err, locale))?;
    let service = connect(ctx, &layers, locale)?;
    runtime()?.block_on(async {
        attach_wallet(ctx, &service).await?;
        let result = service.create_campaign(&form).await;
        finish_action(ctx, &result)
    })
}

pub(crate) fn donate_to_campaign(
    ctx: &Context,
    id: CampaignId,
    amount: &str,
) -> Result<(), CliError> {
    let layers = ConfigLayers::discover();
    let locale = ctx.locale(&layers);
    DonationForm {
        amount: amount.to_string(),
    }
    .validate()
    .map_err(|err| validation_error(err, locale))?;
    let service = connect(ctx, &layers, locale)?;
    runtime()?.block_on(async {
        attach_wallet(ctx, &service).await?;
        let result = service.donate_to_campaign(id, amount).await;
        finish_action(ctx, &result)
    })
}

pub(crate) fn stats(ctx: &Context) -> Result<(), CliError> {
    let layers = ConfigLayers::discover();
    let locale = ctx.locale(&layers);
    let service = connect(ctx, &layers, locale)?;
    runtime()?.block_on(async {
        load_campaigns(&service).await?;
        let stats = service.stats().await;
        let payload = serde_json::to_value(stats)
            .map_err(|e| CliError::internal(format!("encode stats failed: {e}")))?;
        let human = format!(
            "{}: {}\n{}: {}\n{}: {} ETH",
            Message::StatCampaigns.text(locale),
            stats.total_campaigns,
            Message::StatDonators.text(locale),
            stats.unique_donators,
            Message::StatCollected.text(locale),
            to_ether(stats.total_collected_wei)
        );
        emit_ok(ctx.output, &payload, &human)
    })
}

/// Resolves a path against the web route table without touching the network.
pub(crate) fn open_route(ctx: &Context, path: &str) -> Result<(), CliError> {
    let route = Route::parse(path);
    let status = if route == Route::NotFound { 404 } else { 200 };
    let payload = json!({
        "path": path,
        "route": route,
        "href": route.href(),
        "nav": route.nav_href(),
        "status": status,
    });
    let human = format!("{path} -> {} ({status})", route.href());
    emit_ok(ctx.output, &payload, &human)
}
