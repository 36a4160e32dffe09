// SPDX-License-Identifier: Apache-2.0

use gotong_core::{to_ether, Locale, Message};
use gotong_model::{Campaign, CampaignId, Donator, PlatformStats};
use gotong_service::CampaignDetail;

use super::escape_html;

fn progress_bar(campaign: &Campaign) -> String {
    let pct = campaign.progress_percent();
    format!(
        "<div class=\"progress\" role=\"progressbar\" aria-valuemin=\"0\" aria-valuemax=\"100\" \
aria-valuenow=\"{pct:.0}\"><span style=\"width:{pct:.2}%\"></span></div>"
    )
}

fn amounts_line(campaign: &Campaign, locale: Locale) -> String {
    format!(
        "<p class=\"amounts\">{}: <strong>{}</strong> / {} ETH</p>",
        escape_html(Message::LabelCollected.text(locale)),
        escape_html(&campaign.collected_ether()),
        escape_html(&campaign.target_ether()),
    )
}

fn remaining_line(campaign: &Campaign, now_secs: u64, locale: Locale) -> String {
    format!(
        "<p class=\"remaining\">{}: {}</p>",
        escape_html(Message::LabelRemaining.text(locale)),
        escape_html(&campaign.remaining_time(now_secs, locale)),
    )
}

pub(crate) fn campaign_card(
    id: CampaignId,
    campaign: &Campaign,
    now_secs: u64,
    locale: Locale,
) -> String {
    let ended = if campaign.is_ended(now_secs) {
        " ended"
    } else {
        ""
    };
    format!(
        "<article class=\"card{ended}\"><img src=\"{img}\" alt=\"{title}\" loading=\"lazy\">\
<h3>{title}</h3><p class=\"description\">{description}</p>{progress}{amounts}{remaining}\
<a class=\"button\" href=\"/campaigns/{id}\">{view}</a></article>",
        img = escape_html(campaign.display_image()),
        title = escape_html(&campaign.title),
        description = escape_html(&campaign.description),
        progress = progress_bar(campaign),
        amounts = amounts_line(campaign, locale),
        remaining = remaining_line(campaign, now_secs, locale),
        view = escape_html(Message::ViewCampaign.text(locale)),
    )
}

fn donator_list(donators: &[Donator], locale: Locale) -> String {
    if donators.is_empty() {
        return format!(
            "<p class=\"empty\">{}</p>",
            escape_html(Message::NoDonators.text(locale))
        );
    }
    let rows: String = donators
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "<li><span class=\"rank\">{}.</span> <code>{}</code> <strong>{} ETH</strong></li>",
                i + 1,
                escape_html(&d.address),
                escape_html(&d.amount),
            )
        })
        .collect();
    format!("<ol class=\"donators\">{rows}</ol>")
}

pub(crate) fn campaign_detail(
    detail: &CampaignDetail,
    now_secs: u64,
    locale: Locale,
    donate_form: &str,
) -> String {
    let c = &detail.campaign;
    format!(
        "<section class=\"detail\"><img src=\"{img}\" alt=\"{title}\"><h1>{title}</h1>\
<p class=\"owner\">{owner_label}: <code>{owner}</code></p><p>{description}</p>\
{progress}<p class=\"percent\">{pct:.0}%</p>{amounts}{remaining}{donate_form}\
<h2>{donators_label} ({count})</h2>{donators}</section>",
        img = escape_html(c.display_image()),
        title = escape_html(&c.title),
        owner_label = escape_html(Message::LabelOwner.text(locale)),
        owner = escape_html(&c.owner),
        description = escape_html(&c.description),
        progress = progress_bar(c),
        pct = c.progress_percent(),
        amounts = amounts_line(c, locale),
        remaining = remaining_line(c, now_secs, locale),
        donators_label = escape_html(Message::LabelDonators.text(locale)),
        count = detail.donators.len(),
        donators = donator_list(&detail.donators, locale),
    )
}

pub(crate) fn stats_panel(stats: &PlatformStats, locale: Locale) -> String {
    format!(
        "<section class=\"stats\"><dl>\
<div><dt>{}</dt><dd>{}</dd></div>\
<div><dt>{}</dt><dd>{}</dd></div>\
<div><dt>{}</dt><dd>{}</dd></div></dl></section>",
        escape_html(Message::StatCampaigns.text(locale)),
        stats.total_campaigns,
        escape_html(Message::StatDonators.text(locale)),
        stats.unique_donators,
        escape_html(Message::StatCollected.text(locale)),
        escape_html(&to_ether(stats.total_collected_wei)),
    )
}
