// SPDX-License-Identifier: Apache-2.0

//! HTML fragments. Every caller-provided string passes through
//! [`escape_html`] before it reaches markup.

mod campaign;
mod forms;

pub(crate) use campaign::{campaign_card, campaign_detail, stats_panel};
pub(crate) use forms::{create_form, donate_form};

use gotong_core::{Locale, Message};
use gotong_model::{Alert, Route, WalletAddress, NAV_ITEMS};

#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Per-request page frame: navigation, wallet control and one-shot alert.
pub(crate) struct Chrome<'a> {
    pub locale: Locale,
    pub route: Route,
    pub account: Option<&'a WalletAddress>,
    pub alert: Option<&'a Alert>,
    pub refresh: Option<Refresh>,
}

pub(crate) enum Refresh {
    Reload(u32),
    RedirectTo(u32, String),
}

fn short_address(addr: &WalletAddress) -> String {
    let s = addr.as_str();
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

fn nav(chrome: &Chrome<'_>) -> String {
    let mut items = String::new();
    for item in NAV_ITEMS.iter() {
        let class = if item.is_active(chrome.route) {
            " class=\"active\" aria-current=\"page\""
        } else {
            ""
        };
        items.push_str(&format!(
            "<li><a href=\"{}\"{class}>{}</a></li>",
            item.href,
            escape_html(item.label(chrome.locale))
        ));
    }
    let return_to = escape_html(&chrome.route.href());
    let wallet = match chrome.account {
        Some(addr) => format!(
            "<form method=\"post\" action=\"/wallet/disconnect\" class=\"wallet\">\
<input type=\"hidden\" name=\"return_to\" value=\"{return_to}\">\
<span class=\"account\" title=\"{full}\">{short}</span>\
<button type=\"submit\">{label}</button></form>",
            full = escape_html(addr.as_str()),
            short = escape_html(&short_address(addr)),
            label = escape_html(Message::DisconnectWallet.text(chrome.locale)),
        ),
        None => format!(
            "<form method=\"post\" action=\"/wallet/connect\" class=\"wallet\">\
<input type=\"hidden\" name=\"return_to\" value=\"{return_to}\">\
<button type=\"submit\">{label}</button></form>",
            label = escape_html(Message::ConnectWallet.text(chrome.locale)),
        ),
    };
    format!("<nav><a class=\"brand\" href=\"/\">GotongChain</a><ul>{items}</ul>{wallet}</nav>")
}

pub(crate) fn alert_banner(alert: &Alert) -> String {
    format!(
        "<div class=\"alert alert-{}\" role=\"alert\">{}</div>",
        alert.kind.as_str(),
        escape_html(&alert.text)
    )
}

pub(crate) fn spinner(text: &str) -> String {
    format!(
        "<div class=\"spinner\" role=\"status\"><span class=\"dot\"></span><p>{}</p></div>",
        escape_html(text)
    )
}

pub(crate) fn page(chrome: &Chrome<'_>, title: &str, body: &str) -> String {
    let refresh = match &chrome.refresh {
        Some(Refresh::Reload(secs)) => format!("<meta http-equiv=\"refresh\" content=\"{secs}\">"),
        Some(Refresh::RedirectTo(secs, url)) => format!(
            "<meta http-equiv=\"refresh\" content=\"{secs}; url={}\">",
            escape_html(url)
        ),
        None => String::new(),
    };
    let alert = chrome.alert.map(alert_banner).unwrap_or_default();
    format!(
        "<!doctype html><html lang=\"{lang}\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{refresh}\
<title>{title} | GotongChain</title></head><body>{nav}<main>{alert}{body}</main>\
<footer><p>GotongChain v{version}</p></footer></body></html>",
        lang = chrome.locale.as_str(),
        title = escape_html(title),
        nav = nav(chrome),
        version = env!("CARGO_PKG_VERSION"),
    )
}
