// SPDX-License-Identifier: Apache-2.0

use gotong_core::{Locale, Message};
use gotong_model::{CampaignId, CreateCampaignForm};

use super::escape_html;

fn field(name: &str, label: Message, kind: &str, value: &str, locale: Locale) -> String {
    let input = if kind == "textarea" {
        format!(
            "<textarea id=\"{name}\" name=\"{name}\" required>{}</textarea>",
            escape_html(value)
        )
    } else {
        format!(
            "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{}\" required>",
            escape_html(value)
        )
    };
    format!(
        "<label for=\"{name}\">{}</label>{input}",
        escape_html(label.text(locale))
    )
}

/// `disabled` mirrors a write already in flight.
pub(crate) fn create_form(form: &CreateCampaignForm, locale: Locale, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        "<form method=\"post\" action=\"/create\" class=\"create\">{}{}{}{}{}\
<button type=\"submit\"{disabled}>{}</button></form>",
        field("title", Message::LabelTitle, "text", &form.title, locale),
        field("description", Message::LabelDescription, "textarea", &form.description, locale),
        field("target", Message::LabelTarget, "text", &form.target, locale),
        field("deadline", Message::LabelDeadline, "date", &form.deadline, locale),
        field("image", Message::LabelImage, "url", &form.image, locale),
        escape_html(Message::SubmitCreate.text(locale)),
    )
}

pub(crate) fn donate_form(id: CampaignId, amount: &str, locale: Locale, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        "<form method=\"post\" action=\"/campaigns/{id}/donate\" class=\"donate\">{}\
<button type=\"submit\"{disabled}>{}</button></form>",
        field("amount", Message::LabelAmount, "text", amount, locale),
        escape_html(Message::SubmitDonation.text(locale)),
    )
}
