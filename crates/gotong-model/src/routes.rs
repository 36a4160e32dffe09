// SPDX-License-Identifier: Apache-2.0

use gotong_core::{Locale, Message};
use serde::Serialize;

use crate::campaign::CampaignId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "id", rename_all = "snake_case")]
pub enum Route {
    Home,
    About,
    Campaigns,
    CampaignDetail(CampaignId),
    Create,
    NotFound,
}

impl Route {
    /// Resolves a request path. A single trailing slash is tolerated and any
    /// query string is ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [""] => Self::Home,
            ["about"] => Self::About,
            ["campaigns"] => Self::Campaigns,
            ["campaigns", id] => id
                .parse::<CampaignId>()
                .map_or(Self::NotFound, Self::CampaignDetail),
            ["create"] => Self::Create,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn href(self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Campaigns => "/campaigns".to_string(),
            Self::CampaignDetail(id) => format!("/campaigns/{id}"),
            Self::Create => "/create".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// The navigation entry this page highlights, if any.
    #[must_use]
    pub fn nav_href(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::About => Some("/about"),
            Self::Campaigns | Self::CampaignDetail(_) => Some("/campaigns"),
            Self::Create => Some("/create"),
            Self::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: Message,
}

impl NavItem {
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        self.label.text(locale)
    }

    #[must_use]
    pub fn is_active(&self, route: Route) -> bool {
        route.nav_href() == Some(self.href)
    }
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { href: "/", label: Message::NavHome },
    NavItem { href: "/about", label: Message::NavAbout },
    NavItem { href: "/campaigns", label: Message::NavCampaigns },
    NavItem { href: "/create", label: Message::NavCreate },
];
