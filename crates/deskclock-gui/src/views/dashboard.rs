//! Signed-in layout: identity header, clock and subscription cards.

use deskclock_core::{
    modules::session::{self, UsagePanel},
    screen::{
        Dashboard, IdentitySummary, MANAGE_SUBSCRIPTION_LABEL, PLAN_CARD_TITLE, PlanCard,
        SIGN_OUT_LABEL, SUBSCRIPTION_CARD_TITLE, USAGE_CARD_TITLE,
    },
};
use iced::{
    Alignment, Element, Length,
    widget::{button, column, container, horizontal_space, progress_bar, row, text},
};

use super::clock::render_clock;
use crate::{
    app::Message,
    style::{avatar_style, card_style},
};

const AVATAR_SIZE: f32 = 40.0;
const CARD_WIDTH: f32 = 200.0;

/// Letter shown in the avatar badge: the first alphanumeric character of the email,
/// upper-cased, or `?` when there is none.
pub fn avatar_initial(email: &str) -> String {
    email
        .chars()
        .find(|c| c.is_alphanumeric())
        .map_or_else(|| String::from("?"), |c| c.to_uppercase().collect())
}

pub fn render_dashboard(dashboard: &Dashboard) -> Element<'static, Message> {
    column![
        render_header(&dashboard.identity),
        render_clock(&dashboard.clock),
        row![
            render_plan(&dashboard.plan),
            render_usage(&dashboard.usage),
            render_manage(dashboard.can_manage),
        ]
        .spacing(16),
    ]
    .align_x(Alignment::Center)
    .spacing(24)
    .into()
}

fn render_header(identity: &IdentitySummary) -> Element<'static, Message> {
    let avatar = container(text(avatar_initial(&identity.email)).size(18))
        .center(AVATAR_SIZE)
        .style(avatar_style);

    row![
        avatar,
        text(identity.email.clone()),
        horizontal_space(),
        button(text(SIGN_OUT_LABEL))
            .style(button::secondary)
            .on_press(Message::Session(session::Message::SignOut)),
    ]
    .align_y(Alignment::Center)
    .spacing(12)
    .width(Length::Fill)
    .into()
}

fn card<'a>(title: &'static str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(18), body].spacing(8))
        .padding(16)
        .width(CARD_WIDTH)
        .style(card_style)
        .into()
}

fn render_plan(plan: &PlanCard) -> Element<'static, Message> {
    card(
        PLAN_CARD_TITLE,
        column![
            text(format!("Plan: {}", plan.name)),
            text(format!("Status: {}", plan.status)),
        ]
        .spacing(4)
        .into(),
    )
}

fn render_usage(usage: &UsagePanel) -> Element<'static, Message> {
    card(
        USAGE_CARD_TITLE,
        column![
            progress_bar(0.0..=100.0, usage.fill_percent).height(8.0),
            text(usage.credits_label()),
        ]
        .spacing(6)
        .into(),
    )
}

fn render_manage(can_manage: bool) -> Element<'static, Message> {
    card(
        SUBSCRIPTION_CARD_TITLE,
        button(text(MANAGE_SUBSCRIPTION_LABEL))
            .style(button::primary)
            .on_press_maybe(can_manage.then_some(Message::Session(session::Message::Subscribe)))
            .into(),
    )
}
