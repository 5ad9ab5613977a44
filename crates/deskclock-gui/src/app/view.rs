use deskclock_core::screen::{APP_TITLE, Screen};
use iced::{Element, Length, Theme, widget::container};

use super::state::{App, Message};
use crate::{
    style::deskclock_theme,
    views::{clock::render_clock, dashboard::render_dashboard, sign_in::render_sign_in},
};

const WINDOW_PADDING: u16 = 24;

impl App {
    pub fn title(&self) -> String {
        String::from(APP_TITLE)
    }

    pub fn theme(&self) -> Theme {
        deskclock_theme(&self.config.appearance)
    }

    pub fn scale_factor(&self) -> f64 {
        self.config.appearance.scale_factor
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.shell.screen() {
            Screen::SignIn(prompt) => render_sign_in(&prompt),
            Screen::Clock(panel) => render_clock(&panel),
            Screen::Dashboard(dashboard) => render_dashboard(&dashboard),
        };

        container(content)
            .padding(WINDOW_PADDING)
            .center(Length::Fill)
            .into()
    }
}
