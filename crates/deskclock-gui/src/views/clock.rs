//! Clock view layer - pure rendering, no business logic

use deskclock_core::{
    modules::clock::{self, FormattedTime},
    screen::ClockPanel,
};
use iced::{
    Alignment, Element, Font,
    widget::{button, column, row, text},
};

use crate::app::Message;

const TIME_SIZE: u16 = 64;
const PERIOD_SIZE: u16 = 24;
const DATE_SIZE: u16 = 20;

/// `"HH:MM:SS"`, without the period.
pub fn time_label(time: &FormattedTime) -> String {
    format!("{}:{}:{}", time.hours, time.minutes, time.seconds)
}

/// Render the time, the optional AM/PM marker, the date and the mode toggle.
pub fn render_clock(panel: &ClockPanel) -> Element<'static, Message> {
    let face = &panel.face;

    let mut time_row = row![text(time_label(&face.time)).size(TIME_SIZE).font(Font::MONOSPACE)]
        .align_y(Alignment::End)
        .spacing(8);

    if face.time.period.is_some() {
        time_row = time_row.push(text(face.time.period_str()).size(PERIOD_SIZE));
    }

    column![
        time_row,
        text(face.date.as_str().to_owned()).size(DATE_SIZE),
        button(text(panel.toggle_label))
            .style(button::secondary)
            .on_press(Message::Clock(clock::Message::ToggleDisplayMode)),
    ]
    .align_x(Alignment::Center)
    .spacing(12)
    .into()
}
