use deskclock_core::{modules::session, screen::SignInPrompt};
use iced::{
    Alignment, Element,
    widget::{button, column, text},
};

use crate::app::Message;

/// Render the sign-in gate. Nothing of the clock is shown here.
pub fn render_sign_in(prompt: &SignInPrompt) -> Element<'static, Message> {
    column![
        text(prompt.title).size(32),
        text(prompt.message),
        button(text(prompt.action_label))
            .style(button::primary)
            .on_press(Message::Session(session::Message::SignIn)),
    ]
    .align_x(Alignment::Center)
    .spacing(16)
    .into()
}
