use iced::widget::{column, text, text_editor};
use iced::Element;

use crate::Message;

use super::style;

pub fn view<'a>(editor: &'a text_editor::Content) -> Element<'a, Message> {
    column![
        text("Body").size(12).color(style::TEXT_MUTED),
        text_editor(editor)
            .placeholder("{\"key\": \"value\"}")
            .on_action(Message::BodyEdited)
            .height(170)
            .style(style::editor_style),
    ]
    .spacing(6)
    .into()
}
