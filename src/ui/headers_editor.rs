use iced::alignment::Alignment;
use iced::widget::{button, checkbox, column, row, text, text_input};
use iced::{Element, Length};

use requester::http::header::Header;

use crate::Message;

use super::style;

pub fn view<'a>(headers: &'a [Header]) -> Element<'a, Message> {
    let mut rows = column![text("Headers").size(12).color(style::TEXT_MUTED)].spacing(6);

    for (index, header) in headers.iter().enumerate() {
        rows = rows.push(
            row![
                checkbox("", header.enabled).on_toggle(move |enabled| Message::HeaderToggled(index, enabled)),
                text_input("Key", &header.key)
                    .on_input(move |key| Message::HeaderKeyChanged(index, key))
                    .padding(8)
                    .size(13)
                    .width(Length::FillPortion(2))
                    .style(style::input_style),
                text_input("Value", &header.value)
                    .on_input(move |value| Message::HeaderValueChanged(index, value))
                    .padding(8)
                    .size(13)
                    .width(Length::FillPortion(3))
                    .style(style::input_style),
                button(text("✕").size(11))
                    .on_press(Message::HeaderRemoved(index))
                    .padding([6, 8])
                    .style(style::ghost_button),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        );
    }

    rows.push(
        button(text("+ Add Header").size(12))
            .on_press(Message::HeaderAdded)
            .padding([5, 10])
            .style(style::subtle_button),
    )
    .into()
}
