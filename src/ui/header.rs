use iced::alignment::Alignment;
use iced::widget::{button, container, horizontal_space, row, text, text_input};
use iced::{Element, Length};

use requester::collections::Collection;

use crate::Message;

use super::style;

/// Top bar of the main area. On a collection page the name is editable in
/// place.
pub fn view<'a>(collection: Option<&'a Collection>) -> Element<'a, Message> {
    let title: Element<'a, Message> = match collection {
        Some(collection) => {
            let id = collection.id.clone();
            text_input("Collection name", &collection.name)
                .on_input(move |name| Message::CollectionRenamed(id.clone(), name))
                .padding([5, 8])
                .size(15)
                .width(320)
                .style(style::input_style)
                .into()
        }
        None => text("Home").size(15).into(),
    };

    let new_request = button(text("New Request").size(12))
        .on_press(Message::NewRequestPressed)
        .padding([5, 10])
        .style(style::ghost_button);

    container(
        row![title, horizontal_space(), new_request]
            .spacing(8)
            .padding([6, 12])
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .style(|_| style::surface_style(style::RAISED, 0.0))
    .into()
}
