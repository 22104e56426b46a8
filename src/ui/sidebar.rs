use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, text_input};
use iced::{Element, Length};

use requester::collections::Collection;

use crate::{Message, Page};

use super::style;

pub fn view<'a>(
    collections: &'a [Collection],
    page: &'a Page,
    new_collection_name: &'a str,
) -> Element<'a, Message> {
    let title = row![
        text("Requester").size(16),
        text(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10).color(style::TEXT_MUTED),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let can_create = !new_collection_name.trim().is_empty();
    let create = row![
        text_input("New Collection", new_collection_name)
            .on_input(Message::NewCollectionNameChanged)
            .on_submit(Message::CreateCollectionPressed)
            .padding(8)
            .size(13)
            .width(Length::Fill)
            .style(style::input_style),
        button(text("+").size(14))
            .on_press_maybe(can_create.then_some(Message::CreateCollectionPressed))
            .padding([6, 10])
            .style(style::primary_button),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let home_active = matches!(page, Page::Home);
    let mut list = column![
        button(text("Home").size(12))
            .on_press(Message::HomeSelected)
            .width(Length::Fill)
            .padding([8, 10])
            .style(move |theme, status| style::list_item_button(home_active, theme, status)),
        text("Collections").size(11).color(style::TEXT_MUTED),
    ]
    .spacing(6);

    if collections.is_empty() {
        list = list.push(text("No collections yet").size(12).color(style::TEXT_MUTED));
    }

    for collection in collections {
        let is_active = matches!(page, Page::Collection(id) if id == &collection.id);
        let item = button(
            row![
                text(&collection.name).size(12),
                iced::widget::horizontal_space(),
                text(collection.requests.len().to_string()).size(10).color(style::TEXT_MUTED),
            ]
            .align_y(Alignment::Center),
        )
        .on_press(Message::CollectionSelected(collection.id.clone()))
        .width(Length::Fill)
        .padding([8, 10])
        .style(move |theme, status| style::list_item_button(is_active, theme, status));

        let delete = button(text("✕").size(11))
            .on_press(Message::DeleteCollectionPressed(collection.id.clone()))
            .padding([4, 6])
            .style(style::danger_button);

        list = list.push(row![item, delete].spacing(2).align_y(Alignment::Center));
    }

    container(
        column![
            container(title).padding([10, 12]),
            container(create).padding([0, 10]),
            horizontal_rule(1).style(|_| iced::widget::rule::Style {
                color: style::BORDER,
                width: 1,
                radius: 0.0.into(),
                fill_mode: iced::widget::rule::FillMode::Full,
            }),
            container(scrollable(list.spacing(4)).height(Length::Fill))
                .padding([8, 10])
                .height(Length::Fill),
        ]
        .spacing(8),
    )
    .height(Length::Fill)
    .style(|_| style::surface_style(style::PANEL, 0.0))
    .into()
}
