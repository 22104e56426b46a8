use iced::alignment::Alignment;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length};

use requester::collections::Collection;
use requester::http::method::HttpMethod;
use requester::id::RequestId;

use crate::Message;

use super::style;

pub fn view<'a>(collection: &'a Collection, current: Option<&'a RequestId>) -> Element<'a, Message> {
    let mut list = column![
        row![
            text("Requests").size(11).color(style::TEXT_MUTED),
            iced::widget::horizontal_space(),
            button(text("+ New").size(11))
                .on_press(Message::NewRequestPressed)
                .padding([3, 8])
                .style(style::ghost_button),
        ]
        .align_y(Alignment::Center)
    ]
    .spacing(4);

    if collection.requests.is_empty() {
        list = list.push(text("No requests in this collection").size(12).color(style::TEXT_MUTED));
    }

    for request in &collection.requests {
        let is_active = current == Some(&request.id);
        let item = button(
            row![method_badge(request.method), text(&request.name).size(12)]
                .spacing(6)
                .align_y(Alignment::Center),
        )
        .on_press(Message::RequestSelected(request.id.clone()))
        .width(Length::Fill)
        .padding([6, 8])
        .style(move |theme, status| style::list_item_button(is_active, theme, status));

        let delete = button(text("✕").size(11))
            .on_press(Message::RequestDeleted(request.id.clone()))
            .padding([4, 6])
            .style(style::danger_button);

        list = list.push(row![item, delete].spacing(2).align_y(Alignment::Center));
    }

    container(scrollable(list).height(Length::Fill))
        .padding([8, 10])
        .width(240)
        .height(Length::Fill)
        .style(|_| style::surface_style(style::PANEL, 0.0))
        .into()
}

pub fn method_badge<'a>(method: HttpMethod) -> Element<'a, Message> {
    let color = style::method_color(method);
    let label = match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Patch => "PTCH",
        HttpMethod::Delete => "DEL",
        HttpMethod::Head => "HEAD",
        HttpMethod::Options => "OPT",
    };
    container(text(label).size(10).color(color))
        .padding([2, 4])
        .width(38)
        .center_x(Length::Shrink)
        .style(move |_| {
            iced::widget::container::Style::default()
                .background(iced::Background::Color(iced::Color { a: 0.12, ..color }))
                .border(iced::Border {
                    radius: 3.0.into(),
                    width: 0.0,
                    color: iced::Color::TRANSPARENT,
                })
        })
        .into()
}
