use iced::alignment::{Horizontal, Vertical};
use iced::widget::{container, text};
use iced::{Element, Length};

use requester::store::Notification;

use crate::Message;

use super::style;

/// Toast layer stacked over the window, bottom right.
pub fn view<'a>(notification: &'a Notification) -> Element<'a, Message> {
    let kind = notification.kind;
    let toast = container(text(&notification.message).size(13))
        .padding([10, 14])
        .max_width(360)
        .style(move |_| style::toast_style(kind));

    container(toast)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .padding(16)
        .into()
}
