use iced::widget::{button, pick_list, row, text, text_input};
use iced::{Element, Length};

use requester::http::method::HttpMethod;

use crate::Message;

use super::style;

pub fn view<'a>(
    method: HttpMethod,
    url: &str,
    can_send: bool,
    loading: bool,
    countdown: Option<u32>,
) -> Element<'a, Message> {
    let method_picklist = pick_list(&HttpMethod::ALL[..], Some(method), Message::MethodSelected)
        .width(120)
        .padding([9, 10])
        .style(style::pick_list_style);

    let url_input = text_input("https://api.example.com/users", url)
        .on_input(Message::UrlChanged)
        .on_submit(Message::SendPressed)
        .padding(10)
        .size(15)
        .width(Length::Fill)
        .style(style::input_style);

    let label = match (loading, countdown) {
        (true, Some(seconds)) => format!("Waiting... {seconds}s"),
        (true, None) => "Sending...".to_string(),
        (false, _) => "Send".to_string(),
    };
    let send_button = button(text(label).size(14))
        .on_press_maybe((can_send && !loading).then_some(Message::SendPressed))
        .padding([10, 18])
        .style(style::primary_button);

    row![method_picklist, url_input, send_button]
        .spacing(10)
        .into()
}
