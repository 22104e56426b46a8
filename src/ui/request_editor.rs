use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, text_editor, text_input};
use iced::{Element, Length};

use requester::builder::RequestDraft;

use crate::Message;

use super::style;

pub struct RequestEditorState<'a> {
    pub draft: &'a RequestDraft,
    pub delay_input: &'a str,
    pub body_editor: &'a text_editor::Content,
    pub loading: bool,
    pub countdown: Option<u32>,
}

pub fn view<'a>(state: RequestEditorState<'a>) -> Element<'a, Message> {
    let draft = state.draft;

    let name_input = text_input("Request name", &draft.name)
        .on_input(Message::NameChanged)
        .padding(8)
        .size(14)
        .width(Length::Fill)
        .style(style::input_style);

    let delay_input = text_input("0", state.delay_input)
        .on_input_maybe((!state.loading).then_some(Message::DelayChanged))
        .padding(8)
        .size(13)
        .width(70)
        .style(style::input_style);

    let save_button = button(text("Save").size(13))
        .on_press(Message::SavePressed)
        .padding([8, 14])
        .style(style::subtle_button);

    let meta = row![
        name_input,
        text("Delay (s)").size(12).color(style::TEXT_MUTED),
        delay_input,
        save_button,
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let request_bar = super::request_bar::view(
        draft.method,
        &draft.url,
        draft.can_send(),
        state.loading,
        state.countdown,
    );

    let mut form = column![super::headers_editor::view(&draft.headers)].spacing(14);
    if draft.method.accepts_body() {
        form = form.push(super::body_editor::view(state.body_editor));
    }

    column![
        container(column![meta, request_bar].spacing(10))
            .padding(12)
            .style(|_| style::flat_surface_style(style::RAISED)),
        horizontal_rule(1).style(|_| iced::widget::rule::Style {
            color: style::BORDER,
            width: 1,
            radius: 0.0.into(),
            fill_mode: iced::widget::rule::FillMode::Full,
        }),
        scrollable(container(form).padding(12)).height(Length::Fill),
    ]
    .height(Length::Fill)
    .spacing(0)
    .into()
}
