use iced::alignment::{Alignment, Horizontal};
use iced::widget::{column, container, row, scrollable, text};
use iced::{Element, Length};

use requester::error::FailureKind;
use requester::http::response::Response;

use crate::Message;

use super::style;

pub struct ResponseState<'a> {
    pub loading: bool,
    pub countdown: Option<u32>,
    pub error: Option<&'a str>,
    pub error_kind: Option<FailureKind>,
    pub response: Option<&'a Response>,
}

pub fn view<'a>(state: ResponseState<'a>) -> Element<'a, Message> {
    let content: Element<'a, Message> = if state.loading {
        let label = match state.countdown {
            Some(seconds) => format!("Waiting for response... {seconds}s"),
            None => "Loading...".to_string(),
        };
        placeholder(text(label).size(14).color(style::TEXT_MUTED))
    } else if let Some(error) = state.error {
        let mut block = column![
            text("Error").size(13).color(style::DANGER),
            text(error).size(13),
        ]
        .spacing(6);
        if let Some(help) = state.error_kind.and_then(troubleshooting) {
            block = block.push(help);
        }

        scrollable(
            container(block)
                .padding(12)
                .width(Length::Fill)
                .style(|_| style::banner_style(style::DANGER)),
        )
        .height(Length::Fill)
        .into()
    } else if let Some(response) = state.response {
        response_view(response)
    } else {
        placeholder(text("No response yet").size(14).color(style::TEXT_MUTED))
    };

    container(content)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::PANEL))
        .into()
}

fn response_view(response: &Response) -> Element<'_, Message> {
    let status_color = style::status_color(response.status_class());
    let summary = row![
        text(format!("{} {}", response.status, response.status_text))
            .size(13)
            .color(status_color),
        text(format!("Time: {}ms", response.time))
            .size(12)
            .color(style::TEXT_MUTED),
    ]
    .spacing(14)
    .align_y(Alignment::Center);

    let headers = serde_json::to_string_pretty(&response.headers).unwrap_or_default();

    let mut body = column![].spacing(8);
    if response.data.is_html() {
        body = body.push(
            container(
                text("HTML Response Detected (likely a CORS error or incorrect URL)").size(12),
            )
            .padding(8)
            .width(Length::Fill)
            .style(|_| style::banner_style(style::WARNING)),
        );
    }
    body = body.push(block(response.data.pretty()));

    scrollable(
        column![
            summary,
            text("Headers").size(11).color(style::TEXT_MUTED),
            block(headers),
            text("Body").size(11).color(style::TEXT_MUTED),
            body,
        ]
        .spacing(8),
    )
    .height(Length::Fill)
    .into()
}

static CONNECTIVITY_STEPS: [&str; 6] = [
    "Verify the server is running: check that the API server is actually up",
    "Check the host and port: make sure the address and port in the URL are correct",
    "Test connectivity: try opening the URL directly in your browser",
    "Check firewall: the server might be behind a firewall that blocks external connections",
    "Network access: make sure your network can reach the server's address",
    "Server logs: check whether the request is reaching the server",
];

static CORS_STEPS: [&str; 4] = [
    "Access-Control-Allow-Origin: *",
    "Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS",
    "Access-Control-Allow-Headers: Content-Type",
    "Access-Control-Max-Age: 86400",
];

/// Remedies for the failure categories that have one.
fn troubleshooting<'a>(kind: FailureKind) -> Option<Element<'a, Message>> {
    let (title, intro, steps): (&str, Option<&str>, &[&str]) = match kind {
        FailureKind::Connectivity => ("Troubleshooting Connection Issues:", None, &CONNECTIVITY_STEPS[..]),
        FailureKind::CrossOrigin => (
            "CORS Error Detected",
            Some(
                "If the URL works when you open it directly in your browser, the server is reachable \
                 but does not allow programmatic requests from this origin. Add these headers to all \
                 responses and make sure OPTIONS preflight requests return them too:",
            ),
            &CORS_STEPS[..],
        ),
        FailureKind::Answered | FailureKind::Network | FailureKind::Other => return None,
    };

    let mut help = column![text(title).size(12).color(style::WARNING)].spacing(4);
    if let Some(intro) = intro {
        help = help.push(text(intro).size(12));
    }
    for step in steps {
        help = help.push(text(format!("• {step}")).size(12).color(style::TEXT_MUTED));
    }
    Some(container(help).padding([8, 0]).into())
}

fn block<'a>(content: String) -> Element<'a, Message> {
    container(text(content).size(13))
        .padding(10)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::RAISED, 8.0))
        .into()
}

fn placeholder<'a>(label: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(label)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .padding(16)
        .into()
}
