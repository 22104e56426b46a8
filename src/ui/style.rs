use iced::widget::{button, container, pick_list, text_editor, text_input};
use iced::{Background, Border, Color, Theme};

use requester::http::method::HttpMethod;
use requester::http::response::StatusClass;
use requester::store::NotificationKind;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: 1.0,
    }
}

pub const BG: Color = rgb(18, 21, 27);
/// Sidebar, lists and the response area.
pub const PANEL: Color = rgb(20, 24, 32);
/// Inputs and the builder's top strip.
pub const RAISED: Color = rgb(25, 30, 38);
const HOVER: Color = rgb(31, 37, 46);
const PRESSED: Color = rgb(37, 45, 56);
pub const BORDER: Color = rgb(48, 58, 70);

const TEXT: Color = rgb(230, 236, 244);
pub const TEXT_MUTED: Color = rgb(132, 145, 160);

const ACCENT: Color = rgb(58, 201, 111);
const ACCENT_HOVER: Color = rgb(71, 214, 124);
const SELECTION: Color = Color::from_rgba(0.23, 0.79, 0.44, 0.35);

pub const DANGER: Color = rgb(226, 92, 92);
pub const WARNING: Color = rgb(242, 196, 15);
const INFO: Color = rgb(82, 167, 244);

pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::Get | HttpMethod::Head => rgb(73, 204, 144),
        HttpMethod::Post => rgb(255, 176, 59),
        HttpMethod::Put => INFO,
        HttpMethod::Patch => rgb(180, 130, 240),
        HttpMethod::Delete => rgb(240, 92, 92),
        HttpMethod::Options => rgb(233, 120, 180),
    }
}

pub fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Success => ACCENT,
        StatusClass::Info => INFO,
        StatusClass::Error => DANGER,
    }
}

pub fn app_theme() -> Theme {
    Theme::custom(
        "Requester".to_string(),
        iced::theme::Palette {
            background: BG,
            text: TEXT,
            primary: ACCENT,
            success: ACCENT,
            danger: DANGER,
        },
    )
}

fn border(radius: f32, width: f32, color: Color) -> Border {
    Border {
        radius: radius.into(),
        width,
        color,
    }
}

pub fn surface_style(color: Color, border_radius: f32) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
        .border(border(border_radius, 1.0, BORDER))
}

pub fn flat_surface_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
}

/// Tinted box used for errors and warnings inside the response panel.
pub fn banner_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(Color { a: 0.12, ..color }))
        .color(color)
        .border(border(8.0, 1.0, color))
}

pub fn toast_style(kind: NotificationKind) -> container::Style {
    let accent = match kind {
        NotificationKind::Success => ACCENT,
        NotificationKind::Error => DANGER,
    };

    container::Style::default()
        .background(Background::Color(HOVER))
        .color(TEXT)
        .border(border(8.0, 1.0, accent))
}

fn button_style(background: Color, text_color: Color, border: Border) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border,
        shadow: Default::default(),
    }
}

/// Send, and creating a collection.
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text_color) = match status {
        button::Status::Active | button::Status::Pressed => (ACCENT, BG),
        button::Status::Hovered => (ACCENT_HOVER, BG),
        button::Status::Disabled => (PRESSED, TEXT_MUTED),
    };
    button_style(bg, text_color, border(8.0, 1.0, bg))
}

pub fn subtle_button(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text_color) = match status {
        button::Status::Active => (HOVER, TEXT),
        button::Status::Hovered | button::Status::Pressed => (PRESSED, TEXT),
        button::Status::Disabled => (RAISED, TEXT_MUTED),
    };
    button_style(bg, text_color, border(8.0, 1.0, BORDER))
}

pub fn ghost_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => HOVER,
        button::Status::Active | button::Status::Disabled => RAISED,
    };
    button_style(bg, TEXT_MUTED, border(6.0, 1.0, BORDER))
}

/// Delete buttons: quiet until hovered.
pub fn danger_button(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text_color) = match status {
        button::Status::Active => (RAISED, DANGER),
        button::Status::Hovered | button::Status::Pressed => (DANGER, TEXT),
        button::Status::Disabled => (RAISED, TEXT_MUTED),
    };
    button_style(bg, text_color, border(6.0, 1.0, BORDER))
}

/// Sidebar entries and saved requests; `active` marks the open one.
pub fn list_item_button(active: bool, _theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active if active => Color { a: 0.15, ..ACCENT },
        button::Status::Active | button::Status::Disabled => RAISED,
        button::Status::Hovered => HOVER,
        button::Status::Pressed => PRESSED,
    };
    let outline = if active {
        border(6.0, 1.0, ACCENT)
    } else {
        border(6.0, 0.0, BORDER)
    };
    button_style(bg, if active { TEXT } else { TEXT_MUTED }, outline)
}

/// Border of an editable field for its hover/focus state.
fn field_border(hovered: bool, focused: bool) -> Border {
    let color = if focused {
        ACCENT
    } else if hovered {
        PRESSED
    } else {
        BORDER
    };
    border(8.0, 1.0, color)
}

pub fn input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: Background::Color(RAISED),
        border: field_border(
            matches!(status, text_input::Status::Hovered),
            matches!(status, text_input::Status::Focused),
        ),
        icon: TEXT_MUTED,
        placeholder: TEXT_MUTED,
        value: if matches!(status, text_input::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        selection: SELECTION,
    }
}

pub fn editor_style(_theme: &Theme, status: text_editor::Status) -> text_editor::Style {
    text_editor::Style {
        background: Background::Color(RAISED),
        border: field_border(
            matches!(status, text_editor::Status::Hovered),
            matches!(status, text_editor::Status::Focused),
        ),
        icon: TEXT_MUTED,
        placeholder: TEXT_MUTED,
        value: if matches!(status, text_editor::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        selection: SELECTION,
    }
}

pub fn pick_list_style(_theme: &Theme, status: pick_list::Status) -> pick_list::Style {
    pick_list::Style {
        text_color: TEXT,
        background: Background::Color(RAISED),
        placeholder_color: TEXT_MUTED,
        handle_color: TEXT_MUTED,
        border: field_border(
            false,
            matches!(status, pick_list::Status::Hovered | pick_list::Status::Opened),
        ),
    }
}
