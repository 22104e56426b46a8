mod ui;

use std::sync::Arc;

use iced::widget::{column, container, row, stack, text, text_editor};
use iced::{Element, Length, Subscription, Task};
use ui::style;

use requester::builder::RequestDraft;
use requester::config::AppConfig;
use requester::error::DispatchError;
use requester::http::client::Dispatcher;
use requester::http::method::HttpMethod;
use requester::http::response::Response;
use requester::http::transport::ReqwestTransport;
use requester::id::{CollectionId, RequestId};
use requester::logging;
use requester::reveal::TICK_INTERVAL;
use requester::session::{DispatchTicket, Session};
use requester::store::{Notification, NotificationId};

fn main() -> iced::Result {
    let config = AppConfig::load();
    logging::init(&config.log_level);

    let window_size = (config.window_width, config.window_height);
    iced::application("Requester", update, view)
        .subscription(subscription)
        .theme(|_| style::app_theme())
        .window_size(window_size)
        .run_with(move || (App::new(config), Task::none()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Collection(CollectionId),
}

struct App {
    config: AppConfig,
    session: Session,
    dispatcher: Option<Dispatcher>,
    page: Page,
    draft: RequestDraft,
    delay_input: String,
    body_editor: text_editor::Content,
    new_collection_name: String,
    in_flight: Option<(DispatchTicket, iced::task::Handle)>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut session = Session::new();
        let dispatcher = match ReqwestTransport::new(config.request_timeout, config.max_redirects) {
            Ok(transport) => {
                Some(Dispatcher::new(Arc::new(transport)).with_origin(config.client_origin.clone()))
            }
            Err(err) => {
                tracing::error!(%err, "HTTP client unavailable");
                session.store_mut().set_error(Some(err));
                None
            }
        };

        let draft = RequestDraft::with_delay(config.default_delay_seconds);
        Self {
            delay_input: draft.delay_seconds.to_string(),
            draft,
            config,
            session,
            dispatcher,
            page: Page::Home,
            body_editor: text_editor::Content::new(),
            new_collection_name: String::new(),
            in_flight: None,
        }
    }

    fn active_collection(&self) -> Option<&CollectionId> {
        match &self.page {
            Page::Home => None,
            Page::Collection(id) => Some(id),
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some((ticket, handle)) = self.in_flight.take() {
            tracing::debug!(?ticket, "aborting in-flight request");
            handle.abort();
        }
    }

    /// Tear down anything pending and start from an empty form.
    fn leave_builder(&mut self) {
        self.abort_in_flight();
        self.session.cancel_pending();
        self.session.new_draft();
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.draft.reset();
        self.body_editor = text_editor::Content::new();
    }

    fn load_current_request(&mut self) {
        if let Some(request) = self.session.store().current_request() {
            self.draft.load(request);
            self.body_editor = text_editor::Content::with_text(&self.draft.body);
        }
    }

    /// Schedule expiry for a notification raised since `before`.
    fn expire_later(&self, before: NotificationId) -> Task<Message> {
        let store = self.session.store();
        let id = store.notification_id();
        if id == before || store.notification().is_none() {
            return Task::none();
        }

        let duration = self.config.notification_duration;
        Task::perform(tokio::time::sleep(duration), move |_| Message::NotificationExpired(id))
    }

    fn notify(&mut self, notification: Notification) -> Task<Message> {
        let before = self.session.store().notification_id();
        self.session.notify(notification);
        self.expire_later(before)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    HomeSelected,
    CollectionSelected(CollectionId),
    NewCollectionNameChanged(String),
    CreateCollectionPressed,
    DeleteCollectionPressed(CollectionId),
    CollectionRenamed(CollectionId, String),
    RequestSelected(RequestId),
    RequestDeleted(RequestId),
    NewRequestPressed,
    NameChanged(String),
    DelayChanged(String),
    MethodSelected(HttpMethod),
    UrlChanged(String),
    HeaderAdded,
    HeaderRemoved(usize),
    HeaderKeyChanged(usize, String),
    HeaderValueChanged(usize, String),
    HeaderToggled(usize, bool),
    BodyEdited(text_editor::Action),
    SendPressed,
    SavePressed,
    RequestFinished {
        ticket: DispatchTicket,
        result: Result<Response, DispatchError>,
    },
    CountdownTick,
    NotificationExpired(NotificationId),
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::HomeSelected => {
            if app.page != Page::Home {
                app.leave_builder();
                app.page = Page::Home;
            }
            Task::none()
        }
        Message::CollectionSelected(id) => {
            if app.page != Page::Collection(id.clone()) {
                app.leave_builder();
                app.page = Page::Collection(id);
            }
            Task::none()
        }
        Message::NewCollectionNameChanged(name) => {
            app.new_collection_name = name;
            Task::none()
        }
        Message::CreateCollectionPressed => match app.session.create_collection(&app.new_collection_name) {
            Ok(_) => {
                app.new_collection_name.clear();
                Task::none()
            }
            Err(err) => app.notify(Notification::error(err.to_string())),
        },
        Message::DeleteCollectionPressed(id) => {
            app.session.store_mut().delete_collection(&id);
            if app.page == Page::Collection(id) {
                app.leave_builder();
                app.page = Page::Home;
            }
            Task::none()
        }
        Message::CollectionRenamed(id, name) => {
            app.session.store_mut().update_collection(&id, name);
            Task::none()
        }
        Message::RequestSelected(id) => {
            if app.session.select_request(&id) {
                app.abort_in_flight();
                app.load_current_request();
            }
            Task::none()
        }
        Message::RequestDeleted(id) => {
            let was_current = app
                .session
                .store()
                .current_request()
                .is_some_and(|current| current.id == id);
            let before = app.session.store().notification_id();
            app.session.delete_request(&id);
            if was_current {
                app.reset_draft();
            }
            app.expire_later(before)
        }
        Message::NewRequestPressed => {
            app.session.new_draft();
            app.reset_draft();
            Task::none()
        }
        Message::NameChanged(name) => {
            app.draft.name = name;
            Task::none()
        }
        Message::DelayChanged(input) => {
            app.draft.set_delay_input(&input);
            app.delay_input = input;
            Task::none()
        }
        Message::MethodSelected(method) => {
            app.draft.method = method;
            Task::none()
        }
        Message::UrlChanged(url) => {
            app.draft.url = url;
            Task::none()
        }
        Message::HeaderAdded => {
            app.draft.add_header();
            Task::none()
        }
        Message::HeaderRemoved(index) => {
            app.draft.remove_header(index);
            Task::none()
        }
        Message::HeaderKeyChanged(index, key) => {
            app.draft.set_header_key(index, key);
            Task::none()
        }
        Message::HeaderValueChanged(index, value) => {
            app.draft.set_header_value(index, value);
            Task::none()
        }
        Message::HeaderToggled(index, enabled) => {
            app.draft.set_header_enabled(index, enabled);
            Task::none()
        }
        Message::BodyEdited(action) => {
            app.body_editor.perform(action);
            app.draft.body = app.body_editor.text();
            Task::none()
        }
        Message::SendPressed => {
            if app.session.store().loading() {
                return Task::none();
            }
            let Some(dispatcher) = app.dispatcher.clone() else {
                return Task::none();
            };

            app.abort_in_flight();
            let Ok(pending) = app.session.begin_dispatch(&app.draft) else {
                return Task::none();
            };

            let ticket = pending.ticket;
            let (task, handle) = Task::perform(
                async move { dispatcher.execute(pending.request).await },
                move |result| Message::RequestFinished { ticket, result },
            )
            .abortable();
            app.in_flight = Some((ticket, handle));
            task
        }
        Message::SavePressed => {
            let before = app.session.store().notification_id();
            let collection = app.active_collection().cloned();
            match app.session.save_draft(&app.draft, collection.as_ref()) {
                Ok(_) => app.expire_later(before),
                Err(err) => app.notify(Notification::error(err.to_string())),
            }
        }
        Message::RequestFinished { ticket, result } => {
            if app.in_flight.as_ref().is_some_and(|(current, _)| *current == ticket) {
                app.in_flight = None;
            }
            app.session.complete_dispatch(ticket, result);
            Task::none()
        }
        Message::CountdownTick => {
            app.session.tick();
            Task::none()
        }
        Message::NotificationExpired(id) => {
            app.session.expire_notification(id);
            Task::none()
        }
    }
}

/// The countdown tick only exists while a result is being held back.
fn subscription(app: &App) -> Subscription<Message> {
    if app.session.is_counting() {
        iced::time::every(TICK_INTERVAL).map(|_| Message::CountdownTick)
    } else {
        Subscription::none()
    }
}

fn view(app: &App) -> Element<'_, Message> {
    let store = app.session.store();

    let sidebar = container(ui::sidebar::view(
        store.collections(),
        &app.page,
        &app.new_collection_name,
    ))
    .width(260)
    .height(Length::Fill);

    let main_content: Element<'_, Message> = match &app.page {
        Page::Collection(id) => match store.collection(id) {
            Some(collection) => {
                let current = store.current_request().map(|request| &request.id);
                column![
                    ui::header::view(Some(collection)),
                    row![ui::request_list::view(collection, current), workspace(app)]
                        .height(Length::Fill),
                ]
                .spacing(1)
                .into()
            }
            None => container(text("Collection not found").size(14).color(style::TEXT_MUTED))
                .padding(24)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        },
        Page::Home => column![ui::header::view(None), workspace(app)]
            .spacing(1)
            .into(),
    };

    let layout = row![
        sidebar,
        container(main_content).width(Length::Fill).height(Length::Fill)
    ]
    .height(Length::Fill)
    .width(Length::Fill);

    let base = container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::BG));

    match store.notification() {
        Some(notification) => stack![base, ui::notification::view(notification)].into(),
        None => base.into(),
    }
}

/// Builder above, response below.
fn workspace(app: &App) -> Element<'_, Message> {
    let store = app.session.store();

    let request_section = container(ui::request_editor::view(ui::request_editor::RequestEditorState {
        draft: &app.draft,
        delay_input: &app.delay_input,
        body_editor: &app.body_editor,
        loading: store.loading(),
        countdown: store.countdown(),
    }))
    .height(Length::FillPortion(45))
    .style(|_| style::surface_style(style::PANEL, 0.0));

    let response_section = container(ui::response_panel::view(ui::response_panel::ResponseState {
        loading: store.loading(),
        countdown: store.countdown(),
        error: store.error(),
        error_kind: store.error_kind(),
        response: store.response(),
    }))
    .height(Length::FillPortion(55))
    .style(|_| style::surface_style(style::PANEL, 0.0));

    column![request_section, response_section]
        .spacing(1)
        .height(Length::Fill)
        .width(Length::Fill)
        .into()
}
