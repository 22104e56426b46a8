use std::sync::Arc;

use requester::builder::RequestDraft;
use requester::error::ValidationError;
use requester::http::client::Dispatcher;
use requester::http::header::{Header, HeaderMapping};
use requester::http::method::HttpMethod;
use requester::http::response::ResponseData;
use requester::http::transport::{
    ErrorCode, Transport, TransportError, TransportFuture, TransportReply, TransportRequest,
};
use requester::session::{Completion, SaveOutcome, Session};
use requester::store::NotificationKind;

/// Echoes the request path back as a JSON body; `/down` fails as unreachable.
struct EchoTransport;

impl Transport for EchoTransport {
    fn invoke(&self, request: TransportRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            if request.url.ends_with("/down") {
                return Err(TransportError::new(
                    Some(ErrorCode::ConnectionRefused),
                    "connection refused",
                ));
            }
            Ok(TransportReply {
                status: 200,
                status_text: "OK".into(),
                headers: HeaderMapping::new(),
                data: ResponseData::Json(serde_json::json!({ "url": request.url })),
            })
        })
    }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(EchoTransport))
}

fn draft(url: &str, delay_seconds: u32) -> RequestDraft {
    RequestDraft {
        url: url.into(),
        delay_seconds,
        ..Default::default()
    }
}

fn shown_url(session: &Session) -> Option<String> {
    match &session.store().response()?.data {
        ResponseData::Json(value) => value["url"].as_str().map(str::to_string),
        _ => None,
    }
}

#[tokio::test]
async fn delayed_result_is_revealed_after_countdown() {
    let mut session = Session::new();
    let dispatcher = dispatcher();

    let pending = session.begin_dispatch(&draft("api.example.com/users", 2)).unwrap();
    let result = dispatcher.execute(pending.request).await;
    assert_eq!(session.complete_dispatch(pending.ticket, result), Completion::Counting(2));

    assert!(session.is_counting());
    assert!(session.store().loading());
    assert_eq!(session.store().countdown(), Some(2));
    assert_eq!(shown_url(&session), None);

    session.tick();
    assert_eq!(session.store().countdown(), Some(1));
    session.tick();

    assert!(!session.is_counting());
    assert!(!session.store().loading());
    assert_eq!(session.store().countdown(), None);
    assert_eq!(shown_url(&session).as_deref(), Some("https://api.example.com/users"));
}

#[tokio::test]
async fn newer_dispatch_wins_over_pending_countdown() {
    let mut session = Session::new();
    let dispatcher = dispatcher();

    let slow = session.begin_dispatch(&draft("api.example.com/slow", 5)).unwrap();
    let result = dispatcher.execute(slow.request).await;
    session.complete_dispatch(slow.ticket, result);
    session.tick();

    let fast = session.begin_dispatch(&draft("api.example.com/fast", 0)).unwrap();
    assert!(!session.is_counting());
    for _ in 0..5 {
        session.tick();
    }
    assert_eq!(shown_url(&session), None);

    let result = dispatcher.execute(fast.request).await;
    assert_eq!(session.complete_dispatch(fast.ticket, result), Completion::Revealed);
    assert_eq!(shown_url(&session).as_deref(), Some("https://api.example.com/fast"));
}

#[tokio::test]
async fn late_completion_of_superseded_dispatch_is_dropped() {
    let mut session = Session::new();
    let dispatcher = dispatcher();

    let first = session.begin_dispatch(&draft("api.example.com/first", 0)).unwrap();
    let second = session.begin_dispatch(&draft("api.example.com/second", 0)).unwrap();

    let second_result = dispatcher.execute(second.request).await;
    let first_result = dispatcher.execute(first.request).await;

    session.complete_dispatch(second.ticket, second_result);
    assert_eq!(session.complete_dispatch(first.ticket, first_result), Completion::Stale);
    assert_eq!(shown_url(&session).as_deref(), Some("https://api.example.com/second"));
}

#[tokio::test]
async fn failure_after_delay_setting_is_shown_at_once() {
    let mut session = Session::new();
    let dispatcher = dispatcher();

    let pending = session.begin_dispatch(&draft("localhost:9/down", 3)).unwrap();
    let result = dispatcher.execute(pending.request).await;
    assert_eq!(session.complete_dispatch(pending.ticket, result), Completion::Failed);

    assert!(!session.is_counting());
    assert!(!session.store().loading());
    let error = session.store().error().unwrap();
    assert!(error.starts_with("Connection Error: Cannot reach the server at http://localhost:9/down."));
}

#[test]
fn relative_url_is_rejected_without_side_effects() {
    let mut session = Session::new();
    let err = session.begin_dispatch(&draft("/api/users", 0)).unwrap_err();

    assert_eq!(err, ValidationError::RelativeUrl);
    assert!(!session.store().loading());
    assert!(session.store().error().unwrap().starts_with("Relative URLs are not supported"));
}

#[test]
fn saved_request_loads_back_into_the_builder() {
    let mut session = Session::new();
    let collection = session.create_collection("Billing").unwrap();

    let form = RequestDraft {
        name: "Create invoice".into(),
        method: HttpMethod::Post,
        url: "billing.example.com/invoices".into(),
        headers: vec![
            Header::new("Content-Type", "application/json"),
            Header::new("X-Debug", "1").disabled(),
        ],
        body: "{\"amount\": 10}".into(),
        delay_seconds: 0,
    };
    let SaveOutcome::Created(id) = session.save_draft(&form, Some(&collection)).unwrap() else {
        panic!("first save should create a request");
    };
    let notification = session.store().notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);

    session.new_draft();
    assert!(session.store().current_request().is_none());

    assert!(session.select_request(&id));
    let mut reloaded = RequestDraft::default();
    reloaded.load(session.store().current_request().unwrap());

    assert_eq!(reloaded.name, "Create invoice");
    assert_eq!(reloaded.method, HttpMethod::Post);
    assert_eq!(reloaded.url, "https://billing.example.com/invoices");
    assert_eq!(reloaded.headers, form.headers);
    assert_eq!(reloaded.body, form.body);

    reloaded.name = "Create invoice v2".into();
    assert_eq!(
        session.save_draft(&reloaded, Some(&collection)).unwrap(),
        SaveOutcome::Updated(id.clone())
    );
    let stored = &session.store().collection(&collection).unwrap().requests;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Create invoice v2");
}

#[test]
fn floating_draft_is_saved_outside_any_collection() {
    let mut session = Session::new();
    let form = RequestDraft {
        name: "Scratch".into(),
        url: "example.com".into(),
        ..Default::default()
    };

    let SaveOutcome::Created(id) = session.save_draft(&form, None).unwrap() else {
        panic!("expected a new request");
    };
    assert!(session.store().find_request(&id).is_none());
    assert_eq!(session.store().current_request().map(|r| &r.id), Some(&id));
    assert_eq!(session.store().current_request().unwrap().collection_id, None);
}
