//! The application root's state container.
//!
//! [`Session`] owns the [`Store`] together with the reveal timer and the
//! bookkeeping for the dispatch in flight, and performs every state
//! transition of the request lifecycle. Presentation reads through
//! [`Session::store`]; nothing writes to the store behind the session's back.

use crate::builder::RequestDraft;
use crate::error::{DispatchError, ValidationError};
use crate::http::client::Dispatcher;
use crate::http::response::Response;
use crate::http::transport::TransportRequest;
use crate::id::{CollectionId, RequestId};
use crate::reveal::{RevealTimer, Tick};
use crate::store::{Notification, NotificationId, Store};

/// Identifies one dispatch. Completions carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchTicket(u64);

/// A validated dispatch that has been started but not issued yet.
#[derive(Debug, Clone)]
pub struct PendingDispatch {
    pub ticket: DispatchTicket,
    pub request: TransportRequest,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: DispatchTicket,
    delay_seconds: u32,
}

/// What [`Session::complete_dispatch`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Revealed,
    Counting(u32),
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(RequestId),
    Updated(RequestId),
}

#[derive(Debug, Default)]
pub struct Session {
    store: Store,
    timer: RevealTimer<Response>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn is_counting(&self) -> bool {
        self.timer.is_counting()
    }

    /// Validate the draft and move into the loading state.
    ///
    /// A rejected draft only sets the error; nothing pending is touched. An
    /// accepted one first cancels any countdown left over from an earlier
    /// dispatch, so a stale result can never be revealed over this one.
    pub fn begin_dispatch(&mut self, draft: &RequestDraft) -> Result<PendingDispatch, ValidationError> {
        let request = match Dispatcher::prepare(draft.method, &draft.url, &draft.headers, &draft.body) {
            Ok(request) => request,
            Err(err) => {
                self.store.set_error(Some(err.to_string()));
                return Err(err);
            }
        };

        if self.timer.cancel() {
            tracing::debug!("pending reveal cancelled by new dispatch");
        }

        self.next_ticket += 1;
        let ticket = DispatchTicket(self.next_ticket);
        self.in_flight = Some(InFlight {
            ticket,
            delay_seconds: draft.delay_seconds,
        });

        self.store.set_loading(true);
        self.store.set_error(None);
        self.store.set_response(None);
        self.store.set_countdown(None);

        Ok(PendingDispatch { ticket, request })
    }

    pub fn complete_dispatch(
        &mut self,
        ticket: DispatchTicket,
        result: Result<Response, DispatchError>,
    ) -> Completion {
        let Some(in_flight) = self.in_flight.filter(|in_flight| in_flight.ticket == ticket) else {
            tracing::debug!(?ticket, "discarding result of superseded dispatch");
            return Completion::Stale;
        };
        self.in_flight = None;

        match result {
            Ok(response) => match self.timer.start(in_flight.delay_seconds, response) {
                Some(response) => {
                    self.reveal(response);
                    Completion::Revealed
                }
                None => {
                    self.store.set_countdown(Some(in_flight.delay_seconds));
                    Completion::Counting(in_flight.delay_seconds)
                }
            },
            Err(err) => {
                self.timer.cancel();
                self.store.set_failure(&err);
                self.store.set_loading(false);
                self.store.set_countdown(None);
                Completion::Failed
            }
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        match self.timer.tick() {
            Tick::Idle => {}
            Tick::Counting(remaining) => self.store.set_countdown(Some(remaining)),
            Tick::Revealed(response) => self.reveal(response),
        }
    }

    /// Forget the dispatch in flight and any held result. Used when the
    /// builder goes away or switches to another request.
    pub fn cancel_pending(&mut self) {
        let had_timer = self.timer.cancel();
        let had_request = self.in_flight.take().is_some();
        if had_timer || had_request {
            tracing::debug!(had_timer, had_request, "pending dispatch cancelled");
        }
        self.store.set_loading(false);
        self.store.set_countdown(None);
    }

    /// Load a saved request into the builder, clearing the previous outcome.
    /// Returns `false` when no collection holds `id`.
    pub fn select_request(&mut self, id: &RequestId) -> bool {
        let Some(request) = self.store.find_request(id).cloned() else {
            return false;
        };

        self.cancel_pending();
        self.store.set_current_request(Some(request));
        self.store.set_response(None);
        self.store.set_error(None);
        true
    }

    /// Start over with an unsaved draft.
    pub fn new_draft(&mut self) {
        self.store.set_current_request(None);
    }

    /// Save the builder form: update the current request in place, or add a
    /// new one (to `collection_id` when given) that becomes current.
    pub fn save_draft(
        &mut self,
        draft: &RequestDraft,
        collection_id: Option<&CollectionId>,
    ) -> Result<SaveOutcome, ValidationError> {
        let request = draft.to_new_request()?;

        let outcome = match self.store.current_request().map(|current| current.id.clone()) {
            Some(id) => {
                self.store.update_request(&id, &request.into_patch());
                self.notify(Notification::success("Request updated successfully!"));
                SaveOutcome::Updated(id)
            }
            None => {
                let id = self.store.add_request(request, collection_id);
                self.notify(Notification::success("Request saved successfully!"));
                SaveOutcome::Created(id)
            }
        };
        tracing::info!(?outcome, "request saved");
        Ok(outcome)
    }

    pub fn create_collection(&mut self, name: &str) -> Result<CollectionId, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCollectionName);
        }
        Ok(self.store.add_collection(name))
    }

    pub fn delete_request(&mut self, id: &RequestId) {
        if let Some(request) = self.store.delete_request(id) {
            self.notify(Notification::error(format!(
                "Request \"{}\" deleted successfully",
                request.name
            )));
        }
    }

    pub fn notify(&mut self, notification: Notification) -> NotificationId {
        self.store.set_notification(Some(notification));
        self.store.notification_id()
    }

    /// Clear the notification `id`, unless a newer one replaced it.
    pub fn expire_notification(&mut self, id: NotificationId) {
        if self.store.notification_id() == id && self.store.notification().is_some() {
            self.store.set_notification(None);
        }
    }

    fn reveal(&mut self, response: Response) {
        self.store.set_response(Some(response));
        self.store.set_loading(false);
        self.store.set_countdown(None);
    }
}
