//! Modal bridge: single-slot synchronous cross-thread request/response
//!
//! The native worker occasionally needs a blocking UI operation (a modal
//! dialog) whose result comes back from the host UI thread. The bridge
//! stores one request, fires the presentation off to the UI side, and
//! parks the calling thread on a condition variable until the completion
//! handler posts exactly one response.
//!
//! No timeout is enforced: a dialog that is never dismissed blocks the
//! worker thread forever. Callers own that risk; a timeout here would
//! turn an undismissed dialog into a phantom response.

use std::sync::{Arc, Condvar, Mutex};

use log::debug;

/// A single button offered by a modal dialog.
#[derive(Debug, Clone)]
pub struct ModalButton {
    /// Identifier reported back in the response when this button ends the dialog
    pub id: i32,
    pub label: String,
    /// Activated by the return/enter key on the host
    pub accepts_return: bool,
    /// Activated by the escape/back key on the host
    pub accepts_escape: bool,
}

impl ModalButton {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            accepts_return: false,
            accepts_escape: false,
        }
    }
}

/// Prompt data for a blocking modal dialog.
#[derive(Debug, Clone)]
pub struct ModalRequest {
    pub title: String,
    pub message: String,
    pub buttons: Vec<ModalButton>,
}

/// Result of a modal dialog: the selected button id, or none if the
/// dialog ended without a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalResponse {
    pub selected: Option<i32>,
}

impl ModalResponse {
    pub fn button(id: i32) -> Self {
        Self { selected: Some(id) }
    }

    pub fn dismissed() -> Self {
        Self { selected: None }
    }
}

/// Host-side dialog presentation seam.
///
/// `present` is invoked from the worker thread and must schedule the
/// actual dialog on the host UI thread, fire-and-forget. Whichever path
/// ends the dialog calls [`ModalCompletion::post`] exactly once.
pub trait DialogPresenter: Send + Sync {
    fn present(&self, request: ModalRequest, completion: ModalCompletion);
}

enum Slot {
    Idle,
    Pending,
    Done(ModalResponse),
}

/// Single-slot synchronous request/response channel.
///
/// Exactly one `show_blocking` call may be in flight per bridge instance;
/// a second concurrent call is a programming error and panics.
pub struct ModalBridge {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl ModalBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Slot::Idle),
            ready: Condvar::new(),
        })
    }

    /// Present a dialog via `presenter` and block until its completion
    /// handler posts a response.
    ///
    /// Callable from the worker thread. Blocks with no timeout; the only
    /// way to unblock is a completion posted by the UI side.
    ///
    /// # Panics
    /// Panics if another `show_blocking` call is already in flight on
    /// this bridge.
    pub fn show_blocking(
        self: &Arc<Self>,
        request: ModalRequest,
        presenter: &dyn DialogPresenter,
    ) -> ModalResponse {
        {
            let mut slot = self.slot.lock().unwrap();
            match *slot {
                Slot::Idle => *slot = Slot::Pending,
                _ => panic!("ModalBridge::show_blocking called while a request is in flight"),
            }
        }

        debug!("[ModalBridge] presenting dialog: {}", request.title);
        presenter.present(
            request,
            ModalCompletion {
                bridge: Arc::clone(self),
            },
        );

        let mut slot = self.slot.lock().unwrap();
        loop {
            match std::mem::replace(&mut *slot, Slot::Idle) {
                Slot::Done(response) => {
                    debug!("[ModalBridge] unblocked with selection {:?}", response.selected);
                    return response;
                }
                other => {
                    *slot = other;
                    slot = self.ready.wait(slot).unwrap();
                }
            }
        }
    }
}

/// One-shot completion handle passed to the UI side.
///
/// Consumed by `post`; dropping it without posting leaves the worker
/// blocked, mirroring an undismissed dialog.
pub struct ModalCompletion {
    bridge: Arc<ModalBridge>,
}

impl ModalCompletion {
    /// Store the response and wake the blocked worker thread.
    pub fn post(self, response: ModalResponse) {
        let mut slot = self.bridge.slot.lock().unwrap();
        *slot = Slot::Done(response);
        self.bridge.ready.notify_one();
    }
}
