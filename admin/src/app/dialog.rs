//! # Dialog Results
//!
//! A create/edit/delete dialog reports exactly one [`DialogResult`] to the
//! page that opened it. The result travels over a `oneshot` channel, so it
//! is consumed once; a dialog dropped without completing reads as
//! [`DialogResult::Dismissed`].

use std::future::Future;

use tokio::sync::oneshot;

use crate::core::error::Result;

/// Outcome of one dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult<T> {
    /// Entity created or updated.
    Saved(T),
    /// Delete call answered; `response` is the backend's `data` flag.
    Deleted { response: bool, id: String },
    /// A flow step failed; nothing further was sent.
    Failed(String),
    /// Closed without submitting.
    Dismissed,
}

impl<T> DialogResult<T> {
    /// Whether the page has nothing to do.
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            DialogResult::Failed(_) | DialogResult::Dismissed | DialogResult::Deleted { response: false, .. }
        )
    }

    pub fn saved(&self) -> Option<&T> {
        match self {
            DialogResult::Saved(item) => Some(item),
            _ => None,
        }
    }
}

/// Dialog side of the channel.
#[derive(Debug)]
pub struct Dialog<T> {
    sender: oneshot::Sender<DialogResult<T>>,
}

/// Page side of the channel.
#[derive(Debug)]
pub struct DialogHandle<T> {
    receiver: oneshot::Receiver<DialogResult<T>>,
}

/// Open a dialog and get both ends.
pub fn open_dialog<T>() -> (Dialog<T>, DialogHandle<T>) {
    let (sender, receiver) = oneshot::channel();
    (Dialog { sender }, DialogHandle { receiver })
}

impl<T> Dialog<T> {
    /// Run the dialog's flow and report its outcome.
    pub async fn complete<F>(self, flow: F) -> DialogResult<()>
    where
        F: Future<Output = Result<T>>,
    {
        let result = match flow.await {
            Ok(item) => DialogResult::Saved(item),
            Err(err) => {
                tracing::warn!(error = %err, "Dialog flow failed");
                DialogResult::Failed(err.to_string())
            }
        };
        self.send(result)
    }

    /// Close without submitting.
    pub fn dismiss(self) {
        let _ = self.send(DialogResult::Dismissed);
    }

    fn send(self, result: DialogResult<T>) -> DialogResult<()> {
        let summary = match &result {
            DialogResult::Saved(_) => DialogResult::Saved(()),
            DialogResult::Deleted { response, id } => DialogResult::Deleted {
                response: *response,
                id: id.clone(),
            },
            DialogResult::Failed(message) => DialogResult::Failed(message.clone()),
            DialogResult::Dismissed => DialogResult::Dismissed,
        };
        if self.sender.send(result).is_err() {
            tracing::debug!("Dialog result dropped, page no longer listening");
        }
        summary
    }
}

impl<T> Dialog<T> {
    /// Run a delete flow; the result carries the deleted id.
    pub async fn complete_delete<F>(self, id: impl Into<String>, flow: F) -> DialogResult<()>
    where
        F: Future<Output = Result<DialogResult<T>>>,
    {
        let id = id.into();
        let result = match flow.await {
            Ok(DialogResult::Deleted { response, .. }) => DialogResult::Deleted { response, id },
            Ok(other) => other,
            Err(err) => {
                tracing::warn!(error = %err, id = %id, "Delete flow failed");
                DialogResult::Failed(err.to_string())
            }
        };
        self.send(result)
    }
}

impl<T> DialogHandle<T> {
    /// Wait for the dialog to close.
    pub async fn closed(self) -> DialogResult<T> {
        self.receiver.await.unwrap_or(DialogResult::Dismissed)
    }
}
