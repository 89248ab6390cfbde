//! List screen controller: fetch-all, in-memory filtering, and the
//! delete-confirmation flow.
//!
//! The collection is always re-fetched from the server after a successful
//! mutation; rows are never spliced locally.

use std::sync::Arc;

use tracing::error;

use crate::api::VetApi;
use crate::controllers::{Entity, capitalize, delete_failure_message, load_failure_message};
use crate::notify::Notice;

/// Controller behind one entity's list screen.
pub struct ListController<E: Entity> {
    api: Arc<dyn VetApi>,
    rows: Vec<E>,
    loading: bool,
    search: String,
    pending_delete: Option<E>,
    notices: Vec<Notice>,
}

impl<E: Entity> ListController<E> {
    pub fn new(api: Arc<dyn VetApi>) -> Self {
        ListController {
            api,
            rows: Vec::new(),
            loading: false,
            search: String::new(),
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    /// Fetch the full collection. On failure the previous rows are kept
    /// and an error notice is queued.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match E::fetch_all(self.api.as_ref()).await {
            Ok(rows) => self.rows = rows,
            Err(e) => {
                error!("loading {} failed: {e}", E::PLURAL);
                self.notices
                    .push(Notice::error(load_failure_message(&e, E::PLURAL)));
            }
        }
        self.loading = false;
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the search term; [`ListController::visible`] recomputes the
    /// filter against the rows already in memory.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Rows matching the current search term, case-insensitively, against
    /// the entity's searchable fields.
    pub fn visible(&self) -> Vec<&E> {
        if self.search.is_empty() {
            return self.rows.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.rows.iter().filter(|row| row.matches(&needle)).collect()
    }

    /// Stage a row for deletion; nothing is issued until confirmed.
    pub fn request_delete(&mut self, row: E) {
        self.pending_delete = Some(row);
    }

    /// The record named in the confirmation dialog, if one is staged.
    pub fn pending_delete(&self) -> Option<&E> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the confirmed delete.
    ///
    /// On success the collection is re-fetched from the server and a
    /// success notice is queued; on failure the rows are left untouched.
    /// Returns whether the delete succeeded.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(target) = self.pending_delete.take() else {
            return false;
        };

        match E::delete(self.api.as_ref(), target.id()).await {
            Ok(()) => {
                self.notices.push(Notice::success(format!(
                    "{} deleted successfully",
                    capitalize(E::SINGULAR)
                )));
                self.refresh().await;
                true
            }
            Err(e) => {
                error!("deleting {} {} failed: {e}", E::SINGULAR, target.id());
                self.notices
                    .push(Notice::error(delete_failure_message(&e, E::SINGULAR)));
                false
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
