//! Scripted in-memory platform for unit tests

use crate::api::{CommentApi, EditOutcome, Page};
use crate::error::{Result, ScrubError};
use crate::types::Fullname;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// A call observed by [`ScriptedApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Fetch(Option<String>),
    Edit { fullname: String, text: String },
    Delete(String),
}

/// Replays scripted pages and records every call
#[derive(Default)]
pub(crate) struct ScriptedApi {
    pages: Mutex<VecDeque<Result<Page>>>,
    rejected_edits: HashSet<String>,
    failing_edits: HashSet<String>,
    failing_deletes: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(self, page: Page) -> Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    pub(crate) fn failing_page(self, err: ScrubError) -> Self {
        self.pages.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn reject_edit(mut self, fullname: &str) -> Self {
        self.rejected_edits.insert(fullname.to_string());
        self
    }

    pub(crate) fn fail_edit(mut self, fullname: &str) -> Self {
        self.failing_edits.insert(fullname.to_string());
        self
    }

    pub(crate) fn fail_delete(mut self, fullname: &str) -> Self {
        self.failing_deletes.insert(fullname.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Fetch(_)))
            .count()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Fetch(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn transport(endpoint: &str) -> ScrubError {
    ScrubError::Http {
        endpoint: endpoint.to_string(),
        message: "connection reset".to_string(),
    }
}

#[async_trait]
impl CommentApi for ScriptedApi {
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page> {
        self.record(Call::Fetch(after.map(str::to_string)));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::default()))
    }

    async fn edit(&self, fullname: &Fullname, text: &str) -> Result<EditOutcome> {
        self.record(Call::Edit {
            fullname: fullname.to_string(),
            text: text.to_string(),
        });
        if self.failing_edits.contains(fullname.as_str()) {
            return Err(transport("edit"));
        }
        if self.rejected_edits.contains(fullname.as_str()) {
            return Ok(EditOutcome::Rejected("{\"json\":{\"errors\":[]}}".to_string()));
        }
        Ok(EditOutcome::Edited)
    }

    async fn delete(&self, fullname: &Fullname) -> Result<()> {
        self.record(Call::Delete(fullname.to_string()));
        if self.failing_deletes.contains(fullname.as_str()) {
            return Err(transport("delete"));
        }
        Ok(())
    }
}
