//! In-memory connection source for executor tests

use super::{ConnectionHandle, ConnectionSource, QueryOutput, Row};
use crate::errors::DbFailure;
use crate::query_builder::Statement;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub enum Reply {
    Rows(Vec<Row>),
    Affected(u64),
    Fail(DbFailure),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub acquired: usize,
    pub released: usize,
    pub forced: usize,
    pub discarded: usize,
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    statements: Vec<Statement>,
    counts: Counts,
    fail_acquire: bool,
    fail_when: Option<(String, DbFailure)>,
    stall_when: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockSource {
    state: Arc<Mutex<State>>,
    force_release: bool,
}

pub struct MockHandle {
    state: Arc<Mutex<State>>,
}

pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("row fixture must be an object, got {other}"),
    }
}

pub fn unique_violation() -> DbFailure {
    DbFailure::new(
        Some(crate::outcome::UNIQUE_VIOLATION.to_string()),
        "Key (m_name)=(alice) already exists.",
    )
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force_release(mut self, force_release: bool) -> Self {
        self.force_release = force_release;
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.state().replies.push_back(Reply::Rows(rows));
    }

    pub fn push_affected(&self, n: u64) {
        self.state().replies.push_back(Reply::Affected(n));
    }

    pub fn push_failure(&self, failure: DbFailure) {
        self.state().replies.push_back(Reply::Fail(failure));
    }

    pub fn fail_acquire(&self) {
        self.state().fail_acquire = true;
    }

    /// Fail every statement whose text starts with `prefix`
    pub fn fail_when(&self, prefix: &str, failure: DbFailure) {
        self.state().fail_when = Some((prefix.to_string(), failure));
    }

    /// Never complete statements whose text starts with `prefix`
    pub fn stall_when(&self, prefix: &str) {
        self.state().stall_when = Some(prefix.to_string());
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.state().statements.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.statements().into_iter().map(|s| s.text).collect()
    }

    pub fn counts(&self) -> Counts {
        self.state().counts
    }

    /// Every acquired handle went back to the source or was discarded
    pub fn balanced(&self) -> bool {
        let c = self.counts();
        c.acquired == c.released + c.discarded
    }
}

fn is_control(text: &str) -> bool {
    matches!(text, "BEGIN" | "COMMIT" | "ROLLBACK")
}

#[async_trait]
impl ConnectionHandle for MockHandle {
    async fn run(&mut self, statement: &Statement) -> Result<QueryOutput, DbFailure> {
        let stall = {
            let state = self.state.lock().unwrap();
            state
                .stall_when
                .as_deref()
                .is_some_and(|prefix| statement.text.starts_with(prefix))
        };
        if stall {
            std::future::pending::<()>().await;
        }

        let mut state = self.state.lock().unwrap();
        state.statements.push(statement.clone());

        if let Some((prefix, failure)) = &state.fail_when {
            if statement.text.starts_with(prefix.as_str()) {
                return Err(failure.clone());
            }
        }
        if is_control(&statement.text) {
            return Ok(QueryOutput::affected(0));
        }

        match state.replies.pop_front() {
            Some(Reply::Rows(rows)) => Ok(QueryOutput::from_rows(rows)),
            Some(Reply::Affected(n)) => Ok(QueryOutput::affected(n)),
            Some(Reply::Fail(failure)) => Err(failure),
            None if statement.returns_rows => Ok(QueryOutput::from_rows(Vec::new())),
            None => Ok(QueryOutput::affected(0)),
        }
    }

    fn discard(self) {
        self.state.lock().unwrap().counts.discarded += 1;
    }
}

#[async_trait]
impl ConnectionSource for MockSource {
    type Handle = MockHandle;

    async fn acquire(&self) -> Result<MockHandle, DbFailure> {
        let mut state = self.state();
        if state.fail_acquire {
            return Err(DbFailure::new(
                None,
                "pool timed out while waiting for an open connection",
            ));
        }
        state.counts.acquired += 1;
        Ok(MockHandle {
            state: Arc::clone(&self.state),
        })
    }

    async fn release(&self, _handle: MockHandle, force: bool) {
        let mut state = self.state();
        state.counts.released += 1;
        if force {
            state.counts.forced += 1;
        }
    }

    fn default_force_release(&self) -> bool {
        self.force_release
    }

    async fn shutdown(&self) {}
}
