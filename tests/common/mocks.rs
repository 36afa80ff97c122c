//! Mock implementations of the trait seams
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use branch_gate::error::{Error, Result};
use branch_gate::platform::HostService;
use branch_gate::strategy::{MergeStrategy, StrategyError};
use branch_gate::types::{ChangeRequest, PullRequestSnapshot, ReportableStatus};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted behavior for `MockMergeStrategy::check`.
#[derive(Debug, Clone)]
enum ScriptedCheck {
    /// Every branch merges cleanly
    Clean,
    /// These branches conflict
    Conflicts(Vec<String>),
    /// The check fails without a failed-branch list
    Fail(String),
}

/// Scripted merge strategy with call tracking and error injection.
pub struct MockMergeStrategy {
    check_script: ScriptedCheck,
    prepare_failure: Option<String>,
    prepare_calls: Mutex<Vec<u64>>,
    check_calls: Mutex<Vec<u64>>,
}

impl MockMergeStrategy {
    /// Strategy whose check reports every branch clean.
    pub fn clean() -> Self {
        Self::with_script(ScriptedCheck::Clean)
    }

    /// Strategy whose check reports conflicts on the given branches.
    pub fn conflicting(branches: &[&str]) -> Self {
        Self::with_script(ScriptedCheck::Conflicts(
            branches.iter().map(ToString::to_string).collect(),
        ))
    }

    /// Strategy whose check raises a branch-unspecific failure.
    pub fn failing(message: &str) -> Self {
        Self::with_script(ScriptedCheck::Fail(message.to_string()))
    }

    /// Strategy whose prepare raises a staging failure.
    pub fn failing_prepare(message: &str) -> Self {
        let mut mock = Self::with_script(ScriptedCheck::Clean);
        mock.prepare_failure = Some(message.to_string());
        mock
    }

    fn with_script(script: ScriptedCheck) -> Self {
        Self {
            check_script: script,
            prepare_failure: None,
            prepare_calls: Mutex::new(Vec::new()),
            check_calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `prepare` was invoked.
    pub fn prepare_count(&self) -> usize {
        self.prepare_calls.lock().unwrap().len()
    }

    /// Number of times `check` was invoked.
    pub fn check_count(&self) -> usize {
        self.check_calls.lock().unwrap().len()
    }

    /// Assert the strategy was never consulted at all.
    pub fn assert_not_consulted(&self) {
        assert_eq!(
            self.prepare_count(),
            0,
            "expected prepare never to be called"
        );
        assert_eq!(self.check_count(), 0, "expected check never to be called");
    }
}

#[async_trait]
impl MergeStrategy for MockMergeStrategy {
    async fn prepare(&self, request: &ChangeRequest) -> std::result::Result<(), StrategyError> {
        self.prepare_calls.lock().unwrap().push(request.number);

        if let Some(msg) = &self.prepare_failure {
            return Err(StrategyError::Staging(msg.clone()));
        }
        Ok(())
    }

    async fn check(&self, request: &ChangeRequest) -> std::result::Result<(), StrategyError> {
        self.check_calls.lock().unwrap().push(request.number);

        match &self.check_script {
            ScriptedCheck::Clean => Ok(()),
            ScriptedCheck::Conflicts(branches) => Err(StrategyError::Conflicts {
                failed_branches: branches.clone(),
            }),
            ScriptedCheck::Fail(msg) => Err(StrategyError::Git(msg.clone())),
        }
    }
}

/// Mock host with scripted snapshots, publish recording, and error
/// injection.
pub struct MockHostService {
    snapshots: Mutex<HashMap<u64, PullRequestSnapshot>>,
    published: Mutex<Vec<(String, ReportableStatus)>>,
    fetch_calls: Mutex<Vec<u64>>,
    error_on_fetch: Mutex<Option<String>>,
    error_on_publish: Mutex<Option<String>>,
}

impl MockHostService {
    /// Empty mock; configure responses with the `set_*` methods.
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(HashMap::new()),
            published: Mutex::new(Vec::new()),
            fetch_calls: Mutex::new(Vec::new()),
            error_on_fetch: Mutex::new(None),
            error_on_publish: Mutex::new(None),
        }
    }

    /// Set the snapshot returned for a PR number.
    pub fn set_snapshot(&self, snapshot: PullRequestSnapshot) {
        self.snapshots
            .lock()
            .unwrap()
            .insert(snapshot.number, snapshot);
    }

    /// Make `fetch_pull_request` return an error.
    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `publish_status` return an error.
    pub fn fail_publish(&self, msg: &str) {
        *self.error_on_publish.lock().unwrap() = Some(msg.to_string());
    }

    /// Everything published so far, in order.
    pub fn published(&self) -> Vec<(String, ReportableStatus)> {
        self.published.lock().unwrap().clone()
    }

    /// PR numbers `fetch_pull_request` was called with.
    pub fn fetch_calls(&self) -> Vec<u64> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Assert exactly one status was published, against the given sha.
    pub fn assert_published_once(&self, head_sha: &str) -> ReportableStatus {
        let published = self.published();
        assert_eq!(
            published.len(),
            1,
            "expected exactly one published status, got: {published:?}"
        );
        assert_eq!(published[0].0, head_sha, "status published against wrong sha");
        published[0].1.clone()
    }
}

impl Default for MockHostService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostService for MockHostService {
    async fn fetch_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        self.fetch_calls.lock().unwrap().push(number);

        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let snapshots = self.snapshots.lock().unwrap();
        snapshots
            .get(&number)
            .cloned()
            .ok_or(Error::PullRequestNotFound(number))
    }

    async fn publish_status(&self, head_sha: &str, status: &ReportableStatus) -> Result<()> {
        if let Some(msg) = self.error_on_publish.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.published
            .lock()
            .unwrap()
            .push((head_sha.to_string(), status.clone()));
        Ok(())
    }
}
