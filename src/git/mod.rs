use crate::api::ResponseBody;
use crate::models::StatusResponse;

pub(crate) const DEFAULT_BRANCH: &str = "main";
pub(crate) const UNKNOWN_BRANCH: &str = "unknown";

/// How often the status bar re-reads `/api/status`.
pub(crate) const STATUS_POLL_MS: u64 = 30_000;
pub(crate) const FETCH_INTERVAL_MS: i64 = 5 * 60 * 1000;
pub(crate) const MAX_FETCH_RETRIES: u32 = 3;

/// Snapshot of the wiki repository's relation to its remote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RemoteStatus {
    pub has_remote: bool,
    pub branch_name: String,
    pub ahead_count: u32,
    pub behind_count: u32,
    pub modified_count: u32,
    pub untracked_count: u32,
    pub last_fetched_at: Option<i64>,
}

impl RemoteStatus {
    /// Shown when the status could not be read at all.
    pub fn unknown() -> Self {
        Self {
            has_remote: false,
            branch_name: UNKNOWN_BRANCH.to_string(),
            ahead_count: 0,
            behind_count: 0,
            modified_count: 0,
            untracked_count: 0,
            last_fetched_at: None,
        }
    }

    pub fn from_response(res: StatusResponse) -> Self {
        Self {
            has_remote: true,
            branch_name: res
                .branch
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            ahead_count: res.ahead,
            behind_count: res.behind,
            modified_count: res.modified,
            untracked_count: res.untracked,
            last_fetched_at: None,
        }
    }

    /// A plain-text or malformed body degrades to [`RemoteStatus::unknown`].
    pub fn from_body(body: ResponseBody) -> Self {
        match body {
            ResponseBody::Json(v) => serde_json::from_value::<StatusResponse>(v)
                .map(Self::from_response)
                .unwrap_or_else(|_| Self::unknown()),
            ResponseBody::Text(_) => Self::unknown(),
        }
    }

    pub fn local_changes(&self) -> u32 {
        self.modified_count + self.untracked_count
    }

    pub fn can_pull(&self) -> bool {
        self.behind_count > 0
    }

    pub fn can_push(&self) -> bool {
        self.ahead_count > 0
    }

    pub fn local_changes_label(&self) -> Option<String> {
        match self.local_changes() {
            0 => None,
            1 => Some("1 local change".to_string()),
            n => Some(format!("{n} local changes")),
        }
    }
}

fn commits(n: u32) -> String {
    if n == 1 {
        "1 commit".to_string()
    } else {
        format!("{n} commits")
    }
}

pub(crate) fn pull_label(behind: u32) -> String {
    if behind == 0 {
        "No changes to pull".to_string()
    } else {
        format!("Pull {} (rebase)", commits(behind))
    }
}

pub(crate) fn push_label(ahead: u32) -> String {
    if ahead == 0 {
        "No changes to push".to_string()
    } else {
        format!("Push {}", commits(ahead))
    }
}

pub(crate) fn last_fetched_label(last_fetched_ms: Option<i64>, now_ms: i64) -> String {
    let Some(last) = last_fetched_ms else {
        return "Not fetched yet".to_string();
    };
    let secs = (now_ms - last).max(0) / 1000;
    let ago = match secs {
        0..=59 => "less than a minute".to_string(),
        60..=119 => "1 minute".to_string(),
        120..=3599 => format!("{} minutes", secs / 60),
        3600..=7199 => "about 1 hour".to_string(),
        _ => format!("about {} hours", secs / 3600),
    };
    format!("Last fetched {ago} ago")
}

/// Auto-fetch bookkeeping for the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GitTracker {
    pub last_fetch_ms: i64,
    pub fetch_interval_ms: i64,
    pub error_count: u32,
    pub max_retries: u32,
}

impl Default for GitTracker {
    fn default() -> Self {
        Self {
            last_fetch_ms: 0,
            fetch_interval_ms: FETCH_INTERVAL_MS,
            error_count: 0,
            max_retries: MAX_FETCH_RETRIES,
        }
    }
}

impl GitTracker {
    pub fn record_fetch(&mut self, now_ms: i64) {
        self.last_fetch_ms = now_ms;
    }

    pub fn record_success(&mut self) {
        self.error_count = 0;
    }

    pub fn record_failure(&mut self) {
        self.error_count = self.error_count.saturating_add(1);
    }

    /// Auto-fetch pauses after `max_retries` consecutive failures until some
    /// remote call succeeds again.
    pub fn should_fetch(&self, now_ms: i64) -> bool {
        if self.error_count >= self.max_retries {
            return false;
        }
        now_ms - self.last_fetch_ms > self.fetch_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_json_body() {
        let body = ResponseBody::Json(serde_json::json!({
            "branch": "dev",
            "ahead": 2,
            "behind": 0,
            "modified": 1,
            "untracked": 3
        }));
        let st = RemoteStatus::from_body(body);

        assert!(st.has_remote);
        assert_eq!(st.branch_name, "dev");
        assert!(st.can_push());
        assert!(!st.can_pull());
        assert_eq!(st.local_changes_label().as_deref(), Some("4 local changes"));
    }

    #[test]
    fn test_status_defaults_missing_fields() {
        let st = RemoteStatus::from_body(ResponseBody::Json(serde_json::json!({})));
        assert_eq!(st.branch_name, DEFAULT_BRANCH);
        assert_eq!(st.local_changes(), 0);
        assert_eq!(st.local_changes_label(), None);
    }

    #[test]
    fn test_text_body_is_unknown_sentinel() {
        let st = RemoteStatus::from_body(ResponseBody::Text("fatal: not a repo".into()));
        assert_eq!(st, RemoteStatus::unknown());
        assert!(!st.has_remote);
        assert_eq!(st.branch_name, "unknown");
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(pull_label(0), "No changes to pull");
        assert_eq!(pull_label(1), "Pull 1 commit (rebase)");
        assert_eq!(push_label(3), "Push 3 commits");
        assert_eq!(push_label(0), "No changes to push");
    }

    #[test]
    fn test_last_fetched_label() {
        assert_eq!(last_fetched_label(None, 0), "Not fetched yet");
        assert_eq!(
            last_fetched_label(Some(0), 30_000),
            "Last fetched less than a minute ago"
        );
        assert_eq!(
            last_fetched_label(Some(0), 5 * 60_000),
            "Last fetched 5 minutes ago"
        );
        assert_eq!(
            last_fetched_label(Some(0), 3 * 3_600_000),
            "Last fetched about 3 hours ago"
        );
    }

    #[test]
    fn test_tracker_fetch_schedule() {
        let mut t = GitTracker::default();
        assert!(t.should_fetch(FETCH_INTERVAL_MS + 1));

        t.record_fetch(1_000);
        assert!(!t.should_fetch(1_000 + FETCH_INTERVAL_MS));
        assert!(t.should_fetch(1_001 + FETCH_INTERVAL_MS));
    }

    #[test]
    fn test_tracker_gives_up_after_max_retries() {
        let mut t = GitTracker::default();
        for _ in 0..MAX_FETCH_RETRIES {
            t.record_failure();
        }
        assert!(!t.should_fetch(i64::MAX));

        t.record_success();
        assert_eq!(t.error_count, 0);
        assert!(t.should_fetch(i64::MAX));
    }
}
