use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Spinner, Tooltip};
use crate::git::{
    last_fetched_label, pull_label, push_label, GitTracker, RemoteStatus, STATUS_POLL_MS,
};
use crate::state::AppContext;
use crate::util::now_ms;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_interval_with_handle;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
enum GitOp {
    Fetch,
    Pull,
    Push,
    Commit,
}

const STATUS_READ_FAILED: &str = "Failed to fetch Git status";

impl GitOp {
    fn failure(self, message: &str) -> String {
        format!("{self} failed: {message}")
    }

    /// Fetch and pull both bring the remote refs up to date.
    fn record(self, tracker: &mut GitTracker, ok: bool, now_ms: i64) {
        match (self, ok) {
            (GitOp::Commit, _) => {}
            (GitOp::Fetch | GitOp::Pull, true) => {
                tracker.record_fetch(now_ms);
                tracker.record_success();
            }
            (GitOp::Push, true) => tracker.record_success(),
            (_, false) => tracker.record_failure(),
        }
    }
}

/// A good status read clears its own failure but not an operation's.
fn after_status_read(error: Option<String>) -> Option<String> {
    error.filter(|e| e != STATUS_READ_FAILED)
}

/// Branch, ahead/behind counts and remote operations, pinned to the bottom
/// of the layout.
#[component]
pub fn GitStatusBar() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let status: RwSignal<Option<RemoteStatus>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let running: RwSignal<Option<GitOp>> = RwSignal::new(None);
    let last_fetched: RwSignal<Option<i64>> = RwSignal::new(None);
    let commit_message: RwSignal<String> = RwSignal::new(String::new());
    let tracker = StoredValue::new(GitTracker::default());

    // Re-read counts; `fetch_if_due` lets the poll trigger a silent fetch.
    let load_status = move |fetch_if_due: bool| {
        let api_client = app.api_client.get_untracked();
        spawn_local(async move {
            match api_client.status().await {
                Ok(mut st) => {
                    st.last_fetched_at = last_fetched.get_untracked();
                    status.try_set(Some(st));
                    tracker.try_update_value(|t| t.record_success());
                    error.try_update(|e| *e = after_status_read(e.take()));
                }
                Err(e) => {
                    warn!("git status: {e}");
                    status.try_set(Some(RemoteStatus::unknown()));
                    tracker.try_update_value(|t| t.record_failure());
                    error.try_set(Some(STATUS_READ_FAILED.to_string()));
                    return;
                }
            }

            let due = tracker
                .try_with_value(|t| t.should_fetch(now_ms()))
                .unwrap_or(false);
            if !fetch_if_due || !due || running.get_untracked().is_some() {
                return;
            }

            running.try_set(Some(GitOp::Fetch));
            let outcome = api_client.fetch().await;
            running.try_set(None);
            let now = now_ms();
            tracker.try_update_value(|t| GitOp::Fetch.record(t, outcome.is_ok(), now));
            match outcome {
                Ok(_) => {
                    last_fetched.try_set(Some(now));
                    if let Ok(mut st) = api_client.status().await {
                        st.last_fetched_at = Some(now);
                        status.try_set(Some(st));
                    }
                }
                Err(e) => {
                    // Silent: only the console hears about background fetches.
                    warn!("background fetch: {e}");
                }
            }
        });
    };

    let run_op = move |op: GitOp| {
        if running.get_untracked().is_some() {
            return;
        }
        let api_client = app.api_client.get_untracked();
        let message = commit_message.get_untracked();
        if op == GitOp::Commit && message.trim().is_empty() {
            return;
        }

        running.set(Some(op));
        error.set(None);

        spawn_local(async move {
            let outcome = match op {
                GitOp::Fetch => api_client.fetch().await,
                GitOp::Pull => api_client.pull().await,
                GitOp::Push => api_client.push().await,
                GitOp::Commit => api_client.commit(message.trim()).await,
            };
            running.try_set(None);
            let now = now_ms();
            tracker.try_update_value(|t| op.record(t, outcome.is_ok(), now));

            match outcome {
                Ok(_) => {
                    match op {
                        GitOp::Fetch => {
                            last_fetched.try_set(Some(now));
                        }
                        GitOp::Pull => {
                            last_fetched.try_set(Some(now));
                            app.refresh_tree();
                        }
                        GitOp::Commit => {
                            commit_message.try_set(String::new());
                        }
                        GitOp::Push => {}
                    }
                    load_status(false);
                }
                Err(e) => {
                    warn!("git {op}: {e}");
                    error.try_set(Some(op.failure(&e.to_string())));
                }
            }
        });
    };

    load_status(true);

    match set_interval_with_handle(
        move || load_status(true),
        Duration::from_millis(STATUS_POLL_MS),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => warn!("git status polling disabled: {e:?}"),
    }

    let ahead = move || status.with(|s| s.as_ref().map(|s| s.ahead_count).unwrap_or(0));
    let behind = move || status.with(|s| s.as_ref().map(|s| s.behind_count).unwrap_or(0));
    let has_local_changes =
        move || status.with(|s| s.as_ref().is_some_and(|s| s.local_changes() > 0));
    let busy = move || running.get().is_some();

    view! {
        <footer class="flex h-9 shrink-0 items-center gap-3 border-t border-border bg-background px-3 text-xs">
            {move || match status.get() {
                None => view! {
                    <span class="inline-flex items-center gap-2 text-muted-foreground">
                        <Spinner class="size-3" />
                        "Loading..."
                    </span>
                }
                .into_any(),
                Some(st) if !st.has_remote => view! {
                    <span class="text-muted-foreground">"Git status unavailable"</span>
                }
                .into_any(),
                Some(st) => view! {
                    <span class="font-medium">{st.branch_name.clone()}</span>
                    {st.local_changes_label().map(|label| view! {
                        <span class="text-amber-600">{label}</span>
                    })}
                }
                .into_any(),
            }}

            <div class="ml-auto flex items-center gap-1">
                <Show when=has_local_changes fallback=|| ().into_view()>
                    <Input
                        bind_value=commit_message
                        placeholder="Commit message"
                        disabled=Signal::derive(busy)
                        on_enter=Callback::new(move |_: ()| run_op(GitOp::Commit))
                        class="h-6 w-48 text-xs"
                    />
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Xs
                        attr:disabled=move || busy() || commit_message.with(|m| m.trim().is_empty())
                        on:click=move |_| run_op(GitOp::Commit)
                    >
                        "Commit"
                    </Button>
                </Show>

                <Tooltip text=Signal::derive(move || last_fetched_label(last_fetched.get(), now_ms()))>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Xs
                        attr:disabled=busy
                        on:click=move |_| run_op(GitOp::Fetch)
                    >
                        <Show when=move || running.get() == Some(GitOp::Fetch) fallback=|| ().into_view()>
                            <Spinner class="size-3" />
                        </Show>
                        "Fetch"
                    </Button>
                </Tooltip>

                <Tooltip text=Signal::derive(move || pull_label(behind()))>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Xs
                        attr:disabled=move || busy() || !status.with(|s| s.as_ref().is_some_and(|s| s.can_pull()))
                        on:click=move |_| run_op(GitOp::Pull)
                    >
                        <Show when=move || running.get() == Some(GitOp::Pull) fallback=|| ().into_view()>
                            <Spinner class="size-3" />
                        </Show>
                        {move || format!("Pull {}", behind())}
                    </Button>
                </Tooltip>

                <Tooltip text=Signal::derive(move || push_label(ahead()))>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Xs
                        attr:disabled=move || busy() || !status.with(|s| s.as_ref().is_some_and(|s| s.can_push()))
                        on:click=move |_| run_op(GitOp::Push)
                    >
                        <Show when=move || running.get() == Some(GitOp::Push) fallback=|| ().into_view()>
                            <Spinner class="size-3" />
                        </Show>
                        {move || format!("Push {}", ahead())}
                    </Button>
                </Tooltip>
            </div>

            {move || error.get().map(|e| view! {
                <span class="max-w-xs truncate text-destructive" title=e.clone()>{e.clone()}</span>
            })}
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_name_the_operation() {
        assert_eq!(GitOp::Pull.failure("conflict"), "Pull failed: conflict");
        assert_eq!(GitOp::Push.failure("rejected"), "Push failed: rejected");
        assert_eq!(GitOp::Fetch.failure("offline"), "Fetch failed: offline");
    }

    #[test]
    fn test_good_status_read_clears_only_its_own_error() {
        assert_eq!(after_status_read(Some(STATUS_READ_FAILED.to_string())), None);
        assert_eq!(
            after_status_read(Some("Pull failed: conflict".to_string())).as_deref(),
            Some("Pull failed: conflict")
        );
        assert_eq!(after_status_read(None), None);
    }

    #[test]
    fn test_pull_counts_as_a_fetch() {
        let mut t = GitTracker::default();
        t.record_failure();
        GitOp::Pull.record(&mut t, true, 42_000);
        assert_eq!(t.last_fetch_ms, 42_000);
        assert_eq!(t.error_count, 0);
        assert!(!t.should_fetch(42_000 + 1_000));
    }

    #[test]
    fn test_failed_operations_pause_auto_fetch() {
        let mut t = GitTracker::default();
        GitOp::Push.record(&mut t, false, 0);
        GitOp::Pull.record(&mut t, false, 0);
        GitOp::Fetch.record(&mut t, false, 0);
        assert!(!t.should_fetch(i64::MAX / 2));

        // Commit is local and leaves the counters alone.
        GitOp::Commit.record(&mut t, true, 10);
        assert_eq!(t.error_count, 3);

        GitOp::Push.record(&mut t, true, 10);
        assert_eq!(t.error_count, 0);
        assert_eq!(t.last_fetch_ms, 0);
    }
}
