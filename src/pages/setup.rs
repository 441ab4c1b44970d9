use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle, ErrorAlert, Input, Label, Spinner,
};
use crate::models::WikiConfig;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetupStep {
    SelectLocation,
    InitRepository,
}

impl SetupStep {
    fn title(self) -> &'static str {
        match self {
            SetupStep::SelectLocation => "Select Wiki Location",
            SetupStep::InitRepository => "Initialize Repository",
        }
    }

    fn number(self) -> u8 {
        match self {
            SetupStep::SelectLocation => 1,
            SetupStep::InitRepository => 2,
        }
    }
}

fn validate_wiki_path(path: &str) -> Result<String, String> {
    let path = path.trim();
    if path.is_empty() {
        return Err("Please enter a valid path".to_string());
    }
    Ok(path.to_string())
}

/// First-run wizard: store the wiki directory, then initialize its repository.
///
/// `on_complete` receives the saved configuration.
#[component]
pub fn SetupWizard(#[prop(into)] on_complete: Callback<WikiConfig>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let step: RwSignal<SetupStep> = RwSignal::new(SetupStep::SelectLocation);
    let wiki_path: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy: RwSignal<bool> = RwSignal::new(false);

    let on_next = move || {
        if busy.get_untracked() {
            return;
        }
        let path = match validate_wiki_path(&wiki_path.get_untracked()) {
            Ok(p) => p,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            let config = WikiConfig { wiki_path: path };
            match api_client.set_config(&config).await {
                Ok(_) => {
                    step.try_set(SetupStep::InitRepository);
                }
                Err(e) => {
                    let msg = e.to_string();
                    error.try_set(Some(if msg.is_empty() {
                        "Failed to set wiki path".to_string()
                    } else {
                        msg
                    }));
                }
            }
            busy.try_set(false);
        });
    };

    let on_finish = move || {
        if busy.get_untracked() {
            return;
        }
        let path = wiki_path.get_untracked().trim().to_string();
        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.init(&path).await {
                Ok(_) => on_complete.run(WikiConfig { wiki_path: path }),
                Err(e) => {
                    let msg = e.to_string();
                    error.try_set(Some(if msg.is_empty() {
                        "Failed to initialize repository".to_string()
                    } else {
                        msg
                    }));
                    busy.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="flex min-h-screen items-center justify-center bg-background px-4">
            <Card class="w-full max-w-lg">
                <CardHeader>
                    <CardTitle>"Welcome to Fishki Wiki"</CardTitle>
                    <CardDescription>
                        {move || {
                            let s = step.get();
                            format!("Step {} of 2: {}", s.number(), s.title())
                        }}
                    </CardDescription>
                </CardHeader>

                <CardContent class="space-y-3">
                    {move || match step.get() {
                        SetupStep::SelectLocation => view! {
                            <div class="space-y-1">
                                <Label class="text-xs" html_for="wiki-path">"Wiki Directory Path"</Label>
                                <Input
                                    id="wiki-path"
                                    bind_value=wiki_path
                                    placeholder="/path/to/your/wiki"
                                    autofocus=true
                                    disabled=busy
                                    on_enter=Callback::new(move |_: ()| on_next())
                                />
                                <p class="text-xs text-muted-foreground">
                                    "Pages are stored as Markdown files in this directory."
                                </p>
                            </div>
                        }
                        .into_any(),
                        SetupStep::InitRepository => view! {
                            <div class="space-y-2 text-sm">
                                <p>"We'll now initialize a Git repository in the selected directory:"</p>
                                <code class="block rounded-md border border-border bg-muted px-3 py-2">
                                    {move || wiki_path.get()}
                                </code>
                            </div>
                        }
                        .into_any(),
                    }}

                    {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}
                </CardContent>

                <CardFooter class="flex justify-end gap-2">
                    <Show when=move || step.get() == SetupStep::InitRepository fallback=|| ().into_view()>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || busy.get()
                            on:click=move |_| {
                                error.set(None);
                                step.set(SetupStep::SelectLocation);
                            }
                        >
                            "Back"
                        </Button>
                    </Show>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| match step.get_untracked() {
                            SetupStep::SelectLocation => on_next(),
                            SetupStep::InitRepository => on_finish(),
                        }
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || match step.get() {
                                SetupStep::SelectLocation => "Next",
                                SetupStep::InitRepository => "Finish",
                            }}
                        </span>
                    </Button>
                </CardFooter>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_path_is_rejected() {
        assert_eq!(
            validate_wiki_path("   ").unwrap_err(),
            "Please enter a valid path"
        );
        assert_eq!(validate_wiki_path(" /srv/wiki ").as_deref(), Ok("/srv/wiki"));
    }

    #[test]
    fn test_step_titles() {
        assert_eq!(SetupStep::SelectLocation.title(), "Select Wiki Location");
        assert_eq!(SetupStep::InitRepository.number(), 2);
    }
}
