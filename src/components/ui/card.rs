use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, section, "flex flex-col gap-4 rounded-lg border border-border bg-background py-5 shadow-sm"}
    clx! {CardHeader, header, "flex flex-col gap-1 px-5"}
    clx! {CardTitle, h2, "text-base font-semibold leading-tight"}
    clx! {CardDescription, p, "text-sm text-muted-foreground"}
    clx! {CardContent, div, "px-5"}
    clx! {CardFooter, footer, "flex items-center gap-2 px-5"}
}

pub use components::*;
