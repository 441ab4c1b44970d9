use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex shrink-0 select-none items-center justify-center gap-1.5 whitespace-nowrap rounded-md text-sm font-medium transition-colors outline-none hover:cursor-pointer focus-visible:ring-2 focus-visible:ring-ring/50 disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg]:shrink-0 [&_svg:not([class*='size-'])]:size-4",
        variants: {
            variant: {
                Default: "bg-primary text-primary-foreground hover:bg-primary/90",
                Destructive: "bg-destructive text-white hover:bg-destructive/90 focus-visible:ring-destructive/30",
                Outline: "border border-border bg-background hover:bg-accent hover:text-accent-foreground",
                Ghost: "hover:bg-accent hover:text-accent-foreground",
            },
            size: {
                Default: "h-9 px-4",
                Sm: "h-8 px-3",
                Xs: "h-6 px-2 text-xs"
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
