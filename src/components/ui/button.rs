use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 outline-none focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2 w-fit hover:cursor-pointer active:scale-[0.98] select-none",
        variants: {
            variant: {
                Default: "bg-primary text-primary-foreground shadow-xs hover:bg-primary/90",
                Outline: "border border-input bg-transparent text-muted-foreground shadow-xs hover:bg-accent hover:text-accent-foreground",
                Ghost: "hover:bg-accent hover:text-accent-foreground",
                Destructive: "bg-destructive text-white shadow-xs hover:bg-destructive/90"
            },
            size: {
                Default: "h-9 px-4 py-2",
                Sm: "h-8 rounded-md gap-1.5 px-3",
                Icon: "size-8"
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
