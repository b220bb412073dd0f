mod about;
mod case_study;
mod flip_link;
mod history;
mod home;
mod process_timeline;
mod reveal;
mod scroll;

use case_study::CaseStudyPage;
use home::HomePage;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, hooks::use_query_map, path};
use scroll::PinContext;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="bg-[#0a0a0a] text-white antialiased">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_context(PinContext::default());

    view! {
        <Title formatter=|title| format!("Ashmit Khurana - {title}") />
        <Router>
            <main class="relative min-h-screen w-full">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/projects/:slug") view=CaseStudyPage />
                </Routes>
            </main>
        </Router>
    }
}

/// Contains a fault to the section it happened in.
///
/// Release builds drop the broken subtree; debug builds (or `?debug=1`) put
/// the error on screen as well.
#[component]
pub fn SectionBoundary(children: Children) -> impl IntoView {
    let query = use_query_map();
    let show = move || cfg!(debug_assertions) || query.read().get("debug").as_deref() == Some("1");

    view! {
        <ErrorBoundary fallback=move |errors| {
            let errors = RwSignal::from(errors);
            let messages = move || {
                errors
                    .get()
                    .into_iter()
                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                    .collect_view()
            };
            view! {
                <Show when=show>
                    <div class="runtime-error-banner" role="alert">
                        <strong>"Runtime error"</strong>
                        <ul>{messages}</ul>
                    </div>
                </Show>
            }
        }>{children()}</ErrorBoundary>
    }
}
