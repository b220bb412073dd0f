use leptos::prelude::*;

const LETTER_DELAY_S: f64 = 0.025;

fn letters(text: &str) -> impl IntoView {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            view! {
                <span
                    class="flip-letter"
                    style=format!("transition-delay:{:.3}s", i as f64 * LETTER_DELAY_S)
                >
                    {c.to_string()}
                </span>
            }
        })
        .collect_view()
}

/// Link whose letters roll over to a second copy on hover.
#[component]
pub fn FlipLink(#[prop(into)] text: String, #[prop(into)] href: String) -> impl IntoView {
    let external = !href.starts_with("mailto:");
    view! {
        <a
            href=href
            target=external.then_some("_blank")
            rel=external.then_some("noopener noreferrer")
            class="flip-link text-4xl sm:text-6xl md:text-7xl font-black uppercase"
        >
            <div class="flip-row flip-row-top">{letters(&text)}</div>
            <div class="flip-row flip-row-bottom" aria-hidden="true">
                {letters(&text)}
            </div>
        </a>
    }
}
