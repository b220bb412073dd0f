use leptos::{html, prelude::*};

use super::scroll::use_entrance;
use crate::{
    choreo::entrance_delay,
    content::{self, EntryKind, TimelineEntry},
};

fn icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Internship => "💼",
        EntryKind::Volunteer => "🤝",
        EntryKind::Education => "🎓",
    }
}

#[component]
fn EntryCard(entry: &'static TimelineEntry, index: usize) -> impl IntoView {
    let description = (!entry.description.is_empty()).then(|| {
        view! { <p class="text-gray-400 mt-2">{entry.description.clone()}</p> }
    });
    let link = entry.link.clone().map(|href| {
        view! {
            <a
                href=href.clone()
                target="_blank"
                rel="noopener noreferrer"
                class="text-blue-500 hover:text-blue-400 text-sm"
            >
                {href.trim_start_matches("https://").to_string()}
            </a>
        }
    });
    view! {
        <div
            class="enter-left bg-glass rounded-xl p-6 backdrop-blur-lg"
            style=format!("animation-delay:{:.1}s", entrance_delay(index))
        >
            <div class="flex items-start gap-4">
                <div class="w-12 h-12 rounded-full bg-blue-500/10 flex items-center justify-center flex-shrink-0 text-2xl">
                    {icon(entry.kind)}
                </div>
                <div>
                    <div class="flex flex-wrap items-center gap-2 mb-1">
                        <h3 class="text-xl font-semibold">{entry.title.clone()}</h3>
                        <span class="px-2 py-1 text-xs rounded-full bg-blue-500/10 text-blue-500">
                            {entry.kind.label()}
                        </span>
                    </div>
                    <h4 class="text-lg text-gray-300 mb-1">{entry.role.clone()}</h4>
                    <p class="text-gray-400">{entry.period.clone()}</p>
                    {description}
                    {link}
                </div>
            </div>
        </div>
    }
}

fn entries(list: &'static [TimelineEntry]) -> impl IntoView {
    list.iter()
        .enumerate()
        .map(|(index, entry)| view! { <EntryCard entry index /> })
        .collect_view()
}

#[component]
pub fn Experience() -> impl IntoView {
    let list = content::history().map(|h| entries(&h.experience));
    let section = NodeRef::<html::Section>::new();
    let seen = use_entrance(section);
    view! {
        <section
            node_ref=section
            id="experience"
            class="py-16 relative overflow-hidden"
            class:in-view=move || seen.get()
        >
            <div class="max-w-6xl mx-auto px-4">
                <div class="enter-up text-center mb-12">
                    <h2 class="text-4xl font-bold mb-4 gradient-text">"Experience"</h2>
                    <p class="text-gray-400 text-lg max-w-2xl mx-auto">
                        "Where I've built, shipped and helped out."
                    </p>
                </div>
                <div class="grid gap-6">{list}</div>
            </div>
        </section>
    }
}

#[component]
pub fn Education() -> impl IntoView {
    let list = content::history().map(|h| entries(&h.education));
    let section = NodeRef::<html::Section>::new();
    let seen = use_entrance(section);
    view! {
        <section
            node_ref=section
            id="education"
            class="py-24 relative overflow-hidden"
            class:in-view=move || seen.get()
        >
            <div class="max-w-6xl mx-auto px-4">
                <div class="enter-up text-center mb-12">
                    <h2 class="text-4xl font-bold mb-4 gradient-text">"Education"</h2>
                    <p class="text-gray-400 text-lg max-w-2xl mx-auto">
                        "My academic journey and qualifications."
                    </p>
                </div>
                <div class="grid gap-6">{list}</div>
            </div>
        </section>
    }
}
