use leptos::{html, prelude::*};
use leptos_meta::Title;
use leptos_router::components::A;

use super::{
    about::About,
    flip_link::FlipLink,
    history::{Education, Experience},
    scroll::use_entrance,
    SectionBoundary,
};
use crate::{
    choreo::entrance_delay,
    content::{self, LinkKind},
};

const EMAIL: &str = "ashmit.khu@gmail.com";
const SOCIALS: [(&str, &str); 3] = [
    ("GitHub", "https://github.com/ashmitkhurana"),
    ("LinkedIn", "https://linkedin.com/in/ashmitkhurana"),
    ("Instagram", "https://www.instagram.com/ashmitkhurana_/"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <SectionBoundary>
            <Hero />
        </SectionBoundary>
        <SectionBoundary>
            <About />
        </SectionBoundary>
        <SectionBoundary>
            <Projects />
        </SectionBoundary>
        <SectionBoundary>
            <Experience />
        </SectionBoundary>
        <SectionBoundary>
            <Education />
        </SectionBoundary>
        <SectionBoundary>
            <Contact />
        </SectionBoundary>
        <Footer />
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section
            id="home"
            class="relative min-h-screen flex items-center justify-center bg-[#0a0a0a] overflow-hidden"
        >
            <div class="hero-grid absolute inset-0 z-0"></div>
            <div class="absolute inset-0 bg-[#0a0a0a]/30 z-[1] pointer-events-none"></div>
            <div class="relative z-10 w-full flex flex-col items-center justify-center text-center">
                <h2 class="fade-up text-gray-400 text-lg md:text-xl mb-4 font-light tracking-wider">
                    "Hello, I'm"
                </h2>
                <h1 class="pop-in gradient-shift text-4xl sm:text-5xl md:text-6xl lg:text-7xl font-bold mb-6">
                    "Ashmit Khurana"
                </h1>
                <div class="fade-up delay-400 text-lg sm:text-xl md:text-2xl text-gray-300 mb-8 px-4">
                    <span class="font-light">"Pixel Playmaker"</span>
                    <br />
                    <span class="gradient-shift">"Code Conjurer"</span>
                </div>
                <div class="fade-up delay-600 flex justify-center space-x-6">
                    {SOCIALS
                        .iter()
                        .map(|(label, href)| {
                            view! {
                                <a
                                    href=*href
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="social-glow text-blue-500 text-lg font-semibold"
                                    aria-label=*label
                                >
                                    {*label}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Projects() -> impl IntoView {
    let cards = content::showcase().map(|cards| {
        cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let href = format!("/projects/{}", card.slug);
                let external = (card.link.href != "#").then(|| {
                    let label = match card.link.kind {
                        LinkKind::Live => "Live site ↗",
                        LinkKind::Source => "Source ↗",
                    };
                    view! {
                        <a
                            href=card.link.href.clone()
                            class="text-gray-400 hover:text-white transition-colors"
                            target="_blank"
                            rel="noopener noreferrer"
                        >
                            {label}
                        </a>
                    }
                });
                view! {
                    <div
                        class="enter-up spotlight-card group rounded-xl overflow-hidden flex flex-col h-full"
                        style=format!("animation-delay:{:.1}s", entrance_delay(index))
                    >
                        <div class="relative overflow-hidden">
                            <img
                                src=card.image.clone()
                                alt=card.title.clone()
                                class="project-card-image w-full h-48 object-cover"
                            />
                            <div class="absolute inset-0 bg-gradient-to-t from-black/60 to-transparent"></div>
                        </div>
                        <div class="p-6 flex flex-col flex-1">
                            <h3 class="text-xl font-semibold mb-2">{card.title.clone()}</h3>
                            <p class="text-gray-400 mb-4">{card.description.clone()}</p>
                            <div class="flex flex-wrap gap-2 mb-4">
                                {card
                                    .tags
                                    .iter()
                                    .map(|tag| {
                                        view! {
                                            <span class="px-3 py-1 bg-blue-500/10 text-blue-400 rounded-full text-sm">
                                                {tag.clone()}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <div class="flex gap-4 mt-auto">
                                <A href=href attr:class="text-blue-400 hover:text-blue-300 transition-colors">
                                    "Case study →"
                                </A>
                                {external}
                            </div>
                        </div>
                    </div>
                }
            })
            .collect_view()
    });

    let section = NodeRef::<html::Section>::new();
    let seen = use_entrance(section);

    view! {
        <section
            node_ref=section
            id="projects"
            class="py-20"
            class:in-view=move || seen.get()
        >
            <div class="max-w-6xl mx-auto px-4">
                <div class="enter-up text-center mb-16">
                    <h2 class="text-4xl font-bold mb-6 gradient-text">"Projects"</h2>
                </div>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">{cards}</div>
            </div>
        </section>
    }
}

#[component]
fn Contact() -> impl IntoView {
    let section = NodeRef::<html::Section>::new();
    let seen = use_entrance(section);

    view! {
        <section
            node_ref=section
            id="contact"
            class="py-20"
            class:in-view=move || seen.get()
        >
            <div class="max-w-6xl mx-auto px-4">
                <div class="enter-up text-center mb-16">
                    <h2 class="text-4xl font-bold mb-6 gradient-text">"Get in Touch"</h2>
                    <p class="text-gray-400 text-lg max-w-2xl mx-auto">
                        "Have a project in mind? Let's work together to create something amazing."
                    </p>
                </div>
                <div
                    class="enter-up flex flex-col items-center space-y-8 max-w-4xl mx-auto"
                    style=format!("animation-delay:{:.1}s", entrance_delay(1))
                >
                    <FlipLink text="Email" href=format!("mailto:{EMAIL}") />
                    {SOCIALS
                        .iter()
                        .map(|(label, href)| view! { <FlipLink text=*label href=*href /> })
                        .collect_view()}
                    <a
                        href=format!("mailto:{EMAIL}")
                        class="text-gray-400 hover:text-blue-500 transition-colors break-all"
                    >
                        {EMAIL}
                    </a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Footer() -> impl IntoView {
    use chrono::{DateTime, Datelike, Utc};

    let year = Utc::now().year();
    let built = DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.format("%b %e %Y").to_string())
        .unwrap_or_default();

    view! {
        <footer class="py-8 bg-[#0c0c0c]">
            <div class="max-w-6xl mx-auto px-4 flex flex-col md:flex-row justify-between items-center gap-4">
                <p class="text-gray-400">{format!("© {year} Ashmit Khurana. All rights reserved.")}</p>
                <p class="text-gray-600 text-sm">"Built " {built}</p>
            </div>
        </footer>
    }
}
