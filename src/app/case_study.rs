use leptos::{ev, html, prelude::*};
use leptos_meta::Title;
use leptos_router::{components::A, hooks::use_params_map};
use leptos_use::{
    use_element_visibility, use_interval_fn_with_options, utils::Pausable, UseIntervalFnOptions,
};

use super::{
    process_timeline::ProcessTimeline,
    scroll::use_ambient,
    SectionBoundary,
};
use crate::{
    choreo::{
        text::{is_space, split_words},
        AmbientUpdate, KenBurns,
    },
    content::{self, format_value, CaseStudy, ContentError, CountUp, Metric, ProjectImage},
};

const KEN_BURNS_TICK_MS: u64 = 50;
const WORD_DELAY_S: f64 = 0.06;

#[component]
pub fn CaseStudyPage() -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.read().get("slug").unwrap_or_default());

    Effect::watch(
        move || slug.track(),
        |_, _, _| window().scroll_to_with_x_and_y(0.0, 0.0),
        true,
    );

    view! {
        <SectionBoundary>
            {move || match content::case_study(&slug.get()) {
                Ok(study) => view! { <CaseStudyView study /> }.into_any(),
                Err(ContentError::NotFound(slug)) => {
                    log::debug!("no case study for {slug}");
                    view! { <ProjectNotFound /> }.into_any()
                }
                Err(e) => Err::<(), _>(e).into_any(),
            }}
        </SectionBoundary>
    }
}

#[component]
fn ProjectNotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
        response.set_status(http::StatusCode::NOT_FOUND);
    }

    view! {
        <Title text="Not Found" />
        <div class="min-h-screen flex flex-col items-center justify-center text-center px-4">
            <h1 class="text-4xl md:text-5xl font-bold mb-4 gradient-text">"Project Not Found"</h1>
            <p class="text-gray-400 text-lg mb-8">
                "The case study you're looking for doesn't exist."
            </p>
            <A
                href="/"
                attr:class="px-6 py-3 rounded-full bg-blue-500 hover:bg-blue-600 transition-colors"
            >
                "Return Home"
            </A>
        </div>
    }
}

#[component]
fn CaseStudyView(study: CaseStudy) -> impl IntoView {
    let groups = study
        .metric_groups()
        .into_iter()
        .map(|unit| {
            let metrics = study
                .metrics
                .iter()
                .filter(|m| m.unit == unit)
                .cloned()
                .collect::<Vec<_>>();
            (unit.to_string(), metrics)
        })
        .collect::<Vec<_>>();
    let hero = study.hero_image().cloned();
    let gallery = study.gallery().to_vec();

    view! {
        <Title text=study.title.clone() />
        <article class="case-study">
            <CaseStudyHero title=study.title.clone() tagline=study.tagline.clone() image=hero />

            <section class="max-w-5xl mx-auto px-4 py-20 grid md:grid-cols-2 gap-12">
                <div>
                    <h2 class="text-sm uppercase tracking-widest text-blue-400 mb-2">"Client"</h2>
                    <p class="text-xl font-semibold mb-8">{study.client.clone()}</p>
                    <h2 class="text-sm uppercase tracking-widest text-blue-400 mb-2">"The Problem"</h2>
                    <p class="text-gray-300 leading-relaxed">{study.problem.clone()}</p>
                </div>
                <div>
                    <h2 class="text-sm uppercase tracking-widest text-blue-400 mb-2">"My Role"</h2>
                    <p class="text-xl font-semibold mb-8">{study.role.clone()}</p>
                    <h2 class="text-sm uppercase tracking-widest text-blue-400 mb-2">"Tech"</h2>
                    <div class="flex flex-wrap gap-2">
                        {study
                            .tech
                            .iter()
                            .map(|t| {
                                view! {
                                    <span class="px-3 py-1 bg-blue-500/10 text-blue-400 rounded-full text-sm">
                                        {t.clone()}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <ProcessTimeline steps=study.process.clone() />

            <Gallery images=gallery />

            <section class="max-w-5xl mx-auto px-4 py-20">
                <h2 class="text-3xl md:text-4xl font-bold mb-12 text-center gradient-text">
                    "Results"
                </h2>
                {groups
                    .into_iter()
                    .map(|(unit, metrics)| {
                        view! {
                            <div class="mb-12">
                                <h3 class="text-sm uppercase tracking-widest text-gray-500 mb-4">
                                    {unit}
                                </h3>
                                <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-6">
                                    {metrics
                                        .into_iter()
                                        .map(|metric| view! { <MetricCounter metric /> })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="max-w-3xl mx-auto px-4 py-20 text-center">
                <blockquote class="text-2xl md:text-3xl font-light italic text-gray-200 mb-6">
                    {format!("\u{201C}{}\u{201D}", study.testimonial.quote)}
                </blockquote>
                <p class="text-blue-400">{format!("- {}", study.testimonial.author)}</p>
            </section>

            <section class="py-24 text-center">
                <h2 class="text-3xl md:text-4xl font-bold mb-6">"Have a similar project?"</h2>
                <A
                    href="/#contact"
                    attr:class="inline-block px-8 py-4 rounded-full bg-blue-500 hover:bg-blue-600 transition-colors"
                >
                    "Let's talk"
                </A>
            </section>
        </article>
    }
}

/// Title cascade over a slowly zooming backdrop that follows the pointer.
#[component]
fn CaseStudyHero(
    title: String,
    tagline: String,
    image: Option<ProjectImage>,
    #[prop(optional)] ken_burns: Option<KenBurns>,
) -> impl IntoView {
    let ken_burns = ken_burns.unwrap_or_default();
    let scale = RwSignal::new(ken_burns.low);
    use_ambient(
        move |scheduler, now| {
            scheduler.start(ken_burns, now);
        },
        move |update| {
            if let AmbientUpdate::Scale { scale: s, .. } = update {
                scale.set(s);
            }
        },
        KEN_BURNS_TICK_MS,
    );

    let hero = NodeRef::<html::Section>::new();
    let pointer = RwSignal::new((50.0, 50.0));
    let on_move = move |e: ev::MouseEvent| {
        let Some(el) = hero.get_untracked() else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let x = (e.client_x() as f64 - rect.left()) / rect.width() * 100.0;
        let y = (e.client_y() as f64 - rect.top()) / rect.height() * 100.0;
        pointer.set((x, y));
    };

    let mut word = 0;
    let words = split_words(&title)
        .into_iter()
        .map(|segment| {
            if is_space(segment) {
                return segment.to_string().into_any();
            }
            let delay = word as f64 * WORD_DELAY_S;
            word += 1;
            view! {
                <span class="hero-word" style=format!("animation-delay:{delay:.2}s")>
                    {segment.to_string()}
                </span>
            }
            .into_any()
        })
        .collect_view();

    let backdrop = image.map(|image| {
        view! {
            <img
                src=image.src
                alt=image.alt
                class="absolute inset-0 w-full h-full object-cover opacity-40"
                style=move || format!("transform:scale({:.4})", scale.get())
            />
        }
    });

    view! {
        <section
            node_ref=hero
            class="case-hero relative min-h-[80vh] flex items-center justify-center overflow-hidden"
            style=move || {
                let (x, y) = pointer.get();
                format!("--mouse-x:{x:.1}%;--mouse-y:{y:.1}%")
            }
            on:mousemove=on_move
        >
            {backdrop}
            <div class="case-hero-aurora absolute inset-0"></div>
            <div class="case-hero-vignette absolute inset-0"></div>
            <div class="case-hero-grain absolute inset-0"></div>
            <div class="relative z-10 max-w-4xl px-4 text-center">
                <A href="/#projects" attr:class="text-gray-400 hover:text-white text-sm mb-6 inline-block">
                    "← Back to projects"
                </A>
                <h1 class="text-4xl sm:text-5xl md:text-7xl font-extrabold mb-6">{words}</h1>
                <p class="fade-up delay-600 text-lg md:text-2xl text-gray-300">{tagline}</p>
            </div>
        </section>
    }
}

#[component]
fn Gallery(images: Vec<ProjectImage>) -> impl IntoView {
    (!images.is_empty()).then(|| {
        view! {
            <section class="max-w-6xl mx-auto px-4 py-20 grid md:grid-cols-2 gap-6">
                {images
                    .into_iter()
                    .map(|image| {
                        view! {
                            <figure class="spotlight-card rounded-xl overflow-hidden">
                                <img
                                    src=image.src
                                    alt=image.alt.clone()
                                    class="project-card-image w-full h-64 object-cover"
                                />
                                <figcaption class="p-4 text-sm text-gray-400">{image.alt}</figcaption>
                            </figure>
                        }
                    })
                    .collect_view()}
            </section>
        }
    })
}

/// Counts up to the metric's value once it scrolls into view.
#[component]
fn MetricCounter(metric: Metric) -> impl IntoView {
    let counter = CountUp::new(metric.value);
    let step = RwSignal::new(0_u32);
    let node = NodeRef::<html::Div>::new();
    let visible = use_element_visibility(node);

    let Pausable { pause, resume, .. } = use_interval_fn_with_options(
        move || step.update(|s| *s += 1),
        counter.interval_ms() as u64,
        UseIntervalFnOptions::default().immediate(false),
    );

    Effect::new(move |_| {
        let s = step.get();
        if counter.is_done(s) {
            pause();
        } else if visible.get() && s == 0 {
            resume();
        }
    });

    view! {
        <div node_ref=node class="spotlight-card rounded-xl p-6 text-center">
            <div class="text-4xl md:text-5xl font-bold gradient-text mb-2">
                {move || format_value(counter.value_at(step.get()))}
                <span class="text-2xl ml-1">{metric.unit.clone()}</span>
            </div>
            <p class="text-gray-400">{metric.label}</p>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use leptos::prelude::*;
    use leptos_meta::provide_meta_context;
    use leptos_router::{
        components::{Route, Router, Routes},
        location::RequestUrl,
        path,
    };

    use super::CaseStudyPage;
    use crate::app::scroll::PinContext;

    fn render(url: &str) -> String {
        let owner = Owner::new();
        owner.with(|| {
            provide_context(RequestUrl::new(url));
            provide_context(PinContext::default());
            provide_meta_context();
            view! {
                <Router>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=path!("/projects/:slug") view=CaseStudyPage />
                    </Routes>
                </Router>
            }
            .to_html()
        })
    }

    #[test]
    fn test_unknown_slug_renders_not_found() {
        let html = render("/projects/nope");
        assert!(html.contains("Project Not Found"));
        assert!(html.contains("Return Home"));
    }

    #[test]
    fn test_known_slug_renders_case_study() {
        let html = render("/projects/sleepara");
        assert!(html.contains("Sleepara"));
        assert!(!html.contains("Project Not Found"));
    }
}
