use leptos::{html, prelude::*};
use leptos_use::{use_window_size, UseWindowSizeReturn};

use super::scroll::{use_ambient, use_choreography};
use crate::{
    choreo::{
        AmbientUpdate, LayoutVariant, Milestones, ParticleConfig, ParticleField, ParticleSample,
        Plan, ProgressSource, Timeline,
    },
    content::ProcessStep,
};

const PARTICLE_TICK_MS: u64 = 50;

/// Vertical process line for a case study.
///
/// The line fills as the section crosses the middle of the viewport and each
/// step lights up once the fill reaches its centre.
#[component]
pub fn ProcessTimeline(
    steps: Vec<ProcessStep>,
    #[prop(optional)] particles: Option<ParticleConfig>,
) -> impl IntoView {
    if steps.is_empty() {
        return ().into_any();
    }

    let section = NodeRef::<html::Section>::new();
    let container = NodeRef::<html::Div>::new();
    let markers = (0..steps.len())
        .map(|_| NodeRef::<html::Div>::new())
        .collect::<Vec<_>>();
    let milestones = RwSignal::new(Milestones::new(Vec::new(), 0.0));
    let section_height = RwSignal::new(0.0);
    let UseWindowSizeReturn { width, height } = use_window_size();

    Effect::new({
        let markers = markers.clone();
        move |_| {
            width.track();
            height.track();
            let Some(el) = container.get() else {
                return;
            };
            let thresholds = markers
                .iter()
                .filter_map(|m| m.get())
                .map(|m| m.offset_top() as f64 + m.offset_height() as f64 / 2.0)
                .collect::<Vec<_>>();
            milestones.update(|m| m.remeasure(thresholds, el.offset_height() as f64));
            if let Some(section) = section.get() {
                section_height.set(section.offset_height() as f64);
            }
        }
    });

    let progress = use_choreography(container, Vec::new(), |frame| {
        let source = ProgressSource::parse("top center", "bottom center")?;
        Ok(Plan {
            range: source.resolve(&frame.measure, frame.pins)?,
            timeline: Timeline::new(Vec::new()),
            layout: LayoutVariant::Simultaneous,
        })
    });

    let particle_config = particles.unwrap_or_default();
    let overshoot = particle_config.overshoot;
    let live = RwSignal::new(Vec::<ParticleSample>::new());
    use_ambient(
        move |scheduler, now| {
            scheduler.start(ParticleField::new(particle_config, js_sys::Math::random), now);
        },
        move |update| {
            if let AmbientUpdate::Particles { particles, .. } = update {
                live.set(particles);
            }
        },
        PARTICLE_TICK_MS,
    );

    let items = steps
        .into_iter()
        .zip(markers)
        .enumerate()
        .map(|(i, (step, marker))| {
            let active = move || milestones.read().is_active(i, progress.get());
            let side = if i % 2 == 0 {
                "md:pr-[55%] md:text-right"
            } else {
                "md:pl-[55%]"
            };
            view! {
                <div
                    node_ref=marker
                    class=format!("process-step relative pl-12 md:pl-0 {side}")
                    class:is-active=active
                >
                    <span class="process-dot"></span>
                    <div class="process-card bg-glass rounded-xl p-6 backdrop-blur-lg">
                        <span class="text-sm text-blue-400 font-mono">
                            {format!("{:02}", i + 1)}
                        </span>
                        <h3 class="text-xl font-semibold mt-1 mb-2">{step.stage}</h3>
                        <p class="text-gray-400">{step.description}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <section node_ref=section class="process-timeline relative py-24 overflow-hidden">
            <div class="absolute inset-0 pointer-events-none" aria-hidden="true">
                {move || {
                    let section_height = section_height.get();
                    live.get()
                        .into_iter()
                        .map(|p| {
                            view! {
                                <span
                                    class="floating-particle"
                                    style=p.to_css(section_height, overshoot)
                                ></span>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="max-w-5xl mx-auto px-4">
                <h2 class="text-3xl md:text-4xl font-bold mb-16 text-center gradient-text">
                    "Process"
                </h2>
                <div node_ref=container class="relative flex flex-col gap-16">
                    <div class="process-line-track"></div>
                    <div
                        class="process-line-fill"
                        style=move || format!("height:{:.2}%", progress.get() * 100.0)
                    ></div>
                    {items}
                </div>
            </div>
        </section>
    }
    .into_any()
}
