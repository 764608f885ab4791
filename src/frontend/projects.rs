use crate::content::{Project, ProjectCategory, CARD_TECHNOLOGY_LIMIT};
use crate::frontend::hooks::use_visibility_trigger;
use crate::frontend::sections::{stagger_class, SectionHeader};
use crate::frontend::SiteProps;
use crate::motion::{stagger_delay_ms, Tilt};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

#[function_component(ProjectsSection)]
pub fn projects_section(props: &SiteProps) -> Html {
    let site = &props.site;
    let projects = &site.content.projects;
    let (node_ref, visible) = use_visibility_trigger(site.config.visibility_threshold);
    let active = use_state_eq(ProjectCategory::default);
    let selected = use_state_eq(|| None::<String>);

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |id: String| selected.set(Some(id)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let filters = projects.categories.iter().map(|category| {
        let value = category.value;
        let onclick = {
            let active = active.clone();
            Callback::from(move |_: MouseEvent| active.set(value))
        };
        html! {
            <button
                key={category.label.clone()}
                type="button"
                class={classes!("filter", (*active == value).then_some("is-active"))}
                aria-pressed={(*active == value).to_string()}
                {onclick}
            >
                {category.label.clone()}
            </button>
        }
    });

    let modal = selected
        .as_deref()
        .and_then(|id| projects.find(id))
        .map(|project| html! { <ProjectModal project={project.clone()} on_close={on_close} /> });

    html! {
        <section id="projects" class="section">
            <div ref={node_ref} class={stagger_class(visible)}>
                <SectionHeader heading={projects.heading.clone()} />
                <div class="filters" role="group" aria-label="Filter projects">
                    { for filters }
                </div>
                <div class="project-grid">
                    { for projects.filtered(*active).enumerate().map(|(index, project)| html! {
                        <ProjectCard
                            key={project.id.clone()}
                            project={project.clone()}
                            delay_ms={stagger_delay_ms(index, 100, 0)}
                            on_select={on_select.clone()}
                        />
                    }) }
                </div>
            </div>
            { for modal }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    delay_ms: u32,
    on_select: Callback<String>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let card_ref = use_node_ref();
    let tilt = use_state_eq(Tilt::default);
    let project = &props.project;

    let onmousemove = {
        let card_ref = card_ref.clone();
        let tilt = tilt.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(card) = card_ref.cast::<HtmlElement>() else {
                return;
            };
            let rect = card.get_bounding_client_rect();
            tilt.set(Tilt::from_pointer(
                f64::from(event.client_x()) - rect.left(),
                f64::from(event.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            ));
        })
    };

    let onmouseleave = {
        let tilt = tilt.clone();
        Callback::from(move |_: MouseEvent| tilt.set(Tilt::default()))
    };

    let onclick = {
        let id = project.id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    let onkeydown = {
        let id = project.id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "Enter" | " ") {
                event.prevent_default();
                on_select.emit(id.clone());
            }
        })
    };

    let (technologies, hidden) = project.technology_preview(CARD_TECHNOLOGY_LIMIT);

    html! {
        <div
            ref={card_ref}
            class="project-card"
            role="button"
            tabindex="0"
            style={format!("{} transition-delay: {}ms;", tilt.style(), props.delay_ms)}
            {onclick}
            {onkeydown}
            {onmousemove}
            {onmouseleave}
        >
            <div class="card">
                <span class="impact-badge">{"✦ "}{project.impact.clone()}</span>
                <h3>{project.title.clone()}</h3>
                <p class="muted">{project.short_description.clone()}</p>
                <div class="tech-row">
                    { for technologies.iter().map(|tech| html! { <span key={tech.clone()} class="tech">{tech.clone()}</span> }) }
                    if hidden > 0 {
                        <span class="tech">{format!("+{hidden}")}</span>
                    }
                </div>
                <span class="view-more">{"View Details ›"}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    project: Project,
    on_close: Callback<()>,
}

#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    let project = &props.project;

    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "keydown", move |event| {
                    if event
                        .dyn_ref::<KeyboardEvent>()
                        .is_some_and(|event| event.key() == "Escape")
                    {
                        on_close.emit(());
                    }
                })
            });
            move || drop(listener)
        });
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|event: MouseEvent| event.stop_propagation());

    html! {
        <div class="modal" onclick={close.clone()}>
            <div class="modal-backdrop" />
            <div class="modal-panel" role="dialog" aria-modal="true" aria-label={project.title.clone()} onclick={keep_open}>
                <button class="modal-close" type="button" aria-label="Close" onclick={close}>{"✕"}</button>
                <span class="impact-badge">{"✦ "}{project.impact.clone()}</span>
                <h3>{project.title.clone()}</h3>
                <p class="muted">{project.full_description.clone()}</p>
                <h4>{"Key Features"}</h4>
                <ul class="feature-list">
                    { for project.features.iter().map(|feature| html! { <li>{feature.clone()}</li> }) }
                </ul>
                <h4>{"Technologies Used"}</h4>
                <div class="tech-row">
                    { for project.technologies.iter().map(|tech| html! { <span key={tech.clone()} class="pill tone-primary">{tech.clone()}</span> }) }
                </div>
                <div class="modal-links">
                    if let Some(demo) = project.links.demo.clone() {
                        <a class="button primary" href={demo} target="_blank" rel="noopener noreferrer">{"Live Demo ↗"}</a>
                    }
                    if let Some(github) = project.links.github.clone() {
                        <a class="button" href={github} target="_blank" rel="noopener noreferrer">{"View Code"}</a>
                    }
                </div>
            </div>
        </div>
    }
}
