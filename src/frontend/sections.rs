use crate::content::{SectionHeading, TimelineKind};
use crate::frontend::hooks::{
    use_count_up, use_delayed_flag, use_typewriter, use_visibility_trigger,
};
use crate::frontend::{scroll_to_section, scroll_to_top, write_clipboard, Site, SiteProps};
use crate::logging::log_event;
use crate::motion::{is_scrolled, reveal_style, stagger_delay_ms};
use crate::theme::Theme;
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::Level;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

const SKILLS_VISIBILITY_THRESHOLD: f64 = 0.2;
const COPIED_RESET_MS: u32 = 2_000;
const METRIC_STAGGER_MS: u32 = 100;

#[derive(Properties, PartialEq)]
pub struct SectionHeaderProps {
    pub heading: SectionHeading,
}

#[function_component(SectionHeader)]
pub fn section_header(props: &SectionHeaderProps) -> Html {
    let heading = &props.heading;
    html! {
        <header class="section-header">
            <span class="eyebrow">{heading.eyebrow.clone()}</span>
            <h2>
                {heading.title.clone()}{" "}
                <span class="gradient-text">{heading.accent.clone()}</span>
            </h2>
            <p class="muted">{heading.intro.clone()}</p>
        </header>
    }
}

pub(crate) fn stagger_class(visible: bool) -> Classes {
    classes!("stagger-children", visible.then_some("visible"))
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub site: Site,
    pub theme: Theme,
    pub on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let scrolled = use_state_eq(|| false);
    let menu_open = use_state_eq(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                let target = win.clone();
                EventListener::new(&win, "scroll", move |_| {
                    scrolled.set(is_scrolled(target.scroll_y().unwrap_or(0.0)));
                })
            });
            move || drop(listener)
        });
    }

    let nav_link = |label: &str, href: &str, class: &'static str| {
        let target = href.trim_start_matches('#').to_string();
        let menu_open = menu_open.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            menu_open.set(false);
            scroll_to_section(&target);
        });
        html! {
            <a key={href.to_string()} class={class} href={href.to_string()} {onclick}>{label.to_string()}</a>
        }
    };

    let on_home = Callback::from(|event: MouseEvent| {
        event.prevent_default();
        scroll_to_top();
    });

    let on_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let content = &props.site.content;
    let theme_toggle = html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label={props.theme.toggle_label()}
            aria-pressed={(props.theme == Theme::Dark).to_string()}
            onclick={props.on_toggle_theme.clone()}
        >
            <span aria-hidden="true">{props.theme.icon()}</span>
        </button>
    };

    html! {
        <nav class={classes!("site-nav", scrolled.then_some("is-scrolled"))}>
            <div class="nav-bar">
                <a href="#" class="brand gradient-text" onclick={on_home}>{content.owner.initials.clone()}</a>
                <div class="nav-links">
                    { for content.navigation.iter().map(|item| nav_link(&item.label, &item.href, "nav-link")) }
                    {nav_link("Let's Talk", "#contact", "nav-cta")}
                    {theme_toggle.clone()}
                </div>
                <button class="menu-toggle" type="button" aria-label="Toggle menu" aria-expanded={menu_open.to_string()} onclick={on_menu}>
                    {if *menu_open { "✕" } else { "☰" }}
                </button>
            </div>
            <div class={classes!("mobile-menu", menu_open.then_some("is-open"))}>
                { for content.navigation.iter().map(|item| nav_link(&item.label, &item.href, "mobile-link")) }
                {nav_link("Let's Talk", "#contact", "nav-cta")}
                <div class="mobile-theme">
                    <span class="muted">{"Theme"}</span>
                    {theme_toggle}
                </div>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct MetricCardProps {
    value: u64,
    suffix: AttrValue,
    label: AttrValue,
    visible: bool,
    delay_ms: u32,
    duration_ms: u64,
}

#[function_component(MetricCard)]
fn metric_card(props: &MetricCardProps) -> Html {
    let count = use_count_up(props.value, props.duration_ms, props.visible);
    let shown = use_delayed_flag(props.visible, props.delay_ms);

    html! {
        <div class={classes!("metric-card", shown.then_some("is-shown"))}>
            <div class="metric-value gradient-text">
                {if shown { count } else { 0 }}{props.suffix.clone()}
            </div>
            <p class="metric-label muted">{props.label.clone()}</p>
        </div>
    }
}

#[function_component(HeroSection)]
pub fn hero_section(props: &SiteProps) -> Html {
    let site = &props.site;
    let owner = &site.content.owner;
    let typed = use_typewriter(site.content.hero.typing_phrases.clone(), !site.reduced_motion);
    let (metrics_ref, metrics_visible) = use_visibility_trigger(site.config.visibility_threshold);
    let duration_ms = site.count_up_duration_ms();

    let on_explore = Callback::from(|_: MouseEvent| scroll_to_section("about"));

    html! {
        <section class="hero">
            <div class="hero-inner">
                <div class="availability">
                    <span class="pulse-dot" />
                    <span class="muted">{owner.availability.clone()}</span>
                </div>
                <h1>
                    {"Hi, I'm "}
                    <span class="gradient-text glow-text">{owner.name.clone()}</span>
                </h1>
                <p class="hero-headline muted">{owner.headline.clone()}</p>
                <p class="typing">
                    {typed}
                    <span class="typing-cursor" aria-hidden="true">{"|"}</span>
                </p>
                <div class="hero-actions">
                    <a class="button primary" href={owner.resume_url.clone()} download={owner.resume_file_name.clone()}>
                        {"Download Resume"}
                    </a>
                    <a class="button" href="#contact">{"Get In Touch"}</a>
                </div>
                <div ref={metrics_ref} class="metrics-grid">
                    { for site.content.hero.metrics.iter().enumerate().map(|(index, metric)| html! {
                        <MetricCard
                            key={metric.label.clone()}
                            value={metric.value}
                            suffix={metric.suffix.clone()}
                            label={metric.label.clone()}
                            visible={metrics_visible}
                            delay_ms={stagger_delay_ms(index, METRIC_STAGGER_MS, 0)}
                            duration_ms={duration_ms}
                        />
                    }) }
                </div>
            </div>
            <button class="scroll-hint" type="button" onclick={on_explore}>
                <span>{"Scroll to explore"}</span>
                <span aria-hidden="true">{"⌄"}</span>
            </button>
        </section>
    }
}

#[function_component(AboutSection)]
pub fn about_section(props: &SiteProps) -> Html {
    let site = &props.site;
    let about = &site.content.about;
    let (node_ref, visible) = use_visibility_trigger(site.config.visibility_threshold);

    html! {
        <section id="about" class="section">
            <div ref={node_ref} class={stagger_class(visible)}>
                <SectionHeader heading={about.heading.clone()} />
                <div class="highlight-grid">
                    { for about.highlights.iter().enumerate().map(|(index, item)| html! {
                        <div
                            key={item.title.clone()}
                            class="card hover-lift"
                            style={format!("transition-delay: {}ms;", stagger_delay_ms(index, 100, 0))}
                        >
                            <div class="card-icon" aria-hidden="true">{item.icon.clone()}</div>
                            <h3>{item.title.clone()}</h3>
                            <p class="muted">{item.description.clone()}</p>
                        </div>
                    }) }
                </div>
                <div class="about-body">
                    <div class="about-copy">
                        { for about.paragraphs.iter().map(|paragraph| html! { <p class="muted">{paragraph.clone()}</p> }) }
                    </div>
                    <div class="skill-cloud">
                        { for about.skills.iter().enumerate().map(|(index, skill)| {
                            let tone = ["tone-primary", "tone-secondary", "tone-muted"][index % 3];
                            html! {
                                <span
                                    key={skill.clone()}
                                    class={classes!("pill", tone)}
                                    style={format!("animation-delay: {}ms;", stagger_delay_ms(index, 50, 0))}
                                >
                                    {skill.clone()}
                                </span>
                            }
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SiteProps) -> Html {
    let skills = &props.site.content.skills;
    let (node_ref, visible) = use_visibility_trigger(SKILLS_VISIBILITY_THRESHOLD);

    html! {
        <section id="skills" class="section">
            <div ref={node_ref} class={stagger_class(visible)}>
                <SectionHeader heading={skills.heading.clone()} />
                <div class="skill-columns">
                    { for skills.categories.iter().enumerate().map(|(column, category)| html! {
                        <div
                            key={category.name.clone()}
                            class="card"
                            style={reveal_style(visible, "translateY(20px)", stagger_delay_ms(column, 150, 0), 500)}
                        >
                            <div class="card-title">
                                <span class="card-icon" aria-hidden="true">{category.icon.clone()}</span>
                                <h3>{category.name.clone()}</h3>
                            </div>
                            <ul class="skill-list">
                                { for category.skills.iter().enumerate().map(|(row, skill)| html! {
                                    <li
                                        key={skill.clone()}
                                        style={reveal_style(visible, "translateX(-10px)", stagger_delay_ms(column * 4 + row, 50, 300), 300)}
                                    >
                                        <span class="dot" />
                                        {skill.clone()}
                                    </li>
                                }) }
                            </ul>
                            <p class="impact muted">{category.impact_statement.clone()}</p>
                        </div>
                    }) }
                </div>
                <div class="additional-skills">
                    <h3>{"Also Experienced With"}</h3>
                    <div class="pill-row">
                        { for skills.additional.iter().enumerate().map(|(index, skill)| html! {
                            <span
                                key={skill.clone()}
                                class={classes!("pill", if index % 2 == 0 { "tone-primary" } else { "tone-secondary" })}
                                style={reveal_style(visible, "none", stagger_delay_ms(index, 50, 500), 300)}
                            >
                                {skill.clone()}
                            </span>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[function_component(ExperienceSection)]
pub fn experience_section(props: &SiteProps) -> Html {
    let site = &props.site;
    let experience = &site.content.experience;
    let (node_ref, visible) = use_visibility_trigger(site.config.visibility_threshold);

    html! {
        <section id="experience" class="section">
            <div ref={node_ref} class={stagger_class(visible)}>
                <SectionHeader heading={experience.heading.clone()} />
                <div class="experience-grid">
                    <div class="timeline">
                        <h3>{"Experience"}</h3>
                        { for experience.timeline.iter().enumerate().map(|(index, item)| html! {
                            <article
                                key={format!("{}-{}", item.period, item.title)}
                                class="timeline-item"
                                style={reveal_style(visible, "translateX(-30px)", stagger_delay_ms(index, 150, 0), 500)}
                            >
                                <div class="timeline-icon" aria-hidden="true">
                                    {match item.kind {
                                        TimelineKind::Work => "💼",
                                        TimelineKind::Education => "🎓",
                                    }}
                                </div>
                                <div class="card">
                                    <p class="timeline-meta">
                                        <span class="period">{item.period.clone()}</span>
                                        {" • "}
                                        <span class="muted">{item.company.clone()}</span>
                                    </p>
                                    <h4>{item.title.clone()}</h4>
                                    <p class="muted">{item.description.clone()}</p>
                                    if !item.highlights.is_empty() {
                                        <ul class="highlights">
                                            { for item.highlights.iter().map(|highlight| html! { <li>{highlight.clone()}</li> }) }
                                        </ul>
                                    }
                                </div>
                            </article>
                        }) }
                    </div>
                    <div class="certifications">
                        <h3>{"Certifications"}</h3>
                        { for experience.certifications.iter().enumerate().map(|(index, cert)| html! {
                            <div
                                key={cert.name.clone()}
                                class="card cert hover-lift"
                                style={reveal_style(visible, "translateY(20px)", stagger_delay_ms(index + 3, 150, 0), 500)}
                            >
                                <span class="card-icon" aria-hidden="true">{"🏅"}</span>
                                <div class="cert-body">
                                    <h4>{cert.name.clone()}</h4>
                                    <p class="muted">{cert.issuer.clone()}</p>
                                    <p class="muted faint">{cert.date.clone()}</p>
                                </div>
                                if let Some(url) = cert.credly_url.clone() {
                                    <a class="icon-link" href={url} target="_blank" rel="noopener noreferrer" aria-label="View credential">
                                        {"↗"}
                                    </a>
                                }
                            </div>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[function_component(ContactSection)]
pub fn contact_section(props: &SiteProps) -> Html {
    let site = &props.site;
    let contact = &site.content.contact;
    let email = site.content.owner.email.clone();
    let (node_ref, visible) = use_visibility_trigger(site.config.visibility_threshold);
    let copied = use_state_eq(|| false);
    let reset = use_mut_ref(|| None::<Timeout>);

    let on_copy = {
        let copied = copied.clone();
        let email = email.clone();
        Callback::from(move |_: MouseEvent| {
            let copied = copied.clone();
            let reset = reset.clone();
            let email = email.clone();
            spawn_local(async move {
                match write_clipboard(&email).await {
                    Ok(()) => {
                        copied.set(true);
                        let copied = copied.clone();
                        *reset.borrow_mut() =
                            Some(Timeout::new(COPIED_RESET_MS, move || copied.set(false)));
                    }
                    Err(err) => log_event(
                        Level::Warn,
                        "clipboard_write_failed",
                        json!({ "reason": err.to_string() }),
                    ),
                }
            });
        })
    };

    html! {
        <section id="contact" class="section">
            <div ref={node_ref} class={stagger_class(visible)}>
                <SectionHeader heading={contact.heading.clone()} />
                <div class="cta-card gradient-border">
                    <h3>{contact.cta_title.clone()}</h3>
                    <p class="muted">{contact.cta_body.clone()}</p>
                    <div class="cta-actions">
                        <a class="button primary" href={format!("mailto:{email}")}>{"Send Me an Email"}</a>
                        <button class="button" type="button" onclick={on_copy}>
                            if *copied {
                                <span class="success">{"✓ Copied!"}</span>
                            } else {
                                <span>{"Copy Email"}</span>
                            }
                        </button>
                    </div>
                </div>
                <div class="social-links">
                    { for contact.social_links.iter().enumerate().map(|(index, link)| html! {
                        <a
                            key={link.name.clone()}
                            class="social-link hover-lift"
                            href={link.url.clone()}
                            target="_blank"
                            rel="noopener noreferrer"
                            style={reveal_style(visible, "translateY(20px)", stagger_delay_ms(index + 3, 100, 0), 500)}
                        >
                            <span aria-hidden="true">{link.icon.clone()}</span>
                            <span class="sr-only">{link.name.clone()}</span>
                        </a>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Footer)]
pub fn footer(props: &SiteProps) -> Html {
    let year = js_sys::Date::new_0().get_full_year();
    let content = &props.site.content;

    html! {
        <footer class="site-footer">
            <p class="muted">{format!("© {year} {}. All rights reserved.", content.owner.name)}</p>
            <p class="muted">{content.footer_tagline.clone()}</p>
        </footer>
    }
}
