mod frame;
mod hooks;
mod particle_canvas;
mod projects;
mod sections;

use crate::config::SiteConfig;
use crate::content::SiteContent;
use crate::error::SetupError;
use crate::logging::{self, log_event};
use crate::theme::{Theme, THEME_STORAGE_KEY};
use js_sys::{Function, Promise, Reflect};
use log::Level;
use particle_canvas::ParticleCanvas;
use projects::ProjectsSection;
use sections::{
    AboutSection, ContactSection, ExperienceSection, Footer, HeroSection, Navigation,
    SkillsSection,
};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Storage, Window,
};
use yew::prelude::*;

const MOUNT_POINT_ID: &str = "app";
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

/// Content, configuration and motion preference shared by every section.
#[derive(Clone, PartialEq)]
pub struct Site {
    pub content: Rc<SiteContent>,
    pub config: Rc<SiteConfig>,
    pub reduced_motion: bool,
}

impl Site {
    pub fn count_up_duration_ms(&self) -> u64 {
        if self.reduced_motion {
            0
        } else {
            self.config.count_up_duration_ms
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SiteProps {
    pub site: Site,
}

pub(crate) fn js_error(value: JsValue) -> SetupError {
    SetupError::Js(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

pub(crate) fn viewport_size(win: &Window) -> (f64, f64) {
    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    (width, height)
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn resolve_theme() -> Theme {
    let stored = local_storage().and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten());
    Theme::resolve(stored.as_deref(), media_matches("(prefers-color-scheme: dark)"))
}

fn apply_theme(theme: Theme) {
    if let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

/// Swaps the theme inside `document.startViewTransition` where the browser
/// has it; otherwise switches immediately.
fn apply_theme_with_transition(theme: Theme, reduced_motion: bool) {
    if reduced_motion {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document: JsValue = document.into();
    let start_view_transition = Reflect::get(&document, &JsValue::from_str("startViewTransition"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(start_view_transition) = start_view_transition else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document, &callback).is_err() {
        apply_theme(theme);
    }
}

pub(crate) fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub(crate) fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// `navigator.clipboard.writeText`, looked up at call time so browsers
/// without the API report an error instead of failing to load.
pub(crate) async fn write_clipboard(text: &str) -> Result<(), SetupError> {
    let win = window().ok_or(SetupError::NoWindow)?;
    let navigator: JsValue = win.navigator().into();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(|_| SetupError::Js("clipboard.writeText is not a function".to_string()))?;

    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(js_error)?
        .dyn_into::<Promise>()
        .map_err(js_error)?;
    JsFuture::from(promise).await.map_err(js_error)?;
    Ok(())
}

#[derive(Properties, PartialEq)]
struct AppProps {
    site: Site,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let site = props.site.clone();
    let theme = use_state(resolve_theme);

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        let reduced_motion = site.reduced_motion;
        Callback::from(move |_: MouseEvent| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next, reduced_motion);
            log_event(Level::Debug, "theme_changed", json!({ "theme": next.as_str() }));
            theme.set(next);
        })
    };

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            if !site.reduced_motion {
                <ParticleCanvas area_per_particle={site.config.particle_area_per_unit as f64} />
            }
            <Navigation site={site.clone()} theme={*theme} on_toggle_theme={on_toggle_theme} />
            <main id="content" class="page-shell">
                <HeroSection site={site.clone()} />
                <AboutSection site={site.clone()} />
                <ProjectsSection site={site.clone()} />
                <SkillsSection site={site.clone()} />
                <ExperienceSection site={site.clone()} />
                <ContactSection site={site.clone()} />
            </main>
            <Footer site={site} />
        </>
    }
}

fn mount_point() -> Result<Element, SetupError> {
    window()
        .ok_or(SetupError::NoWindow)?
        .document()
        .ok_or(SetupError::NoDocument)?
        .get_element_by_id(MOUNT_POINT_ID)
        .ok_or(SetupError::MountPointMissing(MOUNT_POINT_ID))
}

pub fn run() {
    let root = match mount_point() {
        Ok(root) => root,
        Err(err) => {
            logging::init(SiteConfig::default().log_level);
            log_event(Level::Error, "mount_failed", json!({ "reason": err.to_string() }));
            return;
        }
    };

    let config = SiteConfig::from_lookup(|name| root.get_attribute(name));
    logging::init(config.log_level);
    log_event(
        Level::Debug,
        "config_loaded",
        json!({
            "visibility_threshold": config.visibility_threshold,
            "count_up_duration_ms": config.count_up_duration_ms,
            "particle_area_per_unit": config.particle_area_per_unit,
        }),
    );

    let content = match SiteContent::bundled() {
        Ok(content) => content,
        Err(err) => {
            log_event(Level::Error, "content_invalid", json!({ "reason": err.to_string() }));
            return;
        }
    };

    let reduced_motion = config.motion_reduced(media_matches("(prefers-reduced-motion: reduce)"));
    let site = Site {
        content: Rc::new(content),
        config: Rc::new(config),
        reduced_motion,
    };

    yew::Renderer::<App>::with_root_and_props(root, AppProps { site }).render();
    log_event(
        Level::Info,
        "app_mounted",
        json!({ "reduced_motion": reduced_motion }),
    );
}
