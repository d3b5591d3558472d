use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Window,
};

use crate::affordances::{
    anchor_target, toggle_mobile_menu, KeyboardMode, Ripple, ANCHOR_LINKS, MENU_BUTTON,
    NAV_LINKS, RIPPLE_TARGETS, THEME_TOGGLE_ID,
};
use crate::config::SiteConfig;
use crate::dom::web::{by_id, document, query, query_all, WebElement};
use crate::dom::ElementHandle;
use crate::error::DomError;
use crate::family_pager::{
    FamilyPager, PagerTiming, FAMILY_CARD, FAMILY_GRID, NEXT_BUTTON_ID, PAGE_DOT, PREV_BUTTON_ID,
};
use crate::image_fallback::{ImageFallback, FALLBACK_TARGETS};
use crate::lazy_images::{LazyImageLoader, LAZY_TARGETS};
use crate::lightbox::{self, Lightbox, LightboxParts};
use crate::media_modal::{self, MediaModal, MediaModalParts};
use crate::navbar::{NavbarWatcher, NAVBAR_ID};
use crate::reveal::{Observation, RevealAnimator, REVEAL_TARGETS};
use crate::schedule::{Scheduler, TimerScheduler};
use crate::scroll_lock::{ScrollLock, SharedScrollLock};
use crate::storage::open_preferences;
use crate::theme::{is_toggle_shortcut, ThemeController, ThemeTransition, DARK_SCHEME_QUERY};

type EventClosure = Closure<dyn FnMut(Event)>;
type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

type SharedTheme = Rc<RefCell<ThemeController<WebElement>>>;
type SharedLightbox = Rc<RefCell<Lightbox<WebElement>>>;
type SharedModal = Rc<RefCell<MediaModal<WebElement>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: EventClosure,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

struct Observer {
    observer: IntersectionObserver,
    _closure: ObserverClosure,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[derive(Default)]
pub struct Site {
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Site {
    fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), DomError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| DomError::Listener { event })?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    fn listen_on<F>(&mut self, element: &WebElement, event: &'static str, handler: F) -> Result<(), DomError>
    where
        F: FnMut(Event) + 'static,
    {
        let target: &EventTarget = element.raw().as_ref();
        self.listen(target, event, handler)
    }

    // `prepare` runs on each target only once the observer exists.
    fn observe<P, F>(
        &mut self,
        options: Option<IntersectionObserverInit>,
        targets: &[WebElement],
        prepare: P,
        mut handler: F,
    ) -> Result<(), DomError>
    where
        P: Fn(&WebElement),
        F: FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if entry.is_null() || entry.is_undefined() {
                    continue;
                }
                handler(entry.unchecked_into(), &observer);
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
        let callback = closure.as_ref().unchecked_ref();
        let observer = match options {
            Some(init) => IntersectionObserver::new_with_options(callback, &init),
            None => IntersectionObserver::new(callback),
        }
        .map_err(|_| DomError::Observer)?;
        for target in targets {
            prepare(target);
            observer.observe(target.raw());
        }
        self.observers.push(Observer {
            observer,
            _closure: closure,
        });
        Ok(())
    }
}

pub fn install(config: &SiteConfig) -> Result<Site, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = document()?;
    let body = document.body().map(WebElement::new).ok_or(DomError::NoBody)?;
    let scheduler: Rc<dyn Scheduler> = Rc::new(TimerScheduler);
    let mut site = Site::default();

    let theme = report("theme", install_theme(&mut site, &window, &document, config, &scheduler)).flatten();
    report("navbar", install_navbar(&mut site, &window, &document, config));
    report("reveal", install_reveal(&mut site, &document, config));
    report("lazy images", install_lazy_images(&mut site, &document));
    report("image fallback", install_image_fallback(&mut site, &document, config));
    report("family pager", install_family_pager(&mut site, &document, config, &scheduler));

    let scroll_lock = ScrollLock::shared(body.clone());
    let lightbox = report("lightbox", install_lightbox(&mut site, &document, &scroll_lock)).flatten();
    let modal = report("media modal", install_media_modal(&mut site, &document, &scroll_lock)).flatten();

    report("keyboard", install_keyboard(&mut site, &document, body, theme, lightbox, modal));
    report("menu", install_menu(&mut site, &document));
    report("ripple", install_ripple(&mut site, &document, config, &scheduler));
    report("anchors", install_anchor_scrolling(&mut site, &document));

    tracing::info!(
        "site: installed {} listeners, {} observers",
        site.listeners.len(),
        site.observers.len()
    );
    Ok(site)
}

fn report<T>(part: &str, result: Result<T, DomError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("site: {part} disabled ({err})");
            None
        }
    }
}

fn install_theme(
    site: &mut Site,
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    scheduler: &Rc<dyn Scheduler>,
) -> Result<Option<SharedTheme>, DomError> {
    let Some(root) = document.document_element().and_then(WebElement::from_element) else {
        return Ok(None);
    };
    let scheme = window.match_media(DARK_SCHEME_QUERY).ok().flatten();
    let prefers_dark = scheme.as_ref().map(|query| query.matches()).unwrap_or(false);

    let mut controller = ThemeController::new(
        root.clone(),
        open_preferences(),
        config.theme_storage_key.clone(),
        prefers_dark,
    );
    let transition = ThemeTransition::new(root, scheduler.clone(), config.theme_transition_ms);
    controller.subscribe(Box::new(move |_theme| transition.run()));
    let controller = Rc::new(RefCell::new(controller));

    if let Some(scheme) = scheme {
        let target: &EventTarget = scheme.as_ref();
        let on_change = controller.clone();
        let query = scheme.clone();
        site.listen(target, "change", move |_event| {
            on_change.borrow_mut().on_system_change(query.matches());
        })?;
    }

    if let Some(toggle) = by_id(document, THEME_TOGGLE_ID) {
        let on_click = controller.clone();
        site.listen_on(&toggle, "click", move |_event| {
            on_click.borrow_mut().toggle();
        })?;
    }
    Ok(Some(controller))
}

fn install_navbar(
    site: &mut Site,
    window: &Window,
    document: &Document,
    config: &SiteConfig,
) -> Result<(), DomError> {
    let Some(navbar) = by_id(document, NAVBAR_ID) else {
        return Ok(());
    };
    let watcher = NavbarWatcher::new(navbar, config.navbar_scroll_threshold);
    watcher.on_scroll(window.scroll_y().unwrap_or(0.0));

    let scroll_window = window.clone();
    let target: &EventTarget = window.as_ref();
    site.listen(target, "scroll", move |_event| {
        watcher.on_scroll(scroll_window.scroll_y().unwrap_or(0.0));
    })
}

fn install_reveal(site: &mut Site, document: &Document, config: &SiteConfig) -> Result<(), DomError> {
    let targets = query_all(document, REVEAL_TARGETS)?;
    if targets.is_empty() {
        return Ok(());
    }
    let animator = RevealAnimator;
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);

    let prepare = move |target: &WebElement| animator.prepare(target);
    site.observe(Some(options), &targets, prepare, move |entry, observer| {
        let target = entry.target();
        let Some(element) = WebElement::from_element(target.clone()) else {
            return;
        };
        if animator.on_intersection(&element, entry.is_intersecting()) == Observation::Stop {
            observer.unobserve(&target);
        }
    })
}

fn install_lazy_images(site: &mut Site, document: &Document) -> Result<(), DomError> {
    let images = query_all(document, LAZY_TARGETS)?;
    if images.is_empty() {
        return Ok(());
    }
    let loader = LazyImageLoader;
    tracing::debug!("lazy images: observing {}", images.len());
    let defer = move |image: &WebElement| {
        loader.defer(image);
    };
    site.observe(None, &images, defer, move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let target = entry.target();
        if let Some(element) = WebElement::from_element(target.clone()) {
            loader.load(&element);
        }
        observer.unobserve(&target);
    })
}

fn install_image_fallback(site: &mut Site, document: &Document, config: &SiteConfig) -> Result<(), DomError> {
    let fallback = Rc::new(ImageFallback::new(config.image_placeholder_text.clone()));
    for image in query_all(document, FALLBACK_TARGETS)? {
        let on_error = fallback.clone();
        let failed = image.clone();
        site.listen_on(&image, "error", move |_event| on_error.on_error(&failed))?;

        let on_load = fallback.clone();
        let loaded = image.clone();
        site.listen_on(&image, "load", move |_event| on_load.on_load(&loaded))?;
    }
    Ok(())
}

fn install_family_pager(
    site: &mut Site,
    document: &Document,
    config: &SiteConfig,
    scheduler: &Rc<dyn Scheduler>,
) -> Result<(), DomError> {
    if query(document, FAMILY_GRID)?.is_none() {
        return Ok(());
    }
    let dots = query_all(document, PAGE_DOT)?;
    let prev = by_id(document, PREV_BUTTON_ID);
    let next = by_id(document, NEXT_BUTTON_ID);
    let pager = FamilyPager::new(
        query_all(document, FAMILY_CARD)?,
        dots.clone(),
        prev.clone(),
        next.clone(),
        config.total_family_pages,
        PagerTiming {
            show_delay_ms: config.family_show_delay_ms,
            activate_delay_ms: config.family_activate_delay_ms,
        },
        scheduler.clone(),
    );
    let pager = Rc::new(RefCell::new(pager));
    pager.borrow_mut().start();

    for (button, direction) in [(prev, -1), (next, 1)] {
        let Some(button) = button else {
            continue;
        };
        let on_click = pager.clone();
        site.listen_on(&button, "click", move |_event| {
            on_click.borrow_mut().change_page(direction);
        })?;
    }
    for (index, dot) in dots.iter().enumerate() {
        let on_click = pager.clone();
        let page = index as u32 + 1;
        site.listen_on(dot, "click", move |_event| {
            on_click.borrow_mut().go_to(page);
        })?;
    }
    Ok(())
}

fn install_lightbox(
    site: &mut Site,
    document: &Document,
    scroll_lock: &SharedScrollLock<WebElement>,
) -> Result<Option<SharedLightbox>, DomError> {
    let (Some(overlay), Some(image)) = (
        by_id(document, lightbox::OVERLAY_ID),
        by_id(document, lightbox::IMAGE_ID),
    ) else {
        return Ok(None);
    };
    let gallery = query_all(document, lightbox::GALLERY_IMAGES)?;
    let parts = LightboxParts {
        overlay: overlay.clone(),
        image,
        caption: by_id(document, lightbox::CAPTION_ID),
        prev: by_id(document, lightbox::PREV_ID),
        next: by_id(document, lightbox::NEXT_ID),
    };
    let prev = parts.prev.clone();
    let next = parts.next.clone();
    let controller = Rc::new(RefCell::new(Lightbox::new(parts, gallery.clone(), scroll_lock.clone())));
    tracing::debug!("lightbox: {} gallery images", controller.borrow().len());

    for (index, photo) in gallery.iter().enumerate() {
        let on_click = controller.clone();
        site.listen_on(photo, "click", move |_event| {
            on_click.borrow_mut().open_at(index);
        })?;
    }
    for (button, direction) in [(prev, -1), (next, 1)] {
        let Some(button) = button else {
            continue;
        };
        let on_click = controller.clone();
        site.listen_on(&button, "click", move |event| {
            event.stop_propagation();
            on_click.borrow_mut().change(direction);
        })?;
    }
    if let Some(close) = by_id(document, lightbox::CLOSE_ID) {
        let on_click = controller.clone();
        site.listen_on(&close, "click", move |event| {
            event.stop_propagation();
            on_click.borrow_mut().close();
        })?;
    }
    let on_backdrop = controller.clone();
    let backdrop = overlay.clone();
    site.listen_on(&overlay, "click", move |event| {
        let on_backdrop_itself = event
            .target()
            .map(|target| backdrop.is_target(&target))
            .unwrap_or(false);
        on_backdrop.borrow_mut().on_overlay_click(!on_backdrop_itself);
    })?;
    Ok(Some(controller))
}

fn install_media_modal(
    site: &mut Site,
    document: &Document,
    scroll_lock: &SharedScrollLock<WebElement>,
) -> Result<Option<SharedModal>, DomError> {
    let Some(overlay) = by_id(document, media_modal::OVERLAY_ID) else {
        return Ok(None);
    };
    let parts = MediaModalParts {
        overlay: overlay.clone(),
        image: by_id(document, media_modal::IMAGE_ID),
        video: by_id(document, media_modal::VIDEO_ID),
        caption: by_id(document, media_modal::CAPTION_ID),
    };
    let controller = Rc::new(RefCell::new(MediaModal::new(parts, scroll_lock.clone())));

    for video in query_all(document, media_modal::VIDEO_TRIGGERS)? {
        let on_click = controller.clone();
        let source = video.clone();
        site.listen_on(&video, "click", move |event| {
            event.prevent_default();
            let caption = caption_of(&source);
            on_click.borrow_mut().open_video(&source, &caption);
        })?;
    }
    for trigger in query_all(document, media_modal::IMAGE_TRIGGERS)? {
        let on_click = controller.clone();
        let source = trigger.clone();
        site.listen_on(&trigger, "click", move |event| {
            let Some(url) = source.non_empty_attribute(media_modal::IMAGE_TRIGGER_ATTRIBUTE) else {
                return;
            };
            event.prevent_default();
            let caption = caption_of(&source);
            on_click.borrow_mut().open_image(&url, &caption);
        })?;
    }
    if let Some(close) = by_id(document, media_modal::CLOSE_ID) {
        let on_click = controller.clone();
        site.listen_on(&close, "click", move |event| {
            event.stop_propagation();
            on_click.borrow_mut().close();
        })?;
    }
    let on_backdrop = controller.clone();
    let backdrop = overlay.clone();
    site.listen_on(&overlay, "click", move |event| {
        let on_backdrop_itself = event
            .target()
            .map(|target| backdrop.is_target(&target))
            .unwrap_or(false);
        on_backdrop.borrow_mut().on_overlay_click(!on_backdrop_itself);
    })?;
    Ok(Some(controller))
}

fn caption_of(element: &WebElement) -> String {
    element
        .non_empty_attribute("data-caption")
        .or_else(|| element.non_empty_attribute("title"))
        .or_else(|| element.attribute("alt"))
        .unwrap_or_default()
}

fn install_keyboard(
    site: &mut Site,
    document: &Document,
    body: WebElement,
    theme: Option<SharedTheme>,
    lightbox: Option<SharedLightbox>,
    modal: Option<SharedModal>,
) -> Result<(), DomError> {
    let mode = Rc::new(KeyboardMode::new(body));
    let target: &EventTarget = document.as_ref();

    let key_mode = mode.clone();
    site.listen(target, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = event.key();
        key_mode.on_key(&key);

        if is_toggle_shortcut(&key, event.ctrl_key(), event.meta_key(), event.shift_key()) {
            if let Some(theme) = &theme {
                event.prevent_default();
                theme.borrow_mut().toggle();
            }
            return;
        }
        if let Some(lightbox) = &lightbox {
            if lightbox.borrow_mut().handle_key(&key) {
                event.prevent_default();
                return;
            }
        }
        if let Some(modal) = &modal {
            if modal.borrow_mut().handle_key(&key) {
                event.prevent_default();
            }
        }
    })?;

    site.listen(target, "mousedown", move |_event| mode.on_mouse_down())
}

fn install_menu(site: &mut Site, document: &Document) -> Result<(), DomError> {
    let (Some(button), Some(links)) = (query(document, MENU_BUTTON)?, query(document, NAV_LINKS)?) else {
        return Ok(());
    };
    site.listen_on(&button, "click", move |_event| {
        toggle_mobile_menu(&links);
    })
}

fn install_ripple(
    site: &mut Site,
    document: &Document,
    config: &SiteConfig,
    scheduler: &Rc<dyn Scheduler>,
) -> Result<(), DomError> {
    let ripple = Rc::new(Ripple::new(scheduler.clone(), config.ripple_duration_ms));
    for button in query_all(document, RIPPLE_TARGETS)? {
        let on_click = ripple.clone();
        let host = button.clone();
        site.listen_on(&button, "click", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let client = (f64::from(event.client_x()), f64::from(event.client_y()));
            on_click.spawn(&host, client, host.offset());
        })?;
    }
    Ok(())
}

fn install_anchor_scrolling(site: &mut Site, document: &Document) -> Result<(), DomError> {
    for link in query_all(document, ANCHOR_LINKS)? {
        let source = link.clone();
        let lookup = document.clone();
        site.listen_on(&link, "click", move |event| {
            event.prevent_default();
            let href = source.attribute("href").unwrap_or_default();
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            let Ok(Some(target)) = lookup.query_selector(selector) else {
                return;
            };
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            options.set_block(web_sys::ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    Ok(())
}
