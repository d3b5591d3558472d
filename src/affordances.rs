use std::rc::Rc;

use crate::dom::ElementHandle;
use crate::schedule::Scheduler;

pub const KEYBOARD_CLASS: &str = "keyboard-navigation";
pub const NAV_LINKS: &str = ".nav-links";
pub const MENU_BUTTON: &str = ".mobile-menu-btn";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const RIPPLE_TARGETS: &str = ".btn";
pub const ANCHOR_LINKS: &str = "a[href^=\"#\"]";
const RIPPLE_CLASS: &str = "ripple";
const MENU_OPEN_CLASS: &str = "active";

pub struct KeyboardMode<E: ElementHandle> {
    body: E,
}

impl<E: ElementHandle> KeyboardMode<E> {
    pub fn new(body: E) -> Self {
        Self { body }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Tab" {
            self.body.add_class(KEYBOARD_CLASS);
        }
    }

    pub fn on_mouse_down(&self) {
        self.body.remove_class(KEYBOARD_CLASS);
    }
}

pub fn toggle_mobile_menu<E: ElementHandle>(nav_links: &E) -> bool {
    nav_links.toggle_class(MENU_OPEN_CLASS)
}

pub struct Ripple {
    scheduler: Rc<dyn Scheduler>,
    duration_ms: u32,
}

impl Ripple {
    pub fn new(scheduler: Rc<dyn Scheduler>, duration_ms: u32) -> Self {
        Self {
            scheduler,
            duration_ms,
        }
    }

    pub fn spawn<E: ElementHandle>(&self, button: &E, client: (f64, f64), offset: (f64, f64)) {
        let Some(ripple) = button.append_element("span") else {
            return;
        };
        ripple.add_class(RIPPLE_CLASS);
        ripple.set_style("left", &format!("{}px", client.0 - offset.0));
        ripple.set_style("top", &format!("{}px", client.1 - offset.1));
        self.scheduler
            .defer(self.duration_ms, Box::new(move || ripple.detach()));
    }
}

pub fn anchor_target(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::stub::StubElement;
    use crate::schedule::ManualScheduler;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_enables_and_mouse_disables_keyboard_mode() {
        let body = StubElement::new("body");
        let mode = KeyboardMode::new(body.clone());
        mode.on_key("a");
        assert!(!body.has_class(KEYBOARD_CLASS));
        mode.on_key("Tab");
        assert!(body.has_class(KEYBOARD_CLASS));
        mode.on_mouse_down();
        assert!(!body.has_class(KEYBOARD_CLASS));
    }

    #[test]
    fn mobile_menu_toggles() {
        let links = StubElement::new("ul").with_class("nav-links");
        assert!(toggle_mobile_menu(&links));
        assert!(links.has_class("active"));
        assert!(!toggle_mobile_menu(&links));
        assert!(!links.has_class("active"));
    }

    #[test]
    fn ripple_is_positioned_and_removed() {
        let scheduler = ManualScheduler::default();
        let ripple = Ripple::new(Rc::new(scheduler.clone()), 600);
        let button = StubElement::new("a").with_class("btn");

        ripple.spawn(&button, (130.0, 45.0), (100.0, 20.0));
        let children = button.children();
        assert_eq!(children.len(), 1);
        let span = &children[0];
        assert!(span.has_class(RIPPLE_CLASS));
        assert_eq!(span.style("left").as_deref(), Some("30px"));
        assert_eq!(span.style("top").as_deref(), Some("25px"));

        scheduler.advance(599);
        assert_eq!(button.children().len(), 1);
        scheduler.advance(1);
        assert!(button.children().is_empty());
    }

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#rodzina"), Some("#rodzina"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/galeria"), None);
    }
}
