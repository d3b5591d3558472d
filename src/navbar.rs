use crate::dom::ElementHandle;

pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";

pub struct NavbarWatcher<E: ElementHandle> {
    navbar: E,
    threshold: f64,
}

impl<E: ElementHandle> NavbarWatcher<E> {
    pub fn new(navbar: E, threshold: f64) -> Self {
        Self { navbar, threshold }
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        if scroll_y > self.threshold {
            self.navbar.add_class(SCROLLED_CLASS);
        } else {
            self.navbar.remove_class(SCROLLED_CLASS);
        }
    }
}
