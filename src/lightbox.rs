use crate::dom::ElementHandle;
use crate::lazy_images::resolved_source;
use crate::scroll_lock::{LockHolder, SharedScrollLock};

pub const GALLERY_IMAGES: &str = ".trip-photo img";
pub const OVERLAY_ID: &str = "lightbox";
pub const IMAGE_ID: &str = "lightbox-img";
pub const CAPTION_ID: &str = "lightbox-caption";
pub const PREV_ID: &str = "lightbox-prev";
pub const NEXT_ID: &str = "lightbox-next";
pub const CLOSE_ID: &str = "lightbox-close";

pub struct LightboxParts<E: ElementHandle> {
    pub overlay: E,
    pub image: E,
    pub caption: Option<E>,
    pub prev: Option<E>,
    pub next: Option<E>,
}

// Gallery is fixed at construction.
pub struct Lightbox<E: ElementHandle> {
    parts: LightboxParts<E>,
    gallery: Vec<E>,
    index: usize,
    open: bool,
    scroll_lock: SharedScrollLock<E>,
}

impl<E: ElementHandle> Lightbox<E> {
    pub fn new(parts: LightboxParts<E>, gallery: Vec<E>, scroll_lock: SharedScrollLock<E>) -> Self {
        Self {
            parts,
            gallery,
            index: 0,
            open: false,
            scroll_lock,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.gallery.len()
    }

    pub fn open(&mut self, source: &str, caption: &str, index: usize) {
        self.index = index.min(self.gallery.len().saturating_sub(1));
        self.display(source, caption);
        self.parts.overlay.show("flex");
        self.parts.overlay.set_attribute("aria-hidden", "false");
        self.scroll_lock.borrow_mut().acquire(LockHolder::Lightbox);

        let navigable = self.gallery.len() > 1;
        for button in [&self.parts.prev, &self.parts.next].into_iter().flatten() {
            if navigable {
                button.show("block");
            } else {
                button.hide();
            }
        }
        self.open = true;
        tracing::debug!("lightbox: open at {}", self.index);
    }

    pub fn open_at(&mut self, index: usize) -> bool {
        let Some(image) = self.gallery.get(index) else {
            return false;
        };
        let source = resolved_source(image).unwrap_or_default();
        let caption = caption_of(image);
        self.open(&source, &caption, index);
        true
    }

    pub fn change(&mut self, direction: i32) -> Option<usize> {
        if !self.open || self.gallery.is_empty() {
            return None;
        }
        let len = self.gallery.len() as i64;
        self.index = (self.index as i64 + i64::from(direction)).rem_euclid(len) as usize;
        let image = &self.gallery[self.index];
        let caption = caption_of(image);
        let source = resolved_source(image).unwrap_or_default();
        self.display(&source, &caption);
        Some(self.index)
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.parts.overlay.hide();
        self.parts.overlay.set_attribute("aria-hidden", "true");
        self.scroll_lock.borrow_mut().release(LockHolder::Lightbox);
        self.open = false;
        tracing::debug!("lightbox: closed");
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.open {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowLeft" => {
                self.change(-1);
            }
            "ArrowRight" => {
                self.change(1);
            }
            _ => return false,
        }
        true
    }

    pub fn on_overlay_click(&mut self, inside_content: bool) {
        if !inside_content {
            self.close();
        }
    }

    fn display(&self, source: &str, caption: &str) {
        if source.is_empty() {
            self.parts.image.remove_attribute("src");
        } else {
            self.parts.image.set_attribute("src", source);
        }
        self.parts.image.set_attribute("alt", caption);
        if let Some(element) = &self.parts.caption {
            element.set_text(caption);
        }
    }
}

fn caption_of<E: ElementHandle>(image: &E) -> String {
    image
        .non_empty_attribute("data-caption")
        .or_else(|| image.attribute("alt"))
        .unwrap_or_default()
}
