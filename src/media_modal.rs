use crate::dom::{ElementHandle, MediaHandle};
use crate::scroll_lock::{LockHolder, SharedScrollLock};

pub const OVERLAY_ID: &str = "media-modal";
pub const IMAGE_ID: &str = "media-modal-image";
pub const VIDEO_ID: &str = "media-modal-video";
pub const CAPTION_ID: &str = "media-modal-caption";
pub const CLOSE_ID: &str = "media-modal-close";
pub const VIDEO_TRIGGERS: &str = ".trip-video video";
pub const IMAGE_TRIGGERS: &str = "[data-modal-src]";
pub const IMAGE_TRIGGER_ATTRIBUTE: &str = "data-modal-src";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

pub struct MediaModalParts<E: MediaHandle> {
    pub overlay: E,
    pub image: Option<E>,
    pub video: Option<E>,
    pub caption: Option<E>,
}

pub struct MediaModal<E: MediaHandle> {
    parts: MediaModalParts<E>,
    showing: Option<MediaKind>,
    scroll_lock: SharedScrollLock<E>,
}

impl<E: MediaHandle> MediaModal<E> {
    pub fn new(parts: MediaModalParts<E>, scroll_lock: SharedScrollLock<E>) -> Self {
        Self {
            parts,
            showing: None,
            scroll_lock,
        }
    }

    pub fn showing(&self) -> Option<MediaKind> {
        self.showing
    }

    pub fn open_image(&mut self, url: &str, caption: &str) -> bool {
        let Some(image) = self.parts.image.clone() else {
            return false;
        };
        self.reset_content();
        image.set_attribute("src", url);
        image.set_attribute("alt", caption);
        image.show("block");
        if let Some(video) = &self.parts.video {
            video.hide();
        }
        self.reveal(MediaKind::Image, caption);
        true
    }

    pub fn open_video(&mut self, source: &E, caption: &str) -> bool {
        let Some(video) = self.parts.video.clone() else {
            return false;
        };
        let Some(url) = video_source(source) else {
            tracing::debug!("media modal: video without a source");
            return false;
        };
        self.reset_content();
        video.set_attribute("src", &url);
        video.show("block");
        if let Some(image) = &self.parts.image {
            image.hide();
        }
        self.reveal(MediaKind::Video, caption);
        video.set_current_time(0.0);
        video.play();
        true
    }

    pub fn close(&mut self) {
        if self.showing.is_none() {
            return;
        }
        self.reset_content();
        self.parts.overlay.hide();
        self.parts.overlay.set_attribute("aria-hidden", "true");
        self.scroll_lock.borrow_mut().release(LockHolder::MediaModal);
        tracing::debug!("media modal: closed");
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.showing.is_none() || key != "Escape" {
            return false;
        }
        self.close();
        true
    }

    pub fn on_overlay_click(&mut self, inside_content: bool) {
        if !inside_content {
            self.close();
        }
    }

    fn reveal(&mut self, kind: MediaKind, caption: &str) {
        if let Some(element) = &self.parts.caption {
            element.set_text(caption);
        }
        self.parts.overlay.show("flex");
        self.parts.overlay.set_attribute("aria-hidden", "false");
        self.scroll_lock.borrow_mut().acquire(LockHolder::MediaModal);
        self.showing = Some(kind);
        tracing::debug!("media modal: showing {kind:?}");
    }

    fn reset_content(&mut self) {
        match self.showing.take() {
            Some(MediaKind::Video) => {
                if let Some(video) = &self.parts.video {
                    video.pause();
                    video.set_current_time(0.0);
                    video.remove_attribute("src");
                    video.reload();
                }
            }
            Some(MediaKind::Image) => {
                if let Some(image) = &self.parts.image {
                    image.remove_attribute("src");
                }
            }
            None => {}
        }
    }
}

pub fn video_source<E: MediaHandle>(video: &E) -> Option<String> {
    video
        .current_src()
        .or_else(|| {
            video
                .child_attribute("source", "src")
                .filter(|src| !src.trim().is_empty())
        })
        .or_else(|| video.non_empty_attribute("src"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::stub::StubElement;
    use crate::scroll_lock::ScrollLock;
    use pretty_assertions::assert_eq;

    fn modal() -> (MediaModal<StubElement>, StubElement) {
        let body = StubElement::new("body");
        let parts = MediaModalParts {
            overlay: StubElement::new("div"),
            image: Some(StubElement::new("img")),
            video: Some(StubElement::new("video")),
            caption: Some(StubElement::new("p")),
        };
        (MediaModal::new(parts, ScrollLock::shared(body.clone())), body)
    }

    #[test]
    fn source_resolution_order() {
        let video = StubElement::new("video")
            .with_attribute("src", "direct.mp4")
            .with_child(StubElement::new("source").with_attribute("src", "nested.mp4"));
        assert_eq!(video_source(&video).as_deref(), Some("nested.mp4"));

        video.set_attribute("currentSrc", "https://example.test/resolved.mp4");
        assert_eq!(
            video_source(&video).as_deref(),
            Some("https://example.test/resolved.mp4")
        );

        let bare = StubElement::new("video").with_attribute("src", "direct.mp4");
        assert_eq!(video_source(&bare).as_deref(), Some("direct.mp4"));
        assert_eq!(video_source(&StubElement::new("video")), None);
    }

    #[test]
    fn video_plays_from_start_and_resets_on_close() {
        let (mut modal, body) = modal();
        let trigger = StubElement::new("video").with_attribute("src", "trips/gory.mp4");
        let player = modal.parts.video.clone().unwrap();
        player.set_current_time(42.0);

        assert!(modal.open_video(&trigger, "Góry"));
        assert_eq!(player.attribute("src").as_deref(), Some("trips/gory.mp4"));
        assert!(player.is_playing());
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(body.style("overflow").as_deref(), Some("hidden"));

        player.set_current_time(12.5);
        modal.close();
        assert!(!player.is_playing());
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.attribute("src"), None);
        assert_eq!(player.reloads(), 1);
        assert_eq!(body.style("overflow"), None);
        assert_eq!(modal.showing(), None);
    }

    #[test]
    fn image_open_and_escape_close() {
        let (mut modal, body) = modal();
        assert!(modal.open_image("places/krakow.jpg", "Kraków"));
        let image = modal.parts.image.clone().unwrap();
        assert_eq!(image.attribute("src").as_deref(), Some("places/krakow.jpg"));
        assert_eq!(modal.showing(), Some(MediaKind::Image));

        assert!(!modal.handle_key("ArrowLeft"));
        assert!(modal.handle_key("Escape"));
        assert_eq!(image.attribute("src"), None);
        assert_eq!(body.style("overflow"), None);
    }

    #[test]
    fn closing_modal_keeps_lock_held_by_lightbox() {
        let body = StubElement::new("body");
        let lock = ScrollLock::shared(body.clone());
        lock.borrow_mut().acquire(LockHolder::Lightbox);
        let parts = MediaModalParts {
            overlay: StubElement::new("div"),
            image: Some(StubElement::new("img")),
            video: None,
            caption: None,
        };
        let mut modal = MediaModal::new(parts, lock.clone());
        modal.open_image("a.jpg", "");
        modal.close();
        assert!(lock.borrow().is_locked());
        assert_eq!(body.style("overflow").as_deref(), Some("hidden"));
    }

    #[test]
    fn switching_from_video_to_image_stops_playback() {
        let (mut modal, _) = modal();
        let trigger = StubElement::new("video").with_attribute("src", "clip.mp4");
        modal.open_video(&trigger, "");
        let player = modal.parts.video.clone().unwrap();
        modal.open_image("still.jpg", "");
        assert!(!player.is_playing());
        assert!(player.is_hidden());
        assert_eq!(modal.showing(), Some(MediaKind::Image));
    }

    #[test]
    fn missing_video_source_keeps_modal_closed() {
        let (mut modal, body) = modal();
        assert!(!modal.open_video(&StubElement::new("video"), ""));
        assert_eq!(modal.showing(), None);
        assert_eq!(body.style("overflow"), None);
    }

    #[test]
    fn outside_click_closes() {
        let (mut modal, _) = modal();
        modal.open_image("a.jpg", "");
        modal.on_overlay_click(true);
        assert_eq!(modal.showing(), Some(MediaKind::Image));
        modal.on_overlay_click(false);
        assert_eq!(modal.showing(), None);
    }
}
