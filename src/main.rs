#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod affordances;
mod app;
mod config;
mod dom;
mod error;
mod family_pager;
mod image_fallback;
mod lazy_images;
mod lightbox;
mod media_modal;
mod navbar;
mod reveal;
mod schedule;
mod scroll_lock;
mod storage;
mod theme;
#[cfg(target_arch = "wasm32")]
mod wiring;

fn main() {
    dioxus::launch(app::App);
}
