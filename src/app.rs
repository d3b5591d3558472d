use dioxus::prelude::*;

use crate::config::use_site_config;

#[component]
pub fn App() -> Element {
    let config_resource = use_site_config();

    #[cfg(target_arch = "wasm32")]
    let mut site = use_signal(|| None::<crate::wiring::Site>);
    #[cfg(not(target_arch = "wasm32"))]
    let _site = config_resource;

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            let Some(config) = config_resource() else {
                return;
            };
            if site.peek().is_some() {
                return;
            }
            tracing::debug!("site: install");
            match crate::wiring::install(&config) {
                Ok(installed) => site.set(Some(installed)),
                Err(err) => tracing::warn!("site: behaviour unavailable ({err})"),
            }
        });

        use_drop(move || {
            if let Ok(mut slot) = site.try_write() {
                if slot.take().is_some() {
                    tracing::debug!("site: detached");
                }
            }
        });
    }

    rsx! {}
}
