use dioxus::prelude::*;
use streamview_domain::{ContentItem, DeviceClass};

use crate::infrastructure::platform::create_platform;
use crate::infrastructure::PlayerConfig;
use crate::state::Platform;

pub mod presentation;

const PLAYER_CSS: &str = include_str!("../../assets/player.css");
const MUX_PLAYER_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/@mux/mux-player";

/// Hook to access the Platform from Dioxus context
pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let config = use_context::<PlayerConfig>();
    let catalog = use_context::<Vec<ContentItem>>();

    // Adapters attach DOM listeners, so they must be created inside the runtime.
    use_context_provider(|| create_platform(&config));
    use_context_provider(presentation::state::FeedState::new);

    let conditions = presentation::hooks::use_playback_conditions();
    let device = conditions.read().device;

    rsx! {
        document::Style { {PLAYER_CSS} }
        document::Script { src: MUX_PLAYER_SCRIPT, r#type: "module" }

        {
            match device {
                DeviceClass::Desktop => rsx! {
                    DesktopShell {
                        presentation::views::FeedView { items: catalog.clone() }
                    }
                },
                DeviceClass::Mobile => rsx! {
                    MobileShell {
                        presentation::views::FeedView { items: catalog.clone() }
                    }
                },
            }
        }
    }
}

#[component]
fn DesktopShell(children: Element) -> Element {
    rsx! {
        div {
            class: "sv-shell sv-shell-desktop",
            {children}
        }
    }
}

#[component]
fn MobileShell(children: Element) -> Element {
    rsx! {
        div {
            class: "sv-shell sv-shell-mobile",
            {children}
        }
    }
}
