//! Small indicator of the table socket's state.

use dioxus::prelude::*;

use crate::LinkState;

fn badge(link: LinkState) -> (&'static str, &'static str) {
    match link {
        LinkState::Connecting => ("Connecting…", "bg-gray-600"),
        LinkState::Connected => ("Connected", "bg-emerald-700"),
        LinkState::Reconnecting => ("Reconnecting…", "bg-amber-600"),
        LinkState::Lost => ("Disconnected", "bg-red-700"),
    }
}

#[component]
pub fn ConnectionBadge(link: Signal<LinkState>) -> Element {
    let (label, color) = badge(*link.read());

    rsx! {
        span { class: "px-2 py-0.5 rounded text-xs font-semibold text-white {color}",
            "{label}"
        }
    }
}
