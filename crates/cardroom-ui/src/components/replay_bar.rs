//! Previous/next controls for a hand history.

use cardroom_core::replay::{ReplayStatus, ReplayStep};
use dioxus::prelude::*;

use crate::UiMessage;

#[component]
pub fn ReplayBar(status: Signal<ReplayStatus>) -> Element {
    let status = *status.read();
    let coroutine = use_coroutine_handle::<UiMessage>();

    rsx! {
        div { class: "flex items-center justify-center gap-3 p-2",
            button {
                id: "previous",
                class: "px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 text-white disabled:opacity-40",
                disabled: status.previous_disabled,
                onclick: move |_| coroutine.send(UiMessage::Replay(ReplayStep::Previous)),
                "Previous"
            }
            span { class: "text-sm tabular-nums",
                span { id: "index", "{status.position}" }
                " / "
                span { id: "max-index", "{status.total}" }
            }
            button {
                id: "next",
                class: "px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 text-white disabled:opacity-40",
                disabled: status.next_disabled,
                onclick: move |_| coroutine.send(UiMessage::Replay(ReplayStep::Next)),
                "Next"
            }
        }
    }
}
