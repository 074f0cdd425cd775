//! Action panel: one button per player action, with its input where the
//! action takes a value.

use cardroom_core::controls::ControlPanel;
use cardroom_core::protocol::{ActionKind, InputField};
use dioxus::prelude::*;

use crate::UiMessage;

/// DOM id of an action's input, e.g. `cbr-amount`.
fn input_id(kind: ActionKind, field: InputField) -> String {
    let suffix = match field {
        InputField::SeatIndex => "seat-index",
        InputField::StackAmount | InputField::BetAmount => "amount",
        InputField::DiscardCards | InputField::ShownCards => "cards",
    };
    format!("{}-{suffix}", kind.tag())
}

#[component]
pub fn ActionPanel(panel: Signal<ControlPanel>) -> Element {
    let panel = panel.read();
    let coroutine = use_coroutine_handle::<UiMessage>();

    rsx! {
        div { class: "flex flex-wrap items-center gap-2 p-2",
            for (kind, control) in panel.buttons() {
                div { key: "{kind.tag()}", class: "flex items-center gap-1",
                    if let Some(field) = kind.input() {
                        {
                            let input = panel.input(field);
                            rsx! {
                                input {
                                    id: input_id(kind, field),
                                    class: "w-28 px-2 py-1 rounded bg-gray-700 text-white disabled:opacity-50",
                                    r#type: "text",
                                    placeholder: field.placeholder(),
                                    value: "{input.value}",
                                    disabled: input.disabled,
                                    oninput: move |evt| {
                                        coroutine.send(UiMessage::Input {
                                            field,
                                            value: evt.value(),
                                        });
                                    },
                                }
                            }
                        }
                    }
                    button {
                        id: kind.tag(),
                        class: "px-3 py-1 rounded bg-emerald-700 hover:bg-emerald-600 text-white font-semibold disabled:opacity-40 disabled:cursor-not-allowed",
                        disabled: control.disabled,
                        onclick: move |_| coroutine.send(UiMessage::Dispatch(kind)),
                        "{control.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_ids_match_the_page_convention() {
        assert_eq!(
            input_id(ActionKind::Join, InputField::SeatIndex),
            "j-seat-index"
        );
        assert_eq!(
            input_id(ActionKind::CompleteBetOrRaiseTo, InputField::BetAmount),
            "cbr-amount"
        );
        assert_eq!(
            input_id(ActionKind::ShowOrMuckHoleCards, InputField::ShownCards),
            "sm-cards"
        );
    }
}
