//! Button and input state derived from the newest frame's action
//! descriptor.

use crate::protocol::{ActionDescriptor, ActionKind, InputField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBox {
    pub value: String,
    pub disabled: bool,
}

/// One [`Control`] per [`ActionKind`] and one [`InputBox`] per
/// [`InputField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    controls: [Control; ActionKind::ALL.len()],
    inputs: [InputBox; InputField::ALL.len()],
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPanel {
    /// Panel with every action unavailable.
    pub fn new() -> Self {
        Self::from_descriptor(&ActionDescriptor::default())
    }

    pub fn from_descriptor(action: &ActionDescriptor) -> Self {
        let mut panel = Self {
            controls: Default::default(),
            inputs: Default::default(),
        };
        panel.refresh(action);
        panel
    }

    /// Rewrite every label, every enabled flag and every input default.
    pub fn refresh(&mut self, action: &ActionDescriptor) {
        self.set(
            ActionKind::Join,
            "Join",
            action.j.as_ref().map(|seats| {
                seats
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
        );
        self.set(ActionKind::Leave, "Leave", action.l.map(|_| String::new()));
        self.set(ActionKind::SitOut, "Sit out", action.s.map(|_| String::new()));
        self.set(ActionKind::BeBack, "I'm back", action.b.map(|_| String::new()));
        self.set(
            ActionKind::BuyRebuyTopOffOrRatHole,
            "Override stack",
            action
                .brtr
                .as_ref()
                .map(|(min, max)| format!("{min} - {max}")),
        );
        self.set(
            ActionKind::StandPatOrDiscard,
            "Stand pat/Discard",
            action.sd.map(|_| String::new()),
        );
        self.set(ActionKind::Fold, "Fold", action.f.map(|_| String::new()));

        let check_or_call = match &action.cc {
            None => "Check/Call".to_string(),
            Some(amount) if amount.is_zero() => "Check".to_string(),
            Some(amount) => format!("Call {amount}"),
        };
        self.set(
            ActionKind::CheckOrCall,
            &check_or_call,
            action.cc.as_ref().map(|_| String::new()),
        );

        let bring_in = match &action.pb {
            None => "Bring-in".to_string(),
            Some(amount) => format!("Bring-in {amount}"),
        };
        self.set(
            ActionKind::PostBringIn,
            &bring_in,
            action.pb.as_ref().map(|_| String::new()),
        );

        let completion = match &action.cbr {
            None => "Complete/Bet/Raise to",
            Some(cbr) if cbr.is_completion() => "Complete",
            Some(cbr) if cbr.has_bets() => "Raise",
            Some(_) => "Bet",
        };
        self.set(
            ActionKind::CompleteBetOrRaiseTo,
            completion,
            action
                .cbr
                .as_ref()
                .map(|cbr| format!("{} - {}", cbr.min(), cbr.max())),
        );

        self.set(
            ActionKind::ShowOrMuckHoleCards,
            "Show/Muck",
            action
                .sm
                .map(|winning| if winning { "-" } else { "" }.to_string()),
        );
    }

    /// `default` is `None` when the action is unavailable; that disables
    /// the button and clears and disables its input.
    fn set(&mut self, kind: ActionKind, label: &str, default: Option<String>) {
        let disabled = default.is_none();
        let control = &mut self.controls[kind.index()];
        control.label = label.to_string();
        control.disabled = disabled;

        if let Some(field) = kind.input() {
            let input = &mut self.inputs[field.index()];
            input.value = default.unwrap_or_default();
            input.disabled = disabled;
        }
    }

    pub fn button(&self, kind: ActionKind) -> &Control {
        &self.controls[kind.index()]
    }

    pub fn input(&self, field: InputField) -> &InputBox {
        &self.inputs[field.index()]
    }

    pub fn buttons(&self) -> impl Iterator<Item = (ActionKind, &Control)> {
        ActionKind::ALL.into_iter().zip(self.controls.iter())
    }

    /// Replace the text of an enabled input. Edits to a disabled input are
    /// ignored, as a browser would.
    pub fn set_input(&mut self, field: InputField, value: impl Into<String>) -> bool {
        let input = &mut self.inputs[field.index()];
        if input.disabled {
            return false;
        }
        input.value = value.into();
        true
    }

    /// Read an input and clear it.
    pub fn take_input(&mut self, field: InputField) -> String {
        std::mem::take(&mut self.inputs[field.index()].value)
    }
}
