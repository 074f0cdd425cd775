use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Cards and chips
// ---------------------------------------------------------------------------

/// Card suit as sent by the server (`"c"`, `"d"`, `"h"`, `"s"`, or `"?"`
/// for a card the viewer is not allowed to see).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "c")]
    Club,
    #[serde(rename = "d")]
    Diamond,
    #[serde(rename = "h")]
    Heart,
    #[serde(rename = "s")]
    Spade,
    #[serde(rename = "?")]
    Unknown,
}

impl Suit {
    /// Glyph drawn after the rank.
    pub fn glyph(self) -> &'static str {
        match self {
            Suit::Club => "♣",
            Suit::Diamond => "♦",
            Suit::Heart => "♥",
            Suit::Spade => "♠",
            Suit::Unknown => " ",
        }
    }
}

/// Serializable card representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// `"2"`–`"9"`, `"T"`, `"J"`, `"Q"`, `"K"`, `"A"`, or `"?"`.
    pub rank: String,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: &str, suit: Suit) -> Self {
        Self {
            rank: rank.to_string(),
            suit,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.glyph())
    }
}

/// A chip amount exactly as the server encoded it.
///
/// The server may be configured for fractional amounts, so the JSON number
/// is kept verbatim and only interpreted for display and zero checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chips(serde_json::Number);

impl Chips {
    pub fn is_zero(&self) -> bool {
        self.0.as_f64() == Some(0.0)
    }
}

impl From<u64> for Chips {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// `(is_completion, has_bets, min_amount, max_amount)` for the
/// complete/bet/raise-to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion(pub bool, pub bool, pub Chips, pub Chips);

impl Completion {
    pub fn is_completion(&self) -> bool {
        self.0
    }

    pub fn has_bets(&self) -> bool {
        self.1
    }

    pub fn min(&self) -> &Chips {
        &self.2
    }

    pub fn max(&self) -> &Chips {
        &self.3
    }
}

/// Per-action legality for the viewing user. `None` means the action is not
/// available in this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDescriptor {
    /// Seat indices that can be joined.
    pub j: Option<Vec<usize>>,
    pub l: Option<bool>,
    pub s: Option<bool>,
    pub b: Option<bool>,
    /// `(min, max)` starting stack.
    pub brtr: Option<(Chips, Chips)>,
    pub sd: Option<bool>,
    pub f: Option<bool>,
    /// Checking or calling amount.
    pub cc: Option<Chips>,
    /// Bring-in amount.
    pub pb: Option<Chips>,
    pub cbr: Option<Completion>,
    /// Whether the hand can win now if shown.
    pub sm: Option<bool>,
}

/// One immutable table snapshot pushed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub names: Vec<Option<String>>,
    pub button: Option<usize>,
    pub bets: Vec<Option<Chips>>,
    pub stacks: Vec<Option<Chips>>,
    pub pots: Vec<Chips>,
    pub holes: Vec<Option<Vec<Card>>>,
    /// Per dealt hole card: `false` face down, `true` face up.
    pub hole_statuses: Vec<bool>,
    pub board: Vec<Card>,
    /// Number of board slots the game deals in total.
    pub board_count: usize,
    /// `(seat index, action text)` of the most recent action.
    pub previous_action: Option<(usize, String)>,
    pub actor: Option<usize>,
    pub action: ActionDescriptor,
}

impl Frame {
    pub fn seat_count(&self) -> usize {
        self.names.len()
    }
}

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// Every action a player can initiate from the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Join,
    Leave,
    SitOut,
    BeBack,
    BuyRebuyTopOffOrRatHole,
    StandPatOrDiscard,
    Fold,
    CheckOrCall,
    PostBringIn,
    CompleteBetOrRaiseTo,
    ShowOrMuckHoleCards,
}

/// The text field an action reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    SeatIndex,
    StackAmount,
    DiscardCards,
    BetAmount,
    ShownCards,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::SeatIndex,
        InputField::StackAmount,
        InputField::DiscardCards,
        InputField::BetAmount,
        InputField::ShownCards,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Placeholder shown in an empty field.
    pub fn placeholder(self) -> &'static str {
        match self {
            InputField::SeatIndex => "Seat",
            InputField::StackAmount => "Amount",
            InputField::DiscardCards => "Cards",
            InputField::BetAmount => "Amount",
            InputField::ShownCards => "Cards",
        }
    }
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::Join,
        ActionKind::Leave,
        ActionKind::SitOut,
        ActionKind::BeBack,
        ActionKind::BuyRebuyTopOffOrRatHole,
        ActionKind::StandPatOrDiscard,
        ActionKind::Fold,
        ActionKind::CheckOrCall,
        ActionKind::PostBringIn,
        ActionKind::CompleteBetOrRaiseTo,
        ActionKind::ShowOrMuckHoleCards,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Short wire tag understood by the table controller.
    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Join => "j",
            ActionKind::Leave => "l",
            ActionKind::SitOut => "s",
            ActionKind::BeBack => "b",
            ActionKind::BuyRebuyTopOffOrRatHole => "brtr",
            ActionKind::StandPatOrDiscard => "sd",
            ActionKind::Fold => "f",
            ActionKind::CheckOrCall => "cc",
            ActionKind::PostBringIn => "pb",
            ActionKind::CompleteBetOrRaiseTo => "cbr",
            ActionKind::ShowOrMuckHoleCards => "sm",
        }
    }

    /// The input this action reads, if any.
    pub fn input(self) -> Option<InputField> {
        match self {
            ActionKind::Join => Some(InputField::SeatIndex),
            ActionKind::BuyRebuyTopOffOrRatHole => Some(InputField::StackAmount),
            ActionKind::StandPatOrDiscard => Some(InputField::DiscardCards),
            ActionKind::CompleteBetOrRaiseTo => Some(InputField::BetAmount),
            ActionKind::ShowOrMuckHoleCards => Some(InputField::ShownCards),
            ActionKind::Leave
            | ActionKind::SitOut
            | ActionKind::BeBack
            | ActionKind::Fold
            | ActionKind::CheckOrCall
            | ActionKind::PostBringIn => None,
        }
    }
}

/// A single outbound player command, e.g. `cbr 300` or `f`.
///
/// No legality checks happen here: the server is the only authority and the
/// next frame confirms or rejects the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: ActionKind,
    pub value: String,
}

impl Command {
    pub fn new(kind: ActionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn bare(kind: ActionKind) -> Self {
        Self::new(kind, String::new())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.trim();
        if value.is_empty() {
            f.write_str(self.kind.tag())
        } else {
            write!(f, "{} {}", self.kind.tag(), value)
        }
    }
}

/// Commands travel as a JSON string holding the command text.
impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Messages pushed by the table server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    /// One or more frames to append to the presentation queue.
    #[serde(alias = "data")]
    Update {
        #[serde(alias = "data")]
        frames: Vec<Frame>,
    },
    /// A one-shot message for the user.
    #[serde(alias = "message")]
    Notify { message: String },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed server payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Deserialize a raw text frame as a [`ServerEvent`].
pub fn parse_server_event(text: &str) -> Result<ServerEvent, ProtocolError> {
    Ok(serde_json::from_str(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_text_joins_tag_and_value() {
        assert_eq!(Command::new(ActionKind::Join, "3").to_string(), "j 3");
        assert_eq!(
            Command::new(ActionKind::CompleteBetOrRaiseTo, " 250 ").to_string(),
            "cbr 250"
        );
        assert_eq!(Command::bare(ActionKind::Fold).to_string(), "f");
    }

    #[test]
    fn empty_show_value_mucks() {
        let muck = Command::new(ActionKind::ShowOrMuckHoleCards, "  ");
        assert_eq!(muck.to_string(), "sm");
        let show = Command::new(ActionKind::ShowOrMuckHoleCards, "AsKd");
        assert_eq!(show.to_string(), "sm AsKd");
    }

    #[test]
    fn commands_serialize_as_json_strings() {
        let json = serde_json::to_string(&Command::new(ActionKind::Join, "2")).unwrap();
        assert_eq!(json, r#""j 2""#);
        let json = serde_json::to_string(&Command::bare(ActionKind::CheckOrCall)).unwrap();
        assert_eq!(json, r#""cc""#);
    }

    #[test]
    fn every_kind_has_a_distinct_tag() {
        let mut tags: Vec<_> = ActionKind::ALL.iter().map(|k| k.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ActionKind::ALL.len());
    }

    #[test]
    fn parses_update_with_frames() {
        let raw = r#"{
            "type": "update",
            "frames": [{
                "names": ["alice", null],
                "button": 0,
                "bets": [2, null],
                "stacks": [198, null],
                "pots": [0],
                "holes": [[{"rank": "A", "suit": "s"}, {"rank": "?", "suit": "?"}], null],
                "hole_statuses": [false, false],
                "board": [],
                "board_count": 5,
                "previous_action": [0, "pb 2"],
                "action": {"j": [1], "cc": 0, "cbr": [false, true, 4, 198]}
            }]
        }"#;
        let ServerEvent::Update { frames } = parse_server_event(raw).unwrap() else {
            panic!("expected update");
        };
        let frame = &frames[0];
        assert_eq!(frame.seat_count(), 2);
        assert_eq!(frame.button, Some(0));
        assert_eq!(frame.previous_action, Some((0, "pb 2".to_string())));
        assert_eq!(frame.holes[0].as_ref().unwrap()[0], Card::new("A", Suit::Spade));
        assert_eq!(frame.action.j, Some(vec![1]));
        assert!(frame.action.cc.as_ref().unwrap().is_zero());
        let cbr = frame.action.cbr.as_ref().unwrap();
        assert!(!cbr.is_completion());
        assert!(cbr.has_bets());
        assert_eq!(cbr.max().to_string(), "198");
        assert_eq!(frame.action.f, None);
    }

    #[test]
    fn accepts_legacy_data_messages() {
        let raw = r#"{"type": "data", "data": [{"names": [null, null, null]}]}"#;
        let event = parse_server_event(raw).unwrap();
        let ServerEvent::Update { frames } = event else {
            panic!("expected update");
        };
        assert_eq!(frames[0].seat_count(), 3);
        assert_eq!(frames[0].action, ActionDescriptor::default());
    }

    #[test]
    fn parses_notify_ignoring_recipients() {
        let raw = r#"{"type": "notify", "users": [""], "message": "You are not an authenticated user."}"#;
        assert_eq!(
            parse_server_event(raw).unwrap(),
            ServerEvent::Notify {
                message: "You are not an authenticated user.".to_string()
            }
        );
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(parse_server_event("not json").is_err());
        assert!(parse_server_event(r#"{"type": "chat"}"#).is_err());
        assert!(parse_server_event(r#"{"type": "update", "frames": 3}"#).is_err());
    }

    #[test]
    fn fractional_chips_keep_their_encoding() {
        let chips: Chips = serde_json::from_str("2.5").unwrap();
        assert_eq!(chips.to_string(), "2.5");
        assert!(!chips.is_zero());
        assert_eq!(Chips::from(40).to_string(), "40");
    }
}
