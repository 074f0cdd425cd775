//! The felt's configuration table.
//!
//! Lengths are world units (1.0 = the smaller canvas dimension, y up),
//! angles are radians, timeouts are seconds. Every key may be omitted from
//! the JSON table; missing keys keep their default.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::geometry::Point;
use crate::protocol::Suit;

/// Text styling resolved from a `*_text_style` / `*_text_font` /
/// `*_text_size` triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font<'a> {
    pub style: &'a str,
    pub family: &'a str,
    pub size: f64,
}

impl Font<'_> {
    /// CSS `font` shorthand for a text height of `pixels`.
    pub fn css(&self, pixels: f64) -> String {
        let style = match self.style {
            "bolditalic" => "italic bold",
            "normal" | "" => "normal",
            other => other,
        };
        let family = match self.family {
            "sans" => "sans-serif",
            "serif" => "serif",
            "mono" | "monospace" => "monospace",
            other => other,
        };
        format!("{style} {pixels}px {family}")
    }
}

/// A labelled box anchored relative to a seat (name, stack, previous
/// action).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate<'a> {
    pub offset: Point,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub box_color: &'a str,
    pub text_color: &'a str,
    pub font: Font<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub background_color: String,

    pub table_border_color: String,
    pub table_felt_color: String,
    pub table_x: f64,
    pub table_y: f64,
    pub table_outer_width: f64,
    pub table_outer_height: f64,
    pub table_inner_width: f64,
    pub table_inner_height: f64,

    pub button_color: String,
    pub button_angle: f64,
    pub button_ring_width: f64,
    pub button_ring_height: f64,
    pub button_diameter: f64,
    pub button_text_color: String,
    pub button_text_style: String,
    pub button_text_font: String,
    pub button_text_size: f64,
    pub button_text: String,

    pub board_x: f64,
    pub board_y: f64,
    pub board_width: f64,
    pub board_height: f64,
    pub board_radius: f64,
    pub board_color: String,
    pub board_pot_text: String,
    pub board_pot_text_color: String,
    pub board_pot_text_style: String,
    pub board_pot_text_font: String,
    pub board_pot_text_size: f64,
    pub board_card_margin: f64,
    pub board_card_height: f64,
    pub board_card_radius: f64,
    pub board_card_color: String,
    pub board_card_text_style: String,
    pub board_card_text_font: String,
    pub board_card_text_size: f64,

    pub bet_ring_width: f64,
    pub bet_ring_height: f64,
    pub bet_angle: f64,
    pub bet_box_color: String,
    pub bet_box_x_padding: f64,
    pub bet_box_height: f64,
    pub bet_box_radius: f64,
    pub bet_text_style: String,
    pub bet_text_color: String,
    pub bet_text_font: String,
    pub bet_text_size: f64,

    pub seat_ring_width: f64,
    pub seat_ring_height: f64,
    pub seat_angle: f64,

    pub hole_x: f64,
    pub hole_y: f64,
    pub hole_width: f64,
    pub hole_height: f64,
    pub hole_radius: f64,
    pub hole_color: String,
    pub hole_card_margin: f64,
    pub hole_card_height: f64,
    pub hole_card_radius: f64,
    pub hole_card_color: String,
    pub hole_card_text_style: String,
    pub hole_card_text_font: String,
    pub hole_card_text_size: f64,

    pub name_x: f64,
    pub name_y: f64,
    pub name_box_width: f64,
    pub name_box_height: f64,
    pub name_box_radius: f64,
    pub name_box_color: String,
    pub name_text_style: String,
    pub name_text_color: String,
    pub name_text_font: String,
    pub name_text_size: f64,

    pub stack_x: f64,
    pub stack_y: f64,
    pub stack_box_width: f64,
    pub stack_box_height: f64,
    pub stack_box_radius: f64,
    pub stack_box_color: String,
    pub stack_text_style: String,
    pub stack_text_color: String,
    pub stack_text_font: String,
    pub stack_text_size: f64,

    pub previous_action_x: f64,
    pub previous_action_y: f64,
    pub previous_action_box_width: f64,
    pub previous_action_box_height: f64,
    pub previous_action_box_radius: f64,
    pub previous_action_box_color: String,
    pub previous_action_text_style: String,
    pub previous_action_text_color: String,
    pub previous_action_text_font: String,
    pub previous_action_text_size: f64,

    pub club_color: String,
    pub diamond_color: String,
    pub heart_color: String,
    pub spade_color: String,
    pub unknown_color: String,

    /// Draw ticks per second.
    pub frame_rate: f64,
    /// Seconds between frame-queue eviction attempts.
    pub shifter_timeout: f64,
    /// Base delay, in seconds, before reopening a closed socket.
    pub watchdog_timeout: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: "gray".into(),

            table_border_color: "saddlebrown".into(),
            table_felt_color: "seagreen".into(),
            table_x: 0.0,
            table_y: 0.0,
            table_outer_width: 0.6,
            table_outer_height: 0.35,
            table_inner_width: 0.55,
            table_inner_height: 0.3,

            button_color: "white".into(),
            button_angle: PI / 24.0,
            button_ring_width: 0.5,
            button_ring_height: 0.25,
            button_diameter: 0.035,
            button_text_color: "black".into(),
            button_text_style: "bold".into(),
            button_text_font: "sans".into(),
            button_text_size: 0.025,
            button_text: "B".into(),

            board_x: 0.0,
            board_y: -0.05,
            board_width: 0.3,
            board_height: 0.025,
            board_radius: 0.0125,
            board_color: "black".into(),
            board_pot_text: "Pot: ".into(),
            board_pot_text_color: "white".into(),
            board_pot_text_style: "bold".into(),
            board_pot_text_font: "sans".into(),
            board_pot_text_size: 0.02,
            board_card_margin: 0.0025,
            board_card_height: 0.06,
            board_card_radius: 0.005,
            board_card_color: "white".into(),
            board_card_text_style: "bold".into(),
            board_card_text_font: "sans".into(),
            board_card_text_size: 0.025,

            bet_ring_width: 0.425,
            bet_ring_height: 0.175,
            bet_angle: 0.0,
            bet_box_color: "black".into(),
            bet_box_x_padding: 0.025,
            bet_box_height: 0.025,
            bet_box_radius: 0.0125,
            bet_text_style: "bold".into(),
            bet_text_color: "white".into(),
            bet_text_font: "sans".into(),
            bet_text_size: 0.02,

            seat_ring_width: 0.8,
            seat_ring_height: 0.55,
            seat_angle: 0.0,

            hole_x: 0.0,
            hole_y: 0.0,
            hole_width: 0.225,
            hole_height: 0.03,
            hole_radius: 0.005,
            hole_color: "black".into(),
            hole_card_margin: 0.003,
            hole_card_height: 0.05,
            hole_card_radius: 0.004,
            hole_card_color: "white".into(),
            hole_card_text_style: "bold".into(),
            hole_card_text_font: "sans".into(),
            hole_card_text_size: 0.025,

            name_x: 0.0,
            name_y: 0.0,
            name_box_width: 0.225,
            name_box_height: 0.03,
            name_box_radius: 0.0,
            name_box_color: "darkblue".into(),
            name_text_style: "bold".into(),
            name_text_color: "white".into(),
            name_text_font: "sans".into(),
            name_text_size: 0.02,

            stack_x: 0.0,
            stack_y: -0.03,
            stack_box_width: 0.225,
            stack_box_height: 0.03,
            stack_box_radius: 0.0,
            stack_box_color: "black".into(),
            stack_text_style: "bold".into(),
            stack_text_color: "white".into(),
            stack_text_font: "sans".into(),
            stack_text_size: 0.02,

            previous_action_x: 0.0,
            previous_action_y: -0.06,
            previous_action_box_width: 0.225,
            previous_action_box_height: 0.03,
            previous_action_box_radius: 0.0,
            previous_action_box_color: "darkgray".into(),
            previous_action_text_style: "bold".into(),
            previous_action_text_color: "black".into(),
            previous_action_text_font: "sans".into(),
            previous_action_text_size: 0.02,

            club_color: "green".into(),
            diamond_color: "blue".into(),
            heart_color: "red".into(),
            spade_color: "black".into(),
            unknown_color: "white".into(),

            frame_rate: 30.0,
            shifter_timeout: 0.5,
            watchdog_timeout: 1.0,
        }
    }
}

impl Style {
    pub fn suit_color(&self, suit: Suit) -> &str {
        match suit {
            Suit::Club => &self.club_color,
            Suit::Diamond => &self.diamond_color,
            Suit::Heart => &self.heart_color,
            Suit::Spade => &self.spade_color,
            Suit::Unknown => &self.unknown_color,
        }
    }

    pub fn button_font(&self) -> Font<'_> {
        Font {
            style: &self.button_text_style,
            family: &self.button_text_font,
            size: self.button_text_size,
        }
    }

    pub fn board_pot_font(&self) -> Font<'_> {
        Font {
            style: &self.board_pot_text_style,
            family: &self.board_pot_text_font,
            size: self.board_pot_text_size,
        }
    }

    pub fn board_card_font(&self) -> Font<'_> {
        Font {
            style: &self.board_card_text_style,
            family: &self.board_card_text_font,
            size: self.board_card_text_size,
        }
    }

    pub fn bet_font(&self) -> Font<'_> {
        Font {
            style: &self.bet_text_style,
            family: &self.bet_text_font,
            size: self.bet_text_size,
        }
    }

    pub fn hole_card_font(&self) -> Font<'_> {
        Font {
            style: &self.hole_card_text_style,
            family: &self.hole_card_text_font,
            size: self.hole_card_text_size,
        }
    }

    pub fn name_plate(&self) -> Plate<'_> {
        Plate {
            offset: Point::new(self.name_x, self.name_y),
            width: self.name_box_width,
            height: self.name_box_height,
            radius: self.name_box_radius,
            box_color: &self.name_box_color,
            text_color: &self.name_text_color,
            font: Font {
                style: &self.name_text_style,
                family: &self.name_text_font,
                size: self.name_text_size,
            },
        }
    }

    pub fn stack_plate(&self) -> Plate<'_> {
        Plate {
            offset: Point::new(self.stack_x, self.stack_y),
            width: self.stack_box_width,
            height: self.stack_box_height,
            radius: self.stack_box_radius,
            box_color: &self.stack_box_color,
            text_color: &self.stack_text_color,
            font: Font {
                style: &self.stack_text_style,
                family: &self.stack_text_font,
                size: self.stack_text_size,
            },
        }
    }

    pub fn previous_action_plate(&self) -> Plate<'_> {
        Plate {
            offset: Point::new(self.previous_action_x, self.previous_action_y),
            width: self.previous_action_box_width,
            height: self.previous_action_box_height,
            radius: self.previous_action_box_radius,
            box_color: &self.previous_action_box_color,
            text_color: &self.previous_action_text_color,
            font: Font {
                style: &self.previous_action_text_style,
                family: &self.previous_action_text_font,
                size: self.previous_action_text_size,
            },
        }
    }

    /// Milliseconds between draw ticks.
    pub fn frame_interval_ms(&self) -> u64 {
        if self.frame_rate > 0.0 {
            (1000.0 / self.frame_rate).round().max(1.0) as u64
        } else {
            1000
        }
    }

    /// Milliseconds between eviction attempts.
    pub fn shifter_interval_ms(&self) -> u64 {
        seconds_to_ms(self.shifter_timeout)
    }

    /// Base reconnect delay in milliseconds.
    pub fn watchdog_interval_ms(&self) -> u64 {
        seconds_to_ms(self.watchdog_timeout)
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round().max(1.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tables_keep_defaults() {
        let style: Style = serde_json::from_str(
            r##"{"background_color": "#202020", "seat_ring_width": 0.9, "shifter_timeout": 2}"##,
        )
        .unwrap();
        assert_eq!(style.background_color, "#202020");
        assert_eq!(style.seat_ring_width, 0.9);
        assert_eq!(style.shifter_interval_ms(), 2000);
        assert_eq!(style.seat_ring_height, Style::default().seat_ring_height);
        assert_eq!(style.button_text, "B");
    }

    #[test]
    fn timer_intervals() {
        let style = Style::default();
        assert_eq!(style.frame_interval_ms(), 33);
        assert_eq!(style.shifter_interval_ms(), 500);
        assert_eq!(style.watchdog_interval_ms(), 1000);

        let stalled = Style {
            frame_rate: 0.0,
            shifter_timeout: 0.0,
            ..Style::default()
        };
        assert_eq!(stalled.frame_interval_ms(), 1000);
        assert_eq!(stalled.shifter_interval_ms(), 1);
    }

    #[test]
    fn css_font_translates_short_names() {
        let style = Style::default();
        assert_eq!(style.name_plate().font.css(12.0), "bold 12px sans-serif");
        let font = Font {
            style: "bolditalic",
            family: "Georgia",
            size: 0.02,
        };
        assert_eq!(font.css(9.5), "italic bold 9.5px Georgia");
    }

    #[test]
    fn suit_colors_follow_the_table() {
        let style = Style::default();
        assert_eq!(style.suit_color(Suit::Heart), "red");
        assert_eq!(style.suit_color(Suit::Unknown), "white");
    }
}
