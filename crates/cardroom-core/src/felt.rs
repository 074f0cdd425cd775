//! Table renderer.
//!
//! [`Felt::draw`] turns a [`Frame`] and the [`Style`] table into calls on a
//! [`Canvas`]. Front ends only have to map world units onto their surface.

use crate::geometry::{Point, point_on_ellipse, seat_angle};
use crate::protocol::{Card, Frame};
use crate::style::{Font, Plate, Style};

/// Drawing surface in world units: origin at the table center, y up,
/// 1.0 spanning the smaller surface dimension.
pub trait Canvas {
    fn clear(&mut self, color: &str);
    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: &str);
    fn fill_rounded_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        color: &str,
    );
    fn fill_circle(&mut self, center: Point, diameter: f64, color: &str);
    /// Draw `text` centered on `center`.
    fn fill_text(&mut self, text: &str, center: Point, font: &Font<'_>, color: &str);
    /// Width of `text` in world units.
    fn measure_text(&self, text: &str, font: &Font<'_>) -> f64;
}

pub struct Felt {
    style: Style,
}

impl Felt {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, frame: &Frame) {
        canvas.clear(&self.style.background_color);
        self.draw_table(canvas, frame);
        for index in 0..frame.seat_count() {
            self.draw_seat(canvas, frame, index);
        }
    }

    fn draw_table<C: Canvas + ?Sized>(&self, canvas: &mut C, frame: &Frame) {
        let s = &self.style;
        let table = Point::new(s.table_x, s.table_y);
        canvas.fill_ellipse(
            table,
            s.table_outer_width,
            s.table_outer_height,
            &s.table_border_color,
        );
        canvas.fill_ellipse(
            table,
            s.table_inner_width,
            s.table_inner_height,
            &s.table_felt_color,
        );

        let board = Point::new(s.board_x, s.board_y);
        canvas.fill_rounded_rect(
            board,
            s.board_width,
            s.board_height,
            s.board_radius,
            &s.board_color,
        );
        let pots: Vec<String> = frame.pots.iter().map(ToString::to_string).collect();
        canvas.fill_text(
            &format!("{}{}", s.board_pot_text, pots.join(", ")),
            board,
            &s.board_pot_font(),
            &s.board_pot_text_color,
        );

        if frame.board_count == 0 {
            return;
        }
        let slots = frame.board_count as f64;
        let card_width = (s.board_width - 2.0 * s.board_radius - (slots - 1.0) * s.board_card_margin)
            / slots;
        let y = s.board_height / 2.0 + s.board_card_height / 2.0 + s.board_card_margin;
        let mut x = -s.board_width / 2.0 + s.board_radius + card_width / 2.0;
        for card in &frame.board {
            self.draw_card(
                canvas,
                card,
                board + Point::new(x, y),
                card_width,
                CardFace {
                    height: s.board_card_height,
                    radius: s.board_card_radius,
                    color: &s.board_card_color,
                    font: s.board_card_font(),
                },
            );
            x += card_width + s.board_card_margin;
        }
    }

    fn draw_seat<C: Canvas + ?Sized>(&self, canvas: &mut C, frame: &Frame, index: usize) {
        let s = &self.style;
        let table = Point::new(s.table_x, s.table_y);
        let angle = seat_angle(index, frame.seat_count());

        if frame.button == Some(index) {
            let at = point_on_ellipse(
                table,
                s.button_ring_width,
                s.button_ring_height,
                angle + s.button_angle,
            );
            canvas.fill_circle(at, s.button_diameter, &s.button_color);
            canvas.fill_text(&s.button_text, at, &s.button_font(), &s.button_text_color);
        }

        if let Some(bet) = frame.bets.get(index).and_then(Option::as_ref) {
            if !bet.is_zero() {
                let at = point_on_ellipse(
                    table,
                    s.bet_ring_width,
                    s.bet_ring_height,
                    angle + s.bet_angle,
                );
                let font = s.bet_font();
                let text = bet.to_string();
                let width = canvas.measure_text(&text, &font) + s.bet_box_x_padding;
                canvas.fill_rounded_rect(
                    at,
                    width,
                    s.bet_box_height,
                    s.bet_box_radius,
                    &s.bet_box_color,
                );
                canvas.fill_text(&text, at, &font, &s.bet_text_color);
            }
        }

        let seat = point_on_ellipse(
            table,
            s.seat_ring_width,
            s.seat_ring_height,
            angle + s.seat_angle,
        );

        if let Some(Some(hole)) = frame.holes.get(index) {
            self.draw_hole(canvas, hole, &frame.hole_statuses, seat);
        }
        if let Some(Some(name)) = frame.names.get(index) {
            draw_plate(canvas, seat, &s.name_plate(), name);
        }
        if let Some(Some(stack)) = frame.stacks.get(index) {
            draw_plate(canvas, seat, &s.stack_plate(), &stack.to_string());
        }
        if let Some((actor, text)) = &frame.previous_action {
            if *actor == index {
                draw_plate(canvas, seat, &s.previous_action_plate(), text);
            }
        }
    }

    /// Hole panel with the face-down cards on the first row and the
    /// face-up cards on the row above.
    fn draw_hole<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        hole: &[Card],
        statuses: &[bool],
        seat: Point,
    ) {
        let s = &self.style;
        let panel = seat + Point::new(s.hole_x, s.hole_y);
        canvas.fill_rounded_rect(panel, s.hole_width, s.hole_height, s.hole_radius, &s.hole_color);

        let face_up = statuses.iter().filter(|up| **up).count();
        let columns = face_up.max(statuses.len() - face_up);
        if columns == 0 {
            return;
        }
        let columns = columns as f64;
        let card_width =
            (s.hole_width - 2.0 * s.hole_radius - (columns - 1.0) * s.hole_card_margin) / columns;
        let first_x = -s.hole_width / 2.0 + s.hole_radius + card_width / 2.0;
        let mut y = s.hole_height / 2.0 + s.hole_card_height / 2.0 + s.hole_card_margin;

        for row in [false, true] {
            let mut x = first_x;
            for (card, _) in hole
                .iter()
                .zip(statuses)
                .filter(|(_, status)| **status == row)
            {
                self.draw_card(
                    canvas,
                    card,
                    panel + Point::new(x, y),
                    card_width,
                    CardFace {
                        height: s.hole_card_height,
                        radius: s.hole_card_radius,
                        color: &s.hole_card_color,
                        font: s.hole_card_font(),
                    },
                );
                x += card_width + s.hole_card_margin;
            }
            y += s.hole_card_height + s.hole_card_margin;
        }
    }

    fn draw_card<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        card: &Card,
        center: Point,
        width: f64,
        face: CardFace<'_>,
    ) {
        canvas.fill_rounded_rect(center, width, face.height, face.radius, face.color);
        canvas.fill_text(
            &card.to_string(),
            center,
            &face.font,
            self.style.suit_color(card.suit),
        );
    }
}

struct CardFace<'a> {
    height: f64,
    radius: f64,
    color: &'a str,
    font: Font<'a>,
}

fn draw_plate<C: Canvas + ?Sized>(canvas: &mut C, seat: Point, plate: &Plate<'_>, text: &str) {
    let center = seat + plate.offset;
    canvas.fill_rounded_rect(
        center,
        plate.width,
        plate.height,
        plate.radius,
        plate.box_color,
    );
    canvas.fill_text(text, center, &plate.font, plate.text_color);
}

// ---------------------------------------------------------------------------
// Recording canvas
// ---------------------------------------------------------------------------

/// One primitive issued by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: String,
    },
    Ellipse {
        center: Point,
        width: f64,
        height: f64,
        color: String,
    },
    RoundedRect {
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        color: String,
    },
    Circle {
        center: Point,
        diameter: f64,
        color: String,
    },
    Text {
        text: String,
        center: Point,
        size: f64,
        color: String,
    },
}

/// Canvas that records what would have been drawn.
///
/// Text is measured as a fixed 0.6 em per glyph.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub const GLYPH_ASPECT: f64 = 0.6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded text commands, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &str)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text {
                text,
                center,
                color,
                ..
            } => Some((text.as_str(), *center, color.as_str())),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn clear(&mut self, color: &str) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            color: color.to_string(),
        });
    }

    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn fill_rounded_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        color: &str,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            center,
            width,
            height,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            diameter,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, center: Point, font: &Font<'_>, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size: font.size,
            color: color.to_string(),
        });
    }

    fn measure_text(&self, text: &str, font: &Font<'_>) -> f64 {
        text.chars().count() as f64 * font.size * Self::GLYPH_ASPECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Chips, Suit};

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn render(frame: &Frame) -> Recorder {
        let mut recorder = Recorder::new();
        Felt::new(Style::default()).draw(&mut recorder, frame);
        recorder
    }

    fn seated(names: &[&str]) -> Frame {
        Frame {
            names: names.iter().map(|n| Some(n.to_string())).collect(),
            stacks: names.iter().map(|_| Some(Chips::from(200))).collect(),
            bets: names.iter().map(|_| None).collect(),
            holes: names.iter().map(|_| None).collect(),
            ..Frame::default()
        }
    }

    #[test]
    fn empty_frame_draws_only_the_table() {
        let recorder = render(&Frame::default());
        let style = Style::default();
        assert_eq!(
            recorder.commands()[0],
            DrawCommand::Clear {
                color: "gray".into()
            }
        );
        assert!(matches!(
            &recorder.commands()[1],
            DrawCommand::Ellipse { color, .. } if color == "saddlebrown"
        ));
        assert!(matches!(
            &recorder.commands()[2],
            DrawCommand::Ellipse { color, .. } if color == "seagreen"
        ));
        let texts: Vec<_> = recorder.texts().collect();
        assert_eq!(texts, vec![("Pot: ", Point::new(0.0, style.board_y), "white")]);
        assert_eq!(recorder.commands().len(), 5);
    }

    #[test]
    fn pots_are_joined() {
        let frame = Frame {
            pots: vec![Chips::from(30), Chips::from(12)],
            ..Frame::default()
        };
        let recorder = render(&frame);
        assert!(recorder.texts().any(|(text, _, _)| text == "Pot: 30, 12"));
    }

    #[test]
    fn seats_are_placed_clockwise_on_the_seat_ring() {
        let recorder = render(&seated(&["north?", "b", "c", "d"]));
        let names: Vec<_> = recorder
            .texts()
            .filter(|(text, _, color)| *color == "white" && text.len() <= 6 && *text != "200")
            .filter(|(text, _, _)| !text.starts_with("Pot"))
            .collect();
        assert_eq!(names.len(), 4);

        // Seat 0 sits on +x, seat 1 a quarter turn clockwise (below).
        let (_, first, _) = names[0];
        assert!(close(first.x, 0.4) && close(first.y, 0.0), "{first:?}");
        let (_, second, _) = names[1];
        assert!(close(second.x, 0.0) && close(second.y, -0.275), "{second:?}");
    }

    #[test]
    fn stack_plate_hangs_below_the_name() {
        let recorder = render(&seated(&["solo"]));
        let name = recorder.texts().find(|(t, _, _)| *t == "solo").unwrap().1;
        let stack = recorder.texts().find(|(t, _, _)| *t == "200").unwrap().1;
        assert!(close(stack.x, name.x));
        assert!(close(name.y - stack.y, 0.03));
    }

    #[test]
    fn button_marks_only_its_seat() {
        let mut frame = seated(&["a", "b", "c"]);
        frame.button = Some(1);
        let recorder = render(&frame);
        let circles: Vec<_> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 1);

        let style = Style::default();
        let expected = point_on_ellipse(
            Point::ORIGIN,
            style.button_ring_width,
            style.button_ring_height,
            seat_angle(1, 3) + style.button_angle,
        );
        assert!(close(circles[0].x, expected.x) && close(circles[0].y, expected.y));
        assert!(recorder.texts().any(|(t, c, _)| t == "B" && c == circles[0]));
        assert_eq!(recorder.texts().filter(|(t, _, _)| *t == "B").count(), 1);
    }

    #[test]
    fn zero_and_missing_bets_are_hidden() {
        let mut frame = seated(&["a", "b", "c"]);
        frame.bets = vec![Some(Chips::from(0)), None, Some(Chips::from(2))];
        let recorder = render(&frame);
        let bet_boxes: Vec<_> = recorder
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::RoundedRect { height, .. } if close(*height, 0.025)))
            .collect();
        assert_eq!(bet_boxes.len(), 2, "board panel plus one bet chip");

        let DrawCommand::RoundedRect { width, .. } = bet_boxes[1] else {
            unreachable!()
        };
        // "2" is one glyph at size 0.02, plus the box padding.
        assert!(close(*width, 0.6 * 0.02 + 0.025));
    }

    #[test]
    fn board_cards_are_evenly_spaced() {
        let frame = Frame {
            board: vec![
                Card::new("A", Suit::Heart),
                Card::new("T", Suit::Club),
                Card::new("2", Suit::Spade),
            ],
            board_count: 5,
            ..Frame::default()
        };
        let recorder = render(&frame);
        let cards: Vec<_> = recorder.texts().skip(1).collect();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].0, "A♥");
        assert_eq!(cards[0].2, "red");
        assert_eq!(cards[1].2, "green");

        let width = (0.3 - 0.025 - 4.0 * 0.0025) / 5.0;
        assert!(close(cards[0].1.x, -0.15 + 0.0125 + width / 2.0));
        assert!(close(cards[1].1.x - cards[0].1.x, width + 0.0025));
        assert!(close(cards[0].1.y, -0.05 + 0.0125 + 0.03 + 0.0025));
    }

    #[test]
    fn boards_without_slots_draw_no_cards() {
        let frame = Frame {
            board: vec![Card::new("A", Suit::Heart)],
            board_count: 0,
            ..Frame::default()
        };
        assert_eq!(render(&frame).texts().count(), 1);
    }

    #[test]
    fn face_down_row_is_drawn_first() {
        let mut frame = seated(&["hero"]);
        frame.holes = vec![Some(vec![
            Card::new("A", Suit::Spade),
            Card::new("K", Suit::Diamond),
            Card::new("Q", Suit::Heart),
        ])];
        frame.hole_statuses = vec![true, false, true];
        let recorder = render(&frame);

        let cards: Vec<_> = recorder
            .texts()
            .filter(|(t, _, _)| ["A♠", "K♦", "Q♥"].contains(t))
            .collect();
        assert_eq!(
            cards.iter().map(|c| c.0).collect::<Vec<_>>(),
            vec!["K♦", "A♠", "Q♥"]
        );

        let style = Style::default();
        let (down, up, up_next) = (cards[0].1, cards[1].1, cards[2].1);
        assert!(close(down.x, up.x));
        assert!(close(up.y - down.y, style.hole_card_height + style.hole_card_margin));
        let width = (0.225 - 0.01 - 0.003) / 2.0;
        assert!(close(up_next.x - up.x, width + 0.003));
        assert_eq!(cards[1].2, "black");
    }

    #[test]
    fn hole_panel_without_statuses_has_no_cards() {
        let mut frame = seated(&["hero"]);
        frame.holes = vec![Some(vec![Card::new("?", Suit::Unknown)])];
        let recorder = render(&frame);
        assert!(!recorder.texts().any(|(t, _, _)| t.starts_with('?')));
        let panels = recorder
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::RoundedRect { color, .. } if color == "black"))
            .count();
        // Board, hole panel and stack plate.
        assert_eq!(panels, 3);
    }

    #[test]
    fn previous_action_follows_its_seat() {
        let mut frame = seated(&["a", "b"]);
        frame.previous_action = Some((1, "cbr 40".to_string()));
        let recorder = render(&frame);
        let plates: Vec<_> = recorder.texts().filter(|(t, _, _)| *t == "cbr 40").collect();
        assert_eq!(plates.len(), 1);
        let b = recorder.texts().find(|(t, _, _)| *t == "b").unwrap().1;
        assert!(close(plates[0].1.x, b.x));
        assert!(close(b.y - plates[0].1.y, 0.06));
        assert_eq!(plates[0].2, "black");
    }

    #[test]
    fn clearing_resets_the_recording() {
        let mut recorder = render(&seated(&["a"]));
        let first = recorder.commands().len();
        Felt::new(Style::default()).draw(&mut recorder, &seated(&["a"]));
        assert_eq!(recorder.commands().len(), first);
        assert_eq!(recorder.take().len(), first);
        assert!(recorder.commands().is_empty());
    }
}
