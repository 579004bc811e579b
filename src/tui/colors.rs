use std::collections::HashMap;

use crossterm::style::Color;
use palette::{FromColor, Lch, Srgb};

use crate::engine::tile::Card;

const BG_LIGHTNESS: f32 = 80.0;
const BG_CHROMA: f32 = 90.0;
const FG_HUE: f32 = 28.0 + 180.0;
// tiles from 2 up to 2048 each get their own hue
const HUED_TILES: u32 = 11;

/// Background and foreground colors for each tile value.
pub(crate) struct TileColors {
    card_colors: HashMap<Card, (Color, Color)>,
    fallback: (Color, Color),
    empty: Color,
}

impl Default for TileColors {
    fn default() -> Self {
        let foreground: Lch = Lch::new(20.0, 50.0, FG_HUE);
        let card_colors = (1..=HUED_TILES)
            .map(|i| {
                let background: Lch = Lch::new(
                    BG_LIGHTNESS,
                    BG_CHROMA,
                    i as f32 * 360.0 / HUED_TILES as f32,
                );
                (2u32.pow(i), (to_color(background), to_color(foreground)))
            })
            .collect();
        Self {
            card_colors,
            fallback: (
                Color::Rgb {
                    r: 255,
                    g: 255,
                    b: 255,
                },
                Color::Rgb { r: 90, g: 0, b: 0 },
            ),
            empty: Color::Rgb {
                r: 60,
                g: 50,
                b: 45,
            },
        }
    }
}

impl TileColors {
    pub(crate) fn get(&self, value: Card) -> (Color, Color) {
        match value {
            0 => (self.empty, self.empty),
            v => *self.card_colors.get(&v).unwrap_or(&self.fallback),
        }
    }
}

fn to_color(lch: Lch) -> Color {
    let rgb = Srgb::from_color(lch).into_format::<u8>();
    Color::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
    }
}
