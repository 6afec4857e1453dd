use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB colour shared by the figure model and every sink.
pub type Rgb = Srgb<u8>;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// Parse `#rrggbb` / `#rgb`.
pub fn parse_hex(text: &str) -> Option<Rgb> {
    Rgb::from_str(text.trim()).ok()
}

// ---------------------------------------------------------------------------
// Method colours: method name → Rgb
// ---------------------------------------------------------------------------

/// Assigns each method a colour from the *sorted* set of method names, so the
/// mapping depends on which methods are present and never on draw order.
#[derive(Debug, Clone)]
pub struct MethodColors {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl MethodColors {
    /// Build the map; entries in `overrides` replace the generated colour.
    pub fn new<'a>(
        names: impl IntoIterator<Item = &'a str>,
        overrides: &BTreeMap<String, Rgb>,
    ) -> Self {
        let unique: BTreeSet<&str> = names.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(name, c)| {
                let c = overrides.get(name).copied().unwrap_or(c);
                (name.to_string(), c)
            })
            .collect();

        MethodColors {
            mapping,
            default_color: Rgb::new(128, 128, 128),
        }
    }

    /// Look up the colour of a method.
    pub fn color_for(&self, name: &str) -> Rgb {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}
