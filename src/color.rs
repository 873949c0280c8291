use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps distinct category labels to distinct colours, in first-seen order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl ColorMap {
    /// Build a colour map from labels; duplicates keep their first position.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if !distinct.iter().any(|d| d == label) {
                distinct.push(label.to_string());
            }
        }
        let palette = generate_palette(distinct.len());

        ColorMap {
            mapping: distinct.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[2]);
    }

    #[test]
    fn duplicates_share_a_colour_and_unknowns_fall_back() {
        let cm = ColorMap::new(["FT", "B4", "FT", "B5"]);
        let labels: Vec<&str> = cm.legend_entries().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["FT", "B4", "B5"]);
        assert_ne!(cm.color_for("FT"), cm.color_for("B4"));
        assert_eq!(cm.color_for("v1.0"), Color32::GRAY);
    }
}
