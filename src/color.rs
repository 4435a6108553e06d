use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Rank, Sex};

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
// Fixed category colours
// ---------------------------------------------------------------------------

/// Scatter point colour by sex: pink for women, blue for men, matching the
/// original dashboard's palette.  Unexpected categories fall back to grey.
pub fn sex_color(sex: &Sex) -> Color32 {
    match sex {
        Sex::Female => Color32::from_rgb(255, 105, 180),
        Sex::Male => Color32::from_rgb(65, 105, 225),
        Sex::Other(_) => Color32::GRAY,
    }
}

/// Stack segment colour for the rank-distribution chart.
pub fn rank_color(rank: &Rank) -> Color32 {
    // One generated hue per slot keeps the three observed ranks plus the
    // overflow bucket distinguishable.
    let palette = generate_palette(4);
    match rank {
        Rank::Prof => palette[0],
        Rank::AssocProf => palette[1],
        Rank::AsstProf => palette[2],
        Rank::Other(_) => palette[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        // Evenly spaced hues never collide for small n.
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
    }

    #[test]
    fn rank_colors_are_distinct() {
        let prof = rank_color(&Rank::Prof);
        let assoc = rank_color(&Rank::AssocProf);
        let asst = rank_color(&Rank::AsstProf);
        assert_ne!(prof, assoc);
        assert_ne!(assoc, asst);
    }
}
