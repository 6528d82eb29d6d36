use foundation::HexColor;
use serde::Serialize;

/// Marker radius grows linearly with magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Lower bounds of the magnitude buckets shown in the legend.
pub const MAGNITUDE_BUCKETS: [u32; 6] = [0, 1, 2, 3, 4, 5];

/// Bucket colors, highest threshold first. A magnitude strictly greater than
/// the threshold takes the color; anything at or below 1 falls through to
/// [`BASE_COLOR`].
const COLOR_STEPS: [(f64, HexColor); 5] = [
    (5.0, HexColor::rgb(0xff, 0x00, 0x00)),
    (4.0, HexColor::rgb(0xff, 0xbf, 0x00)),
    (3.0, HexColor::rgb(0xff, 0xff, 0x00)),
    (2.0, HexColor::rgb(0x00, 0xff, 0x00)),
    (1.0, HexColor::rgb(0x00, 0x80, 0xff)),
];

pub const BASE_COLOR: HexColor = HexColor::rgb(0x80, 0x00, 0xff);

/// No clamping: zero or negative magnitudes give a non-positive radius.
pub fn radius_for(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

pub fn color_for(magnitude: f64) -> HexColor {
    COLOR_STEPS
        .iter()
        .find(|(threshold, _)| magnitude > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(BASE_COLOR)
}

/// Circle-marker paint attributes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: HexColor,
    #[serde(rename = "color")]
    pub stroke_color: HexColor,
    #[serde(rename = "weight")]
    pub stroke_weight: u32,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn for_magnitude(magnitude: f64) -> Self {
        Self {
            radius: radius_for(magnitude),
            fill_color: color_for(magnitude),
            stroke_color: HexColor::BLACK,
            stroke_weight: 1,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub lower_bound: u32,
    pub color_swatch: HexColor,
    pub label: String,
}

/// One entry per bucket. The swatch uses the color of `bound + 1` so each
/// row shows the color a quake inside that bucket would get.
pub fn legend_entries() -> Vec<LegendEntry> {
    MAGNITUDE_BUCKETS
        .iter()
        .enumerate()
        .map(|(i, &bound)| {
            let label = match MAGNITUDE_BUCKETS.get(i + 1) {
                Some(next) => format!("{bound}\u{2013}{next}"),
                None => format!("{bound}+"),
            };
            LegendEntry {
                lower_bound: bound,
                color_swatch: color_for(f64::from(bound + 1)),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{MarkerStyle, color_for, legend_entries, radius_for};
    use pretty_assertions::assert_eq;

    #[test]
    fn radius_is_linear_and_unclamped() {
        assert_eq!(radius_for(0.0), 0.0);
        assert_eq!(radius_for(-1.0), -5.0);
        assert_eq!(radius_for(2.0), 10.0);
        assert!((radius_for(6.2) - 31.0).abs() < 1e-9);
    }

    #[test]
    fn color_boundaries_fall_into_lower_bucket() {
        assert_eq!(color_for(5.0).to_string(), "#ffbf00");
        assert_eq!(color_for(5.01).to_string(), "#ff0000");
        assert_eq!(color_for(4.5).to_string(), "#ffbf00");
        assert_eq!(color_for(3.5).to_string(), "#ffff00");
        assert_eq!(color_for(2.5).to_string(), "#00ff00");
        assert_eq!(color_for(1.01).to_string(), "#0080ff");
        assert_eq!(color_for(1.0).to_string(), "#8000ff");
        assert_eq!(color_for(0.0).to_string(), "#8000ff");
        assert_eq!(color_for(-2.0).to_string(), "#8000ff");
    }

    #[test]
    fn nan_magnitude_takes_base_color() {
        assert_eq!(color_for(f64::NAN).to_string(), "#8000ff");
    }

    #[test]
    fn marker_style_fixed_stroke() {
        let style = MarkerStyle::for_magnitude(4.2);
        assert_eq!(style.fill_color.to_string(), "#ffbf00");
        assert_eq!(style.stroke_color.to_string(), "#000000");
        assert_eq!(style.stroke_weight, 1);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.fill_opacity, 0.8);
    }

    #[test]
    fn marker_style_serializes_with_renderer_keys() {
        let json = serde_json::to_value(MarkerStyle::for_magnitude(2.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "radius": 10.0,
                "fillColor": "#0080ff",
                "color": "#000000",
                "weight": 1,
                "opacity": 1.0,
                "fillOpacity": 0.8
            })
        );
    }

    #[test]
    fn legend_has_six_rows() {
        let entries = legend_entries();
        assert_eq!(entries.len(), 6);

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["0–1", "1–2", "2–3", "3–4", "4–5", "5+"]);
        for entry in &entries[..5] {
            assert!(entry.label.contains('\u{2013}'));
        }
        assert!(entries[5].label.ends_with('+'));

        let swatches: Vec<String> = entries.iter().map(|e| e.color_swatch.to_string()).collect();
        assert_eq!(
            swatches,
            ["#8000ff", "#0080ff", "#00ff00", "#ffff00", "#ffbf00", "#ff0000"]
        );
    }
}
