//! Display formatting for quantities shown to buyers

use crate::BoundingBox;

/// `850 mg`, `12.5 g`, `1.25 kg`
pub fn format_weight(grams: f64) -> String {
    if grams < 1.0 {
        format!("{:.0} mg", grams * 1000.0)
    } else if grams < 1000.0 {
        format!("{:.1} g", grams)
    } else {
        format!("{:.2} kg", grams / 1000.0)
    }
}

/// `450 mm³`, `12.5 cm³`, then millions of mm³
///
/// The last tier keeps the `m³` label the upload page has always shown, even
/// though the value is in units of 10⁶ mm³ (litres).
pub fn format_volume(mm3: f64) -> String {
    if mm3 < 1000.0 {
        format!("{:.0} mm³", mm3)
    } else if mm3 < 1_000_000.0 {
        format!("{:.1} cm³", mm3 / 1000.0)
    } else {
        format!("{:.2} m³", mm3 / 1_000_000.0)
    }
}

pub fn format_dimensions(bbox: &BoundingBox) -> String {
    format!(
        "{:.1} × {:.1} × {:.1} mm",
        bbox.width, bbox.height, bbox.depth
    )
}

pub fn format_price(amount: f64) -> String {
    format!("₹{:.2}", amount)
}
