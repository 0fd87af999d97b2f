//! Route colours and preference labels.
//!
//! Pure presentation policy: nothing here affects which path is chosen.

use aq_core::Weights;

/// Display colour of a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteColor {
    /// Distance-dominated (`#3b82f6`).
    Blue,
    /// Time-dominated (`#f59e0b`).
    Orange,
    /// Air-quality-dominated (`#10b981`).
    Green,
    /// No preference at all (`#667eea`).
    Neutral,
    /// Mixed preference.
    Blend { r: u8, g: u8, b: u8 },
}

impl RouteColor {
    /// CSS colour string.
    pub fn css(self) -> String {
        match self {
            RouteColor::Blue    => "#3b82f6".to_owned(),
            RouteColor::Orange  => "#f59e0b".to_owned(),
            RouteColor::Green   => "#10b981".to_owned(),
            RouteColor::Neutral => "#667eea".to_owned(),
            RouteColor::Blend { r, g, b } => format!("rgb({r}, {g}, {b})"),
        }
    }
}

impl std::fmt::Display for RouteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.css())
    }
}

fn channel(base: f64, span: f64, share: f64) -> u8 {
    (base + share * span).round().min(255.0) as u8
}

/// Colour for a custom weight vector.
///
/// A share above one half picks that criterion's fixed colour, checked in
/// the order AQI, distance, time.  Otherwise the three shares are blended.
pub fn route_color(weights: &Weights) -> RouteColor {
    let Some([d, t, a]) = weights.shares() else {
        return RouteColor::Neutral;
    };
    if a > 0.5 {
        RouteColor::Green
    } else if d > 0.5 {
        RouteColor::Blue
    } else if t > 0.5 {
        RouteColor::Orange
    } else {
        RouteColor::Blend {
            r: channel(59.0, 150.0, t),
            g: channel(130.0, 100.0, a),
            b: channel(100.0, 100.0, d),
        }
    }
}

/// Short description of what a weight vector favours, e.g.
/// `"Fastest & Cleanest Air Route"`.
pub fn preference_label(weights: &Weights) -> String {
    let Some(shares) = weights.shares() else {
        return "No preference set".to_owned();
    };
    let names = ["Shortest", "Fastest", "Cleanest Air"];
    let picked: Vec<&str> = names
        .iter()
        .zip(shares)
        .filter(|(_, share)| *share > 0.3)
        .map(|(name, _)| *name)
        .collect();

    if picked.is_empty() {
        "Balanced Route".to_owned()
    } else {
        format!("{} Route", picked.join(" & "))
    }
}
