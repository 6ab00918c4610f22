//! Category to colour mapping
//!
//! Two policies share the [`ColorPolicy`] contract `(category, opacity) ->
//! "rgba(r,g,b,a)"`:
//!
//! - [`FixedPalette`]: a static table of known event categories with a
//!   neutral gray fallback. Pure.
//! - [`ColorAssignmentState`]: assigns a random colour on first sighting
//!   of a category and reuses it afterwards. Create one per session and
//!   pass it by `&mut` wherever colours are needed; it is never reset
//!   behind the caller's back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Opacity used for bar fills
pub const DEFAULT_OPACITY: f64 = 0.5;

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Colour used for categories outside the fixed table
    pub const NEUTRAL: Rgb = Rgb(170, 170, 170);

    /// CSS `rgba()` string; opacity is clamped to [0, 1]
    ///
    /// ```
    /// use ipgraph_core::palette::Rgb;
    ///
    /// assert_eq!(Rgb(1, 2, 3).rgba(0.5), "rgba(1,2,3,0.5)");
    /// assert_eq!(Rgb(1, 2, 3).rgba(7.0), "rgba(1,2,3,1)");
    /// ```
    pub fn rgba(&self, opacity: f64) -> String {
        let alpha = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        format!("rgba({},{},{},{})", self.0, self.1, self.2, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// Maps a category to a colour string
pub trait ColorPolicy {
    /// RGB triple for a category
    fn rgb(&mut self, category: &str) -> Rgb;

    /// `rgba()` colour for a category at the given opacity
    fn color(&mut self, category: &str, opacity: f64) -> String {
        self.rgb(category).rgba(opacity)
    }
}

/// Static colour table for the known event categories
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPalette;

impl FixedPalette {
    /// Known category colours
    pub const TABLE: [(&'static str, Rgb); 11] = [
        ("ReconScanning", Rgb(170, 255, 255)),
        ("AttemptLogin", Rgb(111, 217, 46)),
        ("AbusiveSpam", Rgb(102, 51, 14)),
        ("AnomalyTraffic", Rgb(119, 136, 153)),
        ("AttemptExploit", Rgb(218, 112, 214)),
        ("AvailabilityDDoS", Rgb(169, 0, 0)),
        ("AvailabilityDoS", Rgb(229, 46, 46)),
        ("IntrusionBotnet", Rgb(255, 140, 0)),
        ("IntrusionUserCompromise", Rgb(204, 42, 20)),
        ("VulnerableConfig", Rgb(255, 228, 181)),
        ("VulnerableOpen", Rgb(238, 232, 170)),
    ];

    /// Colour of a category, neutral gray when unknown
    pub fn lookup(category: &str) -> Rgb {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(Rgb::NEUTRAL)
    }
}

impl ColorPolicy for FixedPalette {
    fn rgb(&mut self, category: &str) -> Rgb {
        Self::lookup(category)
    }
}

/// Session-scoped random colour assignment
///
/// The first request for a category draws each channel uniformly from
/// 0..=255; every later request returns the cached triple. Distinct
/// categories get independent draws, so two of them may coincide.
///
/// # Examples
/// ```
/// use ipgraph_core::palette::{ColorAssignmentState, ColorPolicy};
///
/// let mut colors = ColorAssignmentState::seeded(7);
/// let first = colors.color("spamhaus", 0.5);
/// assert_eq!(colors.color("spamhaus", 0.5), first);
/// assert_eq!(colors.len(), 1);
/// ```
#[derive(Debug)]
pub struct ColorAssignmentState<R: Rng = StdRng> {
    assigned: HashMap<String, Rgb>,
    rng: R,
}

impl ColorAssignmentState<StdRng> {
    /// State seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible state
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ColorAssignmentState<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ColorAssignmentState<R> {
    /// State drawing from a caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        Self {
            assigned: HashMap::new(),
            rng,
        }
    }

    /// Colour already assigned to a category, if any
    pub fn assigned(&self, category: &str) -> Option<Rgb> {
        self.assigned.get(category).copied()
    }

    /// Number of categories seen so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl<R: Rng> ColorPolicy for ColorAssignmentState<R> {
    fn rgb(&mut self, category: &str) -> Rgb {
        if let Some(rgb) = self.assigned.get(category) {
            return *rgb;
        }
        let rgb = Rgb(self.rng.random(), self.rng.random(), self.rng.random());
        trace!("Assigned colour {} to category '{}'", rgb, category);
        self.assigned.insert(category.to_string(), rgb);
        rgb
    }
}
