//! Travel-mode tag carried by routes and transit stops.

/// The mode a route segment or stop serves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    #[default]
    Walking,
    Bus,
    Rail,
}

impl TravelMode {
    /// `true` for vehicle-based modes (anything that isn't walking).
    #[inline]
    pub fn is_transit(self) -> bool {
        !matches!(self, TravelMode::Walking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Bus => "bus",
            TravelMode::Rail => "rail",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
