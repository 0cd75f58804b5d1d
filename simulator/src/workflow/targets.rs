use alignmentcore::AlignmentTarget;

/// Horizon directions for the solar and stellar events tested by default,
/// as `(category, name, azimuth in degrees)`.
const STANDARD_TARGETS: [(&str, &str, f64); 9] = [
    ("Equinox", "rise", 90.0),
    ("Equinox", "set", 270.0),
    ("Solstice", "Jun 21 rise", 66.0),
    ("Solstice", "Jun 21 set", 292.0),
    ("Solstice", "Dec 21 rise", 112.0),
    ("Solstice", "Dec 21 set", 246.0),
    ("Zenith Passage", "rise", 100.5),
    ("Zenith Passage", "set", 257.5),
    ("Pleiades Last Appearance", "Pleiades on horizon", 290.8),
];

pub fn standard_targets() -> Vec<AlignmentTarget> {
    STANDARD_TARGETS
        .iter()
        .map(|&(category, name, azimuth)| AlignmentTarget::new(category, name, azimuth))
        .collect()
}
