//! Placeholder avatars: a stable colour per user id and initials from the
//! display name.

/// An ordered, non-empty list of CSS colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

/// Used on the classmate discovery screen.
pub const CAMPUS_BLUE: Palette = Palette {
    colors: &[
        "#002E5D", "#0062B8", "#1E88E5", "#00838F", "#2E7D32", "#558B2F", "#E65100", "#AD1457",
        "#6A1B9A", "#4527A0", "#283593", "#C62828",
    ],
};

/// Used everywhere else (friends, herd member stacks).
pub const EARTH_TONE: Palette = Palette {
    colors: &[
        "#4A7C59", "#6B8F71", "#8FBC8F", "#2E7D32", "#558B2F", "#795548", "#A1887F", "#8D6E63",
        "#5D4037", "#3E2723", "#BF360C", "#E65100",
    ],
};

impl Palette {
    /// Returns `None` for an empty colour list.
    pub const fn new(colors: &'static [&'static str]) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    pub fn colors(&self) -> &'static [&'static str] {
        self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Rolling string hash `h = c + (h << 5) - h` over UTF-16 code units, in
/// wrapping 32-bit arithmetic.
fn identifier_hash(identifier: &str) -> i32 {
    identifier.encode_utf16().fold(0i32, |hash, unit| {
        (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Picks a colour for `identifier`. The same identifier and palette always
/// give the same colour; different identifiers may share one.
pub fn color_for(identifier: &str, palette: &Palette) -> &'static str {
    let index = identifier_hash(identifier).unsigned_abs() as usize % palette.colors.len();
    palette.colors[index]
}

/// Up to two uppercase initials, one per whitespace-separated word.
pub fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
