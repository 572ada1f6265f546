//! Beatport genre list used by the Beatport form.

pub const DEFAULT_PRIMARY_GENRE: &str = "Trance (Main Floor)";
pub const DEFAULT_SECONDARY_GENRE: &str = "Hard Techno";

pub const BEATPORT_GENRES: [&str; 26] = [
    "Afro House",
    "Bass House",
    "Breaks / Breakbeat / UK Bass",
    "Dance / Pop",
    "Deep House",
    "Drum & Bass",
    "Dubstep",
    "Electro House",
    "Electronica",
    "Hard Dance / Hardcore",
    "Hard Techno",
    "House",
    "Indie Dance",
    "Melodic House & Techno",
    "Minimal / Deep Tech",
    "Nu Disco / Disco",
    "Organic House / Downtempo",
    "Progressive House",
    "Progressive Trance",
    "Psy-Trance",
    "Tech House",
    "Techno (Peak Time / Driving)",
    "Techno (Raw / Deep / Hypnotic)",
    "Trance (Main Floor)",
    "Trance (Raw / Deep / Hypnotic)",
    "UK Garage / Bassline",
];

pub fn is_genre(name: &str) -> bool {
    BEATPORT_GENRES.contains(&name)
}
