//! Static style and prompt tables, plus prompt enhancement.

use rand::seq::SliceRandom;

/// An art style offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Token sent to the service inside the enhanced prompt.
    pub value: &'static str,
    /// Human-readable name.
    pub label: &'static str,
}

impl Style {
    #[must_use]
    const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Style used when neither the CLI nor the config file names one.
pub const DEFAULT_STYLE: &str = "realistic";

/// Styles offered by `--list-styles`, in display order.
pub const STYLES: &[Style] = &[
    Style::new("realistic", "Realistic"),
    Style::new("3d-render", "3D Render"),
    Style::new("anime", "Anime"),
    Style::new("digital-art", "Digital Art"),
    Style::new("oil-painting", "Oil Painting"),
    Style::new("watercolor", "Watercolor"),
    Style::new("sketch", "Sketch"),
    Style::new("cyberpunk", "Cyberpunk"),
];

/// Keywords appended to every prompt after the style.
const QUALITY_KEYWORDS: &str = "high quality, detailed, professional";

/// Prompts picked from by `--surprise`.
pub const RANDOM_PROMPTS: &[&str] = &[
    "A majestic dragon soaring through cloudy skies with golden sunlight",
    "A futuristic cityscape at sunset with flying cars and neon lights",
    "A peaceful forest clearing with magical glowing mushrooms",
    "An underwater palace with coral gardens and swimming dolphins",
    "A steampunk airship floating above Victorian London",
    "A cozy library with floating books and warm candlelight",
    "A cyberpunk street scene with holographic advertisements",
    "A mountain peak covered in snow with aurora borealis dancing overhead",
    "A vintage coffee shop on a rainy day with warm lighting",
    "A space station orbiting a colorful nebula",
    "A medieval castle on a cliff overlooking the ocean",
    "A robot gardener tending to a futuristic greenhouse",
    "A magical potion shop with glowing bottles and mystical artifacts",
    "A desert oasis with palm trees and crystal clear water",
    "A lighthouse standing tall during a dramatic storm",
    "A floating island with waterfalls cascading into the clouds",
    "A cozy cabin in the woods with smoke rising from the chimney",
    "A bustling alien marketplace on a distant planet",
    "A crystal cave with bioluminescent plants and underground lakes",
    "A vintage train station with steam engines and travelers",
];

/// Look up a style by its token.
#[must_use]
pub fn find_style(value: &str) -> Option<&'static Style> {
    STYLES.iter().find(|style| style.value == value)
}

/// Whether `value` is one of the offered styles.
#[must_use]
pub fn is_known_style(value: &str) -> bool {
    find_style(value).is_some()
}

/// Display name for a style token. Unknown tokens are shown with hyphens
/// turned into spaces.
#[must_use]
pub fn style_label(value: &str) -> String {
    match find_style(value) {
        Some(style) => style.label.to_string(),
        None => value.replace('-', " "),
    }
}

/// Build the prompt actually sent to the service.
///
/// The style token is interpolated verbatim, known or not.
#[must_use]
pub fn enhance_prompt(prompt: &str, style: &str) -> String {
    format!("{prompt}, {style} style, {QUALITY_KEYWORDS}")
}

/// Pick a random prompt for `--surprise`.
#[must_use]
pub fn random_prompt() -> &'static str {
    RANDOM_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(RANDOM_PROMPTS[0])
}

/// Check that a prompt has something besides whitespace.
///
/// # Errors
///
/// Returns an error for empty or whitespace-only prompts.
pub fn validate_prompt(prompt: &str) -> Result<(), String> {
    if prompt.trim().is_empty() {
        Err("Please enter a description for your image".to_string())
    } else {
        Ok(())
    }
}
