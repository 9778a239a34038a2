use std::collections::HashMap;

use lazy_static::lazy_static;

pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_PROSE_STYLE: &str = "Standard";
pub const DEFAULT_LENGTH_DESCRIPTOR: &str = "medium length";

/// Display name -> synthesis code, in the order the UI lists them.
const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Chinese (Mandarin)", "zh"),
    ("Arabic", "ar"),
    ("Hindi", "hi"),
    ("Dutch", "nl"),
    ("Polish", "pl"),
    ("Turkish", "tr"),
    ("Swedish", "sv"),
    ("Danish", "da"),
    ("Norwegian", "no"),
    ("Finnish", "fi"),
    ("Greek", "el"),
    ("Hebrew", "he"),
    ("Thai", "th"),
    ("Vietnamese", "vi"),
    ("Czech", "cs"),
    ("Hungarian", "hu"),
    ("Romanian", "ro"),
    ("Bulgarian", "bg"),
    ("Croatian", "hr"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Estonian", "et"),
    ("Latvian", "lv"),
    ("Lithuanian", "lt"),
    ("Urdu", "ur"),
    ("Bengali", "bn"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Malayalam", "ml"),
    ("Kannada", "kn"),
    ("Gujarati", "gu"),
    ("Punjabi", "pa"),
    ("Marathi", "mr"),
    ("Nepali", "ne"),
    ("Sinhala", "si"),
    ("Burmese", "my"),
    ("Khmer", "km"),
    ("Lao", "lo"),
    ("Georgian", "ka"),
    ("Armenian", "hy"),
    ("Azerbaijani", "az"),
    ("Kazakh", "kk"),
    ("Kyrgyz", "ky"),
    ("Tajik", "tg"),
    ("Uzbek", "uz"),
    ("Mongolian", "mn"),
    ("Tibetan", "bo"),
    ("Welsh", "cy"),
    ("Irish", "ga"),
    ("Scottish Gaelic", "gd"),
    ("Basque", "eu"),
    ("Catalan", "ca"),
    ("Galician", "gl"),
    ("Maltese", "mt"),
    ("Icelandic", "is"),
    ("Albanian", "sq"),
    ("Macedonian", "mk"),
    ("Serbian", "sr"),
    ("Bosnian", "bs"),
    ("Montenegrin", "sr"),
    ("Afrikaans", "af"),
    ("Swahili", "sw"),
    ("Yoruba", "yo"),
    ("Igbo", "ig"),
    ("Hausa", "ha"),
    ("Zulu", "zu"),
    ("Xhosa", "xh"),
    ("Amharic", "am"),
    ("Somali", "so"),
    ("Malay", "ms"),
    ("Indonesian", "id"),
    ("Filipino", "tl"),
    ("Maori", "mi"),
    ("Hawaiian", "haw"),
];

/// A named prose preset: what the model is told, and what the UI shows.
pub struct ProseStyle {
    pub name: &'static str,
    pub instruction: &'static str,
    pub summary: &'static str,
}

const PROSE_STYLES: &[ProseStyle] = &[
    ProseStyle {
        name: "Standard",
        instruction: "clear, straightforward narrative style with balanced descriptions",
        summary: "Balanced, clear narrative - perfect for most stories",
    },
    ProseStyle {
        name: "Literary",
        instruction: "sophisticated, literary prose with rich metaphors, complex sentence structures, and deep character introspection",
        summary: "Sophisticated prose with rich metaphors and deep introspection",
    },
    ProseStyle {
        name: "Minimalist",
        instruction: "concise, spare prose with short sentences and understated descriptions, focusing on subtext",
        summary: "Spare, understated style focusing on subtext and brevity",
    },
    ProseStyle {
        name: "Descriptive",
        instruction: "highly detailed, vivid prose with extensive sensory descriptions and atmospheric writing",
        summary: "Highly detailed with vivid sensory descriptions",
    },
    ProseStyle {
        name: "Dialogue-Heavy",
        instruction: "story driven primarily through character conversations and interactions",
        summary: "Story driven through character conversations",
    },
    ProseStyle {
        name: "Stream of Consciousness",
        instruction: "flowing, unstructured narrative that follows the character's inner thoughts and feelings",
        summary: "Flowing narrative following inner thoughts",
    },
    ProseStyle {
        name: "Poetic",
        instruction: "lyrical, rhythmic prose with beautiful imagery and metaphorical language",
        summary: "Lyrical, rhythmic prose with beautiful imagery",
    },
    ProseStyle {
        name: "Noir",
        instruction: "dark, gritty prose with cynical tone and atmospheric descriptions typical of detective fiction",
        summary: "Dark, gritty style with cynical tone",
    },
    ProseStyle {
        name: "Whimsical",
        instruction: "playful, imaginative prose with quirky descriptions and lighthearted tone",
        summary: "Playful, imaginative with quirky descriptions",
    },
    ProseStyle {
        name: "Epic",
        instruction: "grand, sweeping prose with heroic language and larger-than-life descriptions",
        summary: "Grand, heroic language for larger-than-life stories",
    },
];

lazy_static! {
    static ref LANGUAGE_CODES: HashMap<&'static str, &'static str> =
        LANGUAGES.iter().copied().collect();
}

/// Story length presets accepted by `/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryLength {
    Short,
    Medium,
    Long,
}

impl StoryLength {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Short" => Some(Self::Short),
            "Medium" => Some(Self::Medium),
            "Long" => Some(Self::Long),
            _ => None,
        }
    }

    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Short => "under 200 words",
            Self::Medium => "300–500 words",
            Self::Long => "up to 800 words",
        }
    }
}

/// Map a language display name to the code the speech engine expects.
/// Unknown names resolve to English.
pub fn resolve_language_code(name: &str) -> &'static str {
    LANGUAGE_CODES
        .get(name)
        .copied()
        .unwrap_or(DEFAULT_LANGUAGE_CODE)
}

/// Prompt description for a prose style, falling back to "Standard".
pub fn style_description(name: &str) -> &'static str {
    find_style(name)
        .or_else(|| find_style(DEFAULT_PROSE_STYLE))
        .map(|style| style.instruction)
        .unwrap_or_default()
}

pub fn length_descriptor(name: &str) -> &'static str {
    StoryLength::from_name(name)
        .map(StoryLength::descriptor)
        .unwrap_or(DEFAULT_LENGTH_DESCRIPTOR)
}

pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGES.iter().map(|(name, _)| *name).collect()
}

pub fn prose_styles() -> &'static [ProseStyle] {
    PROSE_STYLES
}

fn find_style(name: &str) -> Option<&'static ProseStyle> {
    PROSE_STYLES.iter().find(|style| style.name == name)
}
