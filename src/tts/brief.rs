use serde::{Deserialize, Serialize};

/// Emotional tone of the voice performance.
/// Serialized values are the labels the settings UI shows and persists.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Emotion {
    #[default]
    #[serde(rename = "Confident & Courageous")]
    ConfidentCourageous,
    #[serde(rename = "Calm & Reflective")]
    CalmReflective,
    #[serde(rename = "Excited & Energetic")]
    ExcitedEnergetic,
    #[serde(rename = "Sad & Somber")]
    SadSomber,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Studio,
    #[serde(rename = "Large Hall")]
    LargeHall,
    #[serde(rename = "Intimate Room")]
    IntimateRoom,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Reverb {
    #[default]
    None,
    Subtle,
    Room,
    Hall,
    Cathedral,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Echo {
    #[default]
    None,
    #[serde(rename = "Short Delay")]
    ShortDelay,
    Slapback,
    #[serde(rename = "Long Delay")]
    LongDelay,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MusicStyle {
    #[default]
    None,
    #[serde(rename = "Uplifting Cinematic")]
    UpliftingCinematic,
    #[serde(rename = "Reflective Piano")]
    ReflectivePiano,
    #[serde(rename = "Ambient Pad")]
    AmbientPad,
    #[serde(rename = "Gentle Acoustic")]
    GentleAcoustic,
}

/// The full stylistic parameter set for one voiceover production.
/// Missing fields deserialize to defaults so older persisted records load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductionNotes {
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub environment: Environment,
    pub reverb: Reverb,
    pub echo: Echo,
    pub noise_gate: bool,
    pub background_music: MusicStyle,
    pub music_volume: f32,
}

impl Default for ProductionNotes {
    fn default() -> Self {
        Self {
            emotion: Emotion::default(),
            intensity: Intensity::default(),
            environment: Environment::default(),
            reverb: Reverb::default(),
            echo: Echo::default(),
            noise_gate: false,
            background_music: MusicStyle::default(),
            music_volume: 0.3,
        }
    }
}

/// Build the natural-language production brief sent to the speech service.
/// Construction is deterministic: the same text and notes always yield the
/// same brief.
pub fn build_production_brief(text: &str, notes: &ProductionNotes) -> String {
    let mut brief = format!(
        "As a world-class audio engineer and voice actor, produce a natural-sounding audio production of the following text: \"{text}\"\n\n"
    );
    brief.push_str("Apply the following production notes meticulously:\n");

    brief.push_str(
        "— Voice Talent: A deep, professional male voice with a rich, warm timbre and exceptionally clear articulation.\n",
    );

    let mut style = String::from(
        "The delivery should feel authentic and human, with natural pacing and cadence. It should be",
    );
    match notes.intensity {
        Intensity::Low => style.push_str(" subtly"),
        Intensity::High => style.push_str(" strongly"),
        Intensity::Medium => {}
    }
    match notes.emotion {
        Emotion::CalmReflective => style.push_str(
            " calm, spiritually uplifting, and reflective. The delivery should be slow and clear, conveying a deep sense of peace.",
        ),
        Emotion::ExcitedEnergetic => style.push_str(
            " excited, energetic, and enthusiastic. The delivery should be bright and dynamic, conveying authentic passion.",
        ),
        Emotion::SadSomber => style.push_str(
            " sad, somber, and melancholic. The delivery should be slow and gentle, conveying genuine, deep emotion.",
        ),
        Emotion::ConfidentCourageous => style.push_str(
            " emotional, courageous, and confident. The voice should convey strength and conviction, suitable for a powerful motivational speech.",
        ),
    }
    brief.push_str(&format!("— Performance Direction: {style}\n"));

    let mut engineering: Vec<&str> = Vec::new();
    match notes.environment {
        Environment::LargeHall => {
            engineering.push("place the voice in a space with the acoustics of a large hall with natural echo")
        }
        Environment::IntimateRoom => {
            engineering.push("place the voice in a small, intimate space for a warm, close, and personal sound")
        }
        Environment::Studio => engineering.push(
            "the voice should have a clean, dry sound as if recorded in a professional, acoustically-treated studio",
        ),
    }
    match notes.reverb {
        Reverb::Subtle => engineering.push("apply a subtle reverb effect"),
        Reverb::Room => engineering.push("apply a clear room reverb"),
        Reverb::Hall => engineering.push("apply a concert hall reverb"),
        Reverb::Cathedral => engineering.push("apply a vast, cathedral-like reverb"),
        Reverb::None => {}
    }
    match notes.echo {
        Echo::ShortDelay => engineering.push("add a short, tight echo delay"),
        Echo::Slapback => engineering.push("add a classic slapback echo effect"),
        Echo::LongDelay => engineering.push("add a long, trailing echo effect"),
        Echo::None => {}
    }
    if notes.noise_gate {
        engineering.push(
            "apply a noise gate to eliminate any low-level background noise between words for an ultra-clean recording",
        );
    }
    if !engineering.is_empty() {
        brief.push_str(&format!(
            "— Audio Mix: The effects should be blended seamlessly to enhance the performance, not distract from it. Specifically: {}.\n",
            engineering.join(", ")
        ));
    }

    let music_description = match notes.background_music {
        MusicStyle::None => None,
        MusicStyle::UpliftingCinematic => Some("an uplifting and inspiring cinematic score"),
        MusicStyle::ReflectivePiano => Some("a gentle and reflective piano melody"),
        MusicStyle::AmbientPad => Some("a calm and atmospheric ambient pad"),
        MusicStyle::GentleAcoustic => Some("a warm and hopeful acoustic guitar track"),
    };
    if let Some(description) = music_description {
        let mut music_note = format!(
            "Add a copyright-free background music track in the style of {description}. The music should be expertly mixed to complement the voice, creating a cohesive and immersive soundscape."
        );
        if notes.music_volume < 0.25 {
            music_note.push_str(" The music should be mixed very subtly in the background.");
        } else if notes.music_volume < 0.6 {
            music_note.push_str(" The music should be present but not distracting, mixed clearly behind the voice.");
        } else {
            music_note.push_str(" The music should be prominent, creating a strong emotional atmosphere alongside the voice.");
        }
        brief.push_str(&format!("— Background Music: {music_note}\n"));
    }

    brief.push_str(
        "\nCrucially, the final output must sound completely natural and human, as if recorded by a top-tier voice actor in a professional studio. Avoid any hint of a synthetic or robotic tone. The final audio output should be a complete production, with the voice mixed with any specified effects and music. Do not add any extra spoken words, introductions, or commentary.",
    );

    brief
}
