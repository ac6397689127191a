//! Built-in hero copy used when a page has none configured.

/// Default subtitle and bio for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroFallback {
    pub subtitle: &'static str,
    /// Paragraphs are separated by `||`.
    pub bio: &'static str,
}

const HOME: HeroFallback = HeroFallback {
    subtitle: "Crafted in language, carried by purpose.",
    bio: "I'm a writer, a master of ideas. Armed with degrees and an unrepentant love for \
          semicolons, I explore the intricate dance of education and writing.||My passion lies \
          in blending narrative with knowledge, shaping thoughts through words. With a \
          background in academia and a voice rooted in culture, I continue to write with \
          purpose, provoke thought, and pass on the gift of expression.",
};

const BIOGRAPHY: HeroFallback = HeroFallback {
    subtitle: "Knowing others is intelligence; knowing yourself is true wisdom.",
    bio: "I'm a writer. A master of ideas.||And a lifelong student of language. It started \
          with long school essays and turned into a life of teaching, editing, and chasing \
          clarity. I've spent years turning messy thoughts into clean sentences, and yes, \
          correcting the odd public typo.",
};

const TEACHING: HeroFallback = HeroFallback {
    subtitle: "Guiding minds, shaping futures.",
    bio: "",
};

const BLOG: HeroFallback = HeroFallback {
    subtitle: "Writing that turns the page",
    bio: "",
};

/// Pages with built-in hero copy.
pub const KNOWN_PAGES: [&str; 4] = ["home", "biography", "teaching", "blog"];

pub fn fallback_for(page: &str) -> Option<HeroFallback> {
    match page {
        "home" => Some(HOME),
        "biography" => Some(BIOGRAPHY),
        "teaching" => Some(TEACHING),
        "blog" => Some(BLOG),
        _ => None,
    }
}

/// Configured copy if non-blank, else the page's fallback, else empty.
pub fn resolve_copy(
    page: &str,
    subtitle: Option<&str>,
    bio: Option<&str>,
) -> (String, String) {
    let fallback = fallback_for(page);
    let pick = |configured: Option<&str>, default: Option<&'static str>| {
        configured
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default()
    };
    (
        pick(subtitle, fallback.map(|f| f.subtitle)),
        pick(bio, fallback.map(|f| f.bio)),
    )
}
