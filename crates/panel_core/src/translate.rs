//! User-facing rewrites of raw backend error messages.

const FALLBACK: &str = "Unbekannter Fehler.";

enum Rewrite {
    Fixed(&'static str),
    Verbatim,
    Prefixed(&'static str),
}

/// First matching row wins; needles are lowercase.
const REWRITES: &[(&[&str], Rewrite)] = &[
    (
        &[
            "login is required",
            "age-restricted",
            "instagramloginrequired",
            "twitterloginrequired",
        ],
        Rewrite::Fixed(
            "Dieser Inhalt erfordert eine Anmeldung oder ist altersbeschränkt und kann nicht direkt heruntergeladen werden.",
        ),
    ),
    (
        &["video unavailable"],
        Rewrite::Fixed("Fehler: Dieses Video ist nicht (mehr) verfügbar."),
    ),
    (
        &["unsupported url"],
        Rewrite::Fixed(
            "Fehler: Die eingegebene URL wird nicht unterstützt oder ist kein gültiger Link für die gewählte Plattform.",
        ),
    ),
    (
        &["403", "access denied"],
        Rewrite::Fixed("Fehler: Zugriff auf den Inhalt verweigert (403)."),
    ),
    (
        &["404", "not found"],
        Rewrite::Fixed("Fehler: Inhalt nicht gefunden (404)."),
    ),
    (&["already processed"], Rewrite::Verbatim),
    (&["worker-fehler"], Rewrite::Prefixed("Interner Serverfehler: ")),
    (&["job nicht gefunden"], Rewrite::Verbatim),
    (
        &["ungültige url für instagram"],
        Rewrite::Fixed(
            "Fehler: Ungültige URL für Instagram. Es werden nur Reel-Links unterstützt (z.B. .../reel/...).",
        ),
    ),
    (
        &["ungültige url für twitter"],
        Rewrite::Fixed(
            "Fehler: Ungültige URL für Twitter/X. Es werden nur Tweet-Links unterstützt (z.B. .../status/...).",
        ),
    ),
];

/// Maps a raw error message to the text shown in the error panel.
///
/// Unmatched messages pass through unchanged; a missing or empty message
/// becomes a generic fallback.
pub fn translate_error(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|text| !text.is_empty()) else {
        return FALLBACK.to_string();
    };
    let lower = raw.to_lowercase();
    let rewrite = REWRITES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, rewrite)| rewrite);

    match rewrite {
        Some(Rewrite::Fixed(text)) => (*text).to_string(),
        Some(Rewrite::Prefixed(prefix)) => format!("{prefix}{raw}"),
        Some(Rewrite::Verbatim) | None => raw.to_string(),
    }
}
