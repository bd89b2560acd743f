//! City suggestions for the simulator's city field
//!
//! Accent-insensitive substring search over a fixed gazetteer of
//! Île-de-France communes. Purely advisory: a city missing from the list is
//! still a valid free-text input.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum number of suggestions returned by [`suggest`]
pub const MAX_SUGGESTIONS: usize = 8;

/// Known communes, in display order
pub const GAZETTEER: &[&str] = &[
    // Paris
    "Paris",
    // Hauts-de-Seine (92)
    "Nanterre",
    "Boulogne-Billancourt",
    "Courbevoie",
    "Colombes",
    "Asnières-sur-Seine",
    "Rueil-Malmaison",
    "Levallois-Perret",
    "Issy-les-Moulineaux",
    "Clichy",
    "Clamart",
    "Meudon",
    "Suresnes",
    "Gennevilliers",
    "Puteaux",
    "Montrouge",
    "Neuilly-sur-Seine",
    "Bagneux",
    "Malakoff",
    "Châtillon",
    "Châtenay-Malabry",
    "Antony",
    "Fontenay-aux-Roses",
    "Ville-d’Avray",
    "Saint-Cloud",
    "Garches",
    "Vaucresson",
    // Val-de-Marne (94)
    "Créteil",
    "Vitry-sur-Seine",
    "Champigny-sur-Marne",
    "Saint-Maur-des-Fossés",
    "Ivry-sur-Seine",
    "Villejuif",
    "Maisons-Alfort",
    "Alfortville",
    "Choisy-le-Roi",
    "Gentilly",
    "Cachan",
    "Arcueil",
    "L’Haÿ-les-Roses",
    "Le Kremlin-Bicêtre",
    "Fontenay-sous-Bois",
    "Nogent-sur-Marne",
    "Le Perreux-sur-Marne",
    "Vincennes",
    "Charenton-le-Pont",
    "Orly",
    "Villeneuve-Saint-Georges",
    "Thiais",
    "Rungis",
    "Fresnes",
    // Seine-Saint-Denis (93)
    "Saint-Denis",
    "Aubervilliers",
    "Pantin",
    "La Courneuve",
    "Drancy",
    "Le Bourget",
    "Bobigny",
    "Montreuil",
    "Noisy-le-Grand",
    "Bondy",
    "Aulnay-sous-Bois",
    "Sevran",
    "Livry-Gargan",
    "Villepinte",
    "Gagny",
    // Yvelines (78)
    "Versailles",
    "Saint-Germain-en-Laye",
    "Mantes-la-Jolie",
    "Sartrouville",
    "Poissy",
    "Houilles",
    "Conflans-Sainte-Honorine",
    "Trappes",
    "Rambouillet",
    "Maisons-Laffitte",
    "Le Chesnay-Rocquencourt",
    // Essonne (91)
    "Évry-Courcouronnes",
    "Massy",
    "Palaiseau",
    "Savigny-sur-Orge",
    "Sainte-Geneviève-des-Bois",
    "Athis-Mons",
    "Viry-Châtillon",
    "Juvisy-sur-Orge",
    "Draveil",
    "Vigneux-sur-Seine",
    "Ris-Orangis",
    "Longjumeau",
    // Seine-et-Marne (77)
    "Meaux",
    "Melun",
    "Fontainebleau",
    "Chelles",
    "Pontault-Combault",
    "Lognes",
    "Torcy",
    "Noisiel",
    "Serris",
    // Val-d'Oise (95)
    "Cergy",
    "Pontoise",
    "Argenteuil",
    "Sarcelles",
    "Gonesse",
    "Garges-lès-Gonesse",
    "Ermont",
    "Franconville",
];

/// Lower-case `s` and strip combining marks after canonical decomposition.
///
/// `"Créteil"` and `"CRETEIL"` both normalise to `"creteil"`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .as_str()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn normalize_char(c: char) -> String {
    c.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Suggest up to [`MAX_SUGGESTIONS`] gazetteer entries for `query`.
///
/// A city matches when its normalised name contains the normalised query
/// anywhere. Results keep gazetteer order. An empty query returns the head of
/// the gazetteer.
pub fn suggest(query: &str) -> Vec<&'static str> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return GAZETTEER.iter().take(MAX_SUGGESTIONS).copied().collect();
    }
    GAZETTEER
        .iter()
        .filter(|city| normalize(city).contains(&needle))
        .take(MAX_SUGGESTIONS)
        .copied()
        .collect()
}

/// Byte range of `city` covered by the first match of `query`.
///
/// The range is expressed in the original, accented string so it can be used
/// to highlight the match in display: `match_span("Créteil", "cret")` is
/// `0..5` because `é` takes two bytes.
pub fn match_span(city: &str, query: &str) -> Option<Range<usize>> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return None;
    }

    let mut folded = String::with_capacity(city.len());
    // (offset in `folded`, source char range in `city`)
    let mut origins: Vec<(usize, Range<usize>)> = Vec::with_capacity(city.len());
    for (start, c) in city.char_indices() {
        let piece = normalize_char(c);
        if piece.is_empty() {
            continue;
        }
        origins.push((folded.len(), start..start + c.len_utf8()));
        folded.push_str(&piece);
    }

    let at = folded.find(&needle)?;
    let end = at + needle.len();
    let first = origins.iter().rfind(|(offset, _)| *offset <= at)?;
    let last = origins.iter().rfind(|(offset, _)| *offset < end)?;
    Some(first.1.start..last.1.end)
}
