//! Label rewriting rules shared by route long names, headsigns and stop names
//!
//! Every function here is total: unknown input is returned mostly untouched, never rejected.
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Separates the "from" and "to" sides of a headsign once the from/to phrasing is recognized
pub const FROM_TO_MARKER: &str = "<>";

const FRENCH_PARTICLES: [&str; 12] = [
    "de", "du", "des", "la", "le", "les", "à", "au", "aux", "et", "en", "sur",
];

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid built-in pattern")
}

lazy_static! {
    static ref SPACES: Regex = re(r"\s+");
    static ref SPACED_DASH: Regex = re(r"\s+[-–—](?:\s+[-–—])*\s+");
    static ref FROM_TO: Regex =
        re(r"(?i)(?:^|\s)(?:de|du|des|from)\s+(.+)\s+(?:à|au|aux|vers|to)\s+(.+)$");
    static ref BEFORE_MARKER: Regex = re(r"^.*<>\s*");
    static ref VIA: Regex = re(r"(?i)\s+via\b.*$");
    static ref FILLERS: Regex = re(r"(?i)\b(?:express|devant|direction)\b");
    static ref EMPTY_PARENS: Regex = re(r"\(\s*\)");
    static ref LEADING_SEPARATORS: Regex = re(r"^[\s,;:/.\-–—]+");
    static ref TRAILING_SEPARATORS: Regex = re(r"[\s,;:/\-–—]+$");
    static ref PAREN_OPEN: Regex = re(r"\s*\(\s*");
    static ref PAREN_CLOSE: Regex = re(r"\s*\)\s*");
    static ref SAINTE: Regex = re(r"(?i)\bsainte\b");
    static ref SAINT: Regex = re(r"(?i)\bsaint\b");
    static ref CHAMBLY_LONGUEUIL: Regex = re(r"(?i)chambly\s*-\s*longueuil");
    static ref AVENUE: Regex = re(r"(?i)\s+avenue\b");
    static ref DEVANT: Regex = re(r"(?i)\bdevant\b");
    static ref DIGITS: Regex = re(r"[0-9]+");

    // most specific first
    static ref START_WITH_FACES: [Regex; 3] = [
        re(r"(?i)^(?:face\s+)+à\s+"),
        re(r"(?i)^(?:face\s+)+au\s+"),
        re(r"(?i)^(?:face\s+)+"),
    ];
    static ref SPACE_FACES: [Regex; 3] = [
        re(r"(?i)(?:\s+face)+\s+à\s+"),
        re(r"(?i)(?:\s+face)+\s+au\s+"),
        re(r"(?i)(?:\s+face)+\s+"),
    ];

    static ref STREET_TYPES: Vec<(Regex, &'static str)> = vec![
        (re(r"(?i)\b(?:avenue|ave|av)\b\.?"), "av."),
        (re(r"(?i)\b(?:boulevard|boul|blvd|bd)\b\.?"), "boul."),
        (re(r"(?i)\b(?:autoroute|aut)\b\.?"), "aut."),
        (re(r"(?i)\b(?:ch|chem)\b\.?"), "Chemin"),
        (re(r"(?i)\brte\b\.?"), "Route"),
        (re(r"(?i)\b(?:montee|mtée)\b\.?"), "Montée"),
        (re(r"(?i)\bstationnement\b"), "Stat"),
        (re(r"(?i)\bstreet\b"), "St"),
        (re(r"(?i)\broad\b"), "Rd"),
    ];
}

/// Canonical composition, so that "à" typed as `a` + combining accent matches the rules
pub fn to_nfc(label: &str) -> String {
    label.nfc().collect()
}

/// Spaced dashes become `" - "`, an explicit "from X to Y" becomes `X<>Y`
pub fn normalize_separators(label: &str) -> String {
    let label = SPACED_DASH.replace_all(label, " - ");
    FROM_TO
        .replace(&label, |caps: &regex::Captures| {
            format!(" {}{}{}", &caps[1], FROM_TO_MARKER, &caps[2])
        })
        .into_owned()
}

/// Keeps the "to" side of a from/to pair
pub fn keep_to(label: &str) -> String {
    BEFORE_MARKER.replace(label, "").into_owned()
}

pub fn remove_via(label: &str) -> String {
    VIA.replace(label, "").into_owned()
}

pub fn remove_fillers(label: &str) -> String {
    FILLERS.replace_all(label, " ").into_owned()
}

/// Strips separators and whitespace at both ends and drops empty parentheses
pub fn clean_bounds(label: &str) -> String {
    let label = EMPTY_PARENS.replace_all(label, "");
    let label = LEADING_SEPARATORS.replace(&label, "");
    TRAILING_SEPARATORS.replace(&label, "").into_owned()
}

pub fn clean_street_types(label: &str) -> String {
    let mut label = label.to_owned();
    for (pattern, canonical) in STREET_TYPES.iter() {
        label = pattern.replace_all(&label, *canonical).into_owned();
    }
    label
}

/// Whitespace, parenthesis spacing, spaced dashes and French capitalization
pub fn clean_label(label: &str) -> String {
    let label = SPACES.replace_all(label, " ");
    let label = PAREN_OPEN.replace_all(&label, " (");
    let label = PAREN_CLOSE.replace_all(&label, ") ");
    let label = SPACES.replace_all(label.trim(), " ");
    // parenthesis spacing can put a dash between spaces
    let label = SPACED_DASH.replace_all(&label, " - ");
    capitalize_words(&label)
}

pub fn contract_saint(label: &str) -> String {
    let label = SAINTE.replace_all(label, "Ste");
    SAINT.replace_all(&label, "St").into_owned()
}

pub fn fix_chambly_longueuil(label: &str) -> String {
    CHAMBLY_LONGUEUIL
        .replace_all(label, "Chambly - longueuil")
        .into_owned()
}

pub fn contract_avenue(label: &str) -> String {
    AVENUE.replace_all(label, " av.").into_owned()
}

/// Removes "face à", "face au" and "face", at the start first, then inside the label
pub fn remove_facing(label: &str) -> String {
    let mut label = label.to_owned();
    for pattern in START_WITH_FACES.iter().chain(SPACE_FACES.iter()) {
        label = pattern.replace_all(&label, " ").into_owned();
    }
    label
}

pub fn remove_devant(label: &str) -> String {
    DEVANT.replace_all(label, " ").into_owned()
}

/// Case-insensitive comparison of two labels
pub fn same_label(a: &str, b: &str) -> bool {
    to_nfc(a).to_lowercase() == to_nfc(b).to_lowercase()
}

/// The first run of ASCII digits in `s`
pub fn leading_digits(s: &str) -> Option<&str> {
    DIGITS.find(s).map(|m| m.as_str())
}

fn capitalize_words(label: &str) -> String {
    // first word of the label or of a " - " part
    let mut part_start = true;
    label
        .split(' ')
        .map(|word| {
            if word == "-" || word == "/" {
                part_start = true;
                return word.to_owned();
            }
            let word = capitalize_word(word, part_start);
            part_start = false;
            word
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str, part_start: bool) -> String {
    word.split('-')
        .enumerate()
        .map(|(i, piece)| {
            piece
                .split('/')
                .enumerate()
                .map(|(j, segment)| capitalize_segment(segment, part_start && i == 0 && j == 0))
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize_segment(segment: &str, first: bool) -> String {
    let lower = segment.to_lowercase();
    if !first && FRENCH_PARTICLES.contains(&lower.as_str()) {
        return lower;
    }
    match split_elision(segment) {
        Some((letter, apostrophe, rest)) => {
            let mut result = String::with_capacity(segment.len());
            if first {
                result.extend(letter.to_uppercase());
            } else {
                result.extend(letter.to_lowercase());
            }
            result.push(apostrophe);
            result.push_str(&capitalize_first(rest));
            result
        }
        None => capitalize_first(segment),
    }
}

/// `l'` or `d'` followed by something
fn split_elision(segment: &str) -> Option<(char, char, &str)> {
    let mut chars = segment.char_indices();
    let (_, letter) = chars.next()?;
    let (_, apostrophe) = chars.next()?;
    let (rest_at, _) = chars.next()?;
    if matches!(letter, 'l' | 'L' | 'd' | 'D') && matches!(apostrophe, '\'' | '’') {
        Some((letter, apostrophe, &segment[rest_at..]))
    } else {
        None
    }
}

/// Upper-cases the first alphanumeric character when it is a letter, leaves the rest alone
fn capitalize_first(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut done = false;
    for c in segment.chars() {
        if !done && c.is_alphanumeric() {
            done = true;
            if c.is_alphabetic() {
                result.extend(c.to_uppercase());
                continue;
            }
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_dashes() {
        assert_eq!("Chambly - Longueuil", normalize_separators("Chambly  –  Longueuil"));
        assert_eq!("Richelieu-Chambly", normalize_separators("Richelieu-Chambly"));
        assert_eq!("112 - Chambly", normalize_separators("112 – — Chambly"));
        assert_eq!("X) - Y", clean_label("x)– y"));
    }

    #[test]
    fn from_to_keeps_destination() {
        let marked = normalize_separators("De Chambly à Longueuil");
        assert!(marked.contains(FROM_TO_MARKER));
        assert_eq!("Longueuil", keep_to(&marked));

        let marked = normalize_separators("direction du Terminus au Stationnement incitatif");
        assert_eq!("Stationnement incitatif", keep_to(&marked));

        assert_eq!("Chambly", keep_to("Chambly"));
    }

    #[test]
    fn via_and_fillers() {
        assert_eq!("Longueuil", remove_via("Longueuil via Chambly"));
        assert_eq!("Viaduc", remove_via("Viaduc"));
        assert_eq!("Chambly", clean_bounds(&remove_fillers("Direction Chambly express")));
        assert_eq!("Directions", remove_fillers("Directions"));
    }

    #[test]
    fn bounds() {
        assert_eq!("Chambly", clean_bounds(" - Chambly () , "));
        assert_eq!("Chambly (Terminus)", clean_bounds("Chambly (Terminus)"));
    }

    #[test]
    fn street_types() {
        assert_eq!("boul. Périgny", clean_street_types("Boulevard Périgny"));
        assert_eq!("Chemin Bellerive", clean_street_types("ch. Bellerive"));
        assert_eq!("Route 112", clean_street_types("rte 112"));
        assert_eq!("Stat Incitatif", clean_street_types("Stationnement Incitatif"));
        assert_eq!("av. Bourgogne", clean_street_types("av. Bourgogne"));
        assert_eq!("Chemin", clean_street_types("Chemin"));
    }

    #[test]
    fn capitalization() {
        assert_eq!("Gare de Chambly", clean_label("gare   de chambly"));
        assert_eq!("De Salaberry", clean_label("de salaberry"));
        assert_eq!("Chambly - La Prairie", clean_label("chambly - la prairie"));
        assert_eq!("Saint-Jean-sur-Richelieu", clean_label("saint-jean-sur-richelieu"));
        assert_eq!("L'Église", clean_label("l'église"));
        assert_eq!("Rue d'Youville", clean_label("rue D'youville"));
        assert_eq!("Chambly (Express)", clean_label("Chambly(express)"));
        assert_eq!("AM", clean_label("AM"));
        assert_eq!("12e Av.", clean_label("12e av."));
    }

    #[test]
    fn clean_label_is_idempotent() {
        for label in ["gare de chambly", "l'église - d'youville", "x ( y )", "À la gare", "( – – 112", "x)– y"] {
            let once = clean_label(label);
            assert_eq!(once, clean_label(&once));
        }
    }

    #[test]
    fn saint_and_longueuil() {
        assert_eq!("St-Jean Ste-Julie", contract_saint("Saint-Jean Sainte-Julie"));
        assert_eq!("Chambly - longueuil", fix_chambly_longueuil("CHAMBLY-LONGUEUIL"));
    }

    #[test]
    fn facing() {
        assert_eq!(" l'église", remove_facing("face à l'église"));
        assert_eq!(" parc", remove_facing("FACE AU parc"));
        assert_eq!("Bellerive parc", remove_facing("Bellerive face au parc"));
        assert_eq!("Façade", remove_facing("Façade"));
        assert_eq!("Chambly Chambly", remove_facing("Chambly face face Chambly"));
        assert_eq!(" parc", remove_facing("face face au parc"));
    }

    #[test]
    fn facing_is_diacritic_aware() {
        let decomposed = "face a\u{0300} l'église";
        assert_eq!(" l'église", remove_facing(&to_nfc(decomposed)));
    }

    #[test]
    fn labels_and_digits() {
        assert!(same_label("Richelieu-Chambly", "RICHELIEU-CHAMBLY"));
        assert!(!same_label("Richelieu", "Chambly"));
        assert_eq!(Some("123"), leading_digits("LON123A"));
        assert_eq!(Some("0045"), leading_digits("CHB0045C7"));
        assert_eq!(None, leading_digits("LONA"));
    }
}
