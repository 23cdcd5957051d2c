//! Text normalization to the canonical extractor character set.
//!
//! Source XML mixes legacy Windows-1252 punctuation (often surviving as C1
//! control code points), Unicode typography, and escaped HTML entities.
//! Everything is folded to plain ASCII, except for the accented letters
//! used in Welsh-language instruments.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Substitutions applied before the character filter.
///
/// Replacement values are ASCII so the filter never strips them.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    // Windows-1252 smart punctuation decoded as C1 controls
    ("\u{93}", "\""),
    ("\u{94}", "\""),
    ("\u{91}", "'"),
    ("\u{92}", "'"),
    ("\u{96}", "-"),
    ("\u{97}", "-"),
    ("\u{85}", "..."),
    ("\u{95}", "-"),
    // Unicode quotes
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    // Dashes and horizontal bar
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{2015}", "-"),
    // Ellipsis and bullet
    ("\u{2026}", "..."),
    ("\u{2022}", "-"),
    // Escaped HTML entities
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&ndash;", "-"),
    ("&mdash;", "-"),
    ("&hellip;", "..."),
    ("&amp;", "&"),
    // Whitespace variants
    ("\u{A0}", " "),
    ("\t", " "),
    ("\r", " "),
];

/// Welsh-language letters kept by the character filter.
const WELSH_LETTERS: &[char] = &[
    'Â', 'â', 'Ê', 'ê', 'Î', 'î', 'Ô', 'ô', 'Û', 'û', 'Ŵ', 'ŵ', 'Ŷ', 'ŷ', 'Á', 'á', 'É', 'é',
    'Í', 'í', 'Ó', 'ó', 'Ú', 'ú', 'Ý', 'ý',
];

/// Runs of whitespace, collapsed to a single space.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Check whether a character belongs to the canonical character set.
pub fn is_canonical_char(c: char) -> bool {
    c.is_ascii() || WELSH_LETTERS.contains(&c)
}

/// Normalize raw document text to the canonical character set.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)` for
/// every input. The single-pass pipeline can expose new work for itself
/// (`&amp;lt;` decodes to `&lt;`, a dropped character can join the halves
/// of an entity), so passes repeat until the text is stable. Every pass
/// either removes a non-ASCII character or shortens the text, so the loop
/// terminates.
///
/// # Examples
/// ```
/// use uksi_extractor::text::normalize;
///
/// assert_eq!(normalize("  \u{201C}Citation\u{201D}\u{2014}commencement "), "\"Citation\"-commencement");
/// assert_eq!(normalize("Gorchymyn Ŵyl &amp; Môr"), "Gorchymyn Ŵyl & Môr");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Compose a base letter with its combining marks when the result is a
/// Welsh letter.
///
/// Any other cluster is left decomposed, so the filter keeps an ASCII base
/// letter and drops only its marks.
fn compose_welsh_letters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(base) = chars.next() {
        let mut cluster = String::from(base);
        while let Some(&mark) = chars.peek() {
            if !is_combining_mark(mark) {
                break;
            }
            cluster.push(mark);
            chars.next();
        }

        if cluster.len() == base.len_utf8() {
            out.push(base);
            continue;
        }

        let mut composed = cluster.nfc();
        match (composed.next(), composed.next()) {
            (Some(letter), None) if WELSH_LETTERS.contains(&letter) => out.push(letter),
            _ => out.push_str(&cluster),
        }
    }
    out
}

/// One pass of repair, substitution, filtering, and whitespace collapse.
fn normalize_pass(text: &str) -> String {
    // Replacement characters are left behind by lossy byte decoding.
    let text: String = text.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect();
    let mut text = compose_welsh_letters(&text);

    for (from, to) in SUBSTITUTIONS {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }

    let filtered: String = text.chars().filter(|c| is_canonical_char(*c)).collect();

    WHITESPACE_RUN
        .replace_all(&filtered, " ")
        .trim()
        .to_string()
}
