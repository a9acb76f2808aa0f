use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

/// Builds the URL slug for a post title: transliterate to ascii, lowercase,
/// and collapse every run of non-alphanumeric characters into one dash.
/// The result never starts or ends with a dash.
pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let ascii = unidecode(title).to_lowercase();
    let dashed = NON_ALNUM_REGEX.replace_all(&ascii, "-");
    dashed.trim_matches('-').to_string()
}
