/// Normalize a heading for comparison: fold common diacritics, drop emoji
/// and other symbols, collapse whitespace, lower-case.
///
/// `🎯 Operational Targets` and `operational   targets` both become
/// `operational targets`.
pub fn normalize_title(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(fold_diacritic)
        .map(|c| {
            if c.is_alphanumeric() || c.is_ascii_punctuation() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalize for fuzzy matching: lower-case alphanumerics only.
///
/// Spaces, hyphens, underscores, punctuation and emoji are all stripped, so
/// `Must-Have` and `must have` compare equal.
pub fn normalize_key(text: &str) -> String {
    text.chars()
        .map(fold_diacritic)
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => c,
    }
}
