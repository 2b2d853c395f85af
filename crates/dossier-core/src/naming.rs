use lazy_static::lazy_static;
use regex::Regex;

use crate::config::OutputConfig;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Replace every run of whitespace, including leading and trailing runs,
/// with a single underscore. Other punctuation is kept as-is.
pub fn sanitize_title(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, "_").into_owned()
}

/// Output file name for a property's dossier.
///
/// ```
/// use dossier_core::{dossier_file_name, DossierConfig};
///
/// let name = dossier_file_name("Embassy Verde - Phase Two", &DossierConfig::default().output);
/// assert_eq!(name, "Propertyfie_Intel_Dossier_Embassy_Verde_-_Phase_Two.pdf");
/// ```
pub fn dossier_file_name(title: &str, output: &OutputConfig) -> String {
    format!(
        "{}{}.{}",
        output.file_prefix,
        sanitize_title(title),
        output.extension.trim_start_matches('.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(sanitize_title("Prestige  Lake\tRidge"), "Prestige_Lake_Ridge");
        assert_eq!(sanitize_title("  Sobha  "), "_Sobha_");
    }

    #[test]
    fn test_edge_whitespace_kept_as_underscores() {
        assert_eq!(
            dossier_file_name(" Sobha Lake ", &OutputConfig::default()),
            "Propertyfie_Intel_Dossier__Sobha_Lake_.pdf"
        );
    }

    #[test]
    fn test_punctuation_preserved() {
        assert_eq!(
            dossier_file_name("Godrej Woodscapes (Phase-1)", &OutputConfig::default()),
            "Propertyfie_Intel_Dossier_Godrej_Woodscapes_(Phase-1).pdf"
        );
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let output = OutputConfig {
            file_prefix: "Brief_".to_string(),
            extension: ".pdf".to_string(),
        };
        assert_eq!(dossier_file_name("Verde", &output), "Brief_Verde.pdf");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: sanitized titles never contain whitespace
        #[test]
        fn sanitized_has_no_whitespace(title in "\\PC{0,60}") {
            let sanitized = sanitize_title(&title);
            prop_assert!(!sanitized.chars().any(char::is_whitespace));
        }

        /// Property: only whitespace is lost
        #[test]
        fn sanitize_keeps_other_chars(title in "[A-Za-z0-9()&.,-]{1,10}( {1,3}[A-Za-z0-9()&.,-]{1,10}){0,5}") {
            let sanitized = sanitize_title(&title);
            let expected: String = title.split_whitespace().collect();
            prop_assert_eq!(sanitized.replace('_', ""), expected);
        }
    }
}
