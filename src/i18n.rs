use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "ru",
        // Unicode isolation marks would break copy-paste of card numbers
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// The bot speaks Russian only.
static LANG: Lazy<LanguageIdentifier> = Lazy::new(|| "ru".parse().unwrap_or_default());

/// Returns the text for `key`, or the key itself when it is missing.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(key: &str) -> String {
    let text = LOCALES.lookup(&LANG, key).unwrap_or_else(|| key.to_string());
    text.replace("\\n", "\n")
}

/// Returns the text for `key` with arguments for interpolation.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t_args(key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let text = LOCALES
        .lookup_with_args(&LANG, key, &args_map)
        .unwrap_or_else(|| key.to_string());
    text.replace("\\n", "\n")
}

/// Shorthand for [`t_args`] with string arguments.
pub fn t_with(key: &str, pairs: &[(&str, &str)]) -> String {
    let mut args = FluentArgs::new();
    for (name, value) in pairs {
        args.set(*name, *value);
    }
    t_args(key, &args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_translation() {
        assert_eq!(t("button-profile"), "👤 Профиль");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t("no-such-key"), "no-such-key");
    }

    #[test]
    fn converts_newlines_and_keeps_card_numbers_clean() {
        let text = t_with(
            "card-template",
            &[
                ("card_order", "1"),
                ("min_amount", "1000"),
                ("max_amount", "5000"),
                ("card_number", "2200 1234 5678 9012"),
                ("card_name", "Ivan"),
                ("bank_name", "Bank"),
                ("percentage", "75"),
            ],
        );

        assert!(text.contains('\n'));
        assert!(!text.contains("\\n"));
        assert!(text.contains("<code>2200 1234 5678 9012</code>"));
        assert!(!text.contains('\u{2068}'));
    }
}
