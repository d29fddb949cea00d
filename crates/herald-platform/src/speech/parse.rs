//! Parsers for the voice listings printed by system TTS tools.

use herald_common::Voice;

/// Parse `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af              --/M      Afrikaans          gmw/af
///  2  en-us           --/M      English_(America)  gmw/en-US            (en 3)
/// ```
pub fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _priority = cols.next()?;
            let lang = cols.next()?;
            let _age_gender = cols.next()?;
            let name = cols.next()?;
            Some(Voice::new(name, normalize_lang(lang)))
        })
        .collect()
}

/// Parse `say -v '?'`.
///
/// ```text
/// Alex                en_US    # Most people recognize me by my voice.
/// Bad News            en_US    # The light you see at the end of the tunnel...
/// ```
pub fn parse_say_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim_end();
            let (name, lang) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Voice::new(name, normalize_lang(lang)))
        })
        .collect()
}

/// `en_us` / `en-us` -> `en-US`. Tags without a two-letter region are
/// returned with only the separator normalized.
pub fn normalize_lang(tag: &str) -> String {
    let tag = tag.replace('_', "-");
    match tag.split_once('-') {
        Some((lang, region)) if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) => {
            format!("{}-{}", lang.to_ascii_lowercase(), region.to_ascii_uppercase())
        }
        _ => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESPEAK: &str = "Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 2  en-gb           --/M      English_(Great_Britain) gmw/en               (en 2)
 2  en-us           --/M      English_(America)  gmw/en-US            (en 3)
";

    const SAY: &str = "Alex                en_US    # Most people recognize me by my voice.
Anna                de_DE    # Hallo, ich heiße Anna und ich bin eine deutsche Stimme.
Bad News            en_US    # The light you see at the end of the tunnel is the headlamp of a fast approaching train.
";

    #[test]
    fn espeak_listing() {
        let voices = parse_espeak_voices(ESPEAK);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0], Voice::new("Afrikaans", "af"));
        assert_eq!(voices[2], Voice::new("English_(America)", "en-US"));
    }

    #[test]
    fn espeak_without_header_is_empty() {
        assert!(parse_espeak_voices("").is_empty());
        assert!(parse_espeak_voices("espeak-ng: command not found").is_empty());
    }

    #[test]
    fn say_listing_keeps_multiword_names() {
        let voices = parse_say_voices(SAY);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0], Voice::new("Alex", "en-US"));
        assert_eq!(voices[1], Voice::new("Anna", "de-DE"));
        assert_eq!(voices[2], Voice::new("Bad News", "en-US"));
    }

    #[test]
    fn normalize_lang_tags() {
        assert_eq!(normalize_lang("en_us"), "en-US");
        assert_eq!(normalize_lang("EN-gb"), "en-GB");
        assert_eq!(normalize_lang("af"), "af");
        assert_eq!(normalize_lang("cmn-latn-pinyin"), "cmn-latn-pinyin");
    }
}
