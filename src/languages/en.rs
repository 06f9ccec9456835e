/*!
 * English helpers referenced by `en.rule`.
 */

use std::sync::Arc;

use crate::errors::PhoneticsError;
use crate::phonetics::PhonemeProducer;
use crate::rules::FunctionRegistry;

pub const LANGUAGE_CODE: &str = "en";

/// Register `lookup_or_predict`, `post_process_people` and `post_process_places`
pub fn register(registry: &mut FunctionRegistry, producer: Arc<dyn PhonemeProducer>) {
    registry.register_phonetics(LANGUAGE_CODE, "lookup_or_predict", move |word: &str| {
        lookup_or_predict(producer.as_ref(), word)
    });
    registry.register_post(LANGUAGE_CODE, "post_process_people", post_process_people);
    registry.register_post(LANGUAGE_CODE, "post_process_places", post_process_places);
}

/// ARPAbet symbols of a word, without stress digits.
///
/// `OY` (as in "boy") is written out as `OW IH`.
pub fn lookup_or_predict(producer: &dyn PhonemeProducer, word: &str) -> Result<Vec<String>, PhoneticsError> {
    let mut symbols = Vec::new();
    for symbol in producer.phonemes(word)? {
        let symbol: String = symbol.chars().filter(|c| !c.is_ascii_digit()).collect();
        if symbol.is_empty() {
            continue;
        }
        if symbol == "OY" {
            symbols.push("OW".to_string());
            symbols.push("IH".to_string());
        } else {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

/// 弗 replaces 夫 at the start of a personal name
pub fn post_process_people(text: &str) -> String {
    match text.strip_prefix('夫') {
        Some(rest) => format!("弗{}", rest),
        None => text.to_string(),
    }
}

/// Place names avoid misleading characters: 东/南/西 at the start become
/// 栋/楠/锡 and 海 at the end becomes 亥
pub fn post_process_places(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    if let Some(first) = chars.first_mut() {
        *first = match *first {
            '东' => '栋',
            '南' => '楠',
            '西' => '锡',
            other => other,
        };
    }
    if let Some(last) = chars.last_mut() {
        if *last == '海' {
            *last = '亥';
        }
    }
    chars.into_iter().collect()
}
