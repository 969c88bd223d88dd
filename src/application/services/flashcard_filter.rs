use serde_json::{Map, Value};

use crate::domain::Flashcard;

/// Keeps decoded entries that are objects with non-blank `question` and
/// `answer` fields, in their original order. Numbers and booleans are taken in
/// their JSON text form; other non-string values drop the entry. Extra fields
/// are discarded.
pub fn filter_flashcards(items: Vec<Value>) -> Vec<Flashcard> {
    items
        .into_iter()
        .filter_map(|item| {
            let Value::Object(mut fields) = item else {
                return None;
            };
            let question = take_text(&mut fields, "question")?;
            let answer = take_text(&mut fields, "answer")?;
            Some(Flashcard { question, answer })
        })
        .collect()
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.remove(key)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}
