use cardsmith::application::services::PromptBuilder;

#[test]
fn given_short_text_when_building_then_embeds_it_untruncated() {
    let builder = PromptBuilder::default();

    let prompt = builder.build("Paris is the capital of France.");

    assert!(!prompt.truncated);
    assert_eq!(prompt.input_chars, 31);
    assert!(
        prompt
            .text
            .contains("\"\"\"\nParis is the capital of France.\n\"\"\"")
    );
}

#[test]
fn given_text_over_budget_when_building_then_keeps_exactly_budget_chars() {
    let builder = PromptBuilder::new(10);

    let prompt = builder.build("0123456789ABCDEF");

    assert!(prompt.truncated);
    assert_eq!(prompt.input_chars, 10);
    assert!(prompt.text.contains("\"\"\"\n0123456789\n\"\"\""));
    assert!(!prompt.text.contains("ABCDEF"));
}

#[test]
fn given_text_exactly_at_budget_when_building_then_not_truncated() {
    let builder = PromptBuilder::new(5);

    let prompt = builder.build("abcde");

    assert!(!prompt.truncated);
    assert!(prompt.text.contains("abcde"));
}

#[test]
fn given_multibyte_text_when_truncating_then_counts_characters_not_bytes() {
    let builder = PromptBuilder::new(3);

    let prompt = builder.build("éàüöß");

    assert!(prompt.truncated);
    assert!(prompt.text.contains("\"\"\"\néàü\n\"\"\""));
}

#[test]
fn given_any_text_when_building_then_demands_strict_json_array() {
    let prompt = PromptBuilder::default().build("content");

    assert!(prompt.text.contains("Output ONLY the JSON array"));
    assert!(prompt.text.contains("\"question\""));
    assert!(prompt.text.contains("\"answer\""));
    assert!(prompt.text.contains("Do **not stop at a fixed number of flashcards**"));
}

#[test]
fn given_default_builder_when_inspected_then_budget_is_4000_chars() {
    assert_eq!(PromptBuilder::default().max_input_chars(), 4000);
}
