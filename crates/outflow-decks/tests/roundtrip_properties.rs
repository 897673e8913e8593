//! Property-based tests for deck round-trip invariants.

use proptest::prelude::*;

use outflow_config::DialectSpec;
use outflow_decks::DeckEditor;

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.+-]{1,10}"
}

/// One syntactically valid dust-deck line: blank, section bar, comment,
/// active entry (with or without annotation), or inactive alternative.
fn dust_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "\\*{4,12}",
        "[A-Za-z0-9 .,]{0,20}".prop_map(|text| format!("* {text}")),
        (key_strategy(), value_strategy()).prop_map(|(k, v)| format!("{k}={v}")),
        (key_strategy(), value_strategy()).prop_map(|(k, v)| format!("*{k}={v}")),
        (key_strategy(), value_strategy(), "[A-Za-z ]{1,12}")
            .prop_map(|(k, v, ann)| format!("{k}={v}  {ann}")),
    ]
}

fn dust_deck_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(dust_line_strategy(), 0..40).prop_map(|lines| {
        if lines.is_empty() {
            String::new()
        } else {
            let mut text = lines.join("\n");
            text.push('\n');
            text
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5_000))]

    /// Parsing and rendering an untouched deck is the identity.
    #[test]
    fn roundtrip_is_identity(deck in dust_deck_strategy()) {
        let editor = DeckEditor::parse(&deck, DialectSpec::dust_deck())
            .expect("generated deck should parse");
        prop_assert_eq!(editor.render(), deck);
    }

    /// After set, re-parsing the rendered deck returns the new value.
    #[test]
    fn set_survives_reparse(
        deck in dust_deck_strategy(),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut editor = DeckEditor::parse(&deck, DialectSpec::dust_deck())
            .expect("generated deck should parse");
        editor.set(&key, &value);

        let rendered = editor.render();
        let reparsed = DeckEditor::parse(&rendered, DialectSpec::dust_deck())
            .expect("edited deck should still parse");
        prop_assert_eq!(reparsed.get(&key), Some(value.as_str()));
    }

    /// set never changes how many lines the deck has beyond the one it
    /// replaces or inserts, and never reorders the others.
    #[test]
    fn set_touches_at_most_one_line(
        deck in dust_deck_strategy(),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let before = DeckEditor::parse(&deck, DialectSpec::dust_deck())
            .expect("generated deck should parse");
        let mut after = before.clone();
        after.set(&key, &value);

        let before_raw: Vec<&str> = before.lines().iter().map(|l| l.raw.as_str()).collect();
        let after_raw: Vec<&str> = after.lines().iter().map(|l| l.raw.as_str()).collect();

        prop_assert!(after_raw.len() == before_raw.len() || after_raw.len() == before_raw.len() + 1);
        let changed = if after_raw.len() == before_raw.len() {
            before_raw
                .iter()
                .zip(&after_raw)
                .filter(|(b, a)| b != a)
                .count()
        } else {
            // One insertion: everything else must still appear in order.
            let mut b = before_raw.iter();
            let mut skipped = 0;
            for a in &after_raw {
                if b.as_slice().first() == Some(a) {
                    b.next();
                } else {
                    skipped += 1;
                }
            }
            prop_assert!(b.as_slice().is_empty(), "existing lines were reordered or lost");
            skipped
        };
        prop_assert!(changed <= 1, "more than one line changed: {changed}");
    }
}

// ── Gas dialect properties ─────────────────────────────────────────

fn molecule_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9]{1,8}", 1..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    /// Repeatable keys keep every occurrence, in file order.
    #[test]
    fn repeatable_keys_keep_order(molecules in molecule_strategy()) {
        let deck: String = molecules
            .iter()
            .map(|m| format!("MOLECULE={m}\n"))
            .collect();
        let editor = DeckEditor::parse(&deck, DialectSpec::gas_deck())
            .expect("generated deck should parse");
        let seen: Vec<&str> = editor.entries("MOLECULE");
        let wanted: Vec<&str> = molecules.iter().map(String::as_str).collect();
        prop_assert_eq!(seen, wanted);
    }
}
