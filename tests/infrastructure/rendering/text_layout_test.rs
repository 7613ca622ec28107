use atapro::infrastructure::rendering::{helvetica_char_width, helvetica_text_width, wrap_text};

fn by_chars(_: char) -> u32 {
    1
}

#[test]
fn given_short_text_when_wrapping_then_single_line_is_returned() {
    assert_eq!(wrap_text("Ata da reunião", 40, by_chars), vec!["Ata da reunião"]);
}

#[test]
fn given_long_sentence_when_wrapping_then_lines_respect_width() {
    let lines = wrap_text("um dois três quatro cinco seis", 10, by_chars);
    assert_eq!(lines, vec!["um dois", "três", "quatro", "cinco seis"]);
    assert!(lines.iter().all(|l| l.chars().count() <= 10));
}

#[test]
fn given_word_longer_than_width_when_wrapping_then_word_is_split() {
    assert_eq!(wrap_text("abcdefgh", 3, by_chars), vec!["abc", "def", "gh"]);
}

#[test]
fn given_blank_text_when_wrapping_then_no_lines_are_produced() {
    assert!(wrap_text("   ", 10, by_chars).is_empty());
}

#[test]
fn given_wide_glyphs_when_wrapping_by_width_then_fewer_fit_per_line() {
    let width = |c| helvetica_char_width(c, false);
    let budget = 10_000;

    let capitals = wrap_text(&"W".repeat(40), budget, width);
    let narrow = wrap_text(&"i".repeat(40), budget, width);

    assert_eq!(capitals[0].len(), 10);
    assert_eq!(narrow.len(), 1);
    assert!(capitals.iter().all(|l| helvetica_text_width(l, false) <= budget));
}

#[test]
fn given_portuguese_letters_when_measuring_then_accents_take_base_width() {
    assert_eq!(helvetica_char_width('ç', false), helvetica_char_width('c', false));
    assert_eq!(helvetica_char_width('Ã', true), helvetica_char_width('A', true));
    assert!(helvetica_text_width("ATA", true) >= helvetica_text_width("ATA", false));
    assert_eq!(helvetica_char_width('漢', false), 1000);
}
