/// Greedy word wrap against a width budget. `width_of` measures a single
/// char in the same units as `max_width`. Words wider than the budget are split.
pub fn wrap_text<F>(text: &str, max_width: u32, width_of: F) -> Vec<String>
where
    F: Fn(char) -> u32,
{
    let space = width_of(' ');
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width: u32 = word.chars().map(&width_of).sum();

        if !current.is_empty() {
            if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = width_of(c);
            if !current.is_empty() && current_width + w > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// Advance widths from the standard Helvetica AFMs, 1/1000 em, chars 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Advance width of `c` in Helvetica (or Helvetica-Bold), in 1/1000 em.
/// Chars without a known metric count as a full em.
pub fn helvetica_char_width(c: char, bold: bool) -> u32 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let c = if c == '\t' { ' ' } else { c };

    if (' '..='~').contains(&c) {
        return u32::from(table[c as usize - 0x20]);
    }
    if let Some(base) = latin1_base_letter(c) {
        return u32::from(table[base as usize - 0x20]);
    }

    match c {
        'ì'..='ï' | 'Ì'..='Ï' => 278,
        '\u{2022}' => 350,
        'ª' | 'º' | '°' => 400,
        '«' | '»' | '§' | '€' | '\u{2013}' => 556,
        '\u{2018}' | '\u{2019}' => if bold { 278 } else { 222 },
        '\u{201C}' | '\u{201D}' => if bold { 500 } else { 333 },
        _ => 1000,
    }
}

pub fn helvetica_text_width(text: &str, bold: bool) -> u32 {
    text.chars().map(|c| helvetica_char_width(c, bold)).sum()
}

fn latin1_base_letter(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}
