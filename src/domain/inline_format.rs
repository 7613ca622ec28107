pub const BOLD_MARKER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRun {
    Plain(String),
    Bold(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            InlineRun::Plain(text) | InlineRun::Bold(text) => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, InlineRun::Bold(_))
    }
}

/// Splits a line into plain and bold runs, toggling on every `**`.
///
/// Only matched marker pairs toggle emphasis. With an odd marker count the last
/// marker and everything after it stay in a plain run, marker included.
pub fn tokenize_inline(line: &str) -> Vec<InlineRun> {
    let markers: Vec<usize> = line.match_indices(BOLD_MARKER).map(|(i, _)| i).collect();
    let matched = markers.len() - markers.len() % 2;

    let mut runs = Vec::new();
    let mut cursor = 0;
    let mut bold = false;

    for &position in &markers[..matched] {
        push_run(&mut runs, &line[cursor..position], bold);
        cursor = position + BOLD_MARKER.len();
        bold = !bold;
    }
    push_run(&mut runs, &line[cursor..], false);

    runs
}

/// The line's text with emphasis markers removed.
pub fn strip_inline_markers(line: &str) -> String {
    tokenize_inline(line)
        .iter()
        .map(InlineRun::text)
        .collect::<Vec<_>>()
        .concat()
}

fn push_run(runs: &mut Vec<InlineRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    if bold {
        runs.push(InlineRun::Bold(text.to_string()));
        return;
    }
    if let Some(InlineRun::Plain(previous)) = runs.last_mut() {
        previous.push_str(text);
    } else {
        runs.push(InlineRun::Plain(text.to_string()));
    }
}

/// Block-level shape of one line of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading(&'a str),
    Bullet(&'a str),
    Body(&'a str),
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Heading(trimmed.trim_start_matches('#').trim_start());
    }
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return LineKind::Bullet(rest.trim_start());
    }
    LineKind::Body(trimmed)
}
