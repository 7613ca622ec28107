use atapro::domain::{InlineRun, LineKind, classify_line, strip_inline_markers, tokenize_inline};

#[test]
fn given_balanced_markers_when_tokenizing_then_runs_alternate() {
    let runs = tokenize_inline("a **b** c");
    assert_eq!(
        runs,
        vec![
            InlineRun::Plain("a ".to_string()),
            InlineRun::Bold("b".to_string()),
            InlineRun::Plain(" c".to_string()),
        ]
    );
}

#[test]
fn given_line_starting_bold_when_tokenizing_then_no_empty_run_is_emitted() {
    let runs = tokenize_inline("**Data:** 12 de Março");
    assert_eq!(
        runs,
        vec![
            InlineRun::Bold("Data:".to_string()),
            InlineRun::Plain(" 12 de Março".to_string()),
        ]
    );
}

#[test]
fn given_single_marker_when_tokenizing_then_text_stays_literal() {
    let runs = tokenize_inline("a **b");
    assert_eq!(runs, vec![InlineRun::Plain("a **b".to_string())]);
}

#[test]
fn given_odd_marker_count_when_tokenizing_then_only_pairs_toggle() {
    let runs = tokenize_inline("**a** b **c");
    assert_eq!(
        runs,
        vec![
            InlineRun::Bold("a".to_string()),
            InlineRun::Plain(" b **c".to_string()),
        ]
    );
    assert!(runs[0].is_bold());
    assert!(!runs[1].is_bold());
}

#[test]
fn given_emphasis_when_stripping_then_markers_disappear() {
    assert_eq!(strip_inline_markers("**Local:** Lisboa"), "Local: Lisboa");
    assert_eq!(strip_inline_markers("sem marcas"), "sem marcas");
}

#[test]
fn given_block_lines_when_classifying_then_shapes_are_recognised() {
    assert_eq!(classify_line("## Ordem de Trabalhos"), LineKind::Heading("Ordem de Trabalhos"));
    assert_eq!(classify_line("* Aprovado"), LineKind::Bullet("Aprovado"));
    assert_eq!(classify_line("- Rejeitado"), LineKind::Bullet("Rejeitado"));
    assert_eq!(classify_line("   "), LineKind::Blank);
    assert_eq!(classify_line("**Bold** start"), LineKind::Body("**Bold** start"));
}
