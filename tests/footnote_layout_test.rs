// Stacking behaviour of the footnote layout engine

mod common;

use common::FakePage;
use floating_footnotes_wasm::layout::is_non_overlapping;
use floating_footnotes_wasm::{compute_offsets, FootnoteBox, FootnoteLayoutEngine};

#[test]
fn test_close_citations_stack_downwards() {
    let page = FakePage::with_notes(&[10.0, 12.0, 15.0], &[20.0, 20.0, 20.0]);
    let report = FootnoteLayoutEngine::new().apply_offsets(&page).unwrap();

    assert_eq!(report.offsets(), vec![10.0, 30.0, 50.0]);
    assert_eq!(report.placements[1].desired_top, 12.0);
    assert_eq!(page.offsets_in_order(), vec![Some(10.0), Some(30.0), Some(50.0)]);
}

#[test]
fn test_adjacent_footnotes_never_overlap() {
    let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
        (vec![0.0, 0.0, 0.0, 0.0], vec![15.0, 25.0, 5.0, 40.0]),
        (vec![300.0, 100.0, 50.0], vec![60.0, 60.0, 60.0]),
        (vec![5.0, 400.0, 410.0, 1200.0, 1190.0], vec![80.0, 12.0, 33.5, 7.0, 7.0]),
        (vec![-50.0, -10.0, 20.0], vec![10.0, 10.0, 10.0]),
    ];

    for (tops, extents) in cases {
        let page = FakePage::with_notes(&tops, &extents);
        let offsets = FootnoteLayoutEngine::new().apply_offsets(&page).unwrap().offsets();
        let boxes: Vec<FootnoteBox> = tops
            .iter()
            .zip(&extents)
            .map(|(t, e)| FootnoteBox::new(*t, *e))
            .collect();

        assert!(is_non_overlapping(&boxes, &offsets), "overlap for tops {:?}", tops);
        for window in offsets.windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert_eq!(offsets, compute_offsets(&boxes));
    }
}

#[test]
fn test_relayout_starts_from_scratch() {
    let page = FakePage::with_notes(&[100.0, 110.0], &[50.0, 50.0]);
    let engine = FootnoteLayoutEngine::new();
    engine.apply_offsets(&page).unwrap();
    assert_eq!(page.offset("fn:2"), Some(150.0));

    // Content above the first citation shrank
    page.move_citation("fn:1", 20.0);
    page.move_citation("fn:2", 30.0);
    engine.apply_offsets(&page).unwrap();
    assert_eq!(page.offsets_in_order(), vec![Some(20.0), Some(70.0)]);
}

#[test]
fn test_clearing_twice_matches_clearing_once() {
    let page = FakePage::with_notes(&[10.0, 40.0, 90.0], &[20.0, 20.0, 20.0]);
    let engine = FootnoteLayoutEngine::new();
    engine.apply_offsets(&page).unwrap();

    engine.clear_offsets(&page).unwrap();
    let once = page.offsets_in_order();
    engine.clear_offsets(&page).unwrap();
    assert_eq!(page.offsets_in_order(), once);
    assert_eq!(once, vec![None, None, None]);
}

#[test]
fn test_previously_placed_note_losing_its_citation_is_cleared() {
    let page = FakePage::with_notes(&[10.0, 40.0], &[20.0, 20.0]);
    let engine = FootnoteLayoutEngine::new();
    engine.apply_offsets(&page).unwrap();

    page.uncite("fn:1");
    let report = engine.apply_offsets(&page).unwrap();
    assert_eq!(report.skipped, vec!["fn:1".to_string()]);
    assert_eq!(page.offsets_in_order(), vec![None, Some(40.0)]);
}
