mod common;

use common::ScriptedOcr;
use platereader::detection::ocr::{COMPOSITE_CHARSET, DIGITS, LETTERS};
use platereader::{PlateError, PlateProcessor, SegmentMode};

#[test]
fn seven_characters_read_with_the_positional_schema() {
    let img = common::synthetic_plate();
    let processor = PlateProcessor::new();

    // Seven per-character readings, then the composite pass.
    let engine = ScriptedOcr::new(["A", "B", "1", "2", "3", "C", "D", "AB 123 CD"]);
    let reading = processor.read(&img, &engine).unwrap();

    assert_eq!(reading.cumulative, "AB123CD");
    // Spaces are stripped from the composite reading.
    assert_eq!(reading.composite, "AB123CD");
    // Equal lengths: cumulative wins.
    assert_eq!(reading.text, "AB123CD");

    let calls = engine.calls();
    assert_eq!(calls.len(), 8);

    // 2 letters + 3 digits + 2 letters, all in single-symbol mode.
    let expected = [LETTERS, LETTERS, DIGITS, DIGITS, DIGITS, LETTERS, LETTERS];
    for (call, want) in calls.iter().zip(expected) {
        assert_eq!(call.whitelist, want);
        assert_eq!(call.mode, SegmentMode::SingleGlyph);
    }

    // Whole-canvas pass: combined charset, multi-symbol mode.
    let composite_call = &calls[7];
    assert_eq!(composite_call.whitelist, COMPOSITE_CHARSET);
    assert_eq!(composite_call.mode, SegmentMode::TextBlock);
    assert_eq!(composite_call.patch_size, (600, 230));
}

#[test]
fn fractured_composite_falls_back_to_cumulative() {
    let img = common::synthetic_plate();
    let engine = ScriptedOcr::new(["A", "B", "1", "2", "3", "C", "D", "AB\n23CD"]);

    let reading = PlateProcessor::new().read(&img, &engine).unwrap();
    assert_eq!(reading.composite, "AB\n23CD");
    assert_eq!(reading.text, "AB123CD");
}

#[test]
fn length_mismatch_trusts_the_composite() {
    let img = common::synthetic_plate();
    // Composite pass reads one symbol more than the per-character pass
    // and there is no line break: the composite reading is trusted.
    let engine = ScriptedOcr::new(["A", "B", "1", "2", "3", "C", "D", "AB123CDX"]);

    let reading = PlateProcessor::new().read(&img, &engine).unwrap();
    assert_eq!(reading.cumulative.chars().count(), 7);
    assert_eq!(reading.composite.chars().count(), 8);
    assert_eq!(reading.text, "AB123CDX");
}

#[test]
fn blank_per_character_reading_is_a_recognition_failure() {
    let img = common::synthetic_plate();
    let engine = ScriptedOcr::new(["A", "B", "", "2", "3", "C", "D", "AB123CD"]);

    let err = PlateProcessor::new().read(&img, &engine).unwrap_err();
    match err {
        PlateError::RecognitionFailed { partial, .. } => assert_eq!(partial, "AB"),
        other => panic!("expected RecognitionFailed, got {other:?}"),
    }
}

#[test]
fn engine_error_on_composite_keeps_the_cumulative_partial() {
    let img = common::synthetic_plate();
    // Script runs dry before the composite call.
    let engine = ScriptedOcr::new(["A", "B", "1", "2", "3", "C", "D"]);

    let err = PlateProcessor::new().read(&img, &engine).unwrap_err();
    match err {
        PlateError::RecognitionFailed { stage, partial, .. } => {
            assert_eq!(stage, "composite recognition");
            assert_eq!(partial, "AB123CD");
        }
        other => panic!("expected RecognitionFailed, got {other:?}"),
    }
}

#[test]
fn blank_composite_reading_is_a_recognition_failure() {
    let img = common::synthetic_plate();
    // The whole-canvas pass returns only whitespace; after trimming and
    // space-stripping nothing is left.
    let engine = ScriptedOcr::new(["A", "B", "1", "2", "3", "C", "D", " \n"]);

    let err = PlateProcessor::new().read(&img, &engine).unwrap_err();
    match err {
        PlateError::RecognitionFailed { stage, partial, .. } => {
            assert_eq!(stage, "composite recognition");
            assert_eq!(partial, "AB123CD");
        }
        other => panic!("expected RecognitionFailed, got {other:?}"),
    }
}

#[test]
fn per_character_results_are_trimmed_before_concatenation() {
    let img = common::synthetic_plate();
    // Tesseract-style trailing newlines on each single-symbol result.
    let engine = ScriptedOcr::new(["A\n", "B\n", "1\n", "2\n", "3\n", "C\n", "D\n", "AB123CD\n"]);

    let reading = PlateProcessor::new().read(&img, &engine).unwrap();
    assert_eq!(reading.cumulative, "AB123CD");
    assert_eq!(reading.text, "AB123CD");
}
