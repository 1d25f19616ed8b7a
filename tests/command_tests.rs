mod fixtures;

use fixtures::ChartBuilder;
use chart_studio::commands::{
    execute_parse, execute_serialize, execute_summarize, validate_args, ChartArgs,
};
use chart_studio::output::read_summary;
use chart_studio::parser::{BpmPrimaryType, RecordFormat};
use chart_studio::utils::ParseError;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn sample_chart() -> ChartBuilder {
    ChartBuilder::new(RecordFormat::New)
        .bpm(0, 150)
        .frameset(0, [118, 122, 126, 132, 136, 140])
        .key(1000, 0)
        .hold(1000, 1, 500)
        .end(4000)
}

#[test]
fn test_validate_args_valid() {
    let args = ChartArgs {
        bin_file: PathBuf::from("charts/song_op.bin"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_path() {
    let args = ChartArgs::default();

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_wrong_extension() {
    let args = ChartArgs {
        bin_file: PathBuf::from("song.ifs"),
        ..Default::default()
    };

    let err = validate_args(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::UnsupportedInput(_))
    ));
}

#[test]
fn test_validate_args_output_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = ChartArgs {
        bin_file: PathBuf::from("chart.bin"),
        output: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_summarize_writes_json() {
    let chart = sample_chart().write("chart.bin");
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("out/summary.json");

    let args = ChartArgs {
        bin_file: chart.path.clone(),
        format: RecordFormat::New,
        output: Some(output.clone()),
    };

    let summary = execute_summarize(&args, false).unwrap();

    assert_eq!(summary.notes, 3);
    assert_eq!(summary.hold_notes, 1);
    assert_eq!(summary.bpm_primary_type, BpmPrimaryType::Totality);
    assert_eq!(read_summary(&output).unwrap(), summary);

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_serialize_writes_timeline_csv() {
    let chart = sample_chart().write("chart.bin");
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("timeline.csv");

    let args = ChartArgs {
        bin_file: chart.path.clone(),
        format: RecordFormat::New,
        output: Some(output.clone()),
    };

    execute_serialize(&args).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "timestamp,key,keyon,keyoff,measurebeatend,bpm\n\
         0,,,,,150\n\
         1000,1,2,,,\n\
         1500,,,2,,\n\
         4000,,,,e,\n"
    );
}

#[test]
fn test_parse_writes_event_lines() {
    let chart = ChartBuilder::new(RecordFormat::Old)
        .bpm(0, 120)
        .raw(10, 0x5555, 4, 0)
        .end(20)
        .write("chart.bin");
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("events.txt");

    let args = ChartArgs {
        bin_file: chart.path.clone(),
        format: RecordFormat::Old,
        output: Some(output.clone()),
    };

    execute_parse(&args, false).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text, "0,bpm,120,0\n10,,4,0\n20,end,0,0\n");
}

#[test]
fn test_overflow_produces_no_output() {
    let mut builder = ChartBuilder::new(RecordFormat::Old);
    for t in 0..40 {
        builder = builder.raw(t, 0x7777, 0, 0);
    }
    let chart = builder.write("broken.bin");
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("summary.json");

    let args = ChartArgs {
        bin_file: chart.path.clone(),
        format: RecordFormat::Old,
        output: Some(output.clone()),
    };

    let err = execute_summarize(&args, false).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::UnknownEventOverflow { .. })
    ));
    assert!(!output.exists());
}
