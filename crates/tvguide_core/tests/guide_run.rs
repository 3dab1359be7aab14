use std::fs;
use tvguide_core::io::generate::generate_guide_file;
use tvguide_core::{
    load_report, publish_report, run_guide, GuideError, ParseError, Record, Selection, SortMode,
    Weekday,
};
use uuid::Uuid;

const GUIDE: &str = "\
Play School
Monday 9:30
Morning News
monday 6:00
Doctor Who
Saturday 19:05
antiques roadshow
MONDAY 20:15
";

#[test]
fn run_writes_sorted_monday_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, GUIDE).unwrap();

    let report = run_guide(
        &input,
        &output,
        Selection::new(Weekday::Monday, SortMode::Time),
    )
    .unwrap();

    assert_eq!(report.len(), 3);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        " 6:00 - Morning News\n 9:30 - Play School\n20:15 - antiques roadshow\n"
    );
}

#[test]
fn run_by_name_and_empty_day() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.txt");
    fs::write(&input, GUIDE).unwrap();

    let by_name = load_report(&input, Selection::new(Weekday::Monday, SortMode::Name)).unwrap();
    let titles: Vec<&str> = by_name.visible().iter().map(Record::title).collect();
    assert_eq!(titles, vec!["antiques roadshow", "Morning News", "Play School"]);

    let output = dir.path().join("empty.txt");
    let empty = run_guide(
        &input,
        &output,
        Selection::new(Weekday::Wednesday, SortMode::Time),
    )
    .unwrap();
    assert!(empty.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn invalid_guide_fails_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, "News\nmonday 6:00\nBroken\nfunday 7:00\n").unwrap();

    let err = run_guide(
        &input,
        &output,
        Selection::new(Weekday::Monday, SortMode::Time),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GuideError::Parse(ParseError::UnknownDay { line: 4, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_an_io_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_report(
        dir.path().join("absent.txt"),
        Selection::new(Weekday::Friday, SortMode::Time),
    )
    .unwrap_err();
    assert!(matches!(err, GuideError::Parse(ParseError::Io(_))));
}

#[test]
fn generated_guide_feeds_a_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("generated.txt");
    generate_guide_file(&input, 200, Some(99)).unwrap();

    let mut total = 0;
    for day in Weekday::ALL {
        let report = load_report(&input, Selection::new(day, SortMode::Time)).unwrap();
        assert_eq!(report.drained(), 200);
        assert!(report.visible().iter().all(|record| record.day() == day));
        total += report.len();
    }
    assert_eq!(total, 200);
}

#[test]
fn record_serialization_uses_lowercase_day() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let record = Record::with_id(id, "Four Corners", Weekday::Monday, 20, 30).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Four Corners");
    assert_eq!(json["day"], "monday");
    assert_eq!(json["hour"], 20);
    assert_eq!(json["minute"], 30);

    let decoded: Record = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_rejects_invalid_time() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Late",
        "day": "friday",
        "hour": 25,
        "minute": 0
    });

    let err = serde_json::from_value::<Record>(value).unwrap_err();
    assert!(
        err.to_string().contains("hour 25 is outside 0-23"),
        "unexpected error: {err}"
    );
}

#[test]
fn publish_prints_before_writing_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.txt");
    fs::write(&input, GUIDE).unwrap();
    let report = load_report(&input, Selection::new(Weekday::Saturday, SortMode::Time)).unwrap();

    let unwritable = dir.path().join("missing").join("report.txt");
    let mut screen = Vec::new();
    let mut diagnostics = Vec::new();
    let err = publish_report(&report, &unwritable, &mut screen, &mut diagnostics).unwrap_err();

    assert!(matches!(err, GuideError::Output(_)));
    assert_eq!(String::from_utf8(screen).unwrap(), "\n19:05 - Doctor Who\n");
    assert!(diagnostics.is_empty());

    let output = dir.path().join("report.txt");
    let mut screen = Vec::new();
    publish_report(&report, &output, &mut screen, &mut diagnostics).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "19:05 - Doctor Who\n");
}
