// Calendar export checked against an independent iCalendar parser.
use chrono::{NaiveDate, TimeZone, Utc};
use icalendar::{Calendar, CalendarComponent, Component};
use rostercal::ics::{FOLD_LIMIT, render_at, write_ics};
use rostercal::model::{Location, ShiftEntry, TimeOfDay};
use rostercal::Schedule;

fn entries() -> Vec<ShiftEntry> {
    let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    vec![
        ShiftEntry::new(d(4), "一", TimeOfDay::Morning, "A组坐诊", Location::MainCampus),
        ShiftEntry::new(d(5), "二", TimeOfDay::AllDay, "记录", Location::JinjiangBranch),
        ShiftEntry::new(d(7), "加班", TimeOfDay::Evening, "加强采图", Location::ImagingPool),
    ]
}

#[test]
fn test_written_file_parses_back() {
    let dir = std::env::temp_dir().join(format!("rostercal_ics_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("张三_排班.ics");

    write_ics(&entries(), "张三", &path).unwrap();
    assert!(!path.with_extension("ics.tmp").exists());

    let raw = std::fs::read_to_string(&path).unwrap();
    let calendar: Calendar = raw.parse().unwrap();
    let summaries: Vec<String> = calendar
        .components
        .iter()
        .filter_map(|c| match c {
            CalendarComponent::Event(e) => e.get_summary().map(str::to_string),
            _ => None,
        })
        .collect();
    assert_eq!(summaries, vec!["上午A组坐诊", "记录", "加强采图"]);

    let locations: Vec<&str> = calendar
        .components
        .iter()
        .filter_map(|c| match c {
            CalendarComponent::Event(e) => e.property_value("LOCATION"),
            _ => None,
        })
        .collect();
    assert_eq!(locations, vec!["总院区", "锦江分院", "采图与找片子"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_write_into_missing_directory_fails_with_context() {
    let path = std::env::temp_dir()
        .join(format!("rostercal_missing_{}", uuid::Uuid::new_v4()))
        .join("out.ics");
    let err = write_ics(&entries(), "张三", &path).unwrap_err();
    assert!(format!("{:#}", err).contains("out.ics"));
}

#[test]
fn test_long_summary_is_folded() {
    let activity = "超长活动名称".repeat(12);
    let entry = ShiftEntry::new(
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        "一",
        TimeOfDay::AllDay,
        activity.as_str(),
        Location::RapidClinic,
    );
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let ics = render_at(&[entry], "张三", now);

    for line in ics.split("\r\n") {
        assert!(line.len() <= FOLD_LIMIT, "line too long: {} octets", line.len());
    }
    let unfolded = ics.replace("\r\n ", "");
    assert!(unfolded.contains(&format!("SUMMARY:{activity}\r\n")));
}

#[test]
fn test_schedule_export_and_escaping() {
    let schedule = Schedule::new(
        "张三",
        "2024",
        vec![ShiftEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            "一",
            TimeOfDay::AllDay,
            "会诊; 血液,消化",
            Location::ImagingPool,
        )],
    );
    let ics = schedule.to_ics();
    assert!(ics.contains(r"SUMMARY:会诊\; 血液\,消化"));
    assert!(ics.contains("DTSTART;VALUE=DATE:20240304\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
}
