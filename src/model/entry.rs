// File: ./src/model/entry.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Weekday labels a roster uses for regular days, Monday first.
pub const STANDARD_WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

/// Prefix marking an activity that was moved to a reinforced evening shift.
pub const REINFORCED_MARKER: &str = "加强";

// --- TIME OF DAY ---

/// Semantic shift slot. Clock ranges are only assigned at export time.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum TimeOfDay {
    #[strum(to_string = "上午")]
    Morning,
    #[strum(to_string = "下午")]
    Afternoon,
    #[strum(to_string = "全天")]
    AllDay,
    #[strum(to_string = "晚上")]
    Evening,
}

impl TimeOfDay {
    /// Maps a header time-slot fragment to a slot.
    ///
    /// Any slot holding "上" or "下" without "午" is widened to morning or
    /// afternoon first, so "晚上" counts as a morning slot. Then exact labels
    /// apply. Anything else is all-day.
    pub fn from_slot(fragment: &str) -> Self {
        let slot = fragment.trim();
        if slot.contains('上') && !slot.contains('午') {
            TimeOfDay::Morning
        } else if slot.contains('下') && !slot.contains('午') {
            TimeOfDay::Afternoon
        } else {
            slot.parse().unwrap_or(TimeOfDay::AllDay)
        }
    }
}

// --- LOCATION ---

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Location {
    #[strum(to_string = "总院区")]
    MainCampus,
    /// The branch campus, whose shifts count double.
    #[strum(to_string = "锦江分院")]
    JinjiangBranch,
    #[strum(to_string = "天府院区")]
    TianfuCampus,
    #[strum(to_string = "上锦院区")]
    ShangjinCampus,
    #[strum(to_string = "永宁院区")]
    YongningCampus,
    #[strum(to_string = "加快")]
    RapidClinic,
    #[strum(to_string = "采图与找片子")]
    ImagingPool,
    #[default]
    #[strum(to_string = "")]
    Unspecified,
}

// --- CATEGORY ---

/// Summary bucket an entry counts towards, beyond the total.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Category {
    #[strum(to_string = "取材")]
    MaterialsPrep,
    #[strum(to_string = "记录")]
    Logging,
    #[strum(to_string = "加快")]
    RapidClinic,
    #[strum(to_string = "采图")]
    Imaging,
}

// --- SHIFT ENTRY ---

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub date: NaiveDate,
    /// Weekday as written in the roster. Anything outside
    /// [`STANDARD_WEEKDAYS`] marks a special shift.
    pub weekday_label: String,
    pub time_of_day: TimeOfDay,
    pub activity: String,
    pub location: Location,
}

impl ShiftEntry {
    pub fn new(
        date: NaiveDate,
        weekday_label: impl Into<String>,
        time_of_day: TimeOfDay,
        activity: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            date,
            weekday_label: weekday_label.into(),
            time_of_day,
            activity: activity.into(),
            location,
        }
    }

    /// Key under which duplicate entries collapse.
    pub fn slot_key(&self) -> (NaiveDate, Location, TimeOfDay) {
        (self.date, self.location, self.time_of_day)
    }

    /// True when the declared weekday is non-empty and not one of the
    /// standard seven.
    pub fn is_special(&self) -> bool {
        let label = self.weekday_label.trim();
        !label.is_empty() && !STANDARD_WEEKDAYS.contains(&label)
    }

    /// Branch-campus shifts span a full double session.
    pub fn weight(&self) -> u32 {
        if self.location == Location::JinjiangBranch {
            2
        } else {
            1
        }
    }

    /// First matching category, by priority: activity keywords before location.
    pub fn category(&self) -> Option<Category> {
        if self.activity.contains("取材") {
            Some(Category::MaterialsPrep)
        } else if self.activity.contains("记录") {
            Some(Category::Logging)
        } else if self.location == Location::RapidClinic {
            Some(Category::RapidClinic)
        } else if self.location == Location::ImagingPool {
            Some(Category::Imaging)
        } else {
            None
        }
    }

    /// Text shown as the event title: main-campus half-day shifts carry
    /// their slot in front of the activity.
    pub fn summary_text(&self) -> String {
        match (self.location, self.time_of_day) {
            (Location::MainCampus, TimeOfDay::Morning | TimeOfDay::Afternoon) => {
                format!("{}{}", self.time_of_day, self.activity)
            }
            _ => self.activity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, activity: &str, location: Location) -> ShiftEntry {
        ShiftEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            day,
            TimeOfDay::AllDay,
            activity,
            location,
        )
    }

    #[test]
    fn test_slot_abbreviations_widen() {
        assert_eq!(TimeOfDay::from_slot("上"), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_slot(" 下 "), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_slot("上午"), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_slot("下午"), TimeOfDay::Afternoon);
        // The lone "上" widens before any exact label is consulted.
        assert_eq!(TimeOfDay::from_slot("晚上"), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_slot("全天"), TimeOfDay::AllDay);
        assert_eq!(TimeOfDay::from_slot("小组A"), TimeOfDay::AllDay);
        assert_eq!(TimeOfDay::from_slot(""), TimeOfDay::AllDay);
    }

    #[test]
    fn test_special_labels() {
        assert!(!entry("一", "x", Location::MainCampus).is_special());
        assert!(!entry(" 日 ", "x", Location::MainCampus).is_special());
        assert!(!entry("", "x", Location::MainCampus).is_special());
        assert!(entry("加班", "x", Location::MainCampus).is_special());
        assert!(entry("星期一", "x", Location::MainCampus).is_special());
    }

    #[test]
    fn test_category_priority() {
        // Activity keywords win over location.
        assert_eq!(
            entry("一", "取材记录", Location::RapidClinic).category(),
            Some(Category::MaterialsPrep)
        );
        assert_eq!(
            entry("一", "记录", Location::ImagingPool).category(),
            Some(Category::Logging)
        );
        assert_eq!(
            entry("一", "加快 (A)", Location::RapidClinic).category(),
            Some(Category::RapidClinic)
        );
        assert_eq!(
            entry("一", "采图", Location::ImagingPool).category(),
            Some(Category::Imaging)
        );
        assert_eq!(entry("一", "坐诊", Location::MainCampus).category(), None);
    }

    #[test]
    fn test_summary_prefix_only_for_main_campus_half_days() {
        let mut e = entry("一", "坐诊", Location::MainCampus);
        e.time_of_day = TimeOfDay::Morning;
        assert_eq!(e.summary_text(), "上午坐诊");

        e.time_of_day = TimeOfDay::Evening;
        assert_eq!(e.summary_text(), "坐诊");

        e.time_of_day = TimeOfDay::Afternoon;
        e.location = Location::JinjiangBranch;
        assert_eq!(e.summary_text(), "坐诊");
    }

    #[test]
    fn test_location_labels() {
        assert_eq!(Location::MainCampus.to_string(), "总院区");
        assert_eq!(Location::Unspecified.to_string(), "");
        assert_eq!("锦江分院".parse::<Location>().unwrap(), Location::JinjiangBranch);
        assert_eq!(Location::default(), Location::Unspecified);
    }
}
