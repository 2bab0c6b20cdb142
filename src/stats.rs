// File: ./src/stats.rs
use crate::model::{Category, ShiftEntry};
use serde::{Deserialize, Serialize};

/// Weighted shift counts. Branch-campus shifts count twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: u32,
    pub materials_prep: u32,
    pub logging: u32,
    pub rapid_clinic: u32,
    pub imaging: u32,
}

impl SummaryStats {
    pub fn from_entries(entries: &[ShiftEntry]) -> Self {
        let mut stats = SummaryStats::default();
        for entry in entries {
            let weight = entry.weight();
            stats.total += weight;
            match entry.category() {
                Some(Category::MaterialsPrep) => stats.materials_prep += weight,
                Some(Category::Logging) => stats.logging += weight,
                Some(Category::RapidClinic) => stats.rapid_clinic += weight,
                Some(Category::Imaging) => stats.imaging += weight,
                None => {}
            }
        }
        stats
    }

    pub fn count(&self, category: Category) -> u32 {
        match category {
            Category::MaterialsPrep => self.materials_prep,
            Category::Logging => self.logging,
            Category::RapidClinic => self.rapid_clinic,
            Category::Imaging => self.imaging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, TimeOfDay};
    use chrono::NaiveDate;
    use strum::IntoEnumIterator;

    fn entry(activity: &str, location: Location) -> ShiftEntry {
        ShiftEntry::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            "二",
            TimeOfDay::AllDay,
            activity,
            location,
        )
    }

    #[test]
    fn test_weighted_totals() {
        let entries = vec![
            entry("诊断", Location::JinjiangBranch),
            entry("取材", Location::JinjiangBranch),
            entry("记录", Location::MainCampus),
            entry("加快 (一线)", Location::RapidClinic),
            entry("采图", Location::ImagingPool),
            entry("坐诊", Location::MainCampus),
        ];
        let stats = SummaryStats::from_entries(&entries);
        assert_eq!(
            stats,
            SummaryStats {
                total: 2 + 2 + 1 + 1 + 1 + 1,
                materials_prep: 2,
                logging: 1,
                rapid_clinic: 1,
                imaging: 1,
            }
        );
        let expected: u32 = entries.iter().map(ShiftEntry::weight).sum();
        assert_eq!(stats.total, expected);
    }

    #[test]
    fn test_categories_never_exceed_total() {
        let entries = vec![
            entry("取材记录", Location::RapidClinic),
            entry("血液会诊", Location::ImagingPool),
        ];
        let stats = SummaryStats::from_entries(&entries);
        let categorized: u32 = Category::iter().map(|c| stats.count(c)).sum();
        assert_eq!(categorized, stats.total);
        assert_eq!(stats.materials_prep, 1);
        assert_eq!(stats.rapid_clinic, 0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(SummaryStats::from_entries(&[]), SummaryStats::default());
    }
}
