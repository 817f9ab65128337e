use serde::Serialize;

use crate::entities::blood_pressure::Category;

/// Half-open interval `[min, max)` in mmHg.
///
/// The low band is the exception: its upper bound is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub min: u16,
    pub max: u16,
}

/// Clinical thresholds for one measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeTable {
    pub low: Threshold,
    pub normal: Threshold,
    pub elevated: Threshold,
    pub high: Threshold,
    pub crisis: Threshold,
}

impl RangeTable {
    pub const fn get(&self, category: Category) -> Threshold {
        match category {
            Category::Low => self.low,
            Category::Normal => self.normal,
            Category::Elevated => self.elevated,
            Category::High => self.high,
            Category::Crisis => self.crisis,
        }
    }
}

pub const SYSTOLIC_RANGES: RangeTable = RangeTable {
    low: Threshold { min: 0, max: 90 },
    normal: Threshold { min: 90, max: 120 },
    elevated: Threshold { min: 120, max: 130 },
    high: Threshold { min: 130, max: 180 },
    crisis: Threshold { min: 180, max: u16::MAX },
};

pub const DIASTOLIC_RANGES: RangeTable = RangeTable {
    low: Threshold { min: 0, max: 60 },
    normal: Threshold { min: 60, max: 80 },
    elevated: Threshold { min: 80, max: 90 },
    high: Threshold { min: 90, max: 120 },
    crisis: Threshold { min: 120, max: u16::MAX },
};
