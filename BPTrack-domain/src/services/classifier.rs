use crate::entities::blood_pressure::{Category, Reading};
use crate::services::ranges::{DIASTOLIC_RANGES, SYSTOLIC_RANGES};

/// Categorize blood pressure based on measurements.
///
/// Either field crossing a threshold is enough, and the most severe band is
/// checked first, so 85/125 is a crisis and 120/80 is elevated.
pub fn classify(systolic: u16, diastolic: u16) -> Category {
    let sys = &SYSTOLIC_RANGES;
    let dia = &DIASTOLIC_RANGES;

    // Severity order; the first band either field reaches wins
    for category in [Category::Crisis, Category::High, Category::Elevated] {
        if systolic >= sys.get(category).min || diastolic >= dia.get(category).min {
            return category;
        }
    }

    if systolic <= sys.get(Category::Low).max || diastolic <= dia.get(Category::Low).max {
        Category::Low
    } else {
        Category::Normal
    }
}

pub fn classify_reading(reading: &Reading) -> Category {
    classify(reading.systolic, reading.diastolic)
}
