use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::catalog::repo_types::FoodCategory;

/// Unrounded protein/carbs/fat grams and energy in kcal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub kcal: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        kcal: 0.0,
    };

    /// Per-100g values of a category, unset fields read as zero.
    pub fn per_100g(category: &FoodCategory) -> Self {
        Self {
            protein: category.protein.unwrap_or(0.0),
            carbs: category.carbs.unwrap_or(0.0),
            fat: category.fat.unwrap_or(0.0),
            kcal: category.kcal.unwrap_or(0.0),
        }
    }

    /// Scales per-100g values to `grams`.
    pub fn for_quantity(&self, grams: i32) -> Self {
        let q = f64::from(grams);
        Self {
            protein: self.protein * q / 100.0,
            carbs: self.carbs * q / 100.0,
            fat: self.fat * q / 100.0,
            kcal: self.kcal * q / 100.0,
        }
    }

    /// Reporting precision: one decimal for grams, whole kcal.
    pub fn rounded(&self) -> Self {
        Self {
            protein: round1(self.protein),
            carbs: round1(self.carbs),
            fat: round1(self.fat),
            kcal: self.kcal.round(),
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            kcal: self.kcal + other.kcal,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, other: Macros) {
        *self = *self + other;
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::ZERO, |acc, m| acc + m)
    }
}

/// Half away from zero, which is half-up for the non-negative values we see.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Totals as reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub kcal: f64,
    pub grams_total: i64,
}

impl NutritionTotals {
    pub fn report(macros: Macros, grams_total: i64) -> Self {
        let r = macros.rounded();
        Self {
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
            kcal: r.kcal,
            grams_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn category(protein: Option<f64>, carbs: Option<f64>, fat: Option<f64>, kcal: Option<f64>) -> FoodCategory {
        FoodCategory {
            id: Uuid::new_v4(),
            name: "test".into(),
            protein,
            carbs,
            fat,
            kcal,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn null_fields_read_as_zero() {
        let m = Macros::per_100g(&category(Some(2.0), None, None, Some(80.0)));
        assert_eq!(
            m,
            Macros {
                protein: 2.0,
                carbs: 0.0,
                fat: 0.0,
                kcal: 80.0
            }
        );
        assert_eq!(
            Macros::per_100g(&category(None, None, None, None)),
            Macros::ZERO
        );
    }

    #[test]
    fn scales_linearly_by_grams() {
        let m = Macros::per_100g(&category(Some(2.0), Some(18.0), Some(0.5), Some(80.0)))
            .for_quantity(150);
        assert_eq!(m.protein, 3.0);
        assert_eq!(m.carbs, 27.0);
        assert_eq!(m.fat, 0.75);
        assert_eq!(m.kcal, 120.0);
    }

    #[test]
    fn rounding_happens_only_when_asked() {
        let m = Macros {
            protein: 0.75,
            carbs: 1.04,
            fat: 2.25,
            kcal: 99.5,
        };
        let r = m.rounded();
        assert_eq!(r.protein, 0.8);
        assert_eq!(r.carbs, 1.0);
        assert_eq!(r.fat, 2.3);
        assert_eq!(r.kcal, 100.0);
        assert_eq!(m.protein, 0.75);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let total: Macros = std::iter::empty().sum();
        assert_eq!(total, Macros::ZERO);
        assert_eq!(NutritionTotals::report(total, 0), NutritionTotals::default());
    }
}
