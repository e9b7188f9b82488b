//! Conversion of caller values into category indices.
//!
//! Categories are exact integers. Real-valued inputs are accepted only when
//! they are finite and integral: `2.0` is category 2, while `2.7` has no
//! category and is rejected by the model as out of range.

use std::fmt;

/// A value that can name one of the model's categories.
pub trait CategoricalDatum: Copy + fmt::Display {
    /// The category index, or None if the value cannot name a category.
    ///
    /// Bounds against the model's `k` are checked by the model, not here.
    fn category_index(self) -> Option<usize>;
}

macro_rules! impl_integer_datum {
    ($($t:ty),* $(,)?) => {
        $(
            impl CategoricalDatum for $t {
                fn category_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

impl_integer_datum!(usize, u8, u16, u32, u64, i32, i64);

impl CategoricalDatum for bool {
    fn category_index(self) -> Option<usize> {
        Some(usize::from(self))
    }
}

impl CategoricalDatum for f64 {
    fn category_index(self) -> Option<usize> {
        // usize::MAX as f64 rounds up to 2^64, so the bound is exclusive.
        if self.is_finite() && self >= 0.0 && self.fract() == 0.0 && self < usize::MAX as f64 {
            Some(self as usize)
        } else {
            None
        }
    }
}

impl CategoricalDatum for f32 {
    fn category_index(self) -> Option<usize> {
        f64::from(self).category_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_integers_map_directly() {
        assert_eq!(3usize.category_index(), Some(3));
        assert_eq!(0u8.category_index(), Some(0));
        assert_eq!(255u8.category_index(), Some(255));
        assert_eq!(7u64.category_index(), Some(7));
    }

    #[test]
    fn negative_integers_have_no_category() {
        assert_eq!((-1i32).category_index(), None);
        assert_eq!((-1i64).category_index(), None);
        assert_eq!(4i64.category_index(), Some(4));
    }

    #[test]
    fn integral_reals_are_accepted() {
        assert_eq!(2.0f64.category_index(), Some(2));
        assert_eq!(0.0f64.category_index(), Some(0));
        assert_eq!((-0.0f64).category_index(), Some(0));
        assert_eq!(5.0f32.category_index(), Some(5));
    }

    #[test]
    fn fractional_reals_are_rejected_not_truncated() {
        assert_eq!(2.7f64.category_index(), None);
        assert_eq!(0.5f32.category_index(), None);
        assert_eq!((-1.0f64).category_index(), None);
    }

    #[test]
    fn non_finite_reals_are_rejected() {
        assert_eq!(f64::NAN.category_index(), None);
        assert_eq!(f64::INFINITY.category_index(), None);
        assert_eq!(f32::NEG_INFINITY.category_index(), None);
    }

    #[test]
    fn bools_are_binary_categories() {
        assert_eq!(false.category_index(), Some(0));
        assert_eq!(true.category_index(), Some(1));
    }
}
