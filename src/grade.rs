use crate::records::GradeLabel;

/// Lower bounds, highest first. Anything below the last band is `Fail`.
///
/// The `D` band exists only between 40 and 50; keep the order as is.
const GRADE_BANDS: [(f64, GradeLabel); 4] = [
    (75.0, GradeLabel::A),
    (60.0, GradeLabel::B),
    (50.0, GradeLabel::C),
    (40.0, GradeLabel::D),
];

/// `obtained / total * 100`, or `None` when either side is missing,
/// non-finite, or the total is zero.
pub fn percentage(obtained: Option<f64>, total: Option<f64>) -> Option<f64> {
    let obtained = obtained.filter(|v| v.is_finite())?;
    let total = total.filter(|v| v.is_finite() && *v != 0.0)?;
    Some(obtained / total * 100.0)
}

pub fn classify_percentage(pct: f64) -> GradeLabel {
    GRADE_BANDS
        .iter()
        .find(|(min, _)| pct >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(GradeLabel::Fail)
}

/// Grade a score against its assessment total.
///
/// Missing input yields [`GradeLabel::NotGradable`] rather than an error, so
/// the entry form can preview while the mark is still being typed. A present
/// score of `0` is a real result and grades `Fail`.
pub fn classify(obtained: Option<f64>, total: Option<f64>) -> GradeLabel {
    match percentage(obtained, total) {
        Some(pct) => classify_percentage(pct),
        None => GradeLabel::NotGradable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scores_out_of_100() {
        assert_eq!(classify(Some(0.0), Some(100.0)), GradeLabel::Fail);
        assert_eq!(classify(Some(75.0), Some(100.0)), GradeLabel::A);
        assert_eq!(classify(Some(74.99), Some(100.0)), GradeLabel::B);
        assert_eq!(classify(Some(60.0), Some(100.0)), GradeLabel::B);
        assert_eq!(classify(Some(59.99), Some(100.0)), GradeLabel::C);
        assert_eq!(classify(Some(50.0), Some(100.0)), GradeLabel::C);
        assert_eq!(classify(Some(49.99), Some(100.0)), GradeLabel::D);
        assert_eq!(classify(Some(40.0), Some(100.0)), GradeLabel::D);
        assert_eq!(classify(Some(39.99), Some(100.0)), GradeLabel::Fail);
    }

    #[test]
    fn missing_or_zero_denominator_is_not_gradable() {
        assert_eq!(classify(None, Some(100.0)), GradeLabel::NotGradable);
        assert_eq!(classify(Some(50.0), Some(0.0)), GradeLabel::NotGradable);
        assert_eq!(classify(Some(50.0), None), GradeLabel::NotGradable);
        assert_eq!(classify(None, None), GradeLabel::NotGradable);
        assert_eq!(classify(Some(f64::NAN), Some(100.0)), GradeLabel::NotGradable);
        assert_eq!(classify(Some(10.0), Some(f64::INFINITY)), GradeLabel::NotGradable);
    }

    #[test]
    fn non_100_totals_use_the_percentage() {
        // 30/40 = 75%
        assert_eq!(classify(Some(30.0), Some(40.0)), GradeLabel::A);
        // 12/20 = 60%
        assert_eq!(classify(Some(12.0), Some(20.0)), GradeLabel::B);
        // 9/20 = 45%
        assert_eq!(classify(Some(9.0), Some(20.0)), GradeLabel::D);
        // 7/20 = 35%
        assert_eq!(classify(Some(7.0), Some(20.0)), GradeLabel::Fail);
    }

    #[test]
    fn out_of_range_scores_still_classify() {
        assert_eq!(classify(Some(120.0), Some(100.0)), GradeLabel::A);
        assert_eq!(classify(Some(-5.0), Some(100.0)), GradeLabel::Fail);
    }

    #[test]
    fn every_band_matches_its_interval() {
        for tenths in 0..=1000 {
            let pct = f64::from(tenths) / 10.0;
            let expected = if pct >= 75.0 {
                GradeLabel::A
            } else if pct >= 60.0 {
                GradeLabel::B
            } else if pct >= 50.0 {
                GradeLabel::C
            } else if pct < 40.0 {
                GradeLabel::Fail
            } else {
                GradeLabel::D
            };
            assert_eq!(classify_percentage(pct), expected, "pct {}", pct);
        }
    }

    #[test]
    fn percentage_guards_the_denominator() {
        assert_eq!(percentage(Some(45.0), Some(50.0)), Some(90.0));
        assert_eq!(percentage(Some(0.0), Some(50.0)), Some(0.0));
        assert_eq!(percentage(Some(45.0), Some(0.0)), None);
        assert_eq!(percentage(None, Some(50.0)), None);
    }
}
