use chrono::{Datelike, NaiveDate};

/// Calendar frequency a daily series can be down-sampled to.
///
/// Bucket labels are the last calendar day of each period, so a January
/// bucket is labelled `YYYY-01-31` regardless of the last trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Calendar month, labelled with the month's last day.
    MonthEnd,
    /// Calendar year, labelled with December 31.
    YearEnd,
}

impl Frequency {
    /// Label of the bucket containing `date`.
    #[must_use]
    pub fn bucket_of(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::MonthEnd => month_end(date.year(), date.month()),
            Self::YearEnd => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        }
    }

    /// Label of the bucket that follows `label`.
    #[must_use]
    pub fn next_bucket(self, label: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::MonthEnd => label.succ_opt().and_then(|d| self.bucket_of(d)),
            Self::YearEnd => NaiveDate::from_ymd_opt(label.year().checked_add(1)?, 12, 31),
        }
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Down-sample `(date, value)` points to the last value of each calendar bucket.
///
/// - Input is sorted by date first; non-finite values are ignored.
/// - Output has one point per bucket from the first observation's bucket to the
///   last observation's bucket, labelled per [`Frequency`].
/// - Buckets with no observation carry the previous bucket's value forward.
#[must_use]
pub fn resample_last_by(points: &[(NaiveDate, f64)], freq: Frequency) -> Vec<(NaiveDate, f64)> {
    let mut sorted: Vec<(NaiveDate, f64)> = points
        .iter()
        .copied()
        .filter(|(_, v)| v.is_finite())
        .collect();
    // Stable sort keeps input order among equal dates; the last one wins its bucket.
    sorted.sort_by_key(|(d, _)| *d);

    let mut iter = sorted.into_iter();
    let Some((mut cur_bucket, mut last)) = iter
        .by_ref()
        .find_map(|(d, v)| freq.bucket_of(d).map(|b| (b, v)))
    else {
        return Vec::new();
    };
    let mut out: Vec<(NaiveDate, f64)> = Vec::new();

    for (date, value) in iter {
        let Some(bucket) = freq.bucket_of(date) else {
            continue;
        };
        if bucket != cur_bucket {
            finalize_bucket(&mut out, freq, cur_bucket, bucket, last);
            cur_bucket = bucket;
        }
        last = value;
    }
    out.push((cur_bucket, last));
    out
}

fn finalize_bucket(
    out: &mut Vec<(NaiveDate, f64)>,
    freq: Frequency,
    closed: NaiveDate,
    next_seen: NaiveDate,
    value: f64,
) {
    out.push((closed, value));
    let mut gap = freq.next_bucket(closed);
    while let Some(label) = gap {
        if label >= next_seen {
            break;
        }
        out.push((label, value));
        gap = freq.next_bucket(label);
    }
}

/// Month-end closes (see [`resample_last_by`]).
#[must_use]
pub fn resample_monthly_close(points: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64)> {
    resample_last_by(points, Frequency::MonthEnd)
}

/// Year-end closes (see [`resample_last_by`]).
#[must_use]
pub fn resample_yearly_close(points: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64)> {
    resample_last_by(points, Frequency::YearEnd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_end_labels() {
        assert_eq!(Frequency::MonthEnd.bucket_of(d(2024, 2, 3)), Some(d(2024, 2, 29)));
        assert_eq!(Frequency::MonthEnd.bucket_of(d(2023, 2, 3)), Some(d(2023, 2, 28)));
        assert_eq!(Frequency::MonthEnd.bucket_of(d(2023, 12, 1)), Some(d(2023, 12, 31)));
        assert_eq!(
            Frequency::MonthEnd.next_bucket(d(2023, 12, 31)),
            Some(d(2024, 1, 31))
        );
        assert_eq!(Frequency::YearEnd.next_bucket(d(2023, 12, 31)), Some(d(2024, 12, 31)));
    }

    #[test]
    fn empty_months_are_forward_filled() {
        let out = resample_monthly_close(&[(d(2024, 4, 10), 5.0), (d(2024, 1, 5), 1.0)]);
        assert_eq!(
            out,
            vec![
                (d(2024, 1, 31), 1.0),
                (d(2024, 2, 29), 1.0),
                (d(2024, 3, 31), 1.0),
                (d(2024, 4, 30), 5.0),
            ]
        );
    }

    #[test]
    fn last_value_in_bucket_wins() {
        let out = resample_yearly_close(&[
            (d(2022, 3, 1), 1.0),
            (d(2022, 12, 30), 2.0),
            (d(2023, 6, 1), f64::NAN),
            (d(2023, 7, 1), 3.0),
        ]);
        assert_eq!(out, vec![(d(2022, 12, 31), 2.0), (d(2023, 12, 31), 3.0)]);
        assert!(resample_yearly_close(&[]).is_empty());
    }
}
