//! Bounce window labeling.
//!
//! A bounce window is the first `window_size` matches played on or after a
//! manager's hire date. With several hires in a season each hire gets its
//! own window; windows must be disjoint and in hire order.

use chrono::NaiveDate;
use tracing::debug;

use super::BounceError;
use crate::data::Match;

/// Positions of one bounce window in a team's match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceWindow {
    pub hire_date: NaiveDate,
    /// Index of the first match in the window.
    pub start: usize,
    /// One past the last match in the window.
    pub end: usize,
    pub first_match_date: NaiveDate,
    pub last_match_date: NaiveDate,
}

impl BounceWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Locate the bounce window for every hire date.
///
/// `matches` must be in chronological order and `hire_dates` strictly
/// ascending.
pub fn bounce_windows(
    matches: &[Match],
    hire_dates: &[NaiveDate],
    window_size: usize,
) -> Result<Vec<BounceWindow>, BounceError> {
    if window_size == 0 {
        return Err(BounceError::InvalidWindowSize);
    }
    if hire_dates.is_empty() {
        return Err(BounceError::NoHireDates);
    }
    if let Some(pair) = hire_dates.windows(2).find(|w| w[0] >= w[1]) {
        return Err(BounceError::UnorderedHireDates {
            earlier: pair[0],
            later: pair[1],
        });
    }
    if matches.windows(2).any(|w| w[0].date > w[1].date) {
        return Err(BounceError::UnsortedMatches);
    }

    let mut windows: Vec<BounceWindow> = Vec::with_capacity(hire_dates.len());

    for &hire_date in hire_dates {
        let start = matches.partition_point(|m| m.date < hire_date);
        let available = matches.len() - start;
        if available < window_size {
            return Err(BounceError::InsufficientMatches {
                hire_date,
                window_size,
                available,
            });
        }
        let end = start + window_size;

        if let Some(previous) = windows.last() {
            if start < previous.end {
                return Err(BounceError::OverlappingWindows {
                    first_hire: previous.hire_date,
                    first_window_end: previous.last_match_date,
                    second_hire: hire_date,
                });
            }
        }

        let window = BounceWindow {
            hire_date,
            start,
            end,
            first_match_date: matches[start].date,
            last_match_date: matches[end - 1].date,
        };
        debug!(
            %hire_date,
            first = %window.first_match_date,
            last = %window.last_match_date,
            "bounce window"
        );
        windows.push(window);
    }

    Ok(windows)
}

/// Bounce flag for every match, in the order of `matches`.
pub fn label_bounce(
    matches: &[Match],
    hire_dates: &[NaiveDate],
    window_size: usize,
) -> Result<Vec<bool>, BounceError> {
    let windows = bounce_windows(matches, hire_dates, window_size)?;
    Ok((0..matches.len())
        .map(|i| windows.iter().any(|w| w.contains(i)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One match a week from 2015-08-08.
    fn weekly(n: usize) -> Vec<Match> {
        (0..n)
            .map(|i| Match {
                match_id: i as u64,
                date: date(2015, 8, 8) + chrono::Duration::weeks(i as i64),
                home_team: "Sunderland".to_string(),
                away_team: format!("Opponent {}", i),
                home_score: 1,
                away_score: 1,
            })
            .collect()
    }

    #[test]
    fn test_single_hire_window() {
        let matches = weekly(20);
        // falls between match 3 (08-29) and match 4 (09-05)
        let labels = label_bounce(&matches, &[date(2015, 9, 1)], 5).unwrap();

        let bounce: Vec<usize> = (0..labels.len()).filter(|&i| labels[i]).collect();
        assert_eq!(bounce, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_hire_date_is_inclusive() {
        let matches = weekly(10);
        let labels = label_bounce(&matches, &[matches[2].date], 3).unwrap();
        assert_eq!(
            labels,
            vec![false, false, true, true, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_two_hires_union_of_windows() {
        let matches = weekly(30);
        let hires = [date(2015, 9, 1), date(2015, 12, 1)];

        let labels = label_bounce(&matches, &hires, 5).unwrap();
        let first = label_bounce(&matches, &hires[..1], 5).unwrap();
        let second = label_bounce(&matches, &hires[1..], 5).unwrap();

        for i in 0..matches.len() {
            assert_eq!(labels[i], first[i] || second[i]);
            assert!(!(first[i] && second[i]));
        }
        assert_eq!(labels.iter().filter(|&&b| b).count(), 10);
    }

    #[test]
    fn test_gap_between_windows_is_non_bounce() {
        let matches = weekly(30);
        let windows = bounce_windows(&matches, &[date(2015, 9, 1), date(2015, 12, 1)], 5).unwrap();
        assert_eq!(windows.len(), 2);
        assert!(windows[0].end < windows[1].start);
        assert!(windows[0].last_match_date < windows[1].hire_date);
        assert_eq!(windows[0].len(), 5);
        assert_eq!(windows[1].len(), 5);
    }

    #[test]
    fn test_insufficient_matches_is_an_error() {
        let matches = weekly(6);
        let err = label_bounce(&matches, &[matches[3].date], 5).unwrap_err();
        match err {
            BounceError::InsufficientMatches {
                window_size,
                available,
                ..
            } => {
                assert_eq!(window_size, 5);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exactly_enough_matches() {
        let matches = weekly(8);
        let labels = label_bounce(&matches, &[matches[3].date], 5).unwrap();
        assert_eq!(labels.iter().filter(|&&b| b).count(), 5);
        assert!(labels[7]);
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        let matches = weekly(20);
        let err = label_bounce(&matches, &[matches[2].date, matches[4].date], 5).unwrap_err();
        assert!(matches!(err, BounceError::OverlappingWindows { .. }));
    }

    #[test]
    fn test_adjacent_windows_allowed() {
        let matches = weekly(20);
        let labels = label_bounce(&matches, &[matches[2].date, matches[7].date], 5).unwrap();
        assert_eq!(labels.iter().filter(|&&b| b).count(), 10);
    }

    #[test]
    fn test_invalid_configurations() {
        let matches = weekly(10);
        assert!(matches!(
            label_bounce(&matches, &[date(2015, 9, 1)], 0),
            Err(BounceError::InvalidWindowSize)
        ));
        assert!(matches!(
            label_bounce(&matches, &[], 5),
            Err(BounceError::NoHireDates)
        ));
        assert!(matches!(
            label_bounce(&matches, &[date(2015, 9, 1), date(2015, 8, 1)], 2),
            Err(BounceError::UnorderedHireDates { .. })
        ));

        let mut unsorted = weekly(10);
        unsorted.swap(0, 5);
        assert!(matches!(
            label_bounce(&unsorted, &[date(2015, 9, 1)], 2),
            Err(BounceError::UnsortedMatches)
        ));
    }

    #[test]
    fn test_labeling_is_deterministic() {
        let matches = weekly(38);
        let hires = [date(2015, 10, 9), date(2016, 1, 18)];
        let first = label_bounce(&matches, &hires, 5).unwrap();
        let second = label_bounce(&matches, &hires, 5).unwrap();
        assert_eq!(first, second);
    }
}
