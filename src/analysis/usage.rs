//! Pitch-type usage per time bucket

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::bucket::{Bucketed, TimeBucket};

/// What an unobserved (bucket, pitch type) cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicy {
    /// Missing cells stay missing
    Sparse,
    /// Every observed pitch type appears in every row, 0 when unthrown
    ZeroFill,
}

/// One bucket's counts, aligned with `UsageTable::pitch_types`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub bucket: TimeBucket,
    pub counts: Vec<Option<u32>>,
}

/// Bucket × pitch-type count matrix.
///
/// Rows ascend by bucket; columns are pitch-type codes in the order they
/// first appear in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageTable {
    pub pitch_types: Vec<String>,
    pub rows: Vec<UsageRow>,
    pub fill: FillPolicy,
}

impl UsageTable {
    /// Count pitches per (bucket, pitch type)
    pub fn build(bucketed: &[Bucketed<'_>], fill: FillPolicy) -> Self {
        let mut pitch_types: Vec<String> = Vec::new();
        let mut columns: HashMap<&str, usize> = HashMap::new();
        let mut cells: BTreeMap<TimeBucket, HashMap<usize, u32>> = BTreeMap::new();

        for item in bucketed {
            let code = item.event.pitch_type.as_str();
            let column = *columns.entry(code).or_insert_with(|| {
                pitch_types.push(code.to_string());
                pitch_types.len() - 1
            });
            *cells
                .entry(item.bucket)
                .or_default()
                .entry(column)
                .or_insert(0) += 1;
        }

        let empty = match fill {
            FillPolicy::ZeroFill => Some(0),
            FillPolicy::Sparse => None,
        };
        let rows = cells
            .into_iter()
            .map(|(bucket, counts)| UsageRow {
                bucket,
                counts: (0..pitch_types.len())
                    .map(|col| counts.get(&col).copied().or(empty))
                    .collect(),
            })
            .collect();

        UsageTable {
            pitch_types,
            rows,
            fill,
        }
    }

    /// Count for one cell; `None` when the cell is missing
    pub fn get(&self, bucket: &TimeBucket, pitch_type: &str) -> Option<u32> {
        let col = self.pitch_types.iter().position(|p| p == pitch_type)?;
        let row = self.rows.iter().find(|r| &r.bucket == bucket)?;
        row.counts[col]
    }

    /// One pitch type's counts down the time axis
    pub fn column(&self, pitch_type: &str) -> Vec<(TimeBucket, Option<u32>)> {
        match self.pitch_types.iter().position(|p| p == pitch_type) {
            Some(col) => self.rows.iter().map(|r| (r.bucket, r.counts[col])).collect(),
            None => Vec::new(),
        }
    }

    pub fn buckets(&self) -> impl Iterator<Item = &TimeBucket> {
        self.rows.iter().map(|r| &r.bucket)
    }

    /// Sum of every cell
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .flat_map(|r| r.counts.iter())
            .map(|c| c.unwrap_or(0) as u64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::bucket::{bucketize, BucketStrategy};
    use crate::PitchEvent;
    use chrono::NaiveDate;

    fn make_event(m: u32, d: u32, code: &str) -> PitchEvent {
        PitchEvent {
            game_date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            pitch_type: code.to_string(),
            release_speed: 90.0,
            release_spin_rate: 2200.0,
            inning: Some(1),
            outs_when_up: Some(0),
        }
    }

    fn fixture() -> Vec<PitchEvent> {
        vec![
            make_event(5, 2, "SL"),
            make_event(4, 3, "FF"),
            make_event(4, 3, "SL"),
            make_event(4, 3, "FF"),
            make_event(5, 2, "CH"),
            make_event(4, 9, "FF"),
        ]
    }

    #[test]
    fn test_monthly_sparse() {
        let events = fixture();
        let bucketed = bucketize(&events, BucketStrategy::Monthly);
        let table = UsageTable::build(&bucketed, FillPolicy::Sparse);

        // First appearance order, not alphabetical
        assert_eq!(table.pitch_types, vec!["SL", "FF", "CH"]);

        let april = TimeBucket::Month { year: 2024, month: 4 };
        let may = TimeBucket::Month { year: 2024, month: 5 };
        assert_eq!(table.buckets().copied().collect::<Vec<_>>(), vec![april, may]);

        assert_eq!(table.get(&april, "FF"), Some(3));
        assert_eq!(table.get(&april, "SL"), Some(1));
        assert_eq!(table.get(&april, "CH"), None);
        assert_eq!(table.get(&may, "FF"), None);
        assert_eq!(table.get(&may, "CH"), Some(1));
        assert_eq!(table.get(&may, "KN"), None);
    }

    #[test]
    fn test_per_game_zero_fill() {
        let events = fixture();
        let bucketed = bucketize(&events, BucketStrategy::PerGame);
        let table = UsageTable::build(&bucketed, FillPolicy::ZeroFill);

        assert_eq!(table.rows.len(), 3);
        for row in &table.rows {
            assert_eq!(row.counts.len(), table.pitch_types.len());
            assert!(row.counts.iter().all(|c| c.is_some()));
        }

        let ch = table.column("CH");
        assert_eq!(
            ch.iter().map(|(_, c)| *c).collect::<Vec<_>>(),
            vec![Some(0), Some(0), Some(1)]
        );
        assert!(table.column("KN").is_empty());
    }

    #[test]
    fn test_total_matches_record_count() {
        let events = fixture();
        for strategy in [BucketStrategy::Monthly, BucketStrategy::Weekly, BucketStrategy::PerGame] {
            for fill in [FillPolicy::Sparse, FillPolicy::ZeroFill] {
                let table = UsageTable::build(&bucketize(&events, strategy), fill);
                assert_eq!(table.total(), events.len() as u64);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let table = UsageTable::build(&[], FillPolicy::ZeroFill);
        assert!(table.is_empty());
        assert!(table.pitch_types.is_empty());
        assert_eq!(table.total(), 0);
    }
}
