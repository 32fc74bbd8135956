//! Record selection by region, type and inclusive date range.

use chrono::NaiveDate;

use super::dataset::Dataset;
use super::record::Record;

/// The four inputs the dashboard controls supply.
///
/// `start_date <= end_date` is not checked: an inverted range simply matches
/// nothing, which the UI relies on as a no-op state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub region: String,
    pub avocado_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FilterCriteria {
    pub fn new(
        region: impl Into<String>,
        avocado_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            region: region.into(),
            avocado_type: avocado_type.into(),
            start_date,
            end_date,
        }
    }

    /// Exact, case-sensitive match on region and type; both date bounds inclusive.
    pub fn matches(&self, record: &Record) -> bool {
        record.region == self.region
            && record.avocado_type == self.avocado_type
            && record.date >= self.start_date
            && record.date <= self.end_date
    }
}

/// Records matching `criteria`, in dataset (ascending date) order.
pub fn select<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .collect()
}

/// Parse a date coming from a date picker. Accepts `YYYY-MM-DD` and ignores a
/// trailing time component (`2015-01-04T00:00:00`).
pub fn parse_filter_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let day = value.trim().split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new(date(2015, 1, 4), "Albany", "organic", 1.00, 100.0),
            Record::new(date(2015, 1, 4), "Chicago", "organic", 1.30, 400.0),
            Record::new(date(2015, 1, 11), "Albany", "organic", 1.20, 120.0),
            Record::new(date(2015, 1, 11), "Albany", "conventional", 0.90, 9000.0),
            Record::new(date(2015, 1, 18), "Albany", "organic", 1.25, 130.0),
        ])
    }

    #[test]
    fn selects_on_all_four_predicates() {
        let ds = dataset();
        let c = FilterCriteria::new("Albany", "organic", date(2015, 1, 1), date(2015, 1, 11));
        let got: Vec<_> = select(&ds, &c).iter().map(|r| r.date).collect();
        assert_eq!(got, vec![date(2015, 1, 4), date(2015, 1, 11)]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = dataset();
        let c = FilterCriteria::new("Albany", "organic", date(2015, 1, 11), date(2015, 1, 11));
        let got = select(&ds, &c);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].average_price, 1.20);
    }

    #[test]
    fn region_match_is_case_sensitive() {
        let ds = dataset();
        let c = FilterCriteria::new("albany", "organic", date(2015, 1, 1), date(2015, 12, 31));
        assert!(select(&ds, &c).is_empty());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = dataset();
        let c = FilterCriteria::new("Albany", "organic", date(2015, 1, 31), date(2015, 1, 1));
        assert!(select(&ds, &c).is_empty());
    }

    #[test]
    fn unknown_type_matches_nothing() {
        let ds = dataset();
        let c = FilterCriteria::new("Chicago", "conventional", date(2015, 1, 1), date(2015, 12, 31));
        assert!(select(&ds, &c).is_empty());
    }

    #[test]
    fn parse_filter_date_plain() {
        assert_eq!(parse_filter_date("2015-01-04").unwrap(), date(2015, 1, 4));
    }

    #[test]
    fn parse_filter_date_drops_time_component() {
        assert_eq!(parse_filter_date("2015-01-04T00:00:00").unwrap(), date(2015, 1, 4));
        assert_eq!(parse_filter_date("2018-03-25 00:00:00").unwrap(), date(2018, 3, 25));
    }

    #[test]
    fn parse_filter_date_rejects_other_formats() {
        assert!(parse_filter_date("01/04/2015").is_err());
        assert!(parse_filter_date("").is_err());
    }
}
