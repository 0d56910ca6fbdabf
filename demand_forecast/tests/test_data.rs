use chrono::NaiveDate;
use demand_forecast::data::{Observation, SalesSeries, TimeSeriesData};
use pretty_assertions::assert_eq;

fn dates(days: &[u32]) -> Vec<NaiveDate> {
    days.iter()
        .map(|&d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap())
        .collect()
}

#[test]
fn test_time_series_data_operations() {
    let data = TimeSeriesData::new(dates(&[1, 2, 3]), vec![100.0, 103.0, 106.0]).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert_eq!(data.last_date(), NaiveDate::from_ymd_opt(2023, 1, 3));

    let subset = data.slice(1, None).unwrap();
    assert_eq!(subset.len(), 2);
    assert_eq!(subset.values(), &[103.0, 106.0]);
    assert!(data.slice(2, Some(5)).is_err());

    let mean = data.mean().unwrap();
    assert!(mean > 102.0 && mean < 104.0);

    let std_dev = data.std_dev().unwrap();
    assert!(std_dev > 2.0 && std_dev < 4.0);
}

#[test]
fn test_unordered_dates_are_rejected() {
    assert!(TimeSeriesData::new(dates(&[2, 1]), vec![1.0, 2.0]).is_err());
    assert!(TimeSeriesData::new(dates(&[1, 1]), vec![1.0, 2.0]).is_err());
}

#[test]
fn test_empty_series_statistics() {
    let data = TimeSeriesData::new(Vec::new(), Vec::new()).unwrap();
    assert!(data.is_empty());
    assert!(data.mean().is_err());
}

#[test]
fn test_sales_series_conversion() {
    let series = SalesSeries::new(
        dates(&[1, 2, 3])
            .into_iter()
            .zip([5, 0, 7])
            .map(|(date, units)| Observation::new(date, units))
            .collect(),
    )
    .unwrap();

    let data = series.to_time_series();
    assert_eq!(data.dates(), series.dates().as_slice());
    assert_eq!(data.values(), &[5.0, 0.0, 7.0]);

    let df = data.to_dataframe().unwrap();
    assert_eq!(df.height(), 3);
}
