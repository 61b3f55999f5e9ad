//! Headline KPIs over a (filtered) dataset

use crate::columns;
use crate::dataset::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregate {
    Sum,
    Mean,
}

const KPI_DEFINITIONS: [(&str, &str, Aggregate); 4] = [
    ("Total Market Cap (T$)", columns::MARKET_CAP, Aggregate::Sum),
    ("Avg GDP Growth (%)", columns::GDP_GROWTH, Aggregate::Mean),
    ("Avg Inflation (%)", columns::INFLATION, Aggregate::Mean),
    ("Avg 10Y Yield (%)", columns::BOND_YIELD_10Y, Aggregate::Mean),
];

/// A labelled KPI value, rounded to two decimals.
/// `value` is `None` for a mean over no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: Option<f64>,
}

/// Compute the KPIs whose source column is present, in display order
pub fn compute_kpis(dataset: &Dataset) -> Vec<Kpi> {
    KPI_DEFINITIONS
        .iter()
        .filter_map(|(label, column, aggregate)| {
            let values = dataset.numeric(column)?;
            let value = match aggregate {
                Aggregate::Sum => Some(values.iter().sum::<f64>()),
                Aggregate::Mean if values.is_empty() => None,
                Aggregate::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            };
            Some(Kpi {
                label: *label,
                value: value.map(round2),
            })
        })
        .collect()
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;

    #[test]
    fn test_sum_and_mean() {
        let ds = Dataset::from_rows(
            vec![columns::MARKET_CAP.into(), columns::GDP_GROWTH.into()],
            vec![
                vec![Cell::Number(1.111), Cell::Number(2.0)],
                vec![Cell::Number(2.222), Cell::Null],
                vec![Cell::Null, Cell::Number(3.0)],
            ],
        )
        .unwrap();

        let kpis = compute_kpis(&ds);
        assert_eq!(kpis.len(), 2);
        assert_eq!(kpis[0].label, "Total Market Cap (T$)");
        assert_eq!(kpis[0].value, Some(3.33));
        assert_eq!(kpis[1].label, "Avg GDP Growth (%)");
        assert_eq!(kpis[1].value, Some(2.5));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(vec![columns::MARKET_CAP.into(), columns::INFLATION.into()]).unwrap();
        let kpis = compute_kpis(&ds);
        assert_eq!(kpis[0].value, Some(0.0));
        assert_eq!(kpis[1].value, None);
    }
}
