//! Per-product aggregation of sales records.
//!
//! Groups are kept in first-appearance order and the final sort is stable, so
//! products with equal totals stay in the order they first occur in the input.

use crate::domain::{AggregationRow, DomainError, SalesRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Decimal places kept for totals and means.
pub const MONEY_DP: u32 = 2;

struct Group {
    product: String,
    total: Decimal,
    count: usize,
}

/// Sum, count and mean revenue per product, ordered by total revenue descending.
///
/// Totals and means are rounded half-to-even to [`MONEY_DP`] places; the mean is
/// computed from the unrounded sum. An empty input gives an empty result. A
/// product whose total exceeds the decimal range is reported as malformed data.
pub fn aggregate(records: &[SalesRecord]) -> Result<Vec<AggregationRow>, DomainError> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let slot = *index.entry(record.product.as_str()).or_insert_with(|| {
            groups.push(Group {
                product: record.product.clone(),
                total: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total = group.total.checked_add(record.revenue).ok_or_else(|| {
            DomainError::DatasetMalformed(format!(
                "total revenue for {} overflows",
                group.product
            ))
        })?;
        group.count += 1;
    }

    let mut rows = groups
        .into_iter()
        .map(|g| -> Result<AggregationRow, DomainError> {
            let mean = g.total.checked_div(Decimal::from(g.count)).ok_or_else(|| {
                DomainError::DatasetMalformed(format!("mean revenue for {} is undefined", g.product))
            })?;
            Ok(AggregationRow {
                product: g.product,
                total_revenue: round_money(g.total),
                sale_count: g.count,
                mean_revenue: round_money(mean),
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    // Stable: ties keep first-appearance order.
    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    Ok(rows)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(product: &str, revenue: Decimal) -> SalesRecord {
        SalesRecord {
            product: product.to_string(),
            revenue,
        }
    }

    #[test]
    fn test_aggregate_basic_scenario() {
        let records = vec![rec("A", dec!(10)), rec("A", dec!(20)), rec("B", dec!(5))];
        let rows = aggregate(&records).unwrap();

        assert_eq!(
            rows,
            vec![
                AggregationRow {
                    product: "A".into(),
                    total_revenue: dec!(30),
                    sale_count: 2,
                    mean_revenue: dec!(15.00),
                },
                AggregationRow {
                    product: "B".into(),
                    total_revenue: dec!(5),
                    sale_count: 1,
                    mean_revenue: dec!(5.00),
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_one_row_per_product_and_counts_sum() {
        let records = vec![
            rec("pen", dec!(1.50)),
            rec("ink", dec!(12)),
            rec("pen", dec!(2.25)),
            rec("paper", dec!(7.10)),
            rec("ink", dec!(0.99)),
            rec("pen", dec!(3)),
        ];
        let rows = aggregate(&records).unwrap();

        assert_eq!(rows.len(), 3);
        let total_count: usize = rows.iter().map(|r| r.sale_count).sum();
        assert_eq!(total_count, records.len());
        for pair in rows.windows(2) {
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
        assert_eq!(rows[0].product, "ink");
        assert_eq!(rows[0].total_revenue, dec!(12.99));
    }

    #[test]
    fn test_aggregate_ties_keep_first_appearance() {
        let records = vec![
            rec("zeta", dec!(4)),
            rec("alpha", dec!(1)),
            rec("beta", dec!(4)),
            rec("alpha", dec!(3)),
        ];
        let products: Vec<_> = aggregate(&records)
            .unwrap()
            .into_iter()
            .map(|r| r.product)
            .collect();
        assert_eq!(products, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_aggregate_rounds_half_to_even() {
        // mean 0.025 -> 0.02, mean 0.035 -> 0.04
        let records = vec![
            rec("a", dec!(0.01)),
            rec("a", dec!(0.04)),
            rec("b", dec!(0.03)),
            rec("b", dec!(0.04)),
        ];
        let rows = aggregate(&records).unwrap();
        let a = rows.iter().find(|r| r.product == "a").unwrap();
        let b = rows.iter().find(|r| r.product == "b").unwrap();
        assert_eq!(a.mean_revenue, dec!(0.02));
        assert_eq!(b.mean_revenue, dec!(0.04));
    }

    #[test]
    fn test_aggregate_mean_uses_unrounded_total() {
        let records = vec![rec("x", dec!(0.004)), rec("x", dec!(0.004)), rec("x", dec!(0.004))];
        let rows = aggregate(&records).unwrap();
        assert_eq!(rows[0].total_revenue, dec!(0.01));
        assert_eq!(rows[0].mean_revenue, dec!(0.00));
    }

    #[test]
    fn test_aggregate_total_overflow_is_malformed() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let records = vec![rec("A", huge), rec("B", dec!(1)), rec("A", huge)];
        match aggregate(&records) {
            Err(DomainError::DatasetMalformed(msg)) => assert!(msg.contains("A")),
            other => panic!("expected DatasetMalformed, got {:?}", other),
        }
    }
}
