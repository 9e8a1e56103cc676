use super::accumulator::GroupAccumulator;
use super::views::{group, ChannelView};
use super::{AnalysisError, SalesAggregator};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::{RawRecord, RecordError, TransactionRecord};
use crate::types::{AgeBracket, Amount, Gender};

fn create_sale(channel: &str, total_amount: Amount) -> TransactionRecord {
    TransactionRecord {
        marketing_channel: channel.to_string(),
        product_category: "Electronics".to_string(),
        total_amount,
        discount_rate: Decimal::ZERO,
        quantity: 1,
        customer_age: 30,
        customer_gender: Gender::Male,
        customer_region: "Seoul".to_string()
    }
}

fn create_raw_record(total_amount: &str, gender: &str) -> RawRecord {
    RawRecord {
        marketing_channel: Some("Online".to_string()),
        product_category: Some("Books".to_string()),
        total_amount: Some(total_amount.to_string()),
        discount_rate: Some("10".to_string()),
        quantity: Some("2".to_string()),
        customer_age: Some("41".to_string()),
        customer_gender: Some(gender.to_string()),
        customer_region: Some("Busan".to_string())
    }
}

#[test]
fn test_channel_view_sums_and_averages_a_single_channel() -> Result<()> {
    let records: Vec<TransactionRecord> = [(100, 10), (200, 20), (300, 30)].into_iter()
        .map(|(amount, discount)| TransactionRecord {
            discount_rate: Decimal::from(discount),
            ..create_sale("Online", amount)
        })
        .collect();

    let report = SalesAggregator::analyze_records(&records)?;

    assert_eq!(report.channels.len(), 1);

    let channel = &report.channels[0];

    assert_eq!(channel.channel, "Online");
    assert_eq!(channel.total_revenue, 600);
    assert_eq!(channel.transaction_count, 3);
    assert_eq!(channel.average_purchase_amount, Decimal::from(200));
    assert_eq!(channel.average_discount_rate, Decimal::new(200, 1));
    assert_eq!(channel.average_discount_rate.to_string(), "20.0");

    Ok(())
}

#[test]
fn test_age_segments_fill_only_matching_brackets() -> Result<()> {
    let records = vec![
        TransactionRecord { customer_age: 25, ..create_sale("Online", 500) },
        TransactionRecord { customer_age: 56, ..create_sale("Online", 700) },
    ];

    let report = SalesAggregator::analyze_records(&records)?;
    let segments: Vec<(AgeBracket, Amount)> = report.age_segments.iter().collect();

    assert_eq!(segments, vec![
        (AgeBracket::UpTo25, 500),
        (AgeBracket::From26To35, 0),
        (AgeBracket::From36To45, 0),
        (AgeBracket::From46To55, 0),
        (AgeBracket::From56, 700),
    ]);

    Ok(())
}

#[test]
fn test_gender_view_counts_both_buckets() -> Result<()> {
    let records = vec![
        TransactionRecord { customer_gender: Gender::Male, ..create_sale("Online", 1000) },
        TransactionRecord { customer_gender: Gender::Female, ..create_sale("Online", 2000) },
    ];

    let report = SalesAggregator::analyze_records(&records)?;

    assert_eq!(report.gender_stats.male.total_revenue, 1000);
    assert_eq!(report.gender_stats.male.transaction_count, 1);
    assert_eq!(report.gender_stats.female.total_revenue, 2000);
    assert_eq!(report.gender_stats.female.transaction_count, 1);

    Ok(())
}

#[test]
fn test_empty_input_produces_an_empty_report() -> Result<()> {
    let report = SalesAggregator::analyze(&[])?;

    assert!(report.channels.is_empty());
    assert!(report.categories.is_empty());
    assert!(report.regions.is_empty());
    assert!(report.age_segments.iter().all(|(_, total)| total == 0));
    assert_eq!(report.age_segments.iter().count(), 5);
    assert_eq!(report.gender_stats.male.total_revenue, 0);
    assert_eq!(report.gender_stats.female.transaction_count, 0);
    assert_eq!(report.total_records, 0);

    Ok(())
}

#[test]
fn test_non_numeric_amount_fails_the_whole_analysis() {
    let records = vec![
        create_raw_record("1000", "남성"),
        create_raw_record("abc", "여성"),
    ];

    let result = SalesAggregator::analyze(&records);

    assert!(matches!(
        result,
        Err(AnalysisError::Record(RecordError::MalformedRecord { record: 2, field: "total_amount", .. }))
    ));
}

#[test]
fn test_missing_field_fails_the_whole_analysis() {
    let mut incomplete = create_raw_record("1000", "male");
    incomplete.customer_region = None;

    let result = SalesAggregator::analyze(&[create_raw_record("500", "female"), incomplete]);

    assert!(matches!(
        result,
        Err(AnalysisError::Record(RecordError::MalformedRecord { field: "customer_region", .. }))
    ));
}

#[test]
fn test_unknown_gender_fails_the_whole_analysis() {
    let result = SalesAggregator::analyze(&[create_raw_record("1000", "unspecified")]);

    assert!(matches!(
        result,
        Err(AnalysisError::Record(RecordError::UnknownCategoryValue { record: 1, .. }))
    ));
}

#[test]
fn test_empty_channel_label_forms_its_own_group() -> Result<()> {
    let mut unlabeled = create_raw_record("700", "여성");
    unlabeled.marketing_channel = Some(String::new());

    let report = SalesAggregator::analyze(&[create_raw_record("1000", "남성"), unlabeled])?;

    assert_eq!(report.total_records, 2);
    assert_eq!(report.channels.len(), 2);
    assert_eq!(report.channels[0].channel, "Online");
    assert_eq!(report.channels[1].channel, "");
    assert_eq!(report.channels[1].total_revenue, 700);
    assert_eq!(report.channels[1].transaction_count, 1);
    assert_eq!(report.categories[0].transaction_count, 2);

    Ok(())
}

#[test]
fn test_raw_records_are_analyzed_after_validation() -> Result<()> {
    let records = vec![
        create_raw_record("1000", "남성"),
        create_raw_record("3000", "여성"),
    ];

    let report = SalesAggregator::analyze(&records)?;

    assert_eq!(report.total_records, 2);
    assert_eq!(report.channels[0].total_revenue, 4000);
    assert_eq!(report.categories[0].total_quantity, 4);
    assert_eq!(report.age_segments.get(AgeBracket::From36To45), 4000);
    assert_eq!(report.regions[0].region, "Busan");
    assert_eq!(report.regions[0].average_purchase_amount, Decimal::from(2000));

    Ok(())
}

#[test]
fn test_average_purchase_amount_rounds_to_whole_units_half_to_even() -> Result<()> {
    let test_cases = vec![
        (vec![100, 0, 0], Decimal::from(33)),
        (vec![2, 3], Decimal::from(2)),
        (vec![3, 4], Decimal::from(4)),
        (vec![200, 100, 100], Decimal::from(133)),
    ];

    for (amounts, expected_average) in test_cases {
        let records: Vec<TransactionRecord> = amounts.iter()
            .map(|amount| create_sale("Online", *amount))
            .collect();

        let report = SalesAggregator::analyze_records(&records)?;

        assert_eq!(report.channels[0].average_purchase_amount, expected_average, "amounts {amounts:?}");
        assert_eq!(report.categories[0].average_purchase_amount, expected_average);
        assert_eq!(report.regions[0].average_purchase_amount, expected_average);
    }

    Ok(())
}

#[test]
fn test_average_discount_rate_rounds_to_one_decimal_place() -> Result<()> {
    let test_cases = vec![
        (vec!["0.2", "0.3"], "0.2"),
        (vec!["0.3", "0.4"], "0.4"),
        (vec!["10", "15", "15"], "13.3"),
        (vec!["5"], "5.0"),
    ];

    for (discounts, expected_average) in test_cases {
        let records = discounts.iter()
            .map(|discount| -> Result<TransactionRecord> {
                Ok(TransactionRecord { discount_rate: discount.parse()?, ..create_sale("Online", 100) })
            })
            .collect::<Result<Vec<_>>>()?;

        let report = SalesAggregator::analyze_records(&records)?;

        assert_eq!(report.channels[0].average_discount_rate.to_string(), expected_average);
    }

    Ok(())
}

#[test]
fn test_grouped_views_sort_by_revenue_and_keep_first_seen_order_for_ties() -> Result<()> {
    let records = vec![
        create_sale("Email", 100),
        create_sale("Search", 100),
        create_sale("Social", 250),
        create_sale("Display", 50),
        create_sale("Search", 0),
        create_sale("Referral", 100),
    ];

    let channels: Vec<String> = group::<ChannelView>(&records)?.into_iter()
        .map(|summary| summary.channel)
        .collect();

    assert_eq!(channels, vec!["Social", "Email", "Search", "Referral", "Display"]);

    Ok(())
}

#[test]
fn test_category_and_region_views_group_independently() -> Result<()> {
    let records = vec![
        TransactionRecord { product_category: "Food".to_string(), quantity: 3, customer_region: "Daegu".to_string(), ..create_sale("Online", 300) },
        TransactionRecord { product_category: "Toys".to_string(), quantity: 1, customer_region: "Daegu".to_string(), ..create_sale("Online", 900) },
        TransactionRecord { product_category: "Food".to_string(), quantity: 5, customer_region: "Incheon".to_string(), ..create_sale("Store", 500) },
    ];

    let report = SalesAggregator::analyze_records(&records)?;

    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category, "Toys");
    assert_eq!(report.categories[1].category, "Food");
    assert_eq!(report.categories[1].total_revenue, 800);
    assert_eq!(report.categories[1].transaction_count, 2);
    assert_eq!(report.categories[1].total_quantity, 8);
    assert_eq!(report.categories[1].average_purchase_amount, Decimal::from(400));

    assert_eq!(report.regions.len(), 2);
    assert_eq!(report.regions[0].region, "Daegu");
    assert_eq!(report.regions[0].total_revenue, 1200);
    assert_eq!(report.regions[1].region, "Incheon");

    assert_eq!(report.channels[0].channel, "Online");
    assert_eq!(report.channels[1].channel, "Store");

    Ok(())
}

#[test]
fn test_revenue_overflow_is_reported_instead_of_wrapping() {
    let records = vec![create_sale("Online", Amount::MAX), create_sale("Online", 1)];

    let result = SalesAggregator::analyze_records(&records);

    assert!(matches!(result, Err(AnalysisError::Overflow { view: "channel" })));
}

#[test]
fn test_accumulator_only_tracks_what_it_is_given() {
    let mut accumulator = GroupAccumulator::default();
    let sale = TransactionRecord { quantity: 4, discount_rate: Decimal::from(10), ..create_sale("Online", 250) };

    assert!(accumulator.add_sale(&sale).is_some());

    assert_eq!(accumulator.total_revenue, 250);
    assert_eq!(accumulator.transaction_count, 1);
    assert_eq!(accumulator.total_quantity, 0);
    assert!(accumulator.discount_sum.is_zero());
}

#[test]
fn test_repeated_analysis_is_identical() -> Result<()> {
    let records = vec![
        create_raw_record("1200", "남성"),
        create_raw_record("800", "여성"),
        create_raw_record("1500", "male"),
    ];

    assert_eq!(SalesAggregator::analyze(&records)?, SalesAggregator::analyze(&records)?);

    Ok(())
}

#[test]
fn test_generated_batches_conserve_counts_and_revenue() -> Result<()> {
    const CHANNELS: [&str; 4] = ["Online", "Store", "Mobile", "Partner"];
    const CATEGORIES: [&str; 3] = ["Food", "Books", "Garden"];
    const REGIONS: [&str; 5] = ["Seoul", "Busan", "Daegu", "Gwangju", "Jeju"];

    let mut rng = StdRng::seed_from_u64(20_240_611);

    for _ in 0..25 {
        let size = rng.random_range(1..300);
        let records: Vec<TransactionRecord> = (0..size)
            .map(|_| TransactionRecord {
                marketing_channel: CHANNELS[rng.random_range(0..CHANNELS.len())].to_string(),
                product_category: CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string(),
                total_amount: rng.random_range(0..100_000),
                discount_rate: Decimal::new(rng.random_range(0..500), 1),
                quantity: rng.random_range(0..20),
                customer_age: rng.random_range(0..90),
                customer_gender: if rng.random_bool(0.5) { Gender::Male } else { Gender::Female },
                customer_region: REGIONS[rng.random_range(0..REGIONS.len())].to_string()
            })
            .collect();

        let expected_revenue: Amount = records.iter().map(|record| record.total_amount).sum();
        let expected_count = records.len() as u64;
        let report = SalesAggregator::analyze_records(&records)?;

        assert_eq!(report.total_records, records.len());

        assert_eq!(report.channels.iter().map(|row| row.transaction_count).sum::<u64>(), expected_count);
        assert_eq!(report.categories.iter().map(|row| row.transaction_count).sum::<u64>(), expected_count);
        assert_eq!(report.regions.iter().map(|row| row.transaction_count).sum::<u64>(), expected_count);
        assert_eq!(report.gender_stats.male.transaction_count + report.gender_stats.female.transaction_count, expected_count);

        assert_eq!(report.channels.iter().map(|row| row.total_revenue).sum::<Amount>(), expected_revenue);
        assert_eq!(report.categories.iter().map(|row| row.total_revenue).sum::<Amount>(), expected_revenue);
        assert_eq!(report.regions.iter().map(|row| row.total_revenue).sum::<Amount>(), expected_revenue);
        assert_eq!(report.age_segments.iter().map(|(_, total)| total).sum::<Amount>(), expected_revenue);

        assert!(report.channels.windows(2).all(|pair| pair[0].total_revenue >= pair[1].total_revenue));
        assert!(report.categories.windows(2).all(|pair| pair[0].total_revenue >= pair[1].total_revenue));
        assert!(report.regions.windows(2).all(|pair| pair[0].total_revenue >= pair[1].total_revenue));
    }

    Ok(())
}
