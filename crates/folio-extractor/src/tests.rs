//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{
        carry_table_header, extract_activities, extract_summary, merge, parse_fragment_responses,
        Extractor, ExtractorConfig, ExtractorError, FragmentSplitter, FragmentStrategy,
        LatestRecord, PartialRecord, ACTIVITY_HEADER,
    };
    use folio_domain::{validate, ActivityRow, RiskCategory, StructuredRecord};

    const STATEMENT: &str = "\
Consolidated Portfolio Statement
JOHN SMITH [ABCDE1234F]
Email: john@example.com

Total Portfolio Value
(INR)
2,55,000.00
Mutual Funds
(INR)
2,50,000.00

MF Current Cost
(INR)
2,00,000.00
MF Unrealised
Gain
50,000.00
MF Realised
Gain
-1,200.00

Abs.
Return (MFs)
25.00%
XIRR
Return (MFs)
14.20%
MF Change
in a Day
(INR)
-350.75

Debt Fund Risk Allocation
Very High
40%
Moderately High
60%

Recent Transactions
Scheme\tFolio No\tTran Date\tTran Type\tNAV\tUnits\tAmount
Navi Nifty 50 Index Fund\t9981234\t05-Jan-2024\tPurchase\t10.50\t95.238\t1,000.00
Navi Flexi Cap Fund\t9981234\t12-Feb-2024\tRedemption\t15.25\t-20.000\t-305.00";

    fn paragraph_config() -> ExtractorConfig {
        ExtractorConfig {
            max_text_length: 10_000,
            max_fragment_size: 300,
            fragment_strategy: FragmentStrategy::ByParagraph,
        }
    }

    #[test]
    fn test_full_extraction_flow() {
        let extractor = Extractor::new(ExtractorConfig::default());
        let record = extractor.extract(STATEMENT).unwrap();

        assert_eq!(record.investor_name, "JOHN SMITH");
        assert_eq!(record.pan, "ABCDE1234F");
        assert_eq!(record.total_portfolio, 255_000.0);
        assert_eq!(record.mutual_funds_value, 250_000.0);
        assert_eq!(record.current_cost, 200_000.0);
        assert_eq!(record.unrealised_gain, 50_000.0);
        assert_eq!(record.realised_gain, -1_200.0);
        assert_eq!(record.abs_return, 25.0);
        assert_eq!(record.xirr, 14.2);
        assert_eq!(record.change_in_a_day, -350.75);

        assert_eq!(record.recent_activities.len(), 2);
        assert_eq!(record.recent_activities[1].units, -20.0);
        assert_eq!(record.recent_activities[1].amount, -305.0);

        let ratings = &record.debt_fund_ratings;
        assert_eq!(ratings.get(RiskCategory::VeryHigh), 40.0);
        assert_eq!(ratings.get(RiskCategory::ModeratelyHigh), 60.0);
        assert_eq!(ratings.get(RiskCategory::Low), 0.0);
        assert_eq!(ratings.get(RiskCategory::LowToModerate), 0.0);

        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_windows_line_endings() {
        let extractor = Extractor::new(ExtractorConfig::default());
        let crlf = STATEMENT.replace('\n', "\r\n");
        assert_eq!(
            extractor.extract(&crlf).unwrap(),
            extractor.extract(STATEMENT).unwrap()
        );
    }

    #[test]
    fn test_record_json_contract() {
        let record = Extractor::new(ExtractorConfig::default())
            .extract(STATEMENT)
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["investorName"], "JOHN SMITH");
        assert_eq!(json["changeInADay"], -350.75);
        assert_eq!(json["recentActivities"][0]["folioNo"], "9981234");
        assert_eq!(json["debtFundRatings"]["Very High"], 40.0);
        assert_eq!(json["debtFundRatings"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_summary_extraction_is_idempotent() {
        let first = serde_json::to_string(&extract_summary(STATEMENT)).unwrap();
        let second = serde_json::to_string(&extract_summary(STATEMENT)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_activity_rows_survive_json_round_trip() {
        let rows = extract_activities(STATEMENT);
        let json = serde_json::to_string(&rows).unwrap();
        let parsed: Vec<ActivityRow> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), rows.len());
        for (original, parsed) in rows.iter().zip(&parsed) {
            assert_eq!(original.scheme, parsed.scheme);
            assert_eq!(original.folio_no, parsed.folio_no);
            assert_eq!(original.tran_date, parsed.tran_date);
            assert_eq!(original.tran_type, parsed.tran_type);
            assert_eq!(original.nav, parsed.nav);
            assert_eq!(original.units, parsed.units);
            assert_eq!(original.amount, parsed.amount);
        }
    }

    #[tokio::test]
    async fn test_fragmented_extraction_matches_single_pass() {
        let extractor = Extractor::new(paragraph_config());
        assert!(STATEMENT.len() > extractor.config().max_fragment_size);

        let fragmented = extractor.extract_fragmented(STATEMENT).await.unwrap();
        let direct = extractor.extract(STATEMENT).unwrap();
        assert_eq!(fragmented, direct);
    }

    #[tokio::test]
    async fn test_fragmented_extraction_with_line_strategy() {
        let mut config = paragraph_config();
        config.fragment_strategy = FragmentStrategy::ByLine;
        config.max_fragment_size = 60;
        let extractor = Extractor::new(config);

        let record = extractor.extract_fragmented(STATEMENT).await.unwrap();
        assert_eq!(record.investor_name, "JOHN SMITH");
        assert_eq!(record.pan, "ABCDE1234F");
    }

    fn long_statement(rows: usize) -> String {
        let mut text = String::from(
            "JOHN SMITH [ABCDE1234F]\n\nTotal Portfolio Value\n(INR)\n2,55,000.00\n\nRecent Transactions\n",
        );
        text.push_str(ACTIVITY_HEADER);
        for i in 0..rows {
            text.push_str(&format!(
                "\nNavi Nifty 50 Index Fund {:03}\t9981234\t05-Jan-2024\tPurchase\t10.50\t95.238\t{}.00",
                i,
                1_000 + i
            ));
        }
        text
    }

    #[tokio::test]
    async fn test_long_table_keeps_every_row_when_fragmented() {
        let text = long_statement(100);

        for strategy in [FragmentStrategy::ByLine, FragmentStrategy::ByParagraph] {
            let config = ExtractorConfig {
                max_text_length: 50_000,
                max_fragment_size: 1_000,
                fragment_strategy: strategy,
            };
            let fragments = carry_table_header(
                FragmentSplitter::new(strategy, config.max_fragment_size).split(&text),
            );
            let table_fragments = fragments
                .iter()
                .filter(|fragment| !extract_activities(fragment).is_empty())
                .count();
            assert!(table_fragments >= 3, "{:?}: {} table fragments", strategy, table_fragments);

            let extractor = Extractor::new(config);
            let direct = extractor.extract(&text).unwrap();
            let fragmented = extractor.extract_fragmented(&text).await.unwrap();

            assert_eq!(direct.recent_activities.len(), 100);
            assert_eq!(fragmented.recent_activities.len(), 100, "{:?}", strategy);
            assert_eq!(fragmented.recent_activities[99].amount, 1_099.0);
            assert_eq!(fragmented, direct, "{:?}", strategy);
        }
    }

    #[test]
    fn test_fragmented_extraction_outside_runtime_helper() {
        let extractor = Extractor::new(paragraph_config());
        let result = tokio_test::block_on(extractor.extract_fragmented(&"x".repeat(20_000)));
        assert!(matches!(result, Err(ExtractorError::TextTooLong(20_000, 10_000))));
    }

    #[test]
    fn test_merge_of_parsed_responses() {
        let responses = [
            r#"```json
{"investorName": "", "totalPortfolio": 0, "absReturn": 0, "debtFundRatings": {"Low": 10}}
```"#,
            r#"{"investorName": "JOHN SMITH", "pan": "ABCDE1234F", "totalPortfolio": 50000,
                "absReturn": 12.5, "debtFundRatings": {"Low": 20, "High": 5}}"#,
        ];
        let record = merge(&parse_fragment_responses(&responses));

        assert_eq!(record.investor_name, "JOHN SMITH");
        assert_eq!(record.total_portfolio, 50_000.0);
        assert_eq!(record.abs_return, 0.0);
        assert_eq!(record.debt_fund_ratings.get(RiskCategory::Low), 20.0);
        assert_eq!(record.debt_fund_ratings.get(RiskCategory::High), 5.0);
        assert_eq!(record.debt_fund_ratings.get(RiskCategory::VeryHigh), 0.0);
    }

    #[test]
    fn test_merge_single_fragment_round_trip() {
        let extractor = Extractor::new(ExtractorConfig::default());
        let partial: PartialRecord = extractor.extract_partial(STATEMENT).unwrap();
        assert_eq!(merge(&[partial]), extractor.extract(STATEMENT).unwrap());
    }

    #[test]
    fn test_latest_record_holds_last_extraction() {
        let extractor = Extractor::new(ExtractorConfig::default());
        let latest = LatestRecord::new();

        latest.set(extractor.extract(STATEMENT).unwrap());
        latest.set(extractor.extract("JANE DOE [ZZZZZ9999Z]").unwrap());

        let current = latest.get().unwrap();
        assert_eq!(current.investor_name, "JANE DOE");
        assert_eq!(current.total_portfolio, 0.0);
        assert_ne!(*current, StructuredRecord::default());
    }
}
