use chrono::NaiveDate;
use serde_json::json;

use prodreport::api::{fetch_with_fallback, Fetched};
use prodreport::config::ReportRules;
use prodreport::error::ReportError;
use prodreport::metrics::{parse_list, MetricsBundle, Order};
use prodreport::report::{
    build_report, build_report_named, csv, render_preview, Category, Cell, DateRange,
    FilterSelection, RangeSpec, RangeUnit, ReportDocument, ReportKind, ReportSection,
    SectionBody, StatusFilter, ORDER_DETAILS_LIMIT,
};
use prodreport::views::{format_amount, format_grouped_int, orders_due_soon, pending_orders};

const ALL_KINDS: [ReportKind; 3] = [
    ReportKind::Performance,
    ReportKind::WorkProgress,
    ReportKind::Comprehensive,
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn filters(category: Category, status: StatusFilter) -> FilterSelection {
    FilterSelection {
        date_range: DateRange {
            start: date(2026, 1, 1),
            end: date(2026, 1, 31),
        },
        category,
        status,
    }
}

fn sample_bundle() -> MetricsBundle {
    MetricsBundle::from_value(&json!({
        "overview": {
            "total_productions": 12,
            "in_progress": 5,
            "completed": 6,
            "pending": 1,
            "completion_rate": 50
        },
        "alkansya": {
            "total_output": 340,
            "average_daily": 48.5,
            "max_daily": 60,
            "recent_output": [
                {"date": "2026-01-02", "quantity": 50, "produced_by": "Line A"},
                {"date": "2026-01-03", "quantity": 45, "produced_by": "Line B"}
            ]
        },
        "made_to_order": {
            "items": [
                {"order_id": 7, "product_name": "Chair", "customer_name": "Reyes", "status": "In Progress", "quantity": 2, "progress": 50, "accepted_at": "2026-01-05"},
                {"order_id": 8, "product_name": "Table", "customer_name": "Cruz", "status": "completed", "quantity": 1, "progress": 100},
                {"order_id": 9, "product_name": "Cabinet", "customer_name": "Santos", "status": "pending", "quantity": 3, "progress": 0}
            ]
        },
        "output": {
            "total_output": 400,
            "average_daily_output": 13.3333,
            "peak_output": 60,
            "efficiency": 87.5,
            "on_time_rate": 92
        },
        "products": [
            {"id": 1, "name": "Alkansya", "category_name": "Alkansya"},
            {"id": 2, "name": "Dining Table", "category_name": "Made to Order"},
            {"id": 3, "name": "Chair", "category_name": "Made to Order"}
        ]
    }))
}

fn table_rows<'a>(doc: &'a ReportDocument, title: &str) -> &'a [Vec<Cell>] {
    match &doc.section(title).expect("section present").body {
        SectionBody::Table { rows, .. } => rows,
        SectionBody::KeyValue { .. } => panic!("{title} is not a table"),
    }
}

fn titles(doc: &ReportDocument) -> Vec<&str> {
    doc.sections.iter().map(|s| s.title.as_str()).collect()
}

#[test]
fn test_work_progress_scenario() {
    let bundle = MetricsBundle::from_value(&json!({
        "made_to_order": {"items": [
            {"status": "In Progress", "order_id": 7, "product_name": "Chair", "quantity": 2, "progress": 50}
        ]},
        "alkansya": {"recent_output": []}
    }));
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::InProgress),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );

    let status = doc.section("Made-to-Order Status").unwrap();
    assert_eq!(status.value("In Progress"), Some(&Cell::Integer(1)));
    assert_eq!(status.value("Completed"), Some(&Cell::Integer(0)));
    assert_eq!(status.value("Pending"), Some(&Cell::Integer(0)));

    let rows = table_rows(&doc, "Order Details");
    assert_eq!(rows.len(), 1);
    let rendered: Vec<String> = rows[0].iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["7", "Chair", "In Progress", "2", "50%"]);
}

#[test]
fn test_work_progress_csv_layout() {
    let bundle = MetricsBundle::from_value(&json!({
        "made_to_order": {"items": [
            {"status": "In Progress", "order_id": 7, "product_name": "Chair", "quantity": 2, "progress": 50}
        ]},
        "alkansya": {"recent_output": []}
    }));
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::InProgress),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );

    let expected = "\
Work Progress Report

Report Filters
Date Range,2026-01-01 to 2026-01-31
Category,All Products
Status,In Progress

Alkansya Recent Output
Date,Quantity,Produced By

Made-to-Order Status
In Progress,1
Completed,0
Pending,0

Order Details
Order ID,Product,Status,Quantity,Progress
7,Chair,In Progress,2,50%

";
    assert_eq!(csv::to_csv(&doc).unwrap(), expected);
}

#[test]
fn test_section_order_per_report_kind() {
    let bundle = sample_bundle();
    let rules = ReportRules::default();
    let all = filters(Category::All, StatusFilter::All);

    let doc = build_report(&bundle, &all, ReportKind::Performance, &rules);
    assert_eq!(doc.title, "Production Performance Report");
    assert_eq!(
        titles(&doc),
        [
            "Report Filters",
            "Alkansya Metrics",
            "Made-to-Order Metrics",
            "Efficiency Metrics"
        ]
    );

    let doc = build_report(&bundle, &all, ReportKind::WorkProgress, &rules);
    assert_eq!(
        titles(&doc),
        [
            "Report Filters",
            "Alkansya Recent Output",
            "Made-to-Order Status",
            "Order Details"
        ]
    );

    let doc = build_report(&bundle, &all, ReportKind::Comprehensive, &rules);
    assert_eq!(
        titles(&doc),
        [
            "Report Filters",
            "Production Overview",
            "Production Output",
            "Recent Output",
            "Made-to-Order Progress"
        ]
    );
}

#[test]
fn test_performance_sections_follow_category() {
    let bundle = sample_bundle();
    let rules = ReportRules::default();

    let doc = build_report(
        &bundle,
        &filters(Category::Alkansya, StatusFilter::All),
        ReportKind::Performance,
        &rules,
    );
    assert_eq!(
        titles(&doc),
        ["Report Filters", "Alkansya Metrics", "Efficiency Metrics"]
    );
    let efficiency = doc.section("Efficiency Metrics").unwrap();
    assert!(efficiency.value("Order Completion Rate").is_none());
    assert_eq!(
        efficiency.value("Alkansya Daily Average").map(ToString::to_string),
        Some("48.50".to_string())
    );

    let doc = build_report(
        &bundle,
        &filters(Category::MadeToOrder, StatusFilter::All),
        ReportKind::Performance,
        &rules,
    );
    assert_eq!(
        titles(&doc),
        ["Report Filters", "Made-to-Order Metrics", "Efficiency Metrics"]
    );
    let metrics = doc.section("Made-to-Order Metrics").unwrap();
    assert_eq!(metrics.value("Total Orders"), Some(&Cell::Integer(3)));
    assert_eq!(metrics.value("Total Quantity"), Some(&Cell::Integer(6)));
    assert_eq!(
        metrics.value("Average Progress").map(ToString::to_string),
        Some("50%".to_string())
    );
    let efficiency = doc.section("Efficiency Metrics").unwrap();
    assert!(efficiency.value("Alkansya Daily Average").is_none());
    assert_eq!(
        efficiency.value("Order Completion Rate").map(ToString::to_string),
        Some("33.3%".to_string())
    );
}

#[test]
fn test_alkansya_category_excludes_made_to_order_rows() {
    let bundle = sample_bundle();
    let rules = ReportRules::default();

    for status in [
        StatusFilter::All,
        StatusFilter::InProgress,
        StatusFilter::Completed,
        StatusFilter::Pending,
    ] {
        let selection = filters(Category::Alkansya, status);

        let doc = build_report(&bundle, &selection, ReportKind::WorkProgress, &rules);
        assert!(table_rows(&doc, "Order Details").is_empty());
        assert_eq!(table_rows(&doc, "Alkansya Recent Output").len(), 2);
        let counts = doc.section("Made-to-Order Status").unwrap();
        assert_eq!(counts.value("In Progress"), Some(&Cell::Integer(0)));

        let doc = build_report(&bundle, &selection, ReportKind::Comprehensive, &rules);
        assert!(table_rows(&doc, "Made-to-Order Progress").is_empty());
        let overview = doc.section("Production Overview").unwrap();
        assert!(overview.value("Made-to-Order Products").is_none());
        assert_eq!(overview.value("Alkansya Products"), Some(&Cell::Integer(1)));

        let doc = build_report(&bundle, &selection, ReportKind::Performance, &rules);
        assert!(doc.section("Made-to-Order Metrics").is_none());
    }
}

#[test]
fn test_made_to_order_category_excludes_alkansya_rows() {
    let bundle = sample_bundle();
    let rules = ReportRules::default();
    let selection = filters(Category::MadeToOrder, StatusFilter::All);

    let doc = build_report(&bundle, &selection, ReportKind::WorkProgress, &rules);
    assert!(table_rows(&doc, "Alkansya Recent Output").is_empty());
    assert_eq!(table_rows(&doc, "Order Details").len(), 3);

    let doc = build_report(&bundle, &selection, ReportKind::Comprehensive, &rules);
    assert!(table_rows(&doc, "Recent Output").is_empty());
    let overview = doc.section("Production Overview").unwrap();
    assert!(overview.value("Alkansya Products").is_none());
    assert_eq!(
        overview.value("Made-to-Order Products"),
        Some(&Cell::Integer(2))
    );

    let doc = build_report(&bundle, &selection, ReportKind::Performance, &rules);
    assert!(doc.section("Alkansya Metrics").is_none());
}

#[test]
fn test_status_filter_matches_spellings() {
    let bundle = MetricsBundle::from_value(&json!({
        "made_to_order": {"items": [
            {"order_id": 1, "status": "In Progress"},
            {"order_id": 2, "status": "in-progress"},
            {"order_id": 3, "status": "IN_PROGRESS"},
            {"order_id": 4, "status": " in   progress "},
            {"order_id": 5, "status": "Completed"},
            {"order_id": 6, "status": ""}
        ]}
    }));
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::InProgress),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );

    let ids: Vec<Cell> = table_rows(&doc, "Order Details")
        .iter()
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(
        ids,
        [1, 2, 3, 4].map(Cell::Integer).to_vec(),
        "only in-progress orders survive the filter"
    );
}

#[test]
fn test_order_details_truncated_to_limit() {
    let items: Vec<_> = (0..1000)
        .map(|i| json!({"order_id": i, "product_name": "Chair", "status": "pending", "quantity": 1}))
        .collect();
    let bundle = MetricsBundle::from_value(&json!({"made_to_order": {"items": items}}));
    let selection = filters(Category::All, StatusFilter::All);

    let doc = build_report(
        &bundle,
        &selection,
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );
    let rows = table_rows(&doc, "Order Details");
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0][0], Cell::Integer(0));
    assert_eq!(rows[19][0], Cell::Integer(19));

    // Counts still cover every order
    let counts = doc.section("Made-to-Order Status").unwrap();
    assert_eq!(counts.value("Pending"), Some(&Cell::Integer(1000)));

    // No rule set can widen the table
    let rules = ReportRules {
        deadline_days: 90,
        missing_acceptance_is_pending: false,
    };
    let doc = build_report(&bundle, &selection, ReportKind::WorkProgress, &rules);
    assert_eq!(table_rows(&doc, "Order Details").len(), ORDER_DETAILS_LIMIT);
    assert_eq!(ORDER_DETAILS_LIMIT, 20);
}

#[test]
fn test_empty_bundle_renders_zeros() {
    let bundle = MetricsBundle::from_value(&json!({}));
    assert_eq!(bundle, MetricsBundle::default());

    for kind in ALL_KINDS {
        for category in [Category::All, Category::Alkansya, Category::MadeToOrder] {
            let doc = build_report(
                &bundle,
                &filters(category, StatusFilter::All),
                kind,
                &ReportRules::default(),
            );
            for section in doc.sections.iter().skip(1) {
                match &section.body {
                    SectionBody::KeyValue { rows } => {
                        for (label, value) in rows {
                            let text = value.to_string();
                            assert!(
                                text == "0" || text == "0%",
                                "{} / {label} rendered {text:?}",
                                section.title
                            );
                        }
                    }
                    SectionBody::Table { rows, .. } => {
                        assert!(rows.is_empty(), "{} has rows", section.title)
                    }
                }
            }
        }
    }
}

#[test]
fn test_missing_fields_default_to_zero() {
    let bundle = MetricsBundle::from_value(&json!({
        "made_to_order": {"items": [{"order_id": 3}]},
        "alkansya": {"recent_output": [{"date": "2026-01-04"}]},
        "output": {"efficiency": null}
    }));
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::All),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );

    let text = csv::to_csv(&doc).unwrap();
    assert!(text.contains("\n3,,,0,0%\n"));
    assert!(text.contains("\n2026-01-04,0,\n"));
    assert!(!text.contains("null"));
    assert!(!text.contains("NaN"));

    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::All),
        ReportKind::Performance,
        &ReportRules::default(),
    );
    let efficiency = doc.section("Efficiency Metrics").unwrap();
    assert_eq!(
        efficiency.value("Production Efficiency").map(ToString::to_string),
        Some("0%".to_string())
    );
}

#[test]
fn test_lenient_payload_values() {
    let bundle = MetricsBundle::from_value(&json!({
        "alkansya": {
            "total_output": "120",
            "average_daily": null,
            "max_daily": 15.6,
            "recent_output": [
                {"date": "2026-01-02", "quantity": "5"},
                42,
                {"date": "2026-01-03", "quantity": 7, "produced_by": "Ana"}
            ]
        },
        "made_to_order": "oops",
        "overview": {"completion_rate": "75.5%"},
        "products": {"not": "a list"}
    }));

    assert_eq!(bundle.alkansya.total_output, 120);
    assert_eq!(bundle.alkansya.average_daily, 0.0);
    assert_eq!(bundle.alkansya.max_daily, 16);
    assert_eq!(bundle.alkansya.recent_output.len(), 2);
    assert_eq!(bundle.alkansya.recent_output[0].quantity, 5);
    assert_eq!(bundle.alkansya.recent_output[1].produced_by, "Ana");
    assert!(bundle.made_to_order.items.is_empty());
    assert_eq!(bundle.overview.completion_rate, 75.5);
    assert!(bundle.products.is_empty());
}

#[test]
fn test_shaping_is_idempotent() {
    let bundle = sample_bundle();
    let rules = ReportRules::default();

    for kind in ALL_KINDS {
        let selection = filters(Category::All, StatusFilter::All);
        let first = build_report(&bundle, &selection, kind, &rules);
        let second = build_report(&bundle, &selection, kind, &rules);
        assert_eq!(first, second);
        assert_eq!(csv::to_csv(&first).unwrap(), csv::to_csv(&second).unwrap());
    }
}

#[test]
fn test_csv_round_trip_recovers_structure() {
    let bundle = sample_bundle();

    for kind in ALL_KINDS {
        let doc = build_report(
            &bundle,
            &filters(Category::All, StatusFilter::All),
            kind,
            &ReportRules::default(),
        );
        let text = csv::to_csv(&doc).unwrap();

        let blocks: Vec<Vec<&str>> = text
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(|block| block.lines().collect())
            .collect();

        assert_eq!(blocks[0], [doc.title.as_str()]);
        assert_eq!(blocks.len(), doc.sections.len() + 1);

        for (block, section) in blocks[1..].iter().zip(&doc.sections) {
            assert_eq!(block[0], section.title);
            match &section.body {
                SectionBody::KeyValue { rows } => {
                    assert_eq!(block.len() - 1, rows.len());
                    for (line, (label, _)) in block[1..].iter().zip(rows) {
                        assert_eq!(line.split(',').next(), Some(label.as_str()));
                    }
                }
                SectionBody::Table { headers, rows } => {
                    assert_eq!(block[1].split(',').collect::<Vec<_>>(), *headers);
                    assert_eq!(block.len() - 2, rows.len());
                    for line in &block[2..] {
                        assert_eq!(line.split(',').count(), headers.len());
                    }
                }
            }
        }
    }
}

#[test]
fn test_comprehensive_deadline_uses_rule() {
    let bundle = sample_bundle();
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::All),
        ReportKind::Comprehensive,
        &ReportRules::default(),
    );
    let rows = table_rows(&doc, "Made-to-Order Progress");
    assert_eq!(rows[0][5], Cell::text("2026-01-19"));
    assert_eq!(rows[1][5], Cell::text(""));

    let rules = ReportRules {
        deadline_days: 30,
        ..ReportRules::default()
    };
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::All),
        ReportKind::Comprehensive,
        &rules,
    );
    assert_eq!(
        table_rows(&doc, "Made-to-Order Progress")[0][5],
        Cell::text("2026-02-04")
    );
}

#[test]
fn test_csv_quotes_free_text() {
    let doc = ReportDocument {
        title: "Orders".to_string(),
        sections: vec![ReportSection::table(
            "Customers",
            &["Name", "Note"],
            vec![vec![
                Cell::text("Dela Cruz, Juan"),
                Cell::text("said \"rush\""),
            ]],
        )],
    };
    let text = csv::to_csv(&doc).unwrap();
    assert!(text.contains("\"Dela Cruz, Juan\",\"said \"\"rush\"\"\"\n"));
}

#[test]
fn test_csv_quotes_only_when_needed() {
    let doc = build_report(
        &sample_bundle(),
        &filters(Category::All, StatusFilter::All),
        ReportKind::Performance,
        &ReportRules::default(),
    );
    let text = csv::to_csv(&doc).unwrap();
    assert!(text.contains("\nDate Range,2026-01-01 to 2026-01-31\n"));

    let doc = ReportDocument {
        title: "Notes".to_string(),
        sections: vec![ReportSection::key_value(
            "Remarks",
            vec![("Line", Cell::text("first\r\nsecond"))],
        )],
    };
    let text = csv::to_csv(&doc).unwrap();
    assert!(text.contains("Line,\"first\r\nsecond\"\n"));
}

#[test]
fn test_json_never_contains_null() {
    let bundle = MetricsBundle::from_value(&json!({
        "made_to_order": {"items": [
            {"order_id": 1, "status": "in_progress", "progress": 1e308},
            {"order_id": 2, "status": "in_progress", "progress": 1e308}
        ]}
    }));
    let doc = build_report(
        &bundle,
        &filters(Category::All, StatusFilter::All),
        ReportKind::Performance,
        &ReportRules::default(),
    );

    let metrics = doc.section("Made-to-Order Metrics").unwrap();
    assert_eq!(metrics.value("Average Progress"), Some(&Cell::Percent(1e308)));

    let json = serde_json::to_string(&doc).unwrap();
    assert!(!json.contains("null"));

    let cells = vec![
        Cell::Number(f64::NAN),
        Cell::Percent(f64::INFINITY),
        Cell::Number(f64::NEG_INFINITY),
    ];
    assert_eq!(serde_json::to_string(&cells).unwrap(), "[0.0,0.0,0.0]");
}

#[test]
fn test_csv_empty_document() {
    assert_eq!(csv::to_csv(&ReportDocument::default()).unwrap(), "");

    let doc = build_report_named(
        &sample_bundle(),
        &filters(Category::All, StatusFilter::All),
        "quarterly",
        &ReportRules::default(),
    );
    assert!(doc.is_empty());
    assert_eq!(csv::to_csv(&doc).unwrap(), "");
    assert_eq!(render_preview(&doc), "");
}

#[test]
fn test_csv_timestamp_line() {
    let doc = build_report(
        &sample_bundle(),
        &filters(Category::All, StatusFilter::All),
        ReportKind::Performance,
        &ReportRules::default(),
    );
    let generated = date(2026, 2, 1).and_hms_opt(9, 30, 0).unwrap();
    let text = csv::to_csv_with_timestamp(&doc, generated).unwrap();

    assert!(text.starts_with("Production Performance Report\nGenerated: 2026-02-01 09:30:00\n\n"));
    let without: Vec<&str> = text.lines().filter(|l| !l.starts_with("Generated:")).collect();
    let plain_text = csv::to_csv(&doc).unwrap();
    let plain: Vec<&str> = plain_text.lines().collect();
    assert_eq!(without, plain);
}

#[test]
fn test_report_kind_parsing() {
    assert_eq!(ReportKind::parse("performance"), Some(ReportKind::Performance));
    assert_eq!(ReportKind::parse("WorkProgress"), Some(ReportKind::WorkProgress));
    assert_eq!(ReportKind::parse("work-progress"), Some(ReportKind::WorkProgress));
    assert_eq!(ReportKind::parse("comprehensive"), Some(ReportKind::Comprehensive));
    assert_eq!(ReportKind::parse("weekly"), None);
}

#[test]
fn test_filter_parsing() {
    assert_eq!(Category::parse("made-to-order"), Some(Category::MadeToOrder));
    assert_eq!(Category::parse("Alkansya"), Some(Category::Alkansya));
    assert_eq!(Category::parse("custom"), None);
    assert_eq!(StatusFilter::parse("In Progress"), Some(StatusFilter::InProgress));
    assert_eq!(StatusFilter::parse("done"), None);
}

#[test]
fn test_range_resolution() {
    let today = date(2026, 3, 31);
    let default = (30, RangeUnit::Days);

    let range = RangeSpec::Custom {
        start: Some(date(2026, 3, 1)),
        end: Some(date(2026, 3, 15)),
    }
    .resolve(today, default);
    assert_eq!(range.to_string(), "2026-03-01 to 2026-03-15");

    let fallback = RangeSpec::Custom {
        start: Some(date(2026, 3, 1)),
        end: None,
    }
    .resolve(today, default);
    assert_eq!(fallback.to_string(), "2026-03-01 to 2026-03-31");

    assert_eq!(
        RangeSpec::parse_last("2w").unwrap().resolve(today, default),
        DateRange {
            start: date(2026, 3, 17),
            end: today
        }
    );
    assert_eq!(
        RangeSpec::parse_last("1m").unwrap().resolve(today, default),
        DateRange {
            start: date(2026, 2, 28),
            end: today
        }
    );
    assert!(RangeSpec::parse_last("30x").is_none());
    assert!(RangeSpec::parse_last("d").is_none());
    assert!(RangeSpec::parse_last("").is_none());
}

#[test]
fn test_file_name() {
    let doc = build_report(
        &sample_bundle(),
        &filters(Category::All, StatusFilter::All),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );
    let selection = filters(Category::All, StatusFilter::All);
    assert_eq!(
        doc.file_name(&selection.date_range, "csv"),
        "Work_Progress_Report_2026-01-01_to_2026-01-31.csv"
    );
}

#[test]
fn test_cell_display() {
    assert_eq!(Cell::Number(13.3333).to_string(), "13.33");
    assert_eq!(Cell::Number(4.0).to_string(), "4");
    assert_eq!(Cell::Number(f64::NAN).to_string(), "0");
    assert_eq!(Cell::Percent(87.5).to_string(), "87.5%");
    assert_eq!(Cell::Percent(-0.01).to_string(), "0.0%");
    assert_eq!(Cell::Integer(-3).to_string(), "-3");
}

#[test]
fn test_fetch_with_fallback() {
    let fetched: Fetched<Vec<i64>> = fetch_with_fallback("/orders", Err(ReportError::MissingToken));
    assert!(fetched.is_fallback());
    match &fetched {
        Fetched::Fallback { value, reason } => {
            assert!(value.is_empty());
            assert!(reason.contains("token"));
        }
        Fetched::Fresh(_) => panic!("expected fallback"),
    }

    let fetched = fetch_with_fallback("/orders", Ok(vec![1, 2]));
    assert!(!fetched.is_fallback());
    assert_eq!(fetched.into_value(), vec![1, 2]);
}

#[test]
fn test_pending_orders_follow_rule() {
    let orders: Vec<Order> = parse_list(
        "orders",
        Some(&json!([
            {"id": 1, "acceptance_status": "pending"},
            {"id": 2, "acceptance_status": "accepted"},
            {"id": 3},
            {"id": 4, "acceptance_status": null},
            {"id": 5, "acceptance_status": "Pending "}
        ])),
    );
    assert_eq!(orders.len(), 5);

    let ids = |rules: &ReportRules| -> Vec<i64> {
        pending_orders(&orders, rules).iter().map(|o| o.id).collect()
    };
    assert_eq!(ids(&ReportRules::default()), [1, 3, 4, 5]);

    let strict = ReportRules {
        missing_acceptance_is_pending: false,
        ..ReportRules::default()
    };
    assert_eq!(ids(&strict), [1, 5]);
}

#[test]
fn test_orders_due_soon() {
    let accepted: Vec<Order> = parse_list(
        "orders_accepted",
        Some(&json!([
            {"id": 10, "customer_name": "Later", "accepted_at": "2026-03-05"},
            {"id": 11, "customer_name": "Soon", "accepted_at": "2026-02-25T08:00:00Z"},
            {"id": 12, "customer_name": "Late", "accepted_at": "2026-02-20"},
            {"id": 13, "customer_name": "Done", "accepted_at": "2026-02-20", "status": "Completed"},
            {"id": 14, "customer_name": "Unknown"}
        ])),
    );

    let due = orders_due_soon(&accepted, &ReportRules::default(), date(2026, 3, 10), 3);
    let summary: Vec<(i64, i64)> = due.iter().map(|d| (d.id, d.days_left)).collect();
    assert_eq!(summary, [(12, -4), (11, 1)]);
    assert_eq!(due[0].deadline, date(2026, 3, 6));
}

#[test]
fn test_number_formatting() {
    assert_eq!(format_grouped_int(1234567), "1,234,567");
    assert_eq!(format_grouped_int(-1000), "-1,000");
    assert_eq!(format_amount(12345.678, "₱"), "₱12,345.68");
    assert_eq!(format_amount(-5.5, "$"), "-$5.50");
    assert_eq!(format_amount(f64::INFINITY, "$"), "$0.00");
}

#[test]
fn test_preview_lists_sections() {
    let doc = build_report(
        &sample_bundle(),
        &filters(Category::All, StatusFilter::All),
        ReportKind::WorkProgress,
        &ReportRules::default(),
    );
    let preview = render_preview(&doc);
    assert!(preview.starts_with("Work Progress Report\n"));
    for section in &doc.sections {
        assert!(preview.contains(&section.title));
    }
    assert!(preview.contains("Chair"));
    assert!(preview.contains("Line A"));
}
