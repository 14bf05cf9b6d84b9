use crate::model::{MemStats, SizeSummary, Symbol, SymbolKind};

fn size_summary(total: u64) -> SizeSummary {
    SizeSummary {
        text: 10,
        data: 20,
        bss: 5,
        total_decimal: total,
        total_hex: format!("{total:x}"),
        filename: "libfoo.a".to_string(),
        library_path: None,
    }
}

fn symbol(tag: char, size: u64, name: &str) -> Symbol {
    Symbol {
        size,
        kind: SymbolKind::from_tag(tag).unwrap(),
        name: name.to_string(),
    }
}

#[test]
fn kind_tags_round_trip_through_the_closed_set() {
    for kind in SymbolKind::ALL {
        assert_eq!(SymbolKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(SymbolKind::from_tag('U'), None);
    assert_eq!(SymbolKind::from_tag('W'), None);
    assert_eq!(SymbolKind::from_field("TT"), None);
    assert_eq!(SymbolKind::from_field(""), None);
    assert_eq!(SymbolKind::from_field("d"), Some(SymbolKind::LocalData));
}

#[test]
fn classification_follows_the_case_folded_tag() {
    let code = SymbolKind::ALL
        .into_iter()
        .filter(|k| k.is_code())
        .map(SymbolKind::tag)
        .collect::<String>();
    let data = SymbolKind::ALL
        .into_iter()
        .filter(|k| k.is_data())
        .map(SymbolKind::tag)
        .collect::<String>();
    let global = SymbolKind::ALL
        .into_iter()
        .filter(|k| k.is_global())
        .map(SymbolKind::tag)
        .collect::<String>();

    assert_eq!(code, "Tt");
    assert_eq!(data, "BbRrDd");
    assert_eq!(global, "TBRD");
}

#[test]
fn descriptions_name_the_section() {
    assert_eq!(SymbolKind::GlobalCode.description(), "Global code (text)");
    assert_eq!(
        SymbolKind::LocalBss.description(),
        "Local uninitialized data (BSS)"
    );
    assert_eq!(SymbolKind::GlobalRodata.description(), "Global read-only data");
}

#[test]
fn derived_totals_and_summary_are_computed_from_symbols() {
    let stats = MemStats {
        size: size_summary(35),
        symbols: vec![
            symbol('T', 10, "global_fn"),
            symbol('t', 4, "local_fn"),
            symbol('b', 3, "local_var"),
            symbol('R', 8, "table"),
            symbol('D', 2, "counter"),
        ],
    };

    assert_eq!(stats.total_code_size(), 14);
    assert_eq!(stats.total_data_size(), 13);

    let summary = stats.summary();
    assert_eq!(summary.filename, "libfoo.a");
    assert_eq!(summary.text_size, 10);
    assert_eq!(summary.data_size, 20);
    assert_eq!(summary.bss_size, 5);
    assert_eq!(summary.total_size, 35);
    assert_eq!(summary.symbol_count, 5);
    assert_eq!(summary.code_symbols, 2);
    assert_eq!(summary.data_symbols, 3);
}

#[test]
fn empty_symbol_list_has_zero_totals() {
    let stats = MemStats {
        size: size_summary(0),
        symbols: vec![],
    };
    assert_eq!(stats.total_code_size(), 0);
    assert_eq!(stats.total_data_size(), 0);
    assert_eq!(stats.summary().symbol_count, 0);
}
