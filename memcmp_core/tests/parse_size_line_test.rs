use memcmp_core::error::ParseError;
use memcmp_core::parse::{parse_size_block, parse_size_line};

#[test]
fn parses_plain_size_line() {
    let size = parse_size_line("   1234     56     78   1368    558 build/app.elf").unwrap();
    assert_eq!(size.text, 1234);
    assert_eq!(size.data, 56);
    assert_eq!(size.bss, 78);
    assert_eq!(size.total_decimal, 1368);
    assert_eq!(size.total_hex, "558");
    assert_eq!(size.filename, "build/app.elf");
    assert_eq!(size.library_path, None);
}

#[test]
fn total_is_taken_verbatim_without_checking_the_sum() {
    let size = parse_size_line("1 2 3 999 0xdead foo.o").unwrap();
    assert_eq!(size.total_decimal, 999);
    assert_eq!(size.total_hex, "0xdead");
}

#[test]
fn splits_archive_member_and_library_path() {
    let size =
        parse_size_line("    412      0      8    420    1a4 ascii7seg.o (ex build/libascii7seg.a)")
            .unwrap();
    assert_eq!(size.filename, "ascii7seg.o");
    assert_eq!(size.library_path.as_deref(), Some("build/libascii7seg.a"));
}

#[test]
fn library_path_with_spaces_is_rejoined() {
    let size = parse_size_line("1 2 3 6 6 foo.o (ex my libs/libfoo.a)").unwrap();
    assert_eq!(size.filename, "foo.o");
    assert_eq!(size.library_path.as_deref(), Some("my libs/libfoo.a"));
}

#[test]
fn parenthesised_name_without_ex_separator_keeps_whole_tail() {
    let size = parse_size_line("1 2 3 6 6 libfoo.a(foo.o)").unwrap();
    assert_eq!(size.filename, "libfoo.a(foo.o)");
    assert_eq!(size.library_path, None);
}

#[test]
fn extra_tokens_without_parentheses_are_ignored() {
    let size = parse_size_line("1 2 3 6 6 first second").unwrap();
    assert_eq!(size.filename, "first");
    assert_eq!(size.library_path, None);
}

#[test]
fn too_few_fields_is_an_error() {
    let err = parse_size_line("1 2 3 6 6").unwrap_err();
    assert!(matches!(err, ParseError::SizeFieldCount { found: 5, .. }));
}

#[test]
fn non_numeric_field_names_the_column() {
    let err = parse_size_line("1 two 3 6 6 foo.o").unwrap_err();
    match err {
        ParseError::InvalidSizeNumber { field, value } => {
            assert_eq!(field, "data");
            assert_eq!(value, "two");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn size_block_skips_header_line() {
    let block = "   text    data     bss     dec     hex filename\n     10      20       5      35      23 libfoo.a\n";
    let size = parse_size_block(block).unwrap();
    assert_eq!(size.text, 10);
    assert_eq!(size.filename, "libfoo.a");
}

#[test]
fn size_block_with_only_header_is_missing_data_line() {
    let err = parse_size_block("   text    data     bss     dec     hex filename\n").unwrap_err();
    assert!(matches!(err, ParseError::MissingSizeLine));
}
