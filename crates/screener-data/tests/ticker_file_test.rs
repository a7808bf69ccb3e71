//! 티커 파일 로더 통합 테스트.

use std::io::Write;

use screener_data::{load_ticker_file, DataError};

#[test]
fn loads_csv_first_column() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# KOSPI200 subset").unwrap();
    writeln!(file, "005930.KS,Samsung Electronics").unwrap();
    writeln!(file, "000660,SK hynix").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "035420").unwrap();

    let tickers = load_ticker_file(file.path()).unwrap();
    assert_eq!(tickers, vec!["005930.KS", "000660", "035420"]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_ticker_file(&dir.path().join("missing.csv"));
    assert!(matches!(result, Err(DataError::Io(_))));
}
