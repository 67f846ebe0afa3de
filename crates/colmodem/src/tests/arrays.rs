use alloc::{vec, vec::Vec};

use quickcheck::QuickCheck;

use crate::{
    ArrayReader, BatchError, ByteLines, ColumnBuf, ColumnType, Columns, ConfigError,
    ConvertError, Field, MAX_FIELD_LEN, ReadError, Record, RowReader, ScanOptions, Schema,
};

fn schema(cols: &[(ColumnType, &[u8])]) -> Schema {
    Schema::new(
        cols.iter().map(|&(t, _)| t),
        cols.iter().map(|&(_, m)| m),
    )
    .unwrap()
}

/// One string-column row, as written: length prefix plus content.
fn str_row(buf: &[u8], row: usize) -> (&[u8], &[u8]) {
    let rec = &buf[row * MAX_FIELD_LEN..(row + 1) * MAX_FIELD_LEN];
    (&rec[..3], &rec[3..])
}

#[test]
fn fills_typed_columns_in_place() {
    let mut ints = vec![0i64; 4];
    let mut strs = vec![0u8; 4 * MAX_FIELD_LEN];

    let mut reader = ArrayReader::new(
        ByteLines::new(b"3,x,9\n,y,8\n"),
        ScanOptions::default(),
        Columns::List(vec![0, 1]),
        schema(&[(ColumnType::Int, b"-1"), (ColumnType::Str, b"NA")]),
        4,
        vec![ColumnBuf::Int(&mut ints), ColumnBuf::Str(&mut strs)],
    )
    .unwrap();

    // Two lines, capacity four: a short, successful fill.
    assert_eq!(reader.fill(), Ok(2));
    drop(reader);
    assert_eq!(&ints[..2], &[3, -1]);

    let (len, content) = str_row(&strs, 0);
    assert_eq!(len, b"001");
    assert_eq!(&content[..1], b"x");
    let (len, content) = str_row(&strs, 1);
    assert_eq!(len, b"001");
    assert_eq!(&content[..1], b"y");
}

#[test]
fn string_record_layout() {
    let mut strs = vec![0u8; MAX_FIELD_LEN];
    let mut reader = ArrayReader::new(
        ByteLines::new(b"hi\n"),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Str, b"NA")]),
        1,
        vec![ColumnBuf::Str(&mut strs)],
    )
    .unwrap();

    assert_eq!(reader.fill(), Ok(1));
    drop(reader);
    assert_eq!(&strs[0..3], b"002");
    assert_eq!(&strs[3..5], b"hi");
}

#[test]
fn missing_string_fields_substitute_the_literal() {
    let mut strs = vec![0u8; MAX_FIELD_LEN];
    let mut reader = ArrayReader::new(
        ByteLines::new(b",ignored\n"),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Str, b"NA")]),
        1,
        vec![ColumnBuf::Str(&mut strs)],
    )
    .unwrap();

    assert_eq!(reader.fill(), Ok(1));
    drop(reader);
    assert_eq!(&strs[0..3], b"002");
    assert_eq!(&strs[3..5], b"NA");
}

#[test]
fn conversion_error_aborts_but_keeps_earlier_rows() {
    let mut ints = vec![0i64; 4];
    let mut reader = ArrayReader::new(
        ByteLines::new(b"1\n2\noops\n4\n"),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Int, b"0")]),
        4,
        vec![ColumnBuf::Int(&mut ints)],
    )
    .unwrap();

    assert_eq!(
        reader.fill(),
        Err(BatchError {
            row: 2,
            source: ReadError::Convert(ConvertError {
                column: 0,
                target: ColumnType::Int,
                text: "oops".into(),
            }),
        })
    );
    drop(reader);
    // Rows before the failure were written and stay valid.
    assert_eq!(&ints[..2], &[1, 2]);
}

#[test]
fn repeated_fills_walk_the_source_in_batches() {
    let mut ints = vec![0i64; 2];
    let mut reader = ArrayReader::new(
        ByteLines::new(b"1\n2\n3\n4\n5\n"),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Int, b"0")]),
        2,
        vec![ColumnBuf::Int(&mut ints)],
    )
    .unwrap();

    assert_eq!(reader.fill(), Ok(2));
    assert_eq!(reader.fill(), Ok(2));
    // The short batch signals end of stream.
    assert_eq!(reader.fill(), Ok(1));
    assert_eq!(reader.fill(), Ok(0));
}

#[test]
fn single_column_bypass_writes_by_position() {
    let mut floats = vec![0f64; 2];
    let mut reader = ArrayReader::new(
        ByteLines::new(b"a,b,1.5\nc,d,-2.5\n"),
        ScanOptions::default(),
        Columns::Single(2),
        schema(&[(ColumnType::Float, b"0")]),
        2,
        vec![ColumnBuf::Float(&mut floats)],
    )
    .unwrap();

    assert_eq!(reader.fill(), Ok(2));
    drop(reader);
    assert_eq!(floats, vec![1.5, -2.5]);
}

#[test]
fn string_width_boundary() {
    // MAX_FIELD_LEN - 3 content bytes fit next to the length prefix;
    // one more byte cannot be laid out.
    let fits = vec![b'x'; MAX_FIELD_LEN - 3];
    let mut line = fits.clone();
    line.push(b'\n');

    let mut strs = vec![0u8; MAX_FIELD_LEN];
    let mut reader = ArrayReader::new(
        ByteLines::new(&line),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Str, b"NA")]),
        1,
        vec![ColumnBuf::Str(&mut strs)],
    )
    .unwrap();
    assert_eq!(reader.fill(), Ok(1));
    drop(reader);
    assert_eq!(&strs[0..3], b"125");
    assert_eq!(&strs[3..], &fits[..]);

    let mut line = vec![b'x'; MAX_FIELD_LEN - 2];
    line.push(b'\n');
    let mut strs = vec![0u8; MAX_FIELD_LEN];
    let mut reader = ArrayReader::new(
        ByteLines::new(&line),
        ScanOptions::default(),
        Columns::Single(0),
        schema(&[(ColumnType::Str, b"NA")]),
        1,
        vec![ColumnBuf::Str(&mut strs)],
    )
    .unwrap();
    assert_eq!(
        reader.fill(),
        Err(BatchError {
            row: 0,
            source: ReadError::FieldTooWide {
                column: 0,
                len: MAX_FIELD_LEN - 2,
            },
        })
    );
}

#[test]
fn buffer_validation() {
    let opts = ScanOptions::default();
    let sch = schema(&[(ColumnType::Int, b"0")]);

    let mut floats = vec![0f64; 4];
    assert_eq!(
        ArrayReader::new(
            ByteLines::new(b""),
            opts,
            Columns::Single(0),
            sch.clone(),
            4,
            vec![ColumnBuf::Float(&mut floats)],
        )
        .unwrap_err(),
        ConfigError::BufferTypeMismatch {
            column: 0,
            expected: ColumnType::Int,
        }
    );

    let mut ints = vec![0i64; 3];
    assert_eq!(
        ArrayReader::new(
            ByteLines::new(b""),
            opts,
            Columns::Single(0),
            sch.clone(),
            4,
            vec![ColumnBuf::Int(&mut ints)],
        )
        .unwrap_err(),
        ConfigError::BufferTooSmall {
            column: 0,
            got: 3,
            need: 4,
        }
    );

    assert_eq!(
        ArrayReader::new(
            ByteLines::new(b""),
            opts,
            Columns::Single(0),
            sch.clone(),
            4,
            vec![],
        )
        .unwrap_err(),
        ConfigError::BufferCountMismatch {
            buffers: 0,
            types: 1,
        }
    );

    let mut ints = vec![0i64; 4];
    assert_eq!(
        ArrayReader::new(
            ByteLines::new(b""),
            opts,
            Columns::Single(0),
            sch,
            0,
            vec![ColumnBuf::Int(&mut ints)],
        )
        .unwrap_err(),
        ConfigError::ZeroCapacity
    );
}

#[test]
fn oversized_missing_literal_is_rejected_at_construction() {
    let long = vec![b'x'; MAX_FIELD_LEN - 1];
    assert_eq!(
        Schema::new([ColumnType::Str], [long.as_slice()]).unwrap_err(),
        ConfigError::MissingLiteralTooLong {
            column: 0,
            len: MAX_FIELD_LEN - 1,
            max: MAX_FIELD_LEN - 1,
        }
    );
    assert!(Schema::new([ColumnType::Str], [&vec![b'x'; MAX_FIELD_LEN - 2][..]]).is_ok());
}

/// For error-free input with enough capacity, the fill count equals the
/// line count and every buffer row matches row-mode conversion of the same
/// line.
#[test]
fn batch_agrees_with_row_mode_quickcheck() {
    fn prop(rows: Vec<(i32, u16)>) -> bool {
        if rows.is_empty() || rows.len() > 64 {
            return true;
        }
        let mut text = Vec::new();
        for (a, b) in &rows {
            let mut line = alloc::format!("{a},{b}.5").into_bytes();
            line.push(b'\n');
            text.extend_from_slice(&line);
        }

        let columns = Columns::List(vec![0, 1]);
        let sch = schema(&[(ColumnType::Int, b"0"), (ColumnType::Float, b"0")]);

        let mut ints = vec![0i64; rows.len()];
        let mut floats = vec![0f64; rows.len()];
        let mut reader = ArrayReader::new(
            ByteLines::new(&text),
            ScanOptions::default(),
            columns.clone(),
            sch.clone(),
            rows.len(),
            vec![ColumnBuf::Int(&mut ints), ColumnBuf::Float(&mut floats)],
        )
        .unwrap();
        if reader.fill() != Ok(rows.len()) {
            return false;
        }
        drop(reader);

        let row_reader = RowReader::new(
            ByteLines::new(&text),
            ScanOptions::default(),
            columns,
            sch,
        )
        .unwrap();
        row_reader.zip(ints.iter().zip(&floats)).all(|(record, (i, f))| {
            record == Ok(Record::Row(vec![Field::Int(*i), Field::Float(*f)]))
        })
    }

    QuickCheck::new().quickcheck(prop as fn(Vec<(i32, u16)>) -> bool);
}
