use fastascii::column::Values;
use fastascii::datatypes::DataType;
use fastascii::error::{Error, ErrorCode, Phase, Result};
use fastascii::io::ascii::read::*;

#[test]
fn read() -> Result<()> {
    let data = r#"city,lat,lng
"Elgin, Scotland, the UK",57.653484,-3.335724
"Stoke-on-Trent, Staffordshire, the UK",53.002666,-2.179404
"Solihull, Birmingham, UK",52.412811,-1.778197
"Cardiff, Cardiff county, UK",51.481583,-3.179090
"Eastbourne, East Sussex, UK",50.768036,0.290472
"Oxford, Oxfordshire, UK",51.752022,-1.257677
"London, UK",51.509865,-0.118092
"Swindon, Swindon, UK",51.568535,-1.772232
"Gravesend, Kent, UK",51.441883,0.370759
"Northampton, Northamptonshire, UK",52.240479,-0.902656
"Rugby, Warwickshire, UK",52.370876,-1.265032
"Sutton Coldfield, West Midlands, UK",52.570385,-1.824042
"Harlow, Essex, UK",51.772938,0.102310
"Aberdeen, Aberdeen City, UK",57.149651,-2.099075"#;
    let table = fastascii::read(data, &ReadOptions::default())?;

    assert_eq!(14, table.num_rows());
    assert_eq!(3, table.num_columns());
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["city", "lat", "lng"]);

    let lat = table.column("lat").unwrap().as_f64().unwrap();
    assert!((57.653484 - lat[0]).abs() < f64::EPSILON);

    let city = table.column("city").unwrap().as_utf8().unwrap();
    assert_eq!("Elgin, Scotland, the UK", city[0]);
    assert_eq!("Aberdeen, Aberdeen City, UK", city[13]);
    Ok(())
}

#[test]
fn read_header() -> Result<()> {
    let mut reader = Reader::try_new(ReadOptions::default())?;
    let header = reader.read_header(b"a,b,c\n1,2,3\n")?;
    assert_eq!(header.names, vec!["a", "b", "c"]);
    assert_eq!(header.width, 3);
    Ok(())
}

#[test]
fn no_header() -> Result<()> {
    let options = ReadOptions::default()
        .with_header_start(None)
        .with_data_start(0);
    let table = fastascii::read("1,2\n3,4", &options)?;

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["col1", "col2"]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.column("col1").unwrap().as_i64(), Some(&[1i64, 3][..]));
    assert_eq!(table.column("col2").unwrap().as_i64(), Some(&[2i64, 4][..]));
    Ok(())
}

#[test]
fn comments_are_excluded() -> Result<()> {
    let options = ReadOptions::default()
        .with_comment(Some(b'#'))
        .with_header_start(None)
        .with_data_start(1);
    let table = fastascii::read("# ignore\nA,B\n1,2", &options)?;

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["col1", "col2"]);
    assert_eq!(table.num_rows(), 1);
    assert_eq!(table.column("col1").unwrap().as_i64(), Some(&[1i64][..]));
    assert_eq!(table.column("col2").unwrap().as_i64(), Some(&[2i64][..]));
    Ok(())
}

#[test]
fn header_after_comments() -> Result<()> {
    let options = ReadOptions::default().with_comment(Some(b'#'));
    let table = fastascii::read("# generated\n\na,b\n# units\n1,x\n2,y\n", &options)?;
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(table.num_rows(), 2);
    Ok(())
}

#[test]
fn too_many_columns() {
    let options = ReadOptions::default()
        .with_header_start(None)
        .with_data_start(0);
    let error = fastascii::read("1,2,3\n1,2,3,4\n", &options).unwrap_err();
    assert_eq!(error.code(), Some(ErrorCode::TooManyColumns));
    assert!(matches!(
        error,
        Error::Tokenize {
            phase: Phase::Data,
            line: 2,
            ..
        }
    ));
}

#[test]
fn too_many_columns_after_header() {
    let error = fastascii::read("a,b\n1,2\n3,4,5\n", &ReadOptions::default()).unwrap_err();
    assert_eq!(error.code(), Some(ErrorCode::TooManyColumns));
}

#[test]
fn unterminated_quote() {
    let error = fastascii::read("a,b\n1,\"2\n", &ReadOptions::default()).unwrap_err();
    assert_eq!(error.code(), Some(ErrorCode::InvalidLine));
    assert!(error.to_string().contains("invalid line"));
}

#[test]
fn short_rows_are_filled() -> Result<()> {
    let table = fastascii::read("a,b,c\n1,2,3\n4\n", &ReadOptions::default())?;
    let b = table.column("b").unwrap();
    assert_eq!(b.as_i64(), Some(&[2i64, 0][..]));
    assert_eq!(b.validity(), Some(&[true, false][..]));
    Ok(())
}

#[test]
fn type_inference() -> Result<()> {
    let data = "i,f,s,big\n1,1,1,1\n2,2.5,x,99999999999999999999\n3,3,3,3\n";
    let table = fastascii::read(data, &ReadOptions::default())?;

    let types = table.columns().map(|x| x.data_type()).collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Float64,
            DataType::Utf8,
            DataType::Float64
        ]
    );
    assert_eq!(
        table.column("s").unwrap().values(),
        &Values::Utf8(vec!["1".to_string(), "x".to_string(), "3".to_string()])
    );
    Ok(())
}

#[test]
fn zeros_stay_integers() -> Result<()> {
    let table = fastascii::read("a\n1\n0\n3\n", &ReadOptions::default())?;
    let a = table.column("a").unwrap();
    assert_eq!(a.as_i64(), Some(&[1i64, 0, 3][..]));
    assert_eq!(a.null_count(), 0);
    Ok(())
}

#[test]
fn fill_values() -> Result<()> {
    let options = ReadOptions::default()
        .with_fill_values(vec![
            FillValue::new("", "0"),
            FillValue::new("N/A", "-99.5").with_columns(["b"]),
        ])
        .with_fill_exclude_names(["c"]);
    let table = fastascii::read("a,b,c\n1,N/A,\n,2.5,x\n", &options)?;

    let a = table.column("a").unwrap();
    assert_eq!(a.as_i64(), Some(&[1i64, 0][..]));
    assert!(a.is_null(1));

    let b = table.column("b").unwrap();
    assert_eq!(b.data_type(), DataType::Float64);
    assert_eq!(b.as_f64(), Some(&[-99.5, 2.5][..]));
    assert!(b.is_null(0));

    let c = table.column("c").unwrap();
    assert_eq!(c.as_utf8().unwrap(), &["".to_string(), "x".to_string()][..]);
    assert_eq!(c.validity(), None);
    Ok(())
}

#[test]
fn include_and_exclude() -> Result<()> {
    let options = ReadOptions::default()
        .with_include_names(["a", "c"])
        .with_exclude_names(["c"]);
    let table = fastascii::read("a,b,c\n1,2,3\n", &options)?;
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a"]);
    Ok(())
}

#[test]
fn unknown_exclude() {
    let options = ReadOptions::default().with_exclude_names(["d"]);
    let error = fastascii::read("a,b,c\n1,2,3\n", &options).unwrap_err();
    assert!(matches!(error, Error::InvalidArgumentError(_)));
    assert_eq!(error.code(), None);
}

#[test]
fn explicit_names() -> Result<()> {
    let options = ReadOptions::default().with_names(["x", "y"]);
    let table = fastascii::read("a,b\n1,2\n", &options)?;
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["x", "y"]);

    let options = ReadOptions::default().with_names(["x"]);
    assert!(fastascii::read("a,b\n1,2\n", &options).is_err());
    Ok(())
}

#[test]
fn other_delimiter_and_quote() -> Result<()> {
    let options = ReadOptions::default()
        .with_delimiter(b'|')
        .with_quotechar(b'\'');
    let table = fastascii::read("a|b\n'x|y'|'it''s'\n", &options)?;
    assert_eq!(table.column("a").unwrap().as_utf8().unwrap()[0], "x|y");
    assert_eq!(table.column("b").unwrap().as_utf8().unwrap()[0], "it's");
    Ok(())
}

#[test]
fn invalid_options() {
    let options = ReadOptions::default().with_quotechar(b',');
    assert!(matches!(
        Reader::try_new(options),
        Err(Error::InvalidArgumentError(_))
    ));
}

#[test]
fn empty_data() -> Result<()> {
    let table = fastascii::read("a,b\n", &ReadOptions::default())?;
    assert_eq!(table.num_rows(), 0);
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.column("a").unwrap().data_type(), DataType::Int64);
    Ok(())
}

#[test]
fn reader_is_reusable() -> Result<()> {
    let mut reader = Reader::try_new(ReadOptions::default())?;
    let first = reader.read(b"a,b\n1,2\n")?;
    let second = reader.read(b"a,b,c\n1,2,3\n")?;
    assert_eq!(first.num_columns(), 2);
    assert_eq!(second.num_columns(), 3);
    Ok(())
}

#[test]
fn empty_include_keeps_all() -> Result<()> {
    let options = ReadOptions::default().with_include_names(Vec::<String>::new());
    let table = fastascii::read("a,b\n1,2\n", &options)?;
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    Ok(())
}
