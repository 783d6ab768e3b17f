//! RSS 2.0 Session Tests
//!
//! Document validation, positioning and the low-level content adapters.

use rss_mapper::{
    ContentReader, ContentWriter, ElementType, FeedError, FeedParser, FeedReader, RSS20,
    ReaderConfig, WriterConfig,
};

fn first_error(xml: &str) -> FeedError {
    FeedReader::new(xml.as_bytes()).read().unwrap_err()
}

#[test]
fn test_empty_channel_is_not_an_error() {
    for xml in [
        r#"<rss version="2.0"><channel></channel></rss>"#,
        r#"<rss version="2.0"><channel/></rss>"#,
        "<?xml version=\"1.0\"?>\n<!-- generated -->\n<rss version=\"2.0\">\n  <channel>\n  </channel>\n</rss>\n",
    ] {
        let mut reader = FeedReader::new(xml.as_bytes());
        assert!(!reader.read().unwrap(), "{}", xml);
        assert!(reader.is_exhausted());
        assert_eq!(reader.element_type(), None);
    }
}

#[test]
fn test_wrong_root_fails_fast() {
    let err = first_error(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>x</title></feed>"#);
    assert!(err.is_format_error());
    assert!(err.to_string().contains("expected <rss> root element, found <feed>"));
}

#[test]
fn test_missing_or_wrong_version() {
    assert!(first_error("<rss><channel/></rss>").is_format_error());
    assert!(first_error(r#"<rss version="0.92"><channel/></rss>"#).is_format_error());
}

#[test]
fn test_missing_channel() {
    assert!(first_error(r#"<rss version="2.0"/>"#).is_format_error());
    assert!(first_error(r#"<rss version="2.0"></rss>"#).is_format_error());
    assert!(first_error(r#"<rss version="2.0"><item/></rss>"#).is_format_error());
}

#[test]
fn test_malformed_xml_is_not_format_error() {
    let xml = r#"<rss version="2.0"><channel><item><title>x</wrong></item></channel></rss>"#;
    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read().unwrap();
    let err = reader.read_item().unwrap_err();
    assert!(!err.is_format_error());
    assert!(matches!(err, FeedError::Xml(_) | FeedError::Malformed(_)));
}

#[test]
fn test_mismatch_names_found_element() {
    let xml = r#"<rss version="2.0"><channel><image><url>http://x/i.png</url></image></channel></rss>"#;
    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read().unwrap();
    match reader.read_link().unwrap_err() {
        FeedError::ElementMismatch { expected, found } => {
            assert_eq!(expected, "link");
            assert_eq!(found, "image <image>");
        }
        other => panic!("unexpected error: {other}"),
    }
    // still positioned on the image
    assert_eq!(reader.element_type(), Some(ElementType::Image));
    assert!(reader.read_image().is_ok());
    assert!(reader.is_exhausted());
}

#[test]
fn test_read_after_exhaustion() {
    let mut reader = FeedReader::new(r#"<rss version="2.0"><channel/></rss>"#.as_bytes());
    assert!(!reader.read().unwrap());
    assert!(matches!(
        reader.read_item().unwrap_err(),
        FeedError::ElementMismatch { .. }
    ));
    assert!(reader.read_value::<String>().unwrap_err().is_format_error());
}

#[test]
fn test_skip_moves_past_subtree() {
    let xml = r#"<rss version="2.0"><channel>
        <textInput><title>Search</title><name>q</name></textInput>
        <item><title>After</title></item>
    </channel></rss>"#;
    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read().unwrap();
    assert_eq!(reader.element_name(), Some("textInput"));
    reader.skip().unwrap();
    assert_eq!(reader.element_type(), Some(ElementType::Item));
    assert_eq!(reader.read_item().unwrap().title.as_deref(), Some("After"));
}

#[test]
fn test_nesting_limit() {
    let mut deep = String::from("<x>");
    for _ in 0..20 {
        deep.push_str("<x>");
    }
    for _ in 0..21 {
        deep.push_str("</x>");
    }
    let xml = format!(r#"<rss version="2.0"><channel>{}</channel></rss>"#, deep);

    let mut reader = FeedReader::with_config(xml.as_bytes(), ReaderConfig::strict());
    reader.read().unwrap();
    let err = reader.read_content().unwrap_err();
    assert!(matches!(err, FeedError::Malformed(_)));

    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read().unwrap();
    assert!(reader.read_content().is_ok());
}

#[test]
fn test_content_reader_outer_subtree_and_parse() {
    let xml = r#"<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"><channel>
        <item><title>Clip</title><media:content url="http://x/v.mp4"/></item>
    </channel></rss>"#;
    let mut reader = ContentReader::new(xml.as_bytes(), RSS20, ReaderConfig::default());
    assert!(reader.move_next().unwrap());
    assert!(reader.is_start_element(Some("item"), None));
    assert!(!reader.is_start_element(Some("channel"), None));

    let raw = reader.read_outer_subtree().unwrap();
    assert_eq!(
        raw,
        r#"<item><title>Clip</title><media:content xmlns:media="http://search.yahoo.com/mrss/" url="http://x/v.mp4"/></item>"#
    );

    let parser = FeedParser::default();
    let content = parser.parse_content(&raw).unwrap();
    assert_eq!(content.fields()[1].namespace(), "http://search.yahoo.com/mrss/");
    assert_eq!(parser.parse_item(&content).unwrap().title.as_deref(), Some("Clip"));
    assert!(!reader.move_next().unwrap());
}

#[test]
fn test_content_writer_raw_passthrough() {
    let xml = r#"<rss version="2.0"><channel><item><title>Copied</title></item></channel></rss>"#;
    let mut reader = ContentReader::new(xml.as_bytes(), RSS20, ReaderConfig::default());
    let mut writer = ContentWriter::new(
        Vec::new(),
        RSS20,
        Vec::new(),
        WriterConfig {
            indent: None,
            xml_declaration: false,
        },
    );
    while reader.move_next().unwrap() {
        writer.write_raw(&reader.read_outer_subtree().unwrap()).unwrap();
    }
    writer.flush().unwrap();
    let out = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(out, xml);
}
