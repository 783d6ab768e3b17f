//! RSS 2.0 Writing Tests
//!
//! Field order, link shapes, validation and document framing.

use chrono::{TimeZone, Utc};
use rss_mapper::{
    Attribute, Category, Content, FeedError, FeedWriter, Image, Item, ItemBuilder, Link,
    LinkRelation, Person, WriterConfig,
};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn compact_writer() -> FeedWriter<Vec<u8>> {
    FeedWriter::with_config(
        Vec::new(),
        Vec::new(),
        WriterConfig {
            indent: None,
            xml_declaration: false,
        },
    )
}

fn finish(writer: FeedWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

#[test]
fn test_hello_world_field_order() {
    let mut writer = compact_writer();
    let item = Item {
        title: Some("Hello".to_string()),
        description: Some("World".to_string()),
        ..Item::default()
    };
    writer.write_item(&item).unwrap();

    let xml = finish(writer);
    assert!(xml.contains("<item><title>Hello</title><description>World</description></item>"));
}

#[test]
fn test_item_without_title_or_description_fails() {
    let mut writer = compact_writer();
    let mut item = Item::new();
    item.links.push(Link::new(url("http://x/")));
    item.id = Some("abc".to_string());

    let err = writer.write_item(&item).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(err, FeedError::MissingField { .. }));
    assert!(writer.get_ref().is_empty());
}

#[test]
fn test_enclosure_with_zero_length_fails() {
    let mut writer = compact_writer();
    let item = ItemBuilder::new()
        .title("Episode 1")
        .enclosure(url("http://x/ep1.mp3"), 0, "audio/mpeg")
        .build()
        .unwrap();

    let err = writer.write_item(&item).unwrap_err();
    assert!(err.is_format_error());
    assert!(writer.get_ref().is_empty());
}

#[test]
fn test_guid_link_written_as_permalink() {
    let mut writer = compact_writer();
    let mut item = Item::new();
    item.title = Some("T".to_string());
    item.id = Some("http://x/p/1".to_string());
    item.links.push(Link::new(url("http://x/post")));
    item.links
        .push(Link::with_relation(url("http://x/p/1"), LinkRelation::Guid));
    writer.write_item(&item).unwrap();

    let xml = finish(writer);
    assert!(xml.contains(
        r#"<item><title>T</title><link>http://x/post</link><guid isPermaLink="true">http://x/p/1</guid></item>"#
    ));
}

#[test]
fn test_plain_id_not_permalink() {
    let mut writer = compact_writer();
    writer
        .write_item(&ItemBuilder::new().title("T").id("urn:uuid:1").build().unwrap())
        .unwrap();
    assert!(finish(writer).contains(r#"<guid isPermaLink="false">urn:uuid:1</guid>"#));
}

#[test]
fn test_full_item_order() {
    let mut writer = compact_writer();
    let item = ItemBuilder::new()
        .published(Utc.with_ymd_and_hms(2024, 6, 3, 9, 39, 21).unwrap())
        .category(Category::new("Space"))
        .author("editor@example.com")
        .description("Launch")
        .comments(url("http://x/1#comments"))
        .enclosure(url("http://x/1.mp3"), 1024, "audio/mpeg")
        .link(url("http://x/1"))
        .title("Liftoff")
        .permalink(url("http://x/1"))
        .build()
        .unwrap();
    writer.write_item(&item).unwrap();

    assert_eq!(
        finish(writer),
        "<rss version=\"2.0\"><channel><item>\
         <title>Liftoff</title>\
         <comments>http://x/1#comments</comments>\
         <enclosure url=\"http://x/1.mp3\" length=\"1024\" type=\"audio/mpeg\"/>\
         <link>http://x/1</link>\
         <description>Launch</description>\
         <author>editor@example.com</author>\
         <category>Space</category>\
         <guid isPermaLink=\"true\">http://x/1</guid>\
         <pubDate>Mon, 3 Jun 2024 09:39:21 +0000</pubDate>\
         </item></channel></rss>"
    );
}

#[test]
fn test_entity_writers() {
    let mut writer = compact_writer();
    writer
        .write_link(&Link::new(url("http://x/")).titled("Home"))
        .unwrap();
    writer
        .write_category(&Category::new("Tech").in_scheme("urn:tax"))
        .unwrap();
    writer.write_person(&Person::new("me@x.org")).unwrap();
    writer
        .write_image(&Image::new(url("http://x/i.png"), "Logo", url("http://x/")))
        .unwrap();

    assert_eq!(
        finish(writer),
        "<rss version=\"2.0\"><channel>\
         <link url=\"http://x/\">Home</link>\
         <category domain=\"urn:tax\">Tech</category>\
         <author>me@x.org</author>\
         <image><url>http://x/i.png</url><title>Logo</title><link>http://x/</link></image>\
         </channel></rss>"
    );
}

#[test]
fn test_image_missing_url_fails() {
    let mut writer = compact_writer();
    let image = Image {
        title: Some("Logo".to_string()),
        link: Some(url("http://x/")),
        ..Image::default()
    };
    let err = writer.write_image(&image).unwrap_err();
    assert_eq!(err.to_string(), "Missing required url in <image>");
}

#[test]
fn test_empty_feed_is_complete_document() {
    let writer = FeedWriter::new(Vec::new());
    assert_eq!(
        finish(writer),
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel></channel></rss>"#
    );
}

#[test]
fn test_root_passthrough_namespace() {
    let mut writer = FeedWriter::with_config(
        Vec::new(),
        vec![Attribute::namespace_declaration(
            "content",
            "http://purl.org/rss/1.0/modules/content/",
        )],
        WriterConfig {
            indent: None,
            xml_declaration: false,
        },
    );
    let item = ItemBuilder::new()
        .title("T")
        .description("Short")
        .content("<p>Long</p>")
        .build()
        .unwrap();
    writer.write_item(&item).unwrap();

    assert_eq!(
        finish(writer),
        "<rss xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" version=\"2.0\"><channel>\
         <item><title>T</title><description>Short</description>\
         <content:encoded>&lt;p&gt;Long&lt;/p&gt;</content:encoded></item>\
         </channel></rss>"
    );
}

#[test]
fn test_write_content_and_raw() {
    let mut writer = compact_writer();
    let mut rating = Content::with_value("rating", "PG");
    rating.add_attribute(Attribute::new("scheme", "mpaa"));
    writer.write_content(&rating).unwrap();
    writer.write_raw("<docs>http://x/docs</docs>").unwrap();

    assert!(writer.write_raw("").unwrap_err().is_argument_error());
    assert!(writer.write_content(&Content::new("")).unwrap_err().is_argument_error());

    assert_eq!(
        finish(writer),
        r#"<rss version="2.0"><channel><rating scheme="mpaa">PG</rating><docs>http://x/docs</docs></channel></rss>"#
    );
}

#[test]
fn test_pretty_output() {
    let mut writer = FeedWriter::with_config(Vec::new(), Vec::new(), WriterConfig::pretty());
    writer.write_title("T").unwrap();
    let xml = finish(writer);
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n  <channel>\n    <title>T</title>\n  </channel>\n</rss>"
    );
}
