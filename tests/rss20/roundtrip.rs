//! RSS 2.0 Round-trip Tests
//!
//! Items written by FeedWriter and read back by FeedReader keep their
//! title, description, id, publication date and links.

use chrono::{TimeZone, Utc};
use rss_mapper::{
    Category, Channel, Cloud, FeedReader, FeedWriter, Image, Item, ItemBuilder, Link,
    LinkRelation, Person, PersonRole, ReaderConfig, WriterConfig, parse_rss,
};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn roundtrip(item: &Item, config: ReaderConfig) -> Item {
    let mut writer = FeedWriter::with_config(Vec::new(), Vec::new(), WriterConfig::pretty());
    writer.write_item(item).unwrap();
    let bytes = writer.finish().unwrap();

    let mut reader = FeedReader::with_config(bytes.as_slice(), config);
    let read = reader.read_item().unwrap();
    assert!(reader.is_exhausted());
    read
}

fn explicit_links(item: &Item) -> Vec<Link> {
    item.links
        .iter()
        .filter(|l| l.relation != LinkRelation::Guid)
        .cloned()
        .collect()
}

#[test]
fn test_item_roundtrip() {
    let item = ItemBuilder::new()
        .title("Star City")
        .description("How do Americans get ready to work with Russians aboard the ISS?")
        .id("http://liftoff.msfc.nasa.gov/2003/06/03.html#item573")
        .published(Utc.with_ymd_and_hms(2003, 6, 3, 9, 39, 21).unwrap())
        .link(url("http://liftoff.msfc.nasa.gov/news/2003/news-starcity.asp"))
        .comments(url("http://liftoff.msfc.nasa.gov/news/2003/news-starcity.asp#c"))
        .enclosure(url("http://liftoff.msfc.nasa.gov/starcity.mp3"), 24986239, "audio/mpeg")
        .add_link(Link::with_relation(url("http://other.example/rss"), LinkRelation::Source).titled("Other"))
        .author("nasa@example.gov")
        .category(Category::new("Space").in_scheme("urn:topics"))
        .build()
        .unwrap();

    let read = roundtrip(&item, ReaderConfig::default());
    assert_eq!(read.title, item.title);
    assert_eq!(read.description, item.description);
    assert_eq!(read.id, item.id);
    assert_eq!(read.published, item.published);
    assert_eq!(read.links, item.links);
    assert_eq!(read.contributors, item.contributors);
    assert_eq!(read.categories, item.categories);
    assert_eq!(read, item);
}

#[test]
fn test_permalink_roundtrip() {
    let item = ItemBuilder::new()
        .title("T")
        .link(url("http://x/post"))
        .permalink(url("http://x/p/1"))
        .build()
        .unwrap();
    assert!(item.guid_link().is_some());

    let read = roundtrip(&item, ReaderConfig::default());
    assert_eq!(read.id, item.id);
    // folded into the id, not read back as a guid link
    assert!(read.guid_link().is_none());
    assert_eq!(read.links, explicit_links(&item));
}

#[test]
fn test_permalink_only_resolves_as_alternate() {
    let item = ItemBuilder::new()
        .title("T")
        .permalink(url("http://x/p/1"))
        .build()
        .unwrap();

    let read = roundtrip(&item, ReaderConfig::default());
    assert_eq!(read.id.as_deref(), Some("http://x/p/1"));
    assert!(read.guid_link().is_none());
    assert_eq!(read.alternate_link().map(|l| l.uri.as_str()), Some("http://x/p/1"));
}

#[test]
fn test_non_permalink_id_roundtrip() {
    let item = ItemBuilder::new()
        .description("Only a description")
        .id("http://x/not-a-permalink")
        .build()
        .unwrap();

    let read = roundtrip(&item, ReaderConfig::default());
    assert_eq!(read, item);
    assert!(read.links.is_empty());
}

#[test]
fn test_enclosure_roundtrip() {
    let item = ItemBuilder::new()
        .title("Episode")
        .enclosure(url("http://x/ep.ogg"), 1, "audio/ogg")
        .build()
        .unwrap();

    let read = roundtrip(&item, ReaderConfig::default());
    let enclosure = read.enclosures().next().unwrap();
    assert_eq!(enclosure.length, 1);
    assert_eq!(enclosure.media_type.as_deref(), Some("audio/ogg"));
}

#[test]
fn test_link_with_title_and_type_roundtrip() {
    let mut link = Link::new(url("http://x/video")).titled("Watch");
    link.length = 2048;
    link.media_type = Some("video/mp4".to_string());
    let item = ItemBuilder::new().title("T").add_link(link).build().unwrap();

    let read = roundtrip(&item, ReaderConfig::default());
    assert_eq!(read.links, item.links);
}

#[test]
fn test_content_roundtrip() {
    let item = ItemBuilder::new()
        .title("T")
        .description("Summary")
        .content("<p>Full & complete</p>")
        .build()
        .unwrap();
    assert_eq!(roundtrip(&item, ReaderConfig::default()), item);

    let item = ItemBuilder::new()
        .title("T")
        .content("<p>Body</p>")
        .build()
        .unwrap();
    assert_eq!(roundtrip(&item, ReaderConfig::default()), item);
}

#[test]
fn test_untitled_content_carried_in_description() {
    let item = Item {
        content: Some("<p>Body</p>".to_string()),
        ..Item::default()
    };
    let read = roundtrip(&item, ReaderConfig::lenient());
    assert_eq!(read.content, item.content);
    assert_eq!(read.description, None);
}

#[test]
fn test_padded_text_roundtrip() {
    let item = ItemBuilder::new()
        .title("  Spaced  ")
        .description("\n  Indented body\n")
        .build()
        .unwrap();
    assert_eq!(roundtrip(&item, ReaderConfig::default()), item);

    let read = roundtrip(&item, ReaderConfig::lenient());
    assert_eq!(read.title.as_deref(), Some("Spaced"));
}

#[test]
fn test_sub_second_published_roundtrip() {
    let published = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let item = ItemBuilder::new()
        .title("T")
        .published(published)
        .build()
        .unwrap();
    assert_eq!(item.published, Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
    assert_eq!(roundtrip(&item, ReaderConfig::default()), item);
}

#[test]
fn test_read_permalink_guid_written_back_as_permalink() {
    let xml = r#"<rss version="2.0"><channel><item><title>T</title><guid>http://x/1</guid></item></channel></rss>"#;
    let item = FeedReader::new(xml.as_bytes()).read_item().unwrap();

    let mut writer = FeedWriter::with_config(Vec::new(), Vec::new(), WriterConfig::default());
    writer.write_item(&item).unwrap();
    let out = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert!(out.contains(r#"<guid isPermaLink="true">http://x/1</guid>"#), "{}", out);

    let reread = FeedReader::new(out.as_bytes()).read_item().unwrap();
    assert_eq!(reread, item);
}

#[test]
fn test_channel_roundtrip() {
    let channel = Channel {
        title: Some("Liftoff News".to_string()),
        link: Some(url("http://liftoff.msfc.nasa.gov/")),
        description: Some("Liftoff to Space Exploration.".to_string()),
        language: Some("en-us".to_string()),
        copyright: Some("Copyright 2003".to_string()),
        people: vec![
            Person::with_role("editor@example.com", PersonRole::ManagingEditor),
            Person::with_role("webmaster@example.com", PersonRole::WebMaster),
        ],
        pub_date: Some(Utc.with_ymd_and_hms(2003, 6, 10, 4, 0, 0).unwrap()),
        last_build_date: Some(Utc.with_ymd_and_hms(2003, 6, 10, 9, 41, 1).unwrap()),
        categories: vec![Category::new("Science")],
        generator: Some("Weblog Editor 2.0".to_string()),
        docs: Some(url("http://blogs.law.harvard.edu/tech/rss")),
        cloud: Some(Cloud {
            domain: "rpc.sys.com".to_string(),
            port: 80,
            path: "/RPC2".to_string(),
            register_procedure: "pingMe".to_string(),
            protocol: "soap".to_string(),
        }),
        ttl: Some(60),
        image: Some(Image {
            description: Some("Liftoff".to_string()),
            ..Image::new(
                url("http://liftoff.msfc.nasa.gov/logo.png"),
                "Liftoff News",
                url("http://liftoff.msfc.nasa.gov/"),
            )
        }),
        skip_hours: vec![0, 1, 2],
        skip_days: vec![chrono::Weekday::Sat, chrono::Weekday::Sun],
        items: vec![
            ItemBuilder::new().title("First").build().unwrap(),
            ItemBuilder::new().description("Second").build().unwrap(),
        ],
        extensions: Vec::new(),
    };
    channel.validate().unwrap();

    let xml = channel.to_xml().unwrap();
    assert_eq!(parse_rss(&xml).unwrap(), channel);
}
