//! RSS 2.0 Reading Tests
//!
//! Mapping of items, links, categories, people and images from XML.

use rss_mapper::{
    ElementType, FeedError, FeedParser, FeedReader, LinkRelation, PersonRole, ReaderConfig,
    parse_rss,
};

fn read_single_item(xml_item: &str) -> rss_mapper::Result<rss_mapper::Item> {
    let xml = format!(r#"<rss version="2.0"><channel>{}</channel></rss>"#, xml_item);
    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read()?;
    reader.read_item()
}

#[test]
fn test_link_text_is_uri() {
    let parser = FeedParser::default();
    let content = parser
        .parse_content(r#"<link length="100" type="audio/mpeg">http://x/a.mp3</link>"#)
        .unwrap();
    let link = parser.parse_link(&content).unwrap();

    assert_eq!(link.uri.as_str(), "http://x/a.mp3");
    assert_eq!(link.relation, LinkRelation::Alternate);
    assert_eq!(link.length, 100);
    assert_eq!(link.media_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(link.title, None);
}

#[test]
fn test_empty_category_is_format_error() {
    let xml = r#"<rss version="2.0"><channel><category></category></channel></rss>"#;
    let mut reader = FeedReader::new(xml.as_bytes());
    reader.read().unwrap();
    assert_eq!(reader.element_type(), Some(ElementType::Category));

    let err = reader.read_category().unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(err, FeedError::MissingField { field: "name", .. }));
}

#[test]
fn test_unknown_prefixed_element_skipped() {
    let item = read_single_item(
        r#"<item xmlns:foo="urn:foo">
             <title>T</title>
             <foo:bar><foo:baz>nested</foo:baz></foo:bar>
             <description>D</description>
           </item>"#,
    )
    .unwrap();

    assert_eq!(item.title.as_deref(), Some("T"));
    assert_eq!(item.description.as_deref(), Some("D"));
    assert!(item.links.is_empty());
    assert!(item.contributors.is_empty());
    assert!(item.categories.is_empty());
    assert_eq!(item.content, None);
}

#[test]
fn test_undeclared_prefix_skipped() {
    let item = read_single_item("<item><title>T</title><foo:bar>x</foo:bar></item>").unwrap();
    assert_eq!(item.title.as_deref(), Some("T"));
    assert!(item.links.is_empty());
}

#[test]
fn test_full_item() {
    let item = read_single_item(
        r#"<item>
             <title>Venice Film Festival</title>
             <link>http://example.com/venice</link>
             <description>Some of the most heated chatter</description>
             <author>lawyer@boyer.net (Lawyer Boyer)</author>
             <category domain="http://www.fool.com/cusips">MSFT</category>
             <comments>http://example.com/venice/comments</comments>
             <enclosure url="http://example.com/venice.mp3" length="12216320" type="audio/mpeg"/>
             <guid isPermaLink="true">http://example.com/2002/09/01.html#a239</guid>
             <pubDate>Sun, 01 Sep 2002 17:51:48 GMT</pubDate>
             <source url="http://www.tomalak.org/links2.xml">Tomalak's Realm</source>
           </item>"#,
    )
    .unwrap();

    assert_eq!(item.title.as_deref(), Some("Venice Film Festival"));
    assert_eq!(item.id.as_deref(), Some("http://example.com/2002/09/01.html#a239"));
    assert_eq!(
        item.published.map(|d| d.to_rfc3339()),
        Some("2002-09-01T17:51:48+00:00".to_string())
    );

    let relations: Vec<_> = item.links.iter().map(|l| l.relation.clone()).collect();
    assert_eq!(
        relations,
        vec![
            LinkRelation::Alternate,
            LinkRelation::Comments,
            LinkRelation::Enclosure,
            LinkRelation::Source,
        ]
    );
    let source = &item.links[3];
    assert_eq!(source.uri.as_str(), "http://www.tomalak.org/links2.xml");
    assert_eq!(source.title.as_deref(), Some("Tomalak's Realm"));

    assert_eq!(item.contributors.len(), 1);
    assert_eq!(item.contributors[0].email, "lawyer@boyer.net (Lawyer Boyer)");
    assert_eq!(item.contributors[0].role, PersonRole::Author);
    assert_eq!(item.categories[0].name, "MSFT");
    assert_eq!(item.categories[0].scheme.as_deref(), Some("http://www.fool.com/cusips"));
}

#[test]
fn test_permalink_guid_promoted_to_alternate_link() {
    let item = read_single_item("<item><title>T</title><guid>http://x/p/1</guid></item>").unwrap();
    assert_eq!(item.id.as_deref(), Some("http://x/p/1"));
    assert_eq!(item.links.len(), 1);
    assert_eq!(item.links[0].relation, LinkRelation::Alternate);
    assert_eq!(item.links[0].uri.as_str(), "http://x/p/1");
    assert!(item.guid_link().is_none());
}

#[test]
fn test_non_uri_guid_not_promoted() {
    let item = read_single_item("<item><title>T</title><guid>tag-12345</guid></item>").unwrap();
    assert_eq!(item.id.as_deref(), Some("tag-12345"));
    assert!(item.links.is_empty());
}

#[test]
fn test_unparseable_pub_date_dropped() {
    let item =
        read_single_item("<item><title>T</title><pubDate>31/12/2024</pubDate></item>").unwrap();
    assert_eq!(item.published, None);
}

#[test]
fn test_enclosure_missing_length_is_error() {
    let err = read_single_item(
        r#"<item><title>T</title><enclosure url="http://x/a.mp3" type="audio/mpeg"/></item>"#,
    )
    .unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_item_without_title_or_description_reads() {
    // the title/description rule applies when writing
    let item = read_single_item("<item><guid>x</guid></item>").unwrap();
    assert_eq!(item.title, None);
    assert_eq!(item.description, None);
}

#[test]
fn test_description_as_content_option() {
    let xml = r#"<rss version="2.0"><channel><item><description>Body</description></item></channel></rss>"#;
    let mut reader = FeedReader::with_config(xml.as_bytes(), ReaderConfig::lenient());
    let item = reader.read_item().unwrap();
    assert_eq!(item.description, None);
    assert_eq!(item.content.as_deref(), Some("Body"));
}

#[test]
fn test_channel_people_and_image() {
    let channel = parse_rss(
        r#"<rss version="2.0"><channel>
             <title>T</title>
             <managingEditor>geo@herald.com (George Matesky)</managingEditor>
             <webMaster>betty@herald.com (Betty Guernsey)</webMaster>
             <image>
               <title>Herald</title>
               <url>http://herald.com/logo.gif</url>
               <link>http://herald.com/</link>
               <description>The Herald</description>
             </image>
           </channel></rss>"#,
    )
    .unwrap();

    let roles: Vec<_> = channel.people.iter().map(|p| p.role.clone()).collect();
    assert_eq!(roles, vec![PersonRole::ManagingEditor, PersonRole::WebMaster]);

    let image = channel.image.unwrap();
    assert_eq!(image.title.as_deref(), Some("Herald"));
    assert_eq!(image.url.unwrap().as_str(), "http://herald.com/logo.gif");
    assert_eq!(image.description.as_deref(), Some("The Herald"));
}

#[test]
fn test_entities_and_cdata() {
    let item = read_single_item(
        "<item><title>Fish &amp; Chips</title><description><![CDATA[<b>hot</b>]]></description></item>",
    )
    .unwrap();
    assert_eq!(item.title.as_deref(), Some("Fish & Chips"));
    assert_eq!(item.description.as_deref(), Some("<b>hot</b>"));
}
