use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;
use crate::view::list_renderer::post_link;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>SecureSector</title>
  <link>https://securesector.io</link>
  <description>Security insights for healthcare, finance, real estate and supply chain</description>
  <item>
    <title>Zero Trust Architecture in Healthcare: Protecting Patient Data</title>
    <link>https://securesector.io/post/zero-trust-architecture-in-healthcare-protecting-patient-data/</link>
    <description>How implementing zero trust architecture can safeguard sensitive patient information</description>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub title: &'a str,
    pub site_url: &'a str,
    pub description: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        // <channel>
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.title)?;
        push_text(&mut writer, "link", self.site_url)?;
        push_text(&mut writer, "description", self.description)?;

        for post in posts {
            // <item>
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &post.title)?;

            // <link>https://securesector.io/post/some-slug/</link>
            let link = item_link(self.site_url, post);
            push_text(&mut writer, "link", link.as_str())?;

            // Readers key deduplication off the guid, so it stays the post id
            // even when the slug changes after an edit.
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "false"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&post.id)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", &post.excerpt)?;

            // <pubDate>Fri, 28 Mar 2025 05:06:07 +0000</pubDate>
            push_text(&mut writer, "pubDate", &post.created_at.to_rfc2822())?;

            // </item>
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        // </channel>
        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        // </rss>
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn item_link(base_url: &str, post: &Post) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{}{}", base_url, post_link(post))
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::post::{Author, ContentType, Sector};

    use super::*;

    fn feed_post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Briefing {}", id),
            slug: format!("briefing-{}", id),
            excerpt: format!("Summary of briefing {}", id),
            content: "Full text.".to_string(),
            sector: Sector::Finance,
            content_type: ContentType::Insight,
            author: Author {
                name: "Marcus Johnson".to_string(),
                avatar: "/placeholder.svg".to_string(),
            },
            published_date: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
            read_time: 10,
            image_url: "/placeholder.svg".to_string(),
            featured: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, 28, 5, 6, 7).unwrap(),
        }
    }

    #[test]
    fn test_render_xml() {
        let posts = vec![feed_post("1"), feed_post("2")];

        let rss = RssChannel {
            title: "SecureSector briefings",
            site_url: "https://securesector.io",
            description: "Sector security insights",
        };
        let xml = rss.render(&posts).unwrap();
        println!("XML: {}", str::from_utf8(&xml).unwrap());
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>SecureSector briefings</title><link>https://securesector.io</link><description>Sector security insights</description><item><title>Briefing 1</title><link>https://securesector.io/post/briefing-1/</link><guid isPermaLink="false">1</guid><description><![CDATA[Summary of briefing 1]]></description><pubDate>Fri, 28 Mar 2025 05:06:07 +0000</pubDate></item><item><title>Briefing 2</title><link>https://securesector.io/post/briefing-2/</link><guid isPermaLink="false">2</guid><description><![CDATA[Summary of briefing 2]]></description><pubDate>Fri, 28 Mar 2025 05:06:07 +0000</pubDate></item></channel></rss>"##;

    #[test]
    fn test_item_link_normalizes_base_url() {
        let post = feed_post("9");
        assert_eq!(
            item_link("https://securesector.io/", &post),
            "https://securesector.io/post/briefing-9/"
        );
        assert_eq!(
            item_link("https://securesector.io", &post),
            "https://securesector.io/post/briefing-9/"
        );
    }

    #[test]
    fn test_cdata_terminator_in_excerpt() {
        let mut post = feed_post("3");
        post.excerpt = "before ]]> after".to_string();

        let rss = RssChannel {
            title: "t",
            site_url: "https://securesector.io",
            description: "d",
        };
        let xml = rss.render(&[post]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<![CDATA[before ]] > after]]></description>"));
    }
}
