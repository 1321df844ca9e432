//! RSS parsing and text extraction
//!
//! Substack feeds are RSS 2.0 with HTML bodies carried in `description`
//! and `content:encoded`. Parsing walks the XML event stream; the HTML
//! fragments are reduced to paragraph-broken plain text for the reader.

use crate::types::{Channel, Post};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Fields collected while inside an `<item>` element
#[derive(Debug, Default)]
struct ItemFields {
    title: String,
    link: String,
    creator: String,
    pub_date: String,
    description: String,
    encoded: String,
}

impl ItemFields {
    fn into_post(self) -> Post {
        // Prefer the full body over the summary when both are present
        let html = if self.encoded.trim().len() >= self.description.trim().len() {
            self.encoded
        } else {
            self.description
        };

        let content = html_to_text(&html);
        let title = self.title.trim();
        let creator = self.creator.trim();

        Post {
            title: if title.is_empty() {
                String::from("Untitled Post")
            } else {
                title.to_string()
            },
            link: self.link.trim().to_string(),
            author: if creator.is_empty() {
                None
            } else {
                Some(creator.to_string())
            },
            date: parse_date(&self.pub_date),
            content: if content.is_empty() {
                String::from("No content available.")
            } else {
                content
            },
        }
    }
}

/// Parse an RSS document into a channel with posts
///
/// A well-formed feed with no items yields an empty channel; malformed XML
/// is an error.
pub fn parse_feed(xml: &str) -> Result<Channel> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<String> = Vec::new();
    let mut channel_title = String::new();
    let mut posts = Vec::new();
    let mut item: Option<ItemFields> = None;

    loop {
        match reader.read_event().context("Failed to parse feed XML")? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
                if name == "item" {
                    item = Some(ItemFields::default());
                }
                stack.push(name);
            }
            Event::End(_) => {
                if stack.pop().as_deref() == Some("item") {
                    if let Some(fields) = item.take() {
                        posts.push(fields.into_post());
                    }
                }
            }
            Event::Text(text) => {
                // Tolerate undeclared entities the way a recovering parser would
                let text = text
                    .unescape()
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref()).into_owned());
                collect(&stack, &text, &mut channel_title, &mut item);
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                collect(&stack, &text, &mut channel_title, &mut item);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let title = channel_title.trim();
    Ok(Channel {
        title: if title.is_empty() {
            String::from("Feed")
        } else {
            title.to_string()
        },
        posts,
    })
}

/// Route a text chunk to the field the element path points at
fn collect(stack: &[String], text: &str, channel_title: &mut String, item: &mut Option<ItemFields>) {
    if tail_is(stack, &["channel", "title"]) {
        channel_title.push_str(text);
        return;
    }

    let Some(fields) = item.as_mut() else {
        return;
    };

    if tail_is(stack, &["item", "title"]) {
        fields.title.push_str(text);
    } else if tail_is(stack, &["item", "link"]) {
        fields.link.push_str(text);
    } else if tail_is(stack, &["item", "dc:creator"]) {
        fields.creator.push_str(text);
    } else if tail_is(stack, &["item", "pubDate"]) {
        fields.pub_date.push_str(text);
    } else if tail_is(stack, &["item", "description"]) {
        fields.description.push_str(text);
    } else if tail_is(stack, &["item", "content:encoded"]) {
        fields.encoded.push_str(text);
    }
}

fn tail_is(stack: &[String], suffix: &[&str]) -> bool {
    stack.len() >= suffix.len()
        && stack[stack.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(have, want)| have == want)
}

/// Parse an RFC 2822 feed date into local time
fn parse_date(raw: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Local))
}

/// Reduce an HTML fragment to plain text
///
/// Script and style elements are dropped with their content, block-level
/// closing tags become line breaks, all other tags are stripped, entities
/// are decoded, and the result is collapsed to non-empty trimmed lines
/// separated by blank lines.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        push_decoded(&mut out, &rest[..lt]);
        let after = &rest[lt..];

        let Some(gt) = after.find('>') else {
            // Unterminated tag: drop the remainder
            rest = "";
            break;
        };
        let name = tag_name(&after[1..gt]);
        rest = &after[gt + 1..];

        match name.as_str() {
            "script" | "style" => {
                // Drop embedded content up to the matching close tag
                rest = match find_close(rest, &name) {
                    Some(end) => &rest[end..],
                    None => "",
                };
            }
            "br" | "hr" => out.push('\n'),
            "/p" | "/div" | "/h1" | "/h2" | "/h3" | "/h4" | "/h5" | "/h6" | "/li"
            | "/blockquote" | "/figcaption" | "/tr" | "/ul" | "/ol" => out.push('\n'),
            _ => {}
        }
    }
    push_decoded(&mut out, rest);

    let lines: Vec<&str> = out
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n\n")
}

/// First token of a tag, lowercased, with any self-closing slash removed
fn tag_name(tag: &str) -> String {
    let mut name: String = tag
        .trim()
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if name.len() > 1 && name.ends_with('/') {
        name.pop();
    }
    name
}

/// Byte offset just past `</name ...>`, if present
fn find_close(rest: &str, name: &str) -> Option<usize> {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    lower.find(&needle).map(|pos| match rest[pos..].find('>') {
        Some(gt) => pos + gt + 1,
        None => rest.len(),
    })
}

/// Append text with character entities decoded
fn push_decoded(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match rest.find(';') {
            Some(semi) if semi > 1 && semi <= 12 => match decode_entity(&rest[1..semi]) {
                Some(decoded) => {
                    out.push_str(&decoded);
                    rest = &rest[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

fn decode_entity(entity: &str) -> Option<String> {
    match entity {
        "amp" => Some(String::from("&")),
        "lt" => Some(String::from("<")),
        "gt" => Some(String::from(">")),
        "quot" => Some(String::from("\"")),
        "apos" | "#39" => Some(String::from("'")),
        "nbsp" => Some(String::from(" ")),
        _ => {
            let code = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))?;
            char::from_u32(code).map(|c| c.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
<title>Example Letters</title>
<link>https://example.substack.com</link>
<image><title>Example Letters logo</title></image>
<item>
<title>First post &amp; thoughts</title>
<link>https://example.substack.com/p/first</link>
<dc:creator>Jane Writer</dc:creator>
<pubDate>Fri, 03 May 2024 14:30:00 GMT</pubDate>
<description>Short summary</description>
<content:encoded><![CDATA[<p>Hello <b>world</b>.</p><script>alert(1)</script><p>Second &amp; final paragraph.</p>]]></content:encoded>
</item>
<item>
<title></title>
<link>https://example.substack.com/p/second</link>
</item>
<item>
<title>Summary only</title>
<description>Only &lt;em&gt;summary&lt;/em&gt; here</description>
</item>
</channel>
</rss>"#;

    #[test]
    fn test_channel_title_ignores_image_title() {
        let channel = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(channel.title, "Example Letters");
    }

    #[test]
    fn test_items_parsed() {
        let channel = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(channel.posts.len(), 3);

        let first = &channel.posts[0];
        assert_eq!(first.title, "First post & thoughts");
        assert_eq!(first.link, "https://example.substack.com/p/first");
        assert_eq!(first.author.as_deref(), Some("Jane Writer"));
        assert!(first.date.is_some());
        assert_eq!(
            first.content,
            "Hello world.\n\nSecond & final paragraph."
        );
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let channel = parse_feed(SAMPLE_FEED).unwrap();

        let second = &channel.posts[1];
        assert_eq!(second.title, "Untitled Post");
        assert_eq!(second.content, "No content available.");
        assert!(second.author.is_none());
        assert!(second.date.is_none());
    }

    #[test]
    fn test_escaped_description_used_without_encoded() {
        let channel = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(channel.posts[2].content, "Only summary here");
    }

    #[test]
    fn test_empty_feed_has_no_posts() {
        let channel = parse_feed("<rss><channel><title>T</title></channel></rss>").unwrap();
        assert_eq!(channel.title, "T");
        assert!(channel.posts.is_empty());
    }

    #[test]
    fn test_missing_channel_title_defaults() {
        let channel =
            parse_feed("<rss><channel><item><title>x</title></item></channel></rss>").unwrap();
        assert_eq!(channel.title, "Feed");
    }

    #[test]
    fn test_malformed_xml_is_error() {
        assert!(parse_feed("<rss><channel></item></rss>").is_err());
    }

    #[test]
    fn test_html_to_text_strips_script_and_style() {
        let text = html_to_text(
            "<style>p { color: red }</style><p>Kept</p><script type=\"text/javascript\">var x = 1;</script>",
        );
        assert_eq!(text, "Kept");
    }

    #[test]
    fn test_html_to_text_breaks_paragraphs() {
        assert_eq!(html_to_text("<p>one</p><p>two</p>"), "one\n\ntwo");
        assert_eq!(html_to_text("a<br>b"), "a\n\nb");
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        assert_eq!(html_to_text("it&#8217;s &#x27;fine&#x27; &amp; good"), "it’s 'fine' & good");
        assert_eq!(html_to_text("a &unknown; b"), "a &unknown; b");
    }

    #[test]
    fn test_html_to_text_drops_unterminated_tag() {
        assert_eq!(html_to_text("Hello <b"), "Hello");
    }
}
