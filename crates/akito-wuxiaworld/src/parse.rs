//! HTML extraction for search, novel and chapter pages

use std::sync::LazyLock;

use akito_core::{Chapter, NovelBasic, NovelInfo};
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::SourceError;

/// Injected advertisement line inside chapter bodies
const AD_PREFIX: &str = "Please go tohttps";

/// Novel language; the site only hosts Chinese novels
pub const LANGUAGE: &str = "Chinese";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

static SEARCH_RESULT: LazyLock<Selector> = LazyLock::new(|| selector(".list-item .item-info"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static AUTHOR: LazyLock<Selector> = LazyLock::new(|| selector(".name"));
static STATUS: LazyLock<Selector> = LazyLock::new(|| selector(".book-state .txt"));
static CHAPTER_ITEM: LazyLock<Selector> = LazyLock::new(|| selector(".chapter-item"));
static CHAPTER_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".chapter-title"));
static CHAPTER_BODY: LazyLock<Selector> = LazyLock::new(|| selector(".chapter-entity"));

/// Resolve a site-relative `href` against `base_url`.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first<'a>(
    doc: &'a Html,
    sel: &Selector,
    what: &'static str,
) -> Result<ElementRef<'a>, SourceError> {
    doc.select(sel)
        .next()
        .ok_or(SourceError::MissingElement { what })
}

/// Results on one search page. An empty vec means past the last page.
pub fn parse_search_page(html: &str, base_url: &str) -> Result<Vec<NovelBasic>, SourceError> {
    let doc = Html::parse_document(html);
    doc.select(&SEARCH_RESULT)
        .map(|result| {
            let link = result
                .select(&LINK)
                .next()
                .ok_or(SourceError::MissingElement {
                    what: "search result link",
                })?;
            let href = link
                .value()
                .attr("href")
                .ok_or(SourceError::MissingElement {
                    what: "novel URL",
                })?;
            Ok(NovelBasic::new(text_of(link), absolute_url(base_url, href)))
        })
        .collect()
}

/// Novel synopsis page: author, status and the ordered chapter list.
pub fn parse_novel_page(
    html: &str,
    basic: NovelBasic,
    base_url: &str,
) -> Result<NovelInfo, SourceError> {
    let doc = Html::parse_document(html);

    let author = text_of(first(&doc, &AUTHOR, "novel author")?);
    let status = text_of(first(&doc, &STATUS, "novel status")?);

    let chapter_urls = doc
        .select(&CHAPTER_ITEM)
        .map(|item| {
            item.value()
                .attr("href")
                .map(|href| absolute_url(base_url, href))
                .ok_or(SourceError::MissingElement {
                    what: "chapter URL",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if chapter_urls.is_empty() {
        return Err(SourceError::MissingElement {
            what: "chapter list",
        });
    }

    Ok(NovelInfo {
        basic,
        author,
        status,
        language: LANGUAGE.to_string(),
        chapter_urls,
    })
}

/// Chapter page: title plus body text with one line per paragraph.
pub fn parse_chapter_page(html: &str) -> Result<Chapter, SourceError> {
    let doc = Html::parse_document(html);
    let title = text_of(first(&doc, &CHAPTER_TITLE, "chapter title")?);
    let body = first(&doc, &CHAPTER_BODY, "chapter content")?;
    Ok(Chapter {
        title,
        content: chapter_text(body),
    })
}

/// Flatten the chapter body: `<br>` separates lines, scripts and ads are dropped,
/// and runs of breaks collapse to a single newline.
fn chapter_text(body: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut at_break = true;

    for child in body.children() {
        match child.value() {
            Node::Element(el) if el.name() == "br" => {
                if !at_break {
                    out.push('\n');
                    at_break = true;
                }
            }
            Node::Element(el) if el.name() == "script" => {}
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    push_line(&mut out, &el.text().collect::<String>(), &mut at_break);
                }
            }
            Node::Text(text) => push_line(&mut out, text, &mut at_break),
            _ => {}
        }
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_line(out: &mut String, raw: &str, at_break: &mut bool) {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(AD_PREFIX) {
        return;
    }
    out.push_str(line);
    *at_break = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.wuxiaworld.co";

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <ul class="result-list">
            <li class="list-item"><div class="item-info">
              <a href="/Coiling-Dragon/">Coiling Dragon</a><span>I Eat Tomatoes</span>
            </div></li>
            <li class="list-item"><div class="item-info">
              <a href="/Coiling-Dragon-Remake/">Coiling Dragon (Remake)</a>
            </div></li>
          </ul>
        </body></html>
    "#;

    const NOVEL_PAGE: &str = r#"
        <html><body>
          <div class="book-info">
            <span class="name">I Eat Tomatoes</span>
            <div class="book-state"><span class="txt">Completed</span></div>
          </div>
          <ul class="chapter-list">
            <a class="chapter-item" href="/Coiling-Dragon/1.html">Chapter 1</a>
            <a class="chapter-item" href="/Coiling-Dragon/2.html">Chapter 2</a>
            <a class="chapter-item" href="https://cdn.example.com/3.html">Chapter 3</a>
          </ul>
        </body></html>
    "#;

    const CHAPTER_PAGE: &str = r#"
        <html><body>
          <h1 class="chapter-title"> Book 1, Chapter 1 - The Baruch Clan </h1>
          <div class="chapter-entity">
            First paragraph.<br><br>
            <script>window.ads = 1;</script>
            Second paragraph.<br>
            Please go tohttps://www.wuxiaworld.co to read the latest chapters<br>
            <p>Third <em>paragraph</em>.</p><br>
          </div>
        </body></html>
    "#;

    #[test]
    fn absolute_url_joins() {
        assert_eq!(absolute_url(BASE, "/a/1.html"), "https://www.wuxiaworld.co/a/1.html");
        assert_eq!(absolute_url("https://x.com/", "b"), "https://x.com/b");
        assert_eq!(absolute_url(BASE, "https://y.com/c"), "https://y.com/c");
    }

    #[test]
    fn search_results() {
        let results = parse_search_page(SEARCH_PAGE, BASE).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Coiling Dragon");
        assert_eq!(results[0].name_trim, "coilingdragon");
        assert_eq!(results[0].novel_url, "https://www.wuxiaworld.co/Coiling-Dragon/");
        assert_eq!(results[1].name_trim, "coilingdragonremake");
    }

    #[test]
    fn search_past_last_page_is_empty() {
        let results = parse_search_page("<html><body><p>No results</p></body></html>", BASE);
        assert!(results.unwrap().is_empty());
    }

    #[test]
    fn search_result_without_href_fails() {
        let html = r#"<div class="list-item"><div class="item-info"><a>Nameless</a></div></div>"#;
        let err = parse_search_page(html, BASE).unwrap_err();
        assert!(matches!(err, SourceError::MissingElement { what: "novel URL" }));
    }

    #[test]
    fn novel_info() {
        let basic = NovelBasic::new("Coiling Dragon", "https://www.wuxiaworld.co/Coiling-Dragon/");
        let info = parse_novel_page(NOVEL_PAGE, basic.clone(), BASE).unwrap();
        assert_eq!(info.basic, basic);
        assert_eq!(info.author, "I Eat Tomatoes");
        assert_eq!(info.status, "Completed");
        assert_eq!(info.language, "Chinese");
        assert_eq!(
            info.chapter_urls,
            [
                "https://www.wuxiaworld.co/Coiling-Dragon/1.html",
                "https://www.wuxiaworld.co/Coiling-Dragon/2.html",
                "https://cdn.example.com/3.html",
            ]
        );
    }

    #[test]
    fn novel_info_requires_author() {
        let html = r#"<div class="book-state"><span class="txt">Ongoing</span></div>"#;
        let err = parse_novel_page(html, NovelBasic::from_url("u"), BASE).unwrap_err();
        assert!(matches!(err, SourceError::MissingElement { what: "novel author" }));
    }

    #[test]
    fn novel_info_requires_chapters() {
        let html = r#"
            <span class="name">Someone</span>
            <div class="book-state"><span class="txt">Ongoing</span></div>
        "#;
        let err = parse_novel_page(html, NovelBasic::from_url("u"), BASE).unwrap_err();
        assert!(matches!(err, SourceError::MissingElement { what: "chapter list" }));
    }

    #[test]
    fn chapter_title_and_content() {
        let chapter = parse_chapter_page(CHAPTER_PAGE).unwrap();
        assert_eq!(chapter.title, "Book 1, Chapter 1 - The Baruch Clan");
        assert_eq!(
            chapter.content,
            "First paragraph.\nSecond paragraph.\nThird paragraph."
        );
    }

    #[test]
    fn chapter_without_title_fails() {
        let html = r#"<div class="chapter-entity">Body</div>"#;
        let err = parse_chapter_page(html).unwrap_err();
        assert!(matches!(err, SourceError::MissingElement { what: "chapter title" }));
    }

    #[test]
    fn chapter_without_body_fails() {
        let html = r#"<h1 class="chapter-title">Title</h1>"#;
        let err = parse_chapter_page(html).unwrap_err();
        assert!(matches!(err, SourceError::MissingElement { what: "chapter content" }));
    }
}
