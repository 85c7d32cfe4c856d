use crate::browser::{BrowserError, BrowserResult};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// Snapshot of a DOM element
///
/// Holds everything the crawler reads from an element: its attributes as a
/// key/value map, its outer markup, and its text. Nested queries re-parse the
/// stored markup, so an `Element` stays usable after the page moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: HashMap<String, String>,
    html: String,
    text: String,
    text_all: String,
}

impl Element {
    pub(crate) fn from_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            tag: value.name().to_string(),
            attributes: value
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            html: element.html(),
            text: element
                .children()
                .filter_map(|node| node.value().as_text())
                .map(|text| &**text)
                .collect(),
            text_all: element.text().collect::<Vec<_>>().join(" "),
        }
    }

    /// Parses a markup fragment and returns its first element
    ///
    /// ```
    /// use directory_scout::browser::Element;
    ///
    /// let row = Element::from_html(r#"<div class="provider-row">Acme</div>"#).unwrap();
    /// assert_eq!(row.attribute("class"), Some("provider-row"));
    /// ```
    pub fn from_html(html: &str) -> Option<Self> {
        let tag = leading_tag(html)?;
        with_reparsed(&tag, html, Self::from_ref)
    }

    /// Lower-case tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the attribute `name`, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Outer markup of the element
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Text of the element's own text nodes, descendants excluded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of every descendant text node, joined by single spaces
    pub fn text_all(&self) -> &str {
        &self.text_all
    }

    /// First descendant matching `selector`
    pub fn query(&self, selector: &str) -> BrowserResult<Option<Element>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Every descendant matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> BrowserResult<Vec<Element>> {
        let parsed = parse_selector(selector)?;
        Ok(with_reparsed(&self.tag, &self.html, |scope| {
            scope
                .select(&parsed)
                .filter(|found| found.id() != scope.id())
                .map(Element::from_ref)
                .collect()
        })
        .unwrap_or_default())
    }

    /// Direct element children, in document order
    pub fn children(&self) -> Vec<Element> {
        with_reparsed(&self.tag, &self.html, |scope| {
            scope
                .children()
                .filter_map(ElementRef::wrap)
                .map(Self::from_ref)
                .collect()
        })
        .unwrap_or_default()
    }
}

/// Markup placed around a fragment so the HTML parser keeps `tag`
///
/// Table parts outside a table are dropped by the parser, so they are
/// re-parsed inside the table structure they came from.
fn parsing_context(tag: &str) -> (&'static str, &'static str) {
    match tag {
        "tr" => ("<table><tbody>", "</tbody></table>"),
        "td" | "th" => ("<table><tbody><tr>", "</tr></tbody></table>"),
        "thead" | "tbody" | "tfoot" | "caption" | "colgroup" => ("<table>", "</table>"),
        "col" => ("<table><colgroup>", "</colgroup></table>"),
        _ => ("", ""),
    }
}

/// Re-parses an element's outer markup and hands the rebuilt element to `f`
fn with_reparsed<T>(tag: &str, html: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> Option<T> {
    let (open, close) = parsing_context(tag);
    let fragment = Html::parse_fragment(&format!("{open}{html}{close}"));
    let scope = fragment
        .root_element()
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == tag)?;
    Some(f(scope))
}

/// Lower-case name of the first start tag in `html`
fn leading_tag(html: &str) -> Option<String> {
    let rest = &html[html.find('<')?..][1..];
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}

fn parse_selector(selector: &str) -> BrowserResult<Selector> {
    Selector::parse(selector).map_err(|e| BrowserError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Runs `selector` over a whole document and snapshots the matches
pub(crate) fn select_in(html: &str, selector: &str) -> BrowserResult<Vec<Element>> {
    let parsed = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document.select(&parsed).map(Element::from_ref).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"<div class="provider-row" data-id="7">
        <h3>Acme <span>Studio</span></h3>
        <a class="directory_profile" href="/profile/acme">Profile</a>
    </div>"#;

    #[test]
    fn test_from_html_reads_attributes() {
        let row = Element::from_html(ROW).unwrap();
        assert_eq!(row.tag(), "div");
        assert_eq!(row.attribute("class"), Some("provider-row"));
        assert_eq!(row.attribute("data-id"), Some("7"));
        assert_eq!(row.attribute("href"), None);
    }

    #[test]
    fn test_text_and_text_all() {
        let heading = Element::from_html("<h3>Acme <span>Studio</span></h3>").unwrap();
        assert_eq!(heading.text(), "Acme ");
        assert!(heading.text_all().contains("Acme"));
        assert!(heading.text_all().contains("Studio"));
    }

    #[test]
    fn test_nested_query() {
        let row = Element::from_html(ROW).unwrap();
        let link = row.query("a.directory_profile").unwrap().unwrap();
        assert_eq!(link.attribute("href"), Some("/profile/acme"));
        assert!(row.query("a.missing").unwrap().is_none());
    }

    #[test]
    fn test_query_excludes_self() {
        let row = Element::from_html(ROW).unwrap();
        assert!(row.query_all("div").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let row = Element::from_html(ROW).unwrap();
        assert!(matches!(
            row.query("a["),
            Err(BrowserError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_children_are_direct_only() {
        let list = Element::from_html(
            "<ul><li>Kyiv, Ukraine<ul><li>nested</li></ul></li><li>Lviv, Ukraine</li></ul>",
        )
        .unwrap();
        let children = list.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|child| child.tag() == "li"));
        assert_eq!(children[1].text(), "Lviv, Ukraine");
    }

    #[test]
    fn test_select_in_document() {
        let html = "<html><head><title>Acme Reviews</title></head><body><p>a</p><p>b</p></body></html>";
        let titles = select_in(html, "head > title").unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text(), "Acme Reviews");
        assert_eq!(select_in(html, "p").unwrap().len(), 2);
    }

    #[test]
    fn test_table_row_keeps_its_cells() {
        let html = r#"<html><body><table><tr class="provider-row">
            <td><a class="directory_profile" href="/profile/tabular">Tabular</a></td>
            <td>Kyiv</td>
        </tr></table></body></html>"#;
        let rows = select_in(html, ".provider-row").unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.tag(), "tr");
        let link = row.query("a.directory_profile").unwrap().unwrap();
        assert_eq!(link.attribute("href"), Some("/profile/tabular"));
        assert_eq!(row.children().len(), 2);
        assert!(row.children().iter().all(|cell| cell.tag() == "td"));
    }

    #[test]
    fn test_from_html_table_parts() {
        let cell = Element::from_html(r#"<td class="rate"><span>$25/hr</span></td>"#).unwrap();
        assert_eq!(cell.tag(), "td");
        assert_eq!(cell.query("span").unwrap().unwrap().text(), "$25/hr");

        let row = Element::from_html("<tr><td>a</td><td>b</td></tr>").unwrap();
        assert_eq!(row.children().len(), 2);
    }

    #[test]
    fn test_nested_same_tag_scope() {
        let outer = Element::from_html(r#"<div class="outer"><div class="inner">x</div></div>"#).unwrap();
        let inner = outer.query_all("div").unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].attribute("class"), Some("inner"));
    }
}
