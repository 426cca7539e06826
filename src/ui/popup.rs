//! Popup HTML for markers and overlays. All interpolated text is escaped.

use crate::data::types::Poi;

/// Escapes text for inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<b>title</b>` optionally followed by `<br>body`
pub fn titled(title: &str, body: Option<&str>) -> String {
    let mut html = format!("<b>{}</b>", escape_html(title));
    if let Some(body) = body {
        html.push_str("<br>");
        html.push_str(&escape_html(body));
    }
    html
}

/// `<b>name</b><br>description`, plus the category in italics when set
pub fn poi_popup(poi: &Poi) -> String {
    let mut html = titled(&poi.name, Some(poi.description.as_deref().unwrap_or_default()));
    if let Some(category) = &poi.category {
        html.push_str(&format!("<br><i>Category: {}</i>", escape_html(category)));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_popup_layout() {
        let poi = Poi::new(1, "Red Rocks", -41.35, 174.73)
            .with_description("Seal colony")
            .with_category("coast");
        assert_eq!(
            poi_popup(&poi),
            "<b>Red Rocks</b><br>Seal colony<br><i>Category: coast</i>"
        );
        assert_eq!(poi_popup(&Poi::new(2, "Hut", 0.0, 0.0)), "<b>Hut</b><br>");
        assert_eq!(titled("Track", None), "<b>Track</b>");
    }

    #[test]
    fn test_text_is_escaped() {
        let poi = Poi::new(1, "<script>alert(1)</script>", 0.0, 0.0).with_description("Tom & Jerry's");
        assert_eq!(
            poi_popup(&poi),
            "<b>&lt;script&gt;alert(1)&lt;/script&gt;</b><br>Tom &amp; Jerry&#39;s"
        );
    }
}
