//! The boxed safety warning.

use crate::render::escape_html;

pub fn render_black_box(html: Option<&str>, product_name: Option<&str>) -> String {
    let mut out = String::from(
        "<div id=\"blackbox\"><p class=\"eyebrow\">Important Safety Information</p>\
         <h1>Black Box Warning</h1>",
    );
    match html.filter(|markup| !markup.trim().is_empty()) {
        Some(markup) => {
            out.push_str(&format!("<div class=\"blackbox-content\"><div>{markup}</div></div>"));
        }
        None => {
            let name = product_name.filter(|n| !n.is_empty()).unwrap_or("this product");
            out.push_str(&format!(
                "<p class=\"text-muted-foreground\">No black box warning content available for {}.</p>",
                escape_html(name)
            ));
        }
    }
    out.push_str("</div>");
    out
}
