//! HTML pages rendered with Askama.

use askama::Template;
use askama_web::WebTemplate;

/// Page shown instead of a redirect when resolution fails.
///
/// Renders `templates/redirect_error.html`. The caller pairs it with the
/// matching status code.
#[derive(Template, WebTemplate)]
#[template(path = "redirect_error.html")]
pub struct RedirectErrorPage {
    pub title: &'static str,
    pub message: String,
    /// Shortener entry point offered as the way back.
    pub back_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_renders_message_and_back_link() {
        let page = RedirectErrorPage {
            title: "Link expired",
            message: "The short link \"abc123\" is no longer valid.".to_string(),
            back_url: "https://s.example.com/".to_string(),
        };

        let html = page.render().unwrap();
        assert!(html.contains("Link expired"));
        assert!(html.contains("abc123"));
        assert!(html.contains("Back to the shortener"));
        assert!(html.contains("s.example.com"));
    }

    #[test]
    fn test_page_escapes_code() {
        let page = RedirectErrorPage {
            title: "Link not found",
            message: "There is no short link called \"<script>\".".to_string(),
            back_url: "/".to_string(),
        };

        let html = page.render().unwrap();
        assert!(!html.contains("<script>"));
    }
}
