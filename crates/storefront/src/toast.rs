//! Toast notifications.

use askama::Template;
use xcommerce_core::ToastKind;

/// Id of the element toasts are appended to.
pub const CONTAINER_ID: &str = "toast-container";

/// Class shared by every toast element.
pub const TOAST_CLASS: &str = "toast-notification";

/// A notification to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    /// Class attribute of the toast element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!(
            "{TOAST_CLASS} p-4 rounded-lg shadow-lg text-white fade-in {}",
            self.kind.color_class()
        )
    }

    /// Inner markup: the escaped message and a dismiss button.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the template fails to render.
    pub fn render(&self) -> Result<String, askama::Error> {
        ToastTemplate {
            message: &self.message,
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "partials/toast.html")]
struct ToastTemplate<'a> {
    message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_by_kind() {
        assert!(Toast::success("ok").class_name().ends_with("bg-green-500"));
        assert!(Toast::error("no").class_name().ends_with("bg-red-500"));
        assert!(
            Toast::new("hm", ToastKind::default())
                .class_name()
                .starts_with("toast-notification ")
        );
    }

    #[test]
    fn test_render_escapes_message() {
        let html = Toast::error("<b>Out of stock</b>").render().unwrap();
        assert!(html.contains("&lt;b&gt;Out of stock&lt;/b&gt;"));
        assert!(html.contains("data-toast-dismiss"));
    }
}
