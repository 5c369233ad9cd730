//! JSON rendering for command results

use anyhow::Result;
use recipebox_domain::{AuthResponse, Page, Recipe, UserProfile};
use serde::Serialize;

/// One page of a recipe search
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub recipes: &'a [Recipe],
}

impl<'a> From<&'a Page<Recipe>> for PageView<'a> {
    fn from(page: &'a Page<Recipe>) -> Self {
        Self { page: page.page, total_pages: page.total_pages, recipes: &page.items }
    }
}

/// What login/register report back; the token itself is never printed.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<&'a UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

impl<'a> From<&'a AuthResponse> for SessionView<'a> {
    fn from(response: &'a AuthResponse) -> Self {
        Self {
            signed_in: response.session_token().is_some(),
            user: response.user.as_ref(),
            message: response.message.as_deref(),
        }
    }
}

pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", render(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn session_view_hides_token() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "secret",
            "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com"}
        }))
        .unwrap();

        let rendered = render(&SessionView::from(&response)).unwrap();

        assert!(!rendered.contains("secret"));
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["signed_in"], json!(true));
        assert_eq!(value["user"]["name"], json!("Ada"));
        assert!(value.get("message").is_none());
    }

    #[test]
    fn page_view_carries_position() {
        let page = Page { items: Vec::<Recipe>::new(), page: 2, total_pages: 3 };
        let value: Value = serde_json::from_str(&render(&PageView::from(&page)).unwrap()).unwrap();

        assert_eq!(value, json!({"page": 2, "total_pages": 3, "recipes": []}));
    }
}
