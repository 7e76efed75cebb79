//! Page resolution and dispatch.
//!
//! Every path under the root resolves against the navigation tree: unknown
//! paths are 404, restricted pages the requester may not access are 403,
//! known pages requested under a non-canonical URL (another language's URL
//! or one with different slashing) redirect to the canonical URL of the
//! selected language, and canonical requests dispatch to the registered
//! handler or a default response.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use waymark_tree::{NavItem, NavTree, Node};

use crate::error::ServerError;
use crate::handlers::{LangQuery, escape_html, to_url_path};
use crate::registry::{FRONTPAGE_KEY, PageContext};
use crate::state::AppState;

/// Handle GET / (front page).
///
/// Dispatches to the handler registered under `frontpage`, falling back to
/// a generated index of the whole site.
pub(crate) async fn get_frontpage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Response {
    let language = state.select_language(query.lang.as_deref());

    if let Some(handler) = state.handlers.get(FRONTPAGE_KEY) {
        let ctx = PageContext {
            tree: &state.tree,
            node: None,
            language,
        };
        return handler(&ctx);
    }

    default_index(&state.tree, language)
}

/// Handle GET /{*path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let language = state.select_language(query.lang.as_deref());

    let Some(node) = state.tree.find_node(&path) else {
        return Err(ServerError::PageNotFound(path));
    };

    let groups = state.access.groups(&headers);
    if !state.tree.is_authorized(node, &groups) {
        return Err(ServerError::Forbidden(path));
    }

    // Redirect to the canonical URL of the selected language. The redirect
    // carries the language selection so the target resolves the same way.
    if let Some(canonical) = state.tree.canonical_url(node, language)
        && path.trim_matches('/') != canonical
    {
        let target = if query.lang.is_some() {
            format!("{}?lang={language}", to_url_path(canonical))
        } else {
            to_url_path(canonical)
        };
        return Ok(Redirect::to(&target).into_response());
    }

    let page_node = state.tree.node(node);
    if let Some(page) = page_node.page()
        && page.has_handler
        && let Some(handler) = state.handlers.get(&page.handler_key)
    {
        let ctx = PageContext {
            tree: &state.tree,
            node: Some(node),
            language,
        };
        return Ok(handler(&ctx));
    }

    Ok(default_page(page_node, language))
}

/// Default response for a page without a handler: its localized title.
fn default_page(node: &Node, language: &str) -> Response {
    let title = node.display.get(language).unwrap_or(&node.name);
    Html(format!("<h1>{}</h1>\n", escape_html(title))).into_response()
}

/// Default front page: the visible navigation of every structure.
fn default_index(tree: &NavTree, language: &str) -> Response {
    let mut html = String::from("<h1>Index</h1>\n");
    for structure in tree.structures() {
        let node = tree.node(structure);
        let title = node.display.get(language).unwrap_or(&node.name);
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
        render_items(&mut html, &tree.navigation(&node.name, language));
    }
    Html(html).into_response()
}

/// Render menu items as a nested list.
fn render_items(html: &mut String, items: &[NavItem]) {
    if items.is_empty() {
        return;
    }
    html.push_str("<ul>\n");
    for item in items {
        match &item.url {
            Some(url) => html.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                to_url_path(url),
                escape_html(&item.title)
            )),
            None => {
                html.push_str(&format!("<li>{}\n", escape_html(&item.title)));
                render_items(html, &item.children);
                html.push_str("</li>\n");
            }
        }
    }
    html.push_str("</ul>\n");
}
