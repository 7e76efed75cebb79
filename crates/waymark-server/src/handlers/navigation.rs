//! Navigation API endpoint.
//!
//! Returns menu items for rendering navigation in the requested language.
//! Hidden pages are not included.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use waymark_tree::NavItem;

use crate::state::AppState;

/// Query parameters for GET /api/navigation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Restrict the response to one structure; omitted means all.
    structure: Option<String>,
    /// Requested language code.
    lang: Option<String>,
}

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// The language the items are rendered in.
    language: String,
    /// Navigation tree items.
    items: Vec<NavItem>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationResponse> {
    let language = state.select_language(query.lang.as_deref());

    let items = match &query.structure {
        Some(structure) => state.tree.navigation(structure, language),
        None => state
            .tree
            .structures()
            .map(|id| {
                let node = state.tree.node(id);
                NavItem {
                    title: node
                        .display
                        .get(language)
                        .unwrap_or(&node.name)
                        .to_owned(),
                    url: None,
                    children: state.tree.navigation(&node.name, language),
                }
            })
            .collect(),
    };

    Json(NavigationResponse {
        language: language.to_owned(),
        items,
    })
}
