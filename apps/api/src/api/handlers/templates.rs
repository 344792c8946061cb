use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::library::Category;
use crate::domain::template::{RenderResult, Template, ValueBag};
use crate::suggestions::{merge_suggestions, SuggestionRequest};

/// Category summary for the catalog index
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template_count: usize,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            template_count: category.templates().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategorySummary>,
}

/// Template summary for listings
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub category_id: String,
    pub tags: Vec<String>,
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id().to_string(),
            name: template.name().to_string(),
            short_description: template.short_description().to_string(),
            category_id: template.category_id().to_string(),
            tags: template.tags().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ListTemplatesQuery {
    pub category: Option<String>,
}

/// Request body for rendering
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(rename = "placeholderValues", alias = "placeholder_values", default)]
    pub placeholder_values: ValueBag,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered_prompt: String,
    pub missing_required: Vec<String>,
}

impl From<RenderResult> for RenderResponse {
    fn from(result: RenderResult) -> Self {
        Self {
            rendered_prompt: result.rendered_text,
            missing_required: result.missing_required,
        }
    }
}

/// Request body for AI fill
#[derive(Debug, Default, Deserialize)]
pub struct AiFillRequest {
    #[serde(rename = "placeholderValues", alias = "placeholder_values", default)]
    pub placeholder_values: ValueBag,
    #[serde(alias = "targetKey", default)]
    pub target_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiFillResponse {
    pub suggested_values: ValueBag,
    pub reasoning: String,
    /// User values with the suggestions merged in
    pub placeholder_values: ValueBag,
    pub rendered_prompt: String,
    pub missing_required: Vec<String>,
}

fn find_template<'a>(state: &'a AppState, id: &str) -> Result<&'a Template, ApiError> {
    state
        .library
        .get_by_id(id)
        .ok_or_else(|| ApiError::not_found(format!("Template not found: {}", id)))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// List all categories
///
/// GET /api/templates/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .library
        .categories()
        .iter()
        .map(CategorySummary::from)
        .collect();

    Json(CategoriesResponse { categories })
}

/// List templates, optionally restricted to one category
///
/// GET /api/templates?category=ID
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Json<TemplatesResponse> {
    let templates = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state
            .library
            .list_by_category(category)
            .unwrap_or_default()
            .iter()
            .map(TemplateSummary::from)
            .collect(),
        None => state.library.list_all().map(TemplateSummary::from).collect(),
    };

    Json(TemplatesResponse { templates })
}

/// Get a full template by ID
///
/// GET /api/templates/:id
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let template = find_template(&state, &id)?;
    Ok(Json(template.clone()))
}

/// Render a template with the supplied values
///
/// POST /api/templates/:id/render
pub async fn render_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    let template = find_template(&state, &id)?;
    let req = json_body(payload)?;

    Ok(Json(template.render(&req.placeholder_values).into()))
}

/// Suggest values, merge them into the user's values and re-render
///
/// POST /api/templates/:id/ai-fill
pub async fn ai_fill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AiFillRequest>, JsonRejection>,
) -> Result<Json<AiFillResponse>, ApiError> {
    let template = find_template(&state, &id)?;
    let req = json_body(payload)?;
    let target_key = req.target_key.as_deref().filter(|key| !key.is_empty());

    let mut request = SuggestionRequest::new(template, &req.placeholder_values);
    if let Some(key) = target_key {
        request = request.with_target(key)?;
    }

    let suggestions = state.suggester.suggest(&request).await?;
    tracing::info!(
        template = template.id(),
        target = ?target_key,
        suggested = suggestions.values.len(),
        "AI fill completed"
    );

    let merged = merge_suggestions(
        template,
        &req.placeholder_values,
        &suggestions.values,
        target_key,
    );
    let rendered = template.render(&merged);

    Ok(Json(AiFillResponse {
        suggested_values: suggestions.values,
        reasoning: suggestions.reasoning,
        placeholder_values: merged,
        rendered_prompt: rendered.rendered_text,
        missing_required: rendered.missing_required,
    }))
}
