use askama::Template;
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::{
    csrf,
    form::{FieldErrors, PostForm},
    models::{format_post_date, BlogPost},
    Error, Result,
};

use super::AppState;

const NEW_POST_PAGE: &str = "New Post";
const EDIT_POST_PAGE: &str = "Edit Post";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    posts: Vec<BlogPost>,
    csrf_token: String,
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate {
    post: BlogPost,
    csrf_token: String,
}

#[derive(Template)]
#[template(path = "make-post.html")]
struct MakePostTemplate {
    page: &'static str,
    action: String,
    form: PostForm,
    errors: FieldErrors,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CsrfParams {
    pub csrf_token: String,
}

fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template error: {}", e))
    })?))
}

/// Ids that are not integers name no post.
type PostIdPath = std::result::Result<Path<i64>, PathRejection>;

fn post_id(path: PostIdPath) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|_| Error::NotFound)
}

fn post_form_page(
    status: StatusCode,
    page: &'static str,
    action: String,
    form: PostForm,
    errors: FieldErrors,
) -> Result<Response> {
    let template = MakePostTemplate {
        page,
        action,
        form,
        errors,
    };
    Ok((status, render(&template)?).into_response())
}

fn title_taken(
    page: &'static str,
    action: String,
    form: PostForm,
    message: String,
) -> Result<Response> {
    let mut errors = FieldErrors::default();
    errors.add("title", message);
    post_form_page(StatusCode::CONFLICT, page, action, form, errors)
}

pub async fn index(State(state): State<Arc<AppState>>, cookies: Cookies) -> Result<Response> {
    let posts = state.posts.list_all().await?;
    let csrf_token = csrf::issue_token(&cookies, &state.cookie_key);

    let template = IndexTemplate { posts, csrf_token };
    Ok(render(&template)?.into_response())
}

pub async fn show_post(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    path: PostIdPath,
) -> Result<Response> {
    let post = state.posts.get(post_id(path)?).await?;
    let csrf_token = csrf::issue_token(&cookies, &state.cookie_key);

    let template = PostTemplate { post, csrf_token };
    Ok(render(&template)?.into_response())
}

pub async fn new_post_form(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Response> {
    let csrf_token = csrf::issue_token(&cookies, &state.cookie_key);
    post_form_page(
        StatusCode::OK,
        NEW_POST_PAGE,
        "/new_post".to_string(),
        PostForm::blank(csrf_token),
        FieldErrors::default(),
    )
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    csrf::verify_token(&cookies, &state.cookie_key, &form.csrf_token)?;
    let action = "/new_post".to_string();

    let fields = match form.validated() {
        Ok(fields) => fields,
        Err(errors) => {
            return post_form_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                NEW_POST_PAGE,
                action,
                form,
                errors,
            )
        }
    };

    let date = format_post_date((state.today)());
    match state.posts.create(&fields.with_date(date)).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(Error::UniqueConstraintViolation(msg)) => title_taken(NEW_POST_PAGE, action, form, msg),
        Err(e) => Err(e),
    }
}

pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    path: PostIdPath,
) -> Result<Response> {
    let id = post_id(path)?;
    let post = state.posts.get(id).await?;
    let csrf_token = csrf::issue_token(&cookies, &state.cookie_key);

    post_form_page(
        StatusCode::OK,
        EDIT_POST_PAGE,
        format!("/edit_post/{}", id),
        PostForm::from_post(&post, csrf_token),
        FieldErrors::default(),
    )
}

/// Handles both POST and PATCH. The date is restamped on every edit.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    path: PostIdPath,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let id = post_id(path)?;
    state.posts.get(id).await?;
    csrf::verify_token(&cookies, &state.cookie_key, &form.csrf_token)?;
    let action = format!("/edit_post/{}", id);

    let fields = match form.validated() {
        Ok(fields) => fields,
        Err(errors) => {
            return post_form_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                EDIT_POST_PAGE,
                action,
                form,
                errors,
            )
        }
    };

    let date = format_post_date((state.today)());
    match state.posts.update(id, &fields.with_date(date)).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(Error::UniqueConstraintViolation(msg)) => {
            title_taken(EDIT_POST_PAGE, action, form, msg)
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    path: PostIdPath,
    Form(params): Form<CsrfParams>,
) -> Result<Response> {
    remove_post(&state, &cookies, post_id(path)?, &params.csrf_token).await
}

/// GET and DELETE carry the token in the query string.
pub async fn delete_post_by_query(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    path: PostIdPath,
    Query(params): Query<CsrfParams>,
) -> Result<Response> {
    remove_post(&state, &cookies, post_id(path)?, &params.csrf_token).await
}

async fn remove_post(
    state: &AppState,
    cookies: &Cookies,
    id: i64,
    csrf_token: &str,
) -> Result<Response> {
    csrf::verify_token(cookies, &state.cookie_key, csrf_token)?;
    state.posts.delete(id).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn about() -> AboutTemplate {
    AboutTemplate
}

pub async fn contact() -> ContactTemplate {
    ContactTemplate
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
