use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use minijinja::context;
use serde::Deserialize;

use crate::{
    middleware::anti_forgery::{self, AntiForgeryToken},
    models::{FieldError, UserInput},
    services::UserService,
    utils::AppError,
    views::Views,
};

const INDEX_PATH: &str = "/User";

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
}

/// Body of the create and edit forms.
#[derive(Deserialize)]
pub struct UserForm {
    #[serde(rename = "__RequestVerificationToken", default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserForm {
    fn input(&self) -> UserInput {
        UserInput {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Body of the delete confirmation form.
#[derive(Deserialize)]
pub struct ConfirmForm {
    #[serde(rename = "__RequestVerificationToken", default)]
    pub token: Option<String>,
}

fn redirect_to_index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", INDEX_PATH))
        .finish()
}

fn user_not_found(views: &Views, id: i64) -> Result<HttpResponse, AppError> {
    log::warn!("⚠️ User {} not found", id);
    views.not_found(&format!("No user with id {}.", id))
}

/// Renders the create/edit form. `token` is set as cookie on the response.
fn render_form(
    views: &Views,
    token: &AntiForgeryToken,
    heading: &str,
    action: &str,
    input: &UserInput,
    errors: &[FieldError],
) -> Result<HttpResponse, AppError> {
    let mut response = views.page(
        StatusCode::OK,
        "user/form.html",
        context! {
            heading => heading,
            action => action,
            token => &token.value,
            user => input,
            errors => errors,
        },
    )?;
    response
        .add_cookie(&token.cookie())
        .map_err(|e| AppError::Internal(format!("failed to set cookie: {}", e)))?;
    Ok(response)
}

/// GET /User - Lista todos os usuários
pub async fn index(
    users: web::Data<UserService>,
    views: web::Data<Views>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /User - Listing users");

    let all = users.list_users()?;
    views.page(
        StatusCode::OK,
        "user/index.html",
        context! { users => all, search_string => "" },
    )
}

/// GET /User/Search?searchString= - Filtra por nome ou email
pub async fn search(
    users: web::Data<UserService>,
    views: web::Data<Views>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let search_string = query.into_inner().search_string.unwrap_or_default();
    log::info!("🔍 GET /User/Search - '{}'", search_string);

    let found = users.search_users(Some(&search_string))?;
    views.page(
        StatusCode::OK,
        "user/index.html",
        context! { users => found, search_string => search_string },
    )
}

/// GET /User/Details/{id}
pub async fn details(
    users: web::Data<UserService>,
    views: web::Data<Views>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("👤 GET /User/Details/{}", id);

    match users.get_user(id) {
        Ok(user) => views.page(StatusCode::OK, "user/details.html", context! { user => user }),
        Err(AppError::NotFound(_)) => user_not_found(&views, id),
        Err(e) => Err(e),
    }
}

/// GET /User/Create - Formulário vazio
pub async fn create_form(req: HttpRequest, views: web::Data<Views>) -> Result<HttpResponse, AppError> {
    log::info!("📝 GET /User/Create");
    let token = AntiForgeryToken::for_request(&req);
    render_form(&views, &token, "Create", "/User/Create", &UserInput::default(), &[])
}

/// POST /User/Create
pub async fn create(
    req: HttpRequest,
    users: web::Data<UserService>,
    views: web::Data<Views>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    anti_forgery::verify(&req, form.token.as_deref())?;

    let input = form.input();
    match input.validate() {
        Ok(new_user) => {
            let user = users.create_user(new_user)?;
            log::info!("✅ User created: {} ({})", user.id, user.name);
            Ok(redirect_to_index())
        }
        Err(errors) => {
            log::info!("📝 POST /User/Create - {} validation error(s)", errors.len());
            let token = AntiForgeryToken::for_request(&req);
            render_form(&views, &token, "Create", "/User/Create", &input, &errors)
        }
    }
}

/// GET /User/Edit/{id} - Formulário preenchido
pub async fn edit_form(
    req: HttpRequest,
    users: web::Data<UserService>,
    views: web::Data<Views>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("📝 GET /User/Edit/{}", id);

    match users.get_user(id) {
        Ok(user) => {
            let token = AntiForgeryToken::for_request(&req);
            let action = format!("/User/Edit/{}", id);
            render_form(&views, &token, "Edit", &action, &UserInput::from(&user), &[])
        }
        Err(AppError::NotFound(_)) => user_not_found(&views, id),
        Err(e) => Err(e),
    }
}

/// POST /User/Edit/{id}
///
/// A missing record is reported before the form is validated.
pub async fn edit(
    req: HttpRequest,
    users: web::Data<UserService>,
    views: web::Data<Views>,
    path: web::Path<i64>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    anti_forgery::verify(&req, form.token.as_deref())?;
    let id = path.into_inner();

    match users.get_user(id) {
        Ok(_) => {}
        Err(AppError::NotFound(_)) => return user_not_found(&views, id),
        Err(e) => return Err(e),
    }

    let input = form.input();
    let changes = match input.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            log::info!("📝 POST /User/Edit/{} - {} validation error(s)", id, errors.len());
            let token = AntiForgeryToken::for_request(&req);
            let action = format!("/User/Edit/{}", id);
            return render_form(&views, &token, "Edit", &action, &input, &errors);
        }
    };

    match users.update_user(id, changes) {
        Ok(user) => {
            log::info!("✅ User updated: {} ({})", user.id, user.name);
            Ok(redirect_to_index())
        }
        Err(AppError::NotFound(_)) => user_not_found(&views, id),
        Err(e) => Err(e),
    }
}

/// GET /User/Delete/{id} - Página de confirmação
pub async fn delete_confirm(
    req: HttpRequest,
    users: web::Data<UserService>,
    views: web::Data<Views>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  GET /User/Delete/{} - confirmation", id);

    let user = match users.get_user(id) {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return user_not_found(&views, id),
        Err(e) => return Err(e),
    };

    let token = AntiForgeryToken::for_request(&req);
    let mut response = views.page(
        StatusCode::OK,
        "user/delete.html",
        context! { user => user, token => &token.value },
    )?;
    response
        .add_cookie(&token.cookie())
        .map_err(|e| AppError::Internal(format!("failed to set cookie: {}", e)))?;
    Ok(response)
}

/// POST /User/Delete/{id} - Remove (no-op se não existir)
pub async fn delete(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
    form: web::Form<ConfirmForm>,
) -> Result<HttpResponse, AppError> {
    anti_forgery::verify(&req, form.token.as_deref())?;
    let id = path.into_inner();

    if users.delete_user(id)? {
        log::info!("🗑️  User {} deleted", id);
    } else {
        log::info!("ℹ️  DELETE /User/Delete/{} - nothing to delete", id);
    }
    Ok(redirect_to_index())
}
