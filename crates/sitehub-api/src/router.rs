//! Route definitions for the SiteHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`, each
//! with the trailing slash the public site expects.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use sitehub_entity::content::{
    Award, Blog, Career, CaseStudy, CompanyInfo, Consultation, ContentRecord, Message, News,
    Partner, Review, TeamMember,
};

use crate::handlers::{self, content::ContentState};
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and request middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(content_routes())
        .merge(action_routes())
        .merge(application_routes())
        .merge(proposal_routes())
        .merge(account_routes())
        .merge(newsletter_routes())
        .merge(team_routes())
        .route("/dashboard/stats/", get(handlers::dashboard::stats))
        .route("/health/", get(handlers::health::health));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// List/create plus retrieve/replace/patch/delete for one content kind.
fn crud<T>(collection: &str) -> Router<AppState>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    use handlers::content as h;
    Router::new()
        .route(&format!("/{collection}/"), get(h::list::<T>).post(h::create::<T>))
        .route(
            &format!("/{collection}/{{id}}/"),
            get(h::retrieve::<T>)
                .put(h::replace::<T>)
                .patch(h::patch::<T>)
                .delete(h::delete::<T>),
        )
}

/// Submissions from visitors: no update routes.
fn leads<T>(collection: &str) -> Router<AppState>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    use handlers::content as h;
    Router::new()
        .route(&format!("/{collection}/"), get(h::list::<T>).post(h::create::<T>))
        .route(
            &format!("/{collection}/{{id}}/"),
            get(h::retrieve::<T>).delete(h::delete::<T>),
        )
}

/// Plain content collections
fn content_routes() -> Router<AppState> {
    use handlers::content as h;
    Router::new()
        .merge(leads::<Message>("messages"))
        .merge(crud::<Review>("reviews"))
        .merge(leads::<Consultation>("consultations"))
        .merge(crud::<Blog>("blogs"))
        .merge(crud::<News>("news"))
        .merge(crud::<Career>("careers"))
        .merge(crud::<Award>("awards"))
        .merge(crud::<CompanyInfo>("company-info"))
        .merge(crud::<Partner>("partners"))
        .route(
            "/case-studies/",
            get(h::list_paginated::<CaseStudy>).post(h::create::<CaseStudy>),
        )
        .route(
            "/case-studies/{id}/",
            get(h::retrieve::<CaseStudy>)
                .put(h::replace::<CaseStudy>)
                .patch(h::patch::<CaseStudy>)
                .delete(h::delete::<CaseStudy>),
        )
}

/// Per-kind actions on reviews and blogs
fn action_routes() -> Router<AppState> {
    use handlers::content as h;
    Router::new()
        .route("/reviews/{id}/toggle/", put(h::toggle_review))
        .route("/reviews/{id}/delete_review/", delete(h::delete::<Review>))
        .route("/blogs/{id}/like/", post(h::like_blog))
}

/// Career applications and their status actions
fn application_routes() -> Router<AppState> {
    use handlers::applications as h;
    Router::new()
        .route("/apply/", get(h::list).post(h::apply))
        .route(
            "/apply/{id}/",
            get(h::retrieve)
                .put(h::update)
                .patch(h::update)
                .delete(h::delete),
        )
        .route("/apply/{id}/shortlist/", post(h::shortlist))
        .route("/apply/{id}/reject/", post(h::reject))
        .route("/apply/{id}/hire/", post(h::hire))
}

/// Proposal requests and their actions
fn proposal_routes() -> Router<AppState> {
    use handlers::proposals as h;
    Router::new()
        .route("/proposals/", get(h::list).post(h::create))
        .route(
            "/proposals/{id}/",
            get(h::retrieve)
                .put(h::update)
                .patch(h::update)
                .delete(h::delete),
        )
        .route("/proposals/{id}/send_proposal/", post(h::send_proposal))
        .route("/proposals/{id}/mark_reviewed/", post(h::mark_reviewed))
}

/// Admin accounts, sessions and password reset
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/admins/", get(handlers::admins::list_admins))
        .route("/admin/create/", post(handlers::admins::create_admin))
        .route(
            "/admin/{id}/",
            get(handlers::admins::get_admin)
                .put(handlers::admins::update_admin)
                .patch(handlers::admins::update_admin),
        )
        .route("/admin/delete/{id}/", delete(handlers::admins::delete_admin))
        .route("/admin/login/", post(handlers::auth::login))
        .route("/admin/logout/", post(handlers::auth::logout))
        .route("/token/refresh/", post(handlers::auth::refresh))
        .route(
            "/password-reset/",
            post(handlers::auth::request_password_reset),
        )
        .route(
            "/password-reset-confirm/{uidb64}/{token}/",
            post(handlers::auth::confirm_password_reset),
        )
}

/// Newsletter subscription and broadcast
fn newsletter_routes() -> Router<AppState> {
    use handlers::newsletter as h;
    Router::new()
        .route("/subscribe/", post(h::subscribe))
        .route("/unsubscribe/{email}/", post(h::unsubscribe))
        .route("/list/subscribers/", get(h::list_subscribers))
        .route("/subscribers/delete/{id}/", delete(h::delete_subscriber))
        .route("/send-newsletter/", post(h::send_newsletter))
}

/// Team roster grouped by department
fn team_routes() -> Router<AppState> {
    use handlers::content as h;
    Router::new()
        .route(
            "/team/",
            get(handlers::team::grouped).post(h::create::<TeamMember>),
        )
        .route(
            "/team/{id}/",
            get(handlers::team::member)
                .put(h::replace::<TeamMember>)
                .patch(h::patch::<TeamMember>)
                .delete(h::delete::<TeamMember>),
        )
}
