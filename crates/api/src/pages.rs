//! Server-rendered HTML pages: sign-in, forbidden, dashboard shell, 404.
//!
//! Every interpolated value goes through [`escape_html`].

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use codetimes_core::gate::{CALLBACK_PARAM, SIGNIN_PATH};
use codetimes_core::html::escape_html;

/// Dashboard sections, in navigation order: (fragment, label).
pub const ADMIN_SECTIONS: [(&str, &str); 5] = [
    ("blog", "Blog Posts"),
    ("hero", "Hero Section"),
    ("teaching", "Teaching"),
    ("subscribers", "Subscribers"),
    ("email", "Email"),
];

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <meta name=\"robots\" content=\"noindex\">\n<title>{title}</title>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Sign-in form. `callback` is echoed back in a hidden field.
pub fn signin_page(callback: &str, error: Option<&str>) -> Html<String> {
    let error_html = error
        .map(|e| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape_html(e)))
        .unwrap_or_default();

    let body = format!(
        "<main class=\"signin\">\n<h1>Admin sign in</h1>\n{error_html}\
         <form method=\"post\" action=\"{SIGNIN_PATH}\">\n\
         <input type=\"hidden\" name=\"{CALLBACK_PARAM}\" value=\"{callback}\">\n\
         <label>Email <input type=\"email\" name=\"email\" autocomplete=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" autocomplete=\"current-password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n</form>\n</main>",
        callback = escape_html(callback),
    );
    Html(layout("Admin sign in", &body))
}

/// The forbidden page. Served with 200 when the gate rewrites a request.
pub fn forbidden_page() -> Html<String> {
    Html(layout(
        "403 Forbidden",
        "<main>\n<h1>403 - Forbidden</h1>\n<p>You don't have permission to view this page.</p>\n</main>",
    ))
}

/// Dashboard shell for a signed-in admin.
pub fn admin_shell(email: &str) -> Html<String> {
    let nav: String = ADMIN_SECTIONS
        .iter()
        .map(|(key, label)| format!("<li><a href=\"#{key}\">{label}</a></li>"))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        "<header>\n<h1>The Code Times admin</h1>\n<p>Signed in as {email}</p>\n\
         <form method=\"post\" action=\"/auth/signout\"><button type=\"submit\">Sign out</button></form>\n\
         </header>\n<nav>\n<ul>\n{nav}\n</ul>\n</nav>\n<main id=\"admin-root\" data-api=\"/api/v1\"></main>",
        email = escape_html(email),
    );
    Html(layout("Admin", &body))
}

pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(layout(
            "Page not found",
            "<main>\n<h1>404 - Not Found</h1>\n<p>This page could not be found.</p>\n</main>",
        )),
    )
        .into_response()
}
