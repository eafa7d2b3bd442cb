//! Page handlers.
//!
//! The login and sign-up pages are bare forms that post JSON to the auth
//! API routes and follow the returned redirect.

use axum::Json;
use axum::response::Html;

use crate::auth::SessionContext;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<form data-endpoint="/api/auth/login">
  <label>Email <input id="email" type="email" required></label>
  <label>Password <input id="password" type="password" required></label>
  <p data-error></p>
  <button type="submit">Sign in</button>
</form>
<p><a href="/sign-up">Create an account</a></p>
<script src="/api/assets/forms.js"></script>
</body>
</html>
"#;

const SIGN_UP_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Create an account</title></head>
<body>
<form data-endpoint="/api/auth/register">
  <label>Name <input id="name" required></label>
  <label>Email <input id="email" type="email" required></label>
  <label>Password <input id="password" type="password" required></label>
  <label>Confirm password <input id="confirmPassword" type="password" required></label>
  <p data-error></p>
  <button type="submit">Sign up</button>
</form>
<p><a href="/login">Already have an account?</a></p>
<script src="/api/assets/forms.js"></script>
</body>
</html>
"#;

/// Posts the form's inputs as JSON, follows `redirect` on success and shows
/// the first error otherwise.
pub const FORMS_SCRIPT: &str = r#"document.querySelectorAll("form[data-endpoint]").forEach((form) => {
  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    const body = {};
    form.querySelectorAll("input[id]").forEach((input) => { body[input.id] = input.value; });
    const output = form.querySelector("[data-error]");
    output.textContent = "";
    const response = await fetch(form.dataset.endpoint, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    const result = await response.json().catch(() => ({}));
    if (response.ok && result.redirect) {
      window.location.assign(result.redirect);
      return;
    }
    const errors = result.errors ? Object.values(result.errors) : [];
    output.textContent = result.form || errors[0] || "Something went wrong. Please try again.";
  });
});
"#;

/// `GET /login`
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// `GET /sign-up`
pub async fn sign_up_page() -> Html<&'static str> {
    Html(SIGN_UP_PAGE)
}

/// `GET /api/assets/forms.js`
pub async fn forms_script() -> ([(axum::http::HeaderName, &'static str); 1], &'static str) {
    (
        [(axum::http::header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        FORMS_SCRIPT,
    )
}

/// `GET /home`: the signed-in user's session, as the gate decoded it.
pub async fn home(session: SessionContext) -> Json<SessionContext> {
    Json(session)
}
