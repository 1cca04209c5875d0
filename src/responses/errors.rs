use astra::{Body, Response, ResponseBuilder};

use crate::errors::AppError;

pub type ResultResp = Result<Response, AppError>;

/// Convert an AppError into a proper HTML response
pub fn error_to_response(err: AppError) -> Response {
    match err {
        AppError::NotFound => render_error(404, "Not Found"),

        AppError::Validation(msg) => render_error(400, &msg),

        AppError::Storage(msg) => render_error(500, &format!("Storage Error: {msg}")),

        AppError::Transport(msg) => render_error(500, &format!("Mail Error: {msg}")),

        AppError::Config(msg) => render_error(500, &format!("Config Error: {msg}")),
    }
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Error {status}</title>
  <style>
    body {{
      font-family: system-ui, sans-serif;
      max-width: 720px;
      margin: 4rem auto;
      padding: 1rem;
    }}
    h1 {{
      font-size: 2rem;
      margin-bottom: 1rem;
    }}
  </style>
</head>
<body>
  <h1>Error {status}</h1>
  <p>{message}</p>
  <p><a href="/">Back to orders</a></p>
</body>
</html>"#
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .unwrap()
}
