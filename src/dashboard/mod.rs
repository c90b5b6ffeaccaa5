//! Dashboard module - decision dashboard web interface
//!
//! Provides a single-page dashboard for the horizon scores and the
//! underlying market data. Separated into HTML, CSS, and JS submodules for
//! maintainability.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: API calls, UI updates, user interactions
//!
//! # Features
//! - Decision score per horizon with signal badges
//! - Per-provider liveness indicators (live / stale / demo)
//! - 60-second auto-refresh aligned with the refresh cadence

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Market Pulse</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}
