use web_sys::window;

/// Get the base HTTP URL (e.g., "http://localhost:8080" or "https://panel.example.org")
pub fn get_base_url() -> String {
    let window = window().expect("no global window");
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:8080".to_string());

    format!("{}//{}", protocol, host)
}

/// Directory part of a page path ("/panel/index.html" -> "/panel/")
fn page_dir(pathname: &str) -> &str {
    match pathname.rfind('/') {
        Some(idx) => &pathname[..=idx],
        None => "/",
    }
}

/// Resolve a page-relative path against the current page
/// (e.g., "api.php?action=session" -> "https://host/panel/api.php?action=session")
pub fn page_url(path: &str) -> String {
    let pathname = window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    format!("{}{}{}", get_base_url(), page_dir(&pathname), path)
}

/// Hard navigation to another page of the site (e.g. "login.html")
pub fn redirect(page: &str) {
    let window = window().expect("no global window");
    if let Err(e) = window.location().set_href(page) {
        log::error!("Failed to redirect to {}: {:?}", page, e);
    }
}

/// Native confirmation prompt; a blocked prompt counts as "no"
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Set the page-wide cursor ("wait" while busy, "" to restore)
pub fn set_body_cursor(cursor: &str) {
    let body = window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let _ = body.style().set_property("cursor", cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::page_dir;

    #[test]
    fn page_dir_keeps_trailing_slash() {
        assert_eq!(page_dir("/panel/index.html"), "/panel/");
        assert_eq!(page_dir("/"), "/");
        assert_eq!(page_dir("/index.html"), "/");
        assert_eq!(page_dir(""), "/");
    }
}
