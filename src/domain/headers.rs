use crate::config::SiteProfile;

/// Builds the fixed header set sent with every voucher request.
pub fn build_headers(cookie: &str, site: &SiteProfile) -> Vec<(&'static str, String)> {
    vec![
        ("accept", "application/json".to_string()),
        ("content-type", "application/json".to_string()),
        ("origin", site.origin.clone()),
        ("referer", format!("{}/cart", site.origin.trim_end_matches('/'))),
        ("user-agent", site.user_agent.clone()),
        ("x-tenant-id", site.tenant_id.clone()),
        ("cookie", cookie.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(headers: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_profile_headers() {
        let headers = build_headers("a=1; b=2", &SiteProfile::default());

        assert_eq!(headers.len(), 7);
        assert_eq!(lookup(&headers, "accept"), Some("application/json"));
        assert_eq!(lookup(&headers, "content-type"), Some("application/json"));
        assert_eq!(lookup(&headers, "origin"), Some("https://www.sheinindia.in"));
        assert_eq!(
            lookup(&headers, "referer"),
            Some("https://www.sheinindia.in/cart")
        );
        assert_eq!(lookup(&headers, "x-tenant-id"), Some("SHEIN"));
        assert_eq!(lookup(&headers, "cookie"), Some("a=1; b=2"));
        assert!(lookup(&headers, "user-agent").unwrap().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_referer_ignores_trailing_slash() {
        let site = SiteProfile {
            origin: "http://127.0.0.1:8080/".to_string(),
            ..SiteProfile::default()
        };
        let headers = build_headers("", &site);
        assert_eq!(lookup(&headers, "referer"), Some("http://127.0.0.1:8080/cart"));
    }

    #[test]
    fn test_is_pure() {
        let site = SiteProfile::default();
        assert_eq!(build_headers("x=1", &site), build_headers("x=1", &site));
    }
}
