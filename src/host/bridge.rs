use super::{HostIntegration, OfficeApplication, OfficeHost, WpsHost};

/// Attribute naming the host the page-side bridge found: `office` or `wps`
pub const HOST_ATTRIBUTE: &str = "data-host";
pub const OFFICE_APP_ATTRIBUTE: &str = "data-office-app";
pub const OFFICE_API_1_5_ATTRIBUTE: &str = "data-powerpoint-api-1-5";
pub const WPS_API_VERSION_ATTRIBUTE: &str = "data-wps-api-version";
pub const WPS_SLIDESHOW_WINDOWS_ATTRIBUTE: &str = "data-wps-slideshow-windows";

/// Build host candidates from what the page-side bridge reported.
///
/// `attribute` looks up a `data-*` attribute on the canvas element. Office
/// comes first, then WPS; hosts the bridge did not report are absent.
pub fn hosts_from_attributes(attribute: impl Fn(&str) -> Option<String>) -> Vec<Box<dyn HostIntegration>> {
    let host = attribute(HOST_ATTRIBUTE).map(|host| host.trim().to_ascii_lowercase());

    let office = match host.as_deref() {
        Some("office") => {
            let application = attribute(OFFICE_APP_ATTRIBUTE)
                .map(|name| OfficeApplication::from_name(&name))
                .unwrap_or(OfficeApplication::Other(String::new()));
            let api_1_5 = attribute(OFFICE_API_1_5_ATTRIBUTE).is_some_and(|value| value == "true");
            OfficeHost::new(application, api_1_5)
        }
        _ => OfficeHost::absent(),
    };

    let wps = match host.as_deref() {
        Some("wps") => {
            let api_version = attribute(WPS_API_VERSION_ATTRIBUTE)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0);
            let windows = attribute(WPS_SLIDESHOW_WINDOWS_ATTRIBUTE).and_then(|value| value.trim().parse().ok());
            WpsHost::new(api_version, windows)
        }
        _ => WpsHost::absent(),
    };

    if host.is_none() {
        log::warn!("Page did not report a presentation host");
    }

    vec![Box::new(office), Box::new(wps)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostKind, OverlaySession, Visibility};
    use std::collections::HashMap;

    fn attributes(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_host_reported_is_unsupported() {
        let session = OverlaySession::attach(hosts_from_attributes(attributes(&[])));
        assert_eq!(session.visibility(), Visibility::Unsupported);
    }

    #[test]
    fn test_office_powerpoint() {
        let hosts = hosts_from_attributes(attributes(&[
            (HOST_ATTRIBUTE, "office"),
            (OFFICE_APP_ATTRIBUTE, "PowerPoint"),
            (OFFICE_API_1_5_ATTRIBUTE, "true"),
        ]));
        let session = OverlaySession::attach(hosts);
        assert_eq!(session.host_kind(), Some(HostKind::Office));
        assert_eq!(session.visibility(), Visibility::Visible);
    }

    #[test]
    fn test_office_word_is_unsupported() {
        let hosts = hosts_from_attributes(attributes(&[
            (HOST_ATTRIBUTE, "office"),
            (OFFICE_APP_ATTRIBUTE, "Word"),
        ]));
        assert_eq!(OverlaySession::attach(hosts).visibility(), Visibility::Unsupported);
    }

    #[test]
    fn test_wps_without_slideshow_starts_hidden() {
        let hosts = hosts_from_attributes(attributes(&[
            (HOST_ATTRIBUTE, "WPS"),
            (WPS_API_VERSION_ATTRIBUTE, "1200"),
            (WPS_SLIDESHOW_WINDOWS_ATTRIBUTE, "0"),
        ]));
        let session = OverlaySession::attach(hosts);
        assert_eq!(session.host_kind(), Some(HostKind::Wps));
        assert_eq!(session.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_wps_unreadable_window_count_falls_back_to_visible() {
        let hosts = hosts_from_attributes(attributes(&[
            (HOST_ATTRIBUTE, "wps"),
            (WPS_API_VERSION_ATTRIBUTE, "1000"),
        ]));
        assert_eq!(OverlaySession::attach(hosts).visibility(), Visibility::Visible);
    }
}
