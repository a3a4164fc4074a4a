//! Firmware info document URLs.

/// Default firmware info host.
pub const DEFAULT_HOST: &str = "fw.iot-dev.alchemy.codes";
/// Host used for devices sold in China.
pub const CHINA_HOST: &str =
    "email-assets-271825783008-cn-north-1.s3.cn-north-1.amazonaws.com.cn";

/// Build the firmware info document URL for a device model.
///
/// Without an explicit host, Chinese locales ("cn", "hk", "mo") route to the
/// China host and everything else to the default host.
pub fn info_url(model: u16, host: Option<&str>, locale: Option<&str>) -> String {
    let host = host.unwrap_or_else(|| match locale {
        Some("cn") | Some("hk") | Some("mo") => CHINA_HOST,
        _ => DEFAULT_HOST,
    });
    format!("{host}/oralb/0x{model:04X}/0x{model:04X}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_url_default_host() {
        assert_eq!(
            info_url(0x3C10, None, None),
            "fw.iot-dev.alchemy.codes/oralb/0x3C10/0x3C10.json"
        );
        assert_eq!(
            info_url(0x3C10, None, Some("de")),
            "fw.iot-dev.alchemy.codes/oralb/0x3C10/0x3C10.json"
        );
    }

    #[test]
    fn test_info_url_china_locales() {
        for locale in ["cn", "hk", "mo"] {
            assert!(info_url(0x3C10, None, Some(locale)).starts_with(CHINA_HOST));
        }
    }

    #[test]
    fn test_info_url_explicit_host_wins() {
        assert_eq!(
            info_url(0x0001, Some("example.org"), Some("cn")),
            "example.org/oralb/0x0001/0x0001.json"
        );
    }
}
